//! Operation status state machine
//!
//! One lifecycle per operation family, published over a watch channel so the
//! UI observes transitions without callbacks threaded through the pipeline:
//!
//! ```text
//! Idle -> Preparing -> Pending -> Confirming -> Success | Error | Cancelled
//! ```
//!
//! `Cancelled` is reached exactly when the classified failure is a user
//! rejection. Terminal states are mutually exclusive per attempt; returning
//! to `Idle` requires an explicit reset, which also clears the rejection
//! notification latch.

use crate::error::LaunchpadError;
use crate::types::OperationFamily;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

/// Lifecycle of one operation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    /// No attempt in flight
    #[default]
    Idle,
    /// Pre-signature work: validation, allowance, quoting
    Preparing,
    /// Transaction hash exists, broadcast not yet awaited
    Pending,
    /// Receipt wait in progress
    Confirming,
    /// Receipt confirmed and decoded
    Success,
    /// Failed for any reason other than user rejection
    Error,
    /// User declined the wallet prompt
    Cancelled,
}

impl OperationStatus {
    /// Whether this is a terminal state for the attempt
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step
    ///
    /// Reset (anything back to `Idle`) is not a transition; it goes through
    /// [`StatusBoard::reset`].
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Preparing)
                | (Self::Preparing, Self::Pending)
                | (Self::Preparing, Self::Error)
                | (Self::Preparing, Self::Cancelled)
                | (Self::Pending, Self::Confirming)
                | (Self::Pending, Self::Error)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirming, Self::Success)
                | (Self::Confirming, Self::Error)
                | (Self::Confirming, Self::Cancelled)
        )
    }
}

struct FamilySlot {
    sender: watch::Sender<OperationStatus>,
    rejection_notified: bool,
}

impl FamilySlot {
    fn new() -> Self {
        let (sender, _) = watch::channel(OperationStatus::Idle);
        Self {
            sender,
            rejection_notified: false,
        }
    }
}

/// Per-family status registry with transition enforcement
#[derive(Default)]
pub struct StatusBoard {
    slots: Mutex<HashMap<OperationFamily, FamilySlot>>,
}

impl StatusBoard {
    /// Create an empty board; families materialize on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status for a family
    pub fn current(&self, family: OperationFamily) -> OperationStatus {
        let mut slots = self.slots.lock().unwrap();
        let status = *slots
            .entry(family)
            .or_insert_with(FamilySlot::new)
            .sender
            .borrow();
        status
    }

    /// Subscribe to a family's status transitions
    pub fn subscribe(&self, family: OperationFamily) -> watch::Receiver<OperationStatus> {
        let mut slots = self.slots.lock().unwrap();
        slots
            .entry(family)
            .or_insert_with(FamilySlot::new)
            .sender
            .subscribe()
    }

    /// Start a new attempt: force the slot to `Preparing` and clear the latch
    ///
    /// A new attempt on a family implicitly supersedes whatever the slot
    /// showed before; this is the orchestrator's reset.
    pub fn begin(&self, family: OperationFamily) {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(family).or_insert_with(FamilySlot::new);
        slot.rejection_notified = false;
        slot.sender.send_replace(OperationStatus::Preparing);
    }

    /// Apply a lifecycle step if legal; returns whether it was applied
    pub fn advance(&self, family: OperationFamily, next: OperationStatus) -> bool {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(family).or_insert_with(FamilySlot::new);
        let current = *slot.sender.borrow();
        if !current.can_transition(next) {
            tracing::debug!(?family, ?current, ?next, "illegal status transition ignored");
            return false;
        }
        slot.sender.send_replace(next);
        true
    }

    /// Settle the attempt with a classified failure
    ///
    /// Moves to `Cancelled` for user rejections, `Error` otherwise. Returns
    /// whether the failure should be surfaced: repeat observations of the
    /// same rejection within one attempt are suppressed by the latch.
    pub fn settle_err(&self, family: OperationFamily, err: &LaunchpadError) -> bool {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(family).or_insert_with(FamilySlot::new);
        let current = *slot.sender.borrow();

        let terminal = if err.is_user_rejection() {
            OperationStatus::Cancelled
        } else {
            OperationStatus::Error
        };

        if current.can_transition(terminal) {
            slot.sender.send_replace(terminal);
        }

        if err.is_user_rejection() {
            if slot.rejection_notified {
                return false;
            }
            slot.rejection_notified = true;
        }
        true
    }

    /// Explicit reset back to `Idle`, clearing the latch
    pub fn reset(&self, family: OperationFamily) {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(family).or_insert_with(FamilySlot::new);
        slot.rejection_notified = false;
        slot.sender.send_replace(OperationStatus::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OperationStatus::*;

    const FAMILY: OperationFamily = OperationFamily::Trade;

    #[test]
    fn test_lifecycle_happy_path() {
        let board = StatusBoard::new();
        board.begin(FAMILY);
        assert_eq!(board.current(FAMILY), Preparing);
        assert!(board.advance(FAMILY, Pending));
        assert!(board.advance(FAMILY, Confirming));
        assert!(board.advance(FAMILY, Success));
        assert_eq!(board.current(FAMILY), Success);
    }

    #[test]
    fn test_no_second_terminal_state() {
        let board = StatusBoard::new();
        board.begin(FAMILY);
        board.advance(FAMILY, Pending);
        board.advance(FAMILY, Confirming);
        assert!(board.advance(FAMILY, Error));
        // Terminal is sticky until reset
        assert!(!board.advance(FAMILY, Success));
        assert!(!board.advance(FAMILY, Cancelled));
        assert_eq!(board.current(FAMILY), Error);
    }

    #[test]
    fn test_skipping_states_is_illegal() {
        let board = StatusBoard::new();
        board.begin(FAMILY);
        assert!(!board.advance(FAMILY, Confirming));
        assert!(!board.advance(FAMILY, Success));
        assert_eq!(board.current(FAMILY), Preparing);
    }

    #[test]
    fn test_cancelled_iff_user_rejection() {
        let board = StatusBoard::new();
        board.begin(FAMILY);
        board.settle_err(FAMILY, &LaunchpadError::UserRejected);
        assert_eq!(board.current(FAMILY), Cancelled);

        board.reset(FAMILY);
        board.begin(FAMILY);
        board.settle_err(FAMILY, &LaunchpadError::InvalidAmount);
        assert_eq!(board.current(FAMILY), Error);
    }

    #[test]
    fn test_rejection_notice_deduplicated() {
        let board = StatusBoard::new();
        board.begin(FAMILY);

        // Submission path and receipt-wait path both observe the rejection;
        // only the first surfaces it.
        assert!(board.settle_err(FAMILY, &LaunchpadError::UserRejected));
        assert!(!board.settle_err(FAMILY, &LaunchpadError::UserRejected));

        // A new attempt clears the latch
        board.begin(FAMILY);
        assert!(board.settle_err(FAMILY, &LaunchpadError::UserRejected));
    }

    #[test]
    fn test_families_are_independent() {
        let board = StatusBoard::new();
        board.begin(OperationFamily::Trade);
        board.begin(OperationFamily::Contribute);
        board.advance(OperationFamily::Trade, Pending);
        assert_eq!(board.current(OperationFamily::Trade), Pending);
        assert_eq!(board.current(OperationFamily::Contribute), Preparing);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let board = StatusBoard::new();
        let mut rx = board.subscribe(FAMILY);
        assert_eq!(*rx.borrow(), Idle);

        board.begin(FAMILY);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Preparing);

        board.advance(FAMILY, Pending);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Pending);
    }
}
