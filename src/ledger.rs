//! Optimistic participant ledger
//!
//! Locally-submitted contributions show up here immediately and are later
//! resolved against the authoritative subgraph feed. Entries live at most 60
//! seconds; a background sweep evicts stragglers and reconciliation removes
//! any entry whose transaction hash the indexer has caught up with. The
//! ledger is purely additive over the authoritative history - it never
//! replaces a confirmed record, and a reconciled hash stays suppressed for
//! the rest of the session even if the feed drops and re-adds the record.
//!
//! All state sits behind one mutex; every mutation is a single locked
//! update, so concurrent readers never observe a half-applied change.

use crate::constants::OPTIMISTIC_TTL;
use crate::types::{AuthoritativeParticipant, MergedHistory, ParticipantView};
use alloy::primitives::{Address, TxHash, U256};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A locally-predicted contribution awaiting authoritative confirmation
#[derive(Debug, Clone)]
pub struct OptimisticEntry {
    /// Stable id: the transaction hash when known, else synthetic
    pub id: String,
    /// Contributor wallet
    pub wallet: Address,
    /// Contribution amount in base units
    pub amount: U256,
    /// Transaction hash, once the submission returned one
    pub tx_hash: Option<TxHash>,
    /// Creation time (unix seconds), used for display ordering
    pub created_unix: u64,
    /// Eviction deadline
    expires_at: Instant,
}

impl OptimisticEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
struct LedgerState {
    entries: Vec<OptimisticEntry>,
    /// Hashes already matched to authoritative records; suppressed for the session
    reconciled: HashSet<TxHash>,
}

/// Session-local optimistic ledger
pub struct OptimisticLedger {
    state: Mutex<LedgerState>,
    ttl: Duration,
    next_id: AtomicU64,
}

impl Default for OptimisticLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisticLedger {
    /// Create a ledger with the standard 60 second entry TTL
    pub fn new() -> Self {
        Self::with_ttl(OPTIMISTIC_TTL)
    }

    /// Create a ledger with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            ttl,
            next_id: AtomicU64::new(0),
        }
    }

    /// Add a pending entry; returns its stable id
    ///
    /// An entry whose hash was already reconciled this session is not
    /// resurrected; the id is returned but nothing is inserted.
    pub fn insert(&self, wallet: Address, amount: U256, tx_hash: Option<TxHash>) -> String {
        let id = match tx_hash {
            Some(hash) => format!("{hash}"),
            None => format!("local-{}", self.next_id.fetch_add(1, Ordering::Relaxed)),
        };

        let created_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut state = self.state.lock().unwrap();
        if let Some(hash) = tx_hash {
            if state.reconciled.contains(&hash) {
                tracing::debug!(%hash, "skipping insert of already-reconciled entry");
                return id;
            }
        }

        state.entries.push(OptimisticEntry {
            id: id.clone(),
            wallet,
            amount,
            tx_hash,
            created_unix,
            expires_at: Instant::now() + self.ttl,
        });
        tracing::debug!(id, %wallet, %amount, "optimistic entry inserted");
        id
    }

    /// Attach the transaction hash to an entry inserted before one existed
    pub fn set_transaction_hash(&self, id: &str, hash: TxHash) {
        let mut state = self.state.lock().unwrap();
        if state.reconciled.contains(&hash) {
            state.entries.retain(|e| e.id != id);
            return;
        }
        if let Some(entry) = state.entries.iter_mut().find(|e| e.id == id) {
            entry.tx_hash = Some(hash);
        }
    }

    /// Evict expired entries
    pub fn sweep(&self) {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        let before = state.entries.len();
        state.entries.retain(|e| !e.is_expired(now));
        let evicted = before - state.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "swept expired optimistic entries");
        }
    }

    /// Drop entries the authoritative feed has caught up with
    ///
    /// Matching is strictly by transaction hash, never by amount or address
    /// heuristics. Matched hashes are remembered so a record the feed later
    /// drops and re-adds cannot resurrect the optimistic entry.
    pub fn reconcile(&self, authoritative: &[AuthoritativeParticipant]) {
        let confirmed: HashSet<TxHash> =
            authoritative.iter().filter_map(|p| p.tx_hash).collect();
        if confirmed.is_empty() {
            return;
        }

        let mut state = self.state.lock().unwrap();
        let mut removed = 0usize;
        state.entries.retain(|entry| {
            let matched = entry.tx_hash.is_some_and(|h| confirmed.contains(&h));
            if matched {
                removed += 1;
            }
            !matched
        });
        for hash in confirmed {
            state.reconciled.insert(hash);
        }
        if removed > 0 {
            tracing::debug!(removed, "reconciled optimistic entries against feed");
        }
    }

    /// Entries still counted toward display totals
    ///
    /// Filters expired and reconciled entries at read time, so correctness
    /// does not depend on sweep timing.
    pub fn active_entries(&self) -> Vec<OptimisticEntry> {
        let now = Instant::now();
        let state = self.state.lock().unwrap();
        state
            .entries
            .iter()
            .filter(|e| {
                !e.is_expired(now)
                    && !e.tx_hash.is_some_and(|h| state.reconciled.contains(&h))
            })
            .cloned()
            .collect()
    }

    /// Merge the authoritative history with still-active optimistic entries
    pub fn merge(&self, authoritative: &[AuthoritativeParticipant]) -> MergedHistory {
        let confirmed: HashSet<TxHash> =
            authoritative.iter().filter_map(|p| p.tx_hash).collect();

        let mut participants: Vec<ParticipantView> = authoritative
            .iter()
            .map(|p| ParticipantView {
                wallet: p.wallet,
                amount: p.amount,
                timestamp: p.timestamp,
                tx_hash: p.tx_hash,
                pending: false,
            })
            .collect();

        let mut total_amount: U256 = authoritative.iter().map(|p| p.amount).fold(U256::ZERO, |acc, a| acc + a);
        let mut count = authoritative.len();

        for entry in self.active_entries() {
            // Active but already visible in the feed: count it exactly once
            if entry.tx_hash.is_some_and(|h| confirmed.contains(&h)) {
                continue;
            }
            total_amount += entry.amount;
            count += 1;
            participants.push(ParticipantView {
                wallet: entry.wallet,
                amount: entry.amount,
                timestamp: entry.created_unix,
                tx_hash: entry.tx_hash,
                pending: true,
            });
        }

        participants.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        MergedHistory {
            participants,
            total_amount,
            count,
        }
    }

    /// Spawn the background sweep task
    ///
    /// The returned handle cancels the task explicitly or on drop.
    pub fn spawn_sweeper(ledger: Arc<Self>, interval: Duration) -> SweeperHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                ledger.sweep();
            }
        });
        SweeperHandle { task }
    }
}

/// Cancel handle for the background sweep
pub struct SweeperHandle {
    task: tokio::task::JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop sweeping
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn hash(byte: u8) -> TxHash {
        TxHash::repeat_byte(byte)
    }

    fn confirmed(byte: u8, amount: u64, timestamp: u64) -> AuthoritativeParticipant {
        AuthoritativeParticipant {
            wallet: wallet(byte),
            amount: U256::from(amount),
            tx_hash: Some(hash(byte)),
            timestamp,
        }
    }

    #[test]
    fn test_insert_appears_immediately() {
        let ledger = OptimisticLedger::new();
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));

        let merged = ledger.merge(&[]);
        assert_eq!(merged.count, 1);
        assert_eq!(merged.total_amount, U256::from(100u64));
        assert!(merged.participants[0].pending);
    }

    #[test]
    fn test_merge_totals_are_additive() {
        let ledger = OptimisticLedger::new();
        ledger.insert(wallet(0x01), U256::from(30u64), Some(hash(0x0a)));
        ledger.insert(wallet(0x02), U256::from(20u64), None);

        let feed = vec![confirmed(0x03, 500, 100), confirmed(0x04, 250, 90)];
        let merged = ledger.merge(&feed);

        // Naive independent sum over the same fixture
        assert_eq!(merged.total_amount, U256::from(500 + 250 + 30 + 20u64));
        assert_eq!(merged.count, 4);
        assert_eq!(merged.participants.len(), 4);
    }

    #[test]
    fn test_merge_never_double_counts_confirmed_hash() {
        let ledger = OptimisticLedger::new();
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));

        // The feed has caught up with the same hash, no reconcile yet
        let feed = vec![confirmed(0x01, 100, 50)];
        let merged = ledger.merge(&feed);
        assert_eq!(merged.count, 1);
        assert_eq!(merged.total_amount, U256::from(100u64));
        assert!(!merged.participants[0].pending);
    }

    #[test]
    fn test_reconcile_removes_matched_entries() {
        let ledger = OptimisticLedger::new();
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));
        ledger.insert(wallet(0x02), U256::from(40u64), Some(hash(0x02)));

        ledger.reconcile(&[confirmed(0x01, 100, 50)]);

        let active = ledger.active_entries();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].wallet, wallet(0x02));
    }

    #[test]
    fn test_reconciled_hash_stays_suppressed() {
        let ledger = OptimisticLedger::new();
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));
        ledger.reconcile(&[confirmed(0x01, 100, 50)]);

        // Feed drops the record and the entry is re-inserted with the same
        // hash within the session: it must not come back
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));
        let merged = ledger.merge(&[]);
        assert_eq!(merged.count, 0);
        assert_eq!(merged.total_amount, U256::ZERO);
    }

    #[test]
    fn test_late_hash_attachment() {
        let ledger = OptimisticLedger::new();
        let id = ledger.insert(wallet(0x01), U256::from(10u64), None);
        ledger.set_transaction_hash(&id, hash(0x07));

        ledger.reconcile(&[AuthoritativeParticipant {
            wallet: wallet(0x01),
            amount: U256::from(10u64),
            tx_hash: Some(hash(0x07)),
            timestamp: 5,
        }]);
        assert!(ledger.active_entries().is_empty());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let ledger = OptimisticLedger::with_ttl(Duration::from_millis(30));
        ledger.insert(wallet(0x01), U256::from(100u64), Some(hash(0x01)));
        assert_eq!(ledger.active_entries().len(), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;

        // Expired at read time even before any sweep runs
        assert!(ledger.active_entries().is_empty());
        assert_eq!(ledger.merge(&[]).count, 0);

        ledger.sweep();
        assert!(ledger.state.lock().unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_background_sweeper_evicts() {
        let ledger = Arc::new(OptimisticLedger::with_ttl(Duration::from_millis(20)));
        ledger.insert(wallet(0x01), U256::from(1u64), None);

        let sweeper = OptimisticLedger::spawn_sweeper(Arc::clone(&ledger), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(ledger.state.lock().unwrap().entries.is_empty());
        sweeper.cancel();
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let ledger = OptimisticLedger::new();
        // Created "now", which is far newer than the fixture feed timestamps
        ledger.insert(wallet(0x05), U256::from(5u64), None);

        let feed = vec![confirmed(0x01, 10, 100), confirmed(0x02, 20, 300)];
        let merged = ledger.merge(&feed);

        assert!(merged.participants[0].pending);
        assert_eq!(merged.participants[1].timestamp, 300);
        assert_eq!(merged.participants[2].timestamp, 100);
    }
}
