//! Pre-flight validation gate
//!
//! Every check here runs before any wallet prompt is shown. Checks run in a
//! fixed order: wallet connected, chain supported, chain matches, amount
//! positive, pool precondition, sufficient balance. Pure function of its
//! inputs; failures surface as [`LaunchpadError`] kinds.

use crate::constants::is_supported_chain;
use crate::error::LaunchpadError;
use crate::session::Session;
use crate::types::{
    CurveSnapshot, LaunchParams, OperationPlan, PoolKind, PoolSnapshot, PresaleSnapshot,
};
use alloy::primitives::U256;

/// Validate an operation against session and pool state
pub fn validate(
    plan: &OperationPlan,
    session: &Session,
    expected_chain_id: u64,
    snapshot: &PoolSnapshot,
) -> Result<(), LaunchpadError> {
    let wallet = session.wallet()?;

    if !is_supported_chain(session.chain_id) {
        return Err(LaunchpadError::UnsupportedChain(session.chain_id));
    }
    if session.chain_id != expected_chain_id {
        return Err(LaunchpadError::WrongNetwork {
            expected: expected_chain_id,
            actual: session.chain_id,
        });
    }

    if let Some(amount) = plan.primary_amount() {
        if amount.is_zero() {
            return Err(LaunchpadError::InvalidAmount);
        }
    }

    match (plan, snapshot) {
        (OperationPlan::Contribute { amount, .. }, PoolSnapshot::Presale(presale)) => {
            ensure_presale_open(presale)?;
            ensure_balance(presale.base_balance, *amount)
        }
        (OperationPlan::Buy { amount_in, .. }, PoolSnapshot::Curve(curve)) => {
            ensure_curve_active(curve)?;
            ensure_balance(curve.base_balance, *amount_in)
        }
        (OperationPlan::BuyExactOut { max_in, .. }, PoolSnapshot::Curve(curve)) => {
            ensure_curve_active(curve)?;
            // Required input is only known after the quote; an explicit cap
            // is checkable now, otherwise the chain guard catches it.
            match max_in {
                Some(max_in) => ensure_balance(curve.base_balance, *max_in),
                None => Ok(()),
            }
        }
        (OperationPlan::Sell { amount_in, .. }, PoolSnapshot::Curve(curve)) => {
            ensure_curve_active(curve)?;
            ensure_balance(curve.token_balance, *amount_in)
        }
        (OperationPlan::SellExactOut { max_in, .. }, PoolSnapshot::Curve(curve)) => {
            ensure_curve_active(curve)?;
            match max_in {
                Some(max_in) => ensure_balance(curve.token_balance, *max_in),
                None => Ok(()),
            }
        }
        (OperationPlan::Claim { .. }, PoolSnapshot::Presale(presale)) => {
            if !presale.finalized {
                return Err(LaunchpadError::ContractRevert(
                    "raise is not finalized yet".into(),
                ));
            }
            if !presale.goal_reached {
                return Err(LaunchpadError::ContractRevert(
                    "goal was not reached; use refund".into(),
                ));
            }
            if presale.has_claimed {
                return Err(LaunchpadError::ContractRevert("already claimed".into()));
            }
            if presale.contribution.is_zero() {
                return Err(LaunchpadError::ContractRevert("nothing to claim".into()));
            }
            Ok(())
        }
        (OperationPlan::Refund { .. }, PoolSnapshot::Presale(presale)) => {
            if !presale.refunds_enabled {
                return Err(LaunchpadError::ContractRevert("refunds are not open".into()));
            }
            if presale.has_refunded {
                return Err(LaunchpadError::ContractRevert("already refunded".into()));
            }
            if presale.contribution.is_zero() {
                return Err(LaunchpadError::ContractRevert("nothing to refund".into()));
            }
            Ok(())
        }
        (
            OperationPlan::ClaimCreatorReward { .. } | OperationPlan::ClaimDexFees { .. },
            PoolSnapshot::Curve(curve),
        ) => {
            if !curve.graduated {
                return Err(LaunchpadError::ContractRevert(
                    "pool has not graduated yet".into(),
                ));
            }
            if wallet != curve.creator {
                return Err(LaunchpadError::Unauthorized(
                    "only the pool creator can claim".into(),
                ));
            }
            Ok(())
        }
        _ => Err(LaunchpadError::ContractRevert(
            "operation does not match pool kind".into(),
        )),
    }
}

/// Validate launch parameters before the factory call
///
/// Launches have no pool to snapshot; the checks are session state and
/// parameter sanity.
pub fn validate_launch(
    params: &LaunchParams,
    session: &Session,
    expected_chain_id: u64,
) -> Result<(), LaunchpadError> {
    session.wallet()?;

    if !is_supported_chain(session.chain_id) {
        return Err(LaunchpadError::UnsupportedChain(session.chain_id));
    }
    if session.chain_id != expected_chain_id {
        return Err(LaunchpadError::WrongNetwork {
            expected: expected_chain_id,
            actual: session.chain_id,
        });
    }
    if params.name.trim().is_empty() || params.symbol.trim().is_empty() {
        return Err(LaunchpadError::ContractRevert(
            "token name and symbol are required".into(),
        ));
    }
    if params.kind == PoolKind::FixedPrice && params.goal.is_zero() {
        return Err(LaunchpadError::InvalidAmount);
    }
    Ok(())
}

fn ensure_presale_open(presale: &PresaleSnapshot) -> Result<(), LaunchpadError> {
    if presale.finalized {
        return Err(LaunchpadError::ContractRevert(
            "raise is already finalized".into(),
        ));
    }
    if presale.refunds_enabled {
        return Err(LaunchpadError::ContractRevert(
            "raise failed; refunds are open".into(),
        ));
    }
    Ok(())
}

fn ensure_curve_active(curve: &CurveSnapshot) -> Result<(), LaunchpadError> {
    if curve.graduated {
        return Err(LaunchpadError::ContractRevert(
            "pool has already graduated".into(),
        ));
    }
    Ok(())
}

fn ensure_balance(balance: U256, required: U256) -> Result<(), LaunchpadError> {
    if balance < required {
        return Err(LaunchpadError::InsufficientFunds { balance, required });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn wallet() -> Address {
        Address::repeat_byte(0x11)
    }

    fn session() -> Session {
        Session::new(Some(wallet()), 8453)
    }

    fn open_presale(balance: u64) -> PoolSnapshot {
        PoolSnapshot::Presale(PresaleSnapshot {
            finalized: false,
            goal_reached: false,
            refunds_enabled: false,
            contribution: U256::ZERO,
            has_claimed: false,
            has_refunded: false,
            base_balance: U256::from(balance),
        })
    }

    fn active_curve(base_balance: u64, token_balance: u64) -> PoolSnapshot {
        PoolSnapshot::Curve(CurveSnapshot {
            graduated: false,
            remaining_supply: U256::from(1_000u64),
            token: Address::repeat_byte(0x22),
            creator: wallet(),
            base_balance: U256::from(base_balance),
            token_balance: U256::from(token_balance),
        })
    }

    fn contribute(amount: u64) -> OperationPlan {
        OperationPlan::Contribute {
            pool: Address::ZERO,
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_wallet_check_comes_first() {
        // Everything else is wrong too; wallet absence must win
        let session = Session::new(None, 1);
        let err = validate(&contribute(0), &session, 8453, &open_presale(0)).unwrap_err();
        assert!(matches!(err, LaunchpadError::WalletNotConnected));
    }

    #[test]
    fn test_chain_checks_precede_amount() {
        let session = Session::new(Some(wallet()), 1);
        let err = validate(&contribute(0), &session, 8453, &open_presale(0)).unwrap_err();
        assert!(matches!(err, LaunchpadError::UnsupportedChain(1)));

        let session = Session::new(Some(wallet()), 84_532);
        let err = validate(&contribute(0), &session, 8453, &open_presale(0)).unwrap_err();
        assert!(matches!(
            err,
            LaunchpadError::WrongNetwork {
                expected: 8453,
                actual: 84_532
            }
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = validate(&contribute(0), &session(), 8453, &open_presale(100)).unwrap_err();
        assert!(matches!(err, LaunchpadError::InvalidAmount));
    }

    #[test]
    fn test_contribute_happy_path() {
        assert!(validate(&contribute(50), &session(), 8453, &open_presale(100)).is_ok());
    }

    #[test]
    fn test_contribute_insufficient_balance() {
        let err = validate(&contribute(200), &session(), 8453, &open_presale(100)).unwrap_err();
        assert!(matches!(err, LaunchpadError::InsufficientFunds { .. }));
    }

    #[test]
    fn test_contribute_closed_pool() {
        let mut snapshot = match open_presale(100) {
            PoolSnapshot::Presale(p) => p,
            _ => unreachable!(),
        };
        snapshot.finalized = true;
        let err = validate(
            &contribute(50),
            &session(),
            8453,
            &PoolSnapshot::Presale(snapshot),
        )
        .unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));
    }

    #[test]
    fn test_buy_graduated_pool_rejected() {
        let snapshot = match active_curve(100, 0) {
            PoolSnapshot::Curve(mut c) => {
                c.graduated = true;
                PoolSnapshot::Curve(c)
            }
            _ => unreachable!(),
        };
        let plan = OperationPlan::Buy {
            pool: Address::ZERO,
            amount_in: U256::from(10u64),
        };
        let err = validate(&plan, &session(), 8453, &snapshot).unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));
    }

    #[test]
    fn test_sell_checks_token_balance() {
        let plan = OperationPlan::Sell {
            pool: Address::ZERO,
            amount_in: U256::from(10u64),
        };
        let err = validate(&plan, &session(), 8453, &active_curve(100, 5)).unwrap_err();
        assert!(matches!(err, LaunchpadError::InsufficientFunds { .. }));
        assert!(validate(&plan, &session(), 8453, &active_curve(0, 50)).is_ok());
    }

    #[test]
    fn test_creator_claims_require_graduation_and_role() {
        let plan = OperationPlan::ClaimCreatorReward {
            pool: Address::ZERO,
        };
        let err = validate(&plan, &session(), 8453, &active_curve(0, 0)).unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));

        let snapshot = match active_curve(0, 0) {
            PoolSnapshot::Curve(mut c) => {
                c.graduated = true;
                c.creator = Address::repeat_byte(0x99);
                PoolSnapshot::Curve(c)
            }
            _ => unreachable!(),
        };
        let err = validate(&plan, &session(), 8453, &snapshot).unwrap_err();
        assert!(matches!(err, LaunchpadError::Unauthorized(_)));
    }

    #[test]
    fn test_refund_preconditions() {
        let plan = OperationPlan::Refund {
            pool: Address::ZERO,
        };
        let base = match open_presale(0) {
            PoolSnapshot::Presale(p) => p,
            _ => unreachable!(),
        };

        let err = validate(
            &plan,
            &session(),
            8453,
            &PoolSnapshot::Presale(base.clone()),
        )
        .unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));

        let mut ok = base.clone();
        ok.refunds_enabled = true;
        ok.contribution = U256::from(10u64);
        assert!(validate(&plan, &session(), 8453, &PoolSnapshot::Presale(ok)).is_ok());

        let mut refunded = base;
        refunded.refunds_enabled = true;
        refunded.contribution = U256::from(10u64);
        refunded.has_refunded = true;
        let err = validate(&plan, &session(), 8453, &PoolSnapshot::Presale(refunded)).unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));
    }

    #[test]
    fn test_launch_params() {
        let params = LaunchParams::curve("Ember", "EMB");
        assert!(validate_launch(&params, &session(), 8453).is_ok());

        let params = LaunchParams::curve("", "EMB");
        assert!(matches!(
            validate_launch(&params, &session(), 8453),
            Err(LaunchpadError::ContractRevert(_))
        ));

        let params = LaunchParams::presale("Ember", "EMB", U256::ZERO);
        assert!(matches!(
            validate_launch(&params, &session(), 8453),
            Err(LaunchpadError::InvalidAmount)
        ));

        let params = LaunchParams::presale("Ember", "EMB", U256::from(1_000u64));
        assert!(validate_launch(&params, &session(), 8453).is_ok());
    }

    #[test]
    fn test_pool_kind_mismatch() {
        let err = validate(&contribute(10), &session(), 8453, &active_curve(100, 0)).unwrap_err();
        assert!(matches!(err, LaunchpadError::ContractRevert(_)));
    }
}
