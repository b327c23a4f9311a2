use crate::entities::reward::RewardRecord;
use crate::enums::{DenomPolicy, RewardKind};
use crate::error::{Result, YieldError};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Sums reward amounts across all records, ignoring their denominations.
/// An empty list sums to zero.
pub fn total_reward(kind: RewardKind, records: &[RewardRecord]) -> Result<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |total, record| {
        if record.amount < Decimal::ZERO {
            return Err(YieldError::InvalidReward {
                kind,
                denom: record.denom.clone(),
                amount: record.amount,
            });
        }
        total.checked_add(record.amount).ok_or(YieldError::Overflow {
            operation: "total reward",
        })
    })
}

/// Fails with [`YieldError::MixedDenom`] when `records` spans more than one
/// denomination.
pub fn ensure_uniform_denom(kind: RewardKind, records: &[RewardRecord]) -> Result<()> {
    let denoms: BTreeSet<&str> = records.iter().map(|r| r.denom.as_str()).collect();
    if denoms.len() > 1 {
        return Err(YieldError::MixedDenom {
            kind,
            denoms: denoms.into_iter().map(str::to_owned).collect(),
        });
    }
    Ok(())
}

/// Totals a reward list under the given denomination policy.
pub fn aggregate(kind: RewardKind, records: &[RewardRecord], policy: DenomPolicy) -> Result<Decimal> {
    if policy == DenomPolicy::RequireUniform {
        ensure_uniform_denom(kind, records)?;
    }
    total_reward(kind, records)
}

/// reward / unit_liquidity
pub fn reward_per_unit_liquidity(total_reward: Decimal, unit_liquidity: Decimal) -> Result<Decimal> {
    if unit_liquidity.is_zero() {
        return Err(YieldError::DivisionByZero {
            field: "unit_liquidity",
        });
    }
    total_reward
        .checked_div(unit_liquidity)
        .ok_or(YieldError::Overflow {
            operation: "reward per unit liquidity",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn records(items: &[(&str, Decimal)]) -> Vec<RewardRecord> {
        items
            .iter()
            .map(|(denom, amount)| RewardRecord::new(*denom, *amount))
            .collect()
    }

    #[test]
    fn test_total_reward_ignores_denoms() {
        let list = records(&[("uosmo", dec!(50)), ("uatom", dec!(12.5)), ("uosmo", dec!(0.25))]);
        assert_eq!(total_reward(RewardKind::Spread, &list).unwrap(), dec!(62.75));
    }

    #[test]
    fn test_total_reward_empty_is_zero() {
        assert_eq!(total_reward(RewardKind::Incentive, &[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_reward_rejects_negative_amounts() {
        let list = records(&[("uosmo", dec!(5)), ("uion", dec!(-1))]);
        let err = total_reward(RewardKind::Incentive, &list).unwrap_err();
        assert_eq!(
            err,
            YieldError::InvalidReward {
                kind: RewardKind::Incentive,
                denom: "uion".to_string(),
                amount: dec!(-1),
            }
        );
    }

    #[test]
    fn test_strict_policy_rejects_mixed_lists() {
        let mixed = records(&[("uosmo", dec!(1)), ("uatom", dec!(2))]);
        assert_eq!(aggregate(RewardKind::Spread, &mixed, DenomPolicy::Blind).unwrap(), dec!(3));

        let err = aggregate(RewardKind::Spread, &mixed, DenomPolicy::RequireUniform).unwrap_err();
        assert_eq!(
            err,
            YieldError::MixedDenom {
                kind: RewardKind::Spread,
                denoms: vec!["uatom".to_string(), "uosmo".to_string()],
            }
        );

        let uniform = records(&[("uosmo", dec!(1)), ("uosmo", dec!(2))]);
        assert_eq!(
            aggregate(RewardKind::Spread, &uniform, DenomPolicy::RequireUniform).unwrap(),
            dec!(3)
        );
    }

    #[test]
    fn test_reward_per_unit_liquidity() {
        assert_eq!(reward_per_unit_liquidity(dec!(50), dec!(100)).unwrap(), dec!(0.5));
        assert_eq!(
            reward_per_unit_liquidity(dec!(50), Decimal::ZERO),
            Err(YieldError::DivisionByZero {
                field: "unit_liquidity"
            })
        );
    }
}
