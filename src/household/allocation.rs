//! Splitting amounts between the two parties

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_percentage, CalcResult};

/// How shared costs are divided between the parties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "percent_a")]
pub enum AllocationPolicy {
    /// 50/50
    EqualSplit,
    /// In proportion to monthly net income
    IncomeProportional,
    /// Party A pays the given percent, B pays the rest
    CustomPercentage(f64),
}

impl AllocationPolicy {
    pub fn custom(percent_a: f64) -> CalcResult<Self> {
        ensure_percentage("custom_percentage", percent_a)?;
        Ok(AllocationPolicy::CustomPercentage(percent_a))
    }

    pub fn validate(&self) -> CalcResult<()> {
        match self {
            AllocationPolicy::CustomPercentage(pct) => ensure_percentage("custom_percentage", *pct),
            _ => Ok(()),
        }
    }

    /// Party A's fraction of a payment. Falls back to 0.5 when both incomes
    /// are zero under `IncomeProportional`.
    pub fn fraction_a(&self, income_a: f64, income_b: f64) -> f64 {
        match self {
            AllocationPolicy::EqualSplit => 0.5,
            AllocationPolicy::IncomeProportional => {
                let total = income_a + income_b;
                if total > 0.0 {
                    income_a / total
                } else {
                    0.5
                }
            }
            AllocationPolicy::CustomPercentage(pct) => pct / 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AllocationPolicy::EqualSplit => "50/50",
            AllocationPolicy::IncomeProportional => "Proportional to income",
            AllocationPolicy::CustomPercentage(_) => "Custom",
        }
    }
}

/// An amount divided between party A and party B
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Split {
    pub a: f64,
    pub b: f64,
}

impl Split {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn total(&self) -> f64 {
        self.a + self.b
    }
}

/// Divide `amount` between the parties.
///
/// Party B always receives the complement of A's share, so the two shares add
/// back up to `amount`. The one exception is `IncomeProportional` with zero
/// combined income, which gives both parties nothing. A custom percentage
/// outside [0, 100] is rejected.
pub fn allocate(amount: f64, income_a: f64, income_b: f64, policy: AllocationPolicy) -> CalcResult<Split> {
    policy.validate()?;
    let share_a = match policy {
        AllocationPolicy::EqualSplit => amount / 2.0,
        AllocationPolicy::IncomeProportional => {
            let total = income_a + income_b;
            if total == 0.0 {
                warn!("income-proportional split with zero combined income, allocating nothing");
                return Ok(Split::default());
            }
            amount * income_a / total
        }
        AllocationPolicy::CustomPercentage(pct) => amount * pct / 100.0,
    };
    Ok(Split::new(share_a, amount - share_a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equal_split() {
        let split = allocate(21_500.0, 37_900.0, 58_500.0, AllocationPolicy::EqualSplit).unwrap();
        assert_eq!(split, Split::new(10_750.0, 10_750.0));
    }

    #[test]
    fn test_income_proportional() {
        let split = allocate(21_500.0, 37_900.0, 58_500.0, AllocationPolicy::IncomeProportional).unwrap();
        assert_abs_diff_eq!(split.a, 21_500.0 * 37_900.0 / 96_400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.a, 8_452.8, epsilon = 0.1);
        assert_eq!(split.total(), 21_500.0);
    }

    #[test]
    fn test_income_proportional_zero_income() {
        let split = allocate(21_500.0, 0.0, 0.0, AllocationPolicy::IncomeProportional).unwrap();
        assert_eq!(split, Split::new(0.0, 0.0));
    }

    #[test]
    fn test_custom_percentage_complement() {
        let split = allocate(21_500.0, 0.0, 0.0, AllocationPolicy::CustomPercentage(37.0)).unwrap();
        assert_abs_diff_eq!(split.a, 7_955.0, epsilon = 1e-9);
        assert_eq!(split.a + split.b, 21_500.0);
    }

    #[test]
    fn test_shares_sum_to_amount() {
        let policies = [
            AllocationPolicy::EqualSplit,
            AllocationPolicy::IncomeProportional,
            AllocationPolicy::CustomPercentage(33.3),
        ];
        for policy in policies {
            for amount in [0.0, 0.1, 1_234.567, -9_876.5, 18_688.31] {
                let split = allocate(amount, 41_000.0, 57_300.0, policy).unwrap();
                assert_abs_diff_eq!(split.total(), amount, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_custom_validation() {
        assert!(AllocationPolicy::custom(60.0).is_ok());
        assert!(AllocationPolicy::custom(120.0).is_err());
        assert!(AllocationPolicy::CustomPercentage(-5.0).validate().is_err());
    }

    #[test]
    fn test_allocate_rejects_out_of_range_custom() {
        assert!(allocate(100.0, 1.0, 1.0, AllocationPolicy::CustomPercentage(150.0)).is_err());
        assert!(allocate(100.0, 1.0, 1.0, AllocationPolicy::CustomPercentage(-0.5)).is_err());
        let edge = allocate(100.0, 1.0, 1.0, AllocationPolicy::CustomPercentage(100.0)).unwrap();
        assert_eq!(edge, Split::new(100.0, 0.0));
    }

    #[test]
    fn test_fraction_fallback() {
        assert_eq!(AllocationPolicy::IncomeProportional.fraction_a(0.0, 0.0), 0.5);
        assert_eq!(AllocationPolicy::CustomPercentage(40.0).fraction_a(1.0, 1.0), 0.4);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&AllocationPolicy::CustomPercentage(40.0)).unwrap();
        assert_eq!(json, r#"{"type":"CustomPercentage","percent_a":40.0}"#);
        let back: AllocationPolicy = serde_json::from_str(r#"{"type":"EqualSplit"}"#).unwrap();
        assert_eq!(back, AllocationPolicy::EqualSplit);
    }
}
