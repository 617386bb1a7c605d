//! Interest deduction and debt service ratios

use serde::{Deserialize, Serialize};

/// Share of mortgage interest deducted from tax
pub const INTEREST_DEDUCTION_RATE: f64 = 0.22;

/// Tax deduction earned on an interest amount
pub fn tax_deduction(interest: f64) -> f64 {
    interest * INTEREST_DEDUCTION_RATE
}

/// Housing cost as a percent of net income. Zero income gives 0 rather than
/// an error so that callers can keep displaying a value.
pub fn debt_service_ratio(housing_cost: f64, net_income: f64) -> f64 {
    if net_income == 0.0 {
        return 0.0;
    }
    housing_cost / net_income * 100.0
}

/// Housing cost as a percent of net income plus the monthly tax deduction.
/// Same zero-income convention as [`debt_service_ratio`].
pub fn effective_debt_service_ratio(housing_cost: f64, net_income: f64, monthly_deduction: f64) -> f64 {
    if net_income == 0.0 {
        return 0.0;
    }
    housing_cost / (net_income + monthly_deduction) * 100.0
}

/// Rating of a debt service ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurdenLevel {
    Good,
    High,
    Critical,
}

impl BurdenLevel {
    /// Nominal ratio: below 30% good, below 35% high
    pub fn nominal(ratio_pct: f64) -> Self {
        Self::rate(ratio_pct, 30.0, 35.0)
    }

    /// Tax-adjusted ratio: below 25% good, below 30% high
    pub fn effective(ratio_pct: f64) -> Self {
        Self::rate(ratio_pct, 25.0, 30.0)
    }

    fn rate(ratio_pct: f64, good_below: f64, high_below: f64) -> Self {
        if ratio_pct < good_below {
            BurdenLevel::Good
        } else if ratio_pct < high_below {
            BurdenLevel::High
        } else {
            BurdenLevel::Critical
        }
    }
}
