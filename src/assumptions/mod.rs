//! Market and regulatory assumptions: purchase fees, policy-rate forecast,
//! equity thresholds and income replacement ratios used by the stress tests

pub mod loader;

pub use loader::LoadedAssumptions;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Number of years covered by a rate forecast
pub const FORECAST_YEARS: usize = 10;

/// One-off costs charged when buying a property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseFees {
    /// Document fee as a fraction of the purchase price
    pub document_fee_rate: f64,
    /// Flat fee for registering the deed
    pub deed_registration_fee: f64,
    /// Flat fee for registering the mortgage
    pub mortgage_registration_fee: f64,
}

impl Default for PurchaseFees {
    fn default() -> Self {
        Self {
            document_fee_rate: 0.025,
            deed_registration_fee: 585.0,
            mortgage_registration_fee: 585.0,
        }
    }
}

/// Projected central-bank policy rate by calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRateTable {
    /// (year, rate in percent), consecutive years
    rates: Vec<(i32, f64)>,
}

impl PolicyRateTable {
    /// Policy-rate path published in June 2025, flat at 3.0% from 2029
    pub fn june_2025() -> Self {
        Self {
            rates: vec![
                (2025, 4.25),
                (2026, 4.0),
                (2027, 3.5),
                (2028, 3.1),
                (2029, 3.0),
                (2030, 3.0),
                (2031, 3.0),
                (2032, 3.0),
                (2033, 3.0),
                (2034, 3.0),
            ],
        }
    }

    /// Build from loaded rows; the table must span exactly `FORECAST_YEARS` years
    pub fn from_rows(rates: Vec<(i32, f64)>) -> CalcResult<Self> {
        if rates.len() != FORECAST_YEARS {
            return Err(CalcError::invalid(
                "policy_rate_forecast",
                format!("expected {FORECAST_YEARS} years, got {}", rates.len()),
            ));
        }
        Ok(Self { rates })
    }

    /// First forecast year
    pub fn first_year(&self) -> i32 {
        self.rates.first().map(|(year, _)| *year).unwrap_or(2025)
    }

    /// Policy rate for a calendar year, if covered by the table
    pub fn rate_for(&self, year: i32) -> Option<f64> {
        self.rates.iter().find(|(y, _)| *y == year).map(|(_, rate)| *rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rates.iter().copied()
    }
}

impl Default for PolicyRateTable {
    fn default() -> Self {
        Self::june_2025()
    }
}

/// Equity share thresholds, in percent of purchase price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityThresholds {
    /// Below this the purchase cannot be financed
    pub minimum_pct: f64,
    /// Below this the lender terms are worse
    pub recommended_pct: f64,
}

impl Default for EquityThresholds {
    fn default() -> Self {
        Self {
            minimum_pct: 10.0,
            recommended_pct: 15.0,
        }
    }
}

/// Benefit levels replacing a party's income during unemployment or sick leave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeReplacement {
    /// Unemployment benefit as a fraction of income
    pub unemployment_ratio: f64,
    /// Long-term sick pay as a fraction of income
    pub sick_pay_ratio: f64,
    /// Monthly ceiling on either benefit
    pub monthly_cap: f64,
}

impl Default for IncomeReplacement {
    fn default() -> Self {
        Self {
            unemployment_ratio: 0.6,
            sick_pay_ratio: 0.66,
            monthly_cap: 22_000.0,
        }
    }
}

impl IncomeReplacement {
    pub fn unemployment(&self, income: f64) -> f64 {
        (income * self.unemployment_ratio).min(self.monthly_cap)
    }

    pub fn sick_pay(&self, income: f64) -> f64 {
        (income * self.sick_pay_ratio).min(self.monthly_cap)
    }
}

/// A labelled change in property value used by the sale sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppreciationStep {
    pub label: String,
    pub appreciation_pct: f64,
}

impl AppreciationStep {
    pub fn new(label: impl Into<String>, appreciation_pct: f64) -> Self {
        Self {
            label: label.into(),
            appreciation_pct,
        }
    }
}

/// From a sharp fall to strong growth
pub fn default_appreciation_sweep() -> Vec<AppreciationStep> {
    vec![
        AppreciationStep::new("Sharp fall", -20.0),
        AppreciationStep::new("Moderate fall", -10.0),
        AppreciationStep::new("No change", 0.0),
        AppreciationStep::new("Moderate growth", 15.0),
        AppreciationStep::new("Normal growth", 33.3),
        AppreciationStep::new("Strong growth", 50.0),
    ]
}

/// Container for all calculation assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub fees: PurchaseFees,
    pub policy_rates: PolicyRateTable,
    pub equity: EquityThresholds,
    pub income_replacement: IncomeReplacement,
    pub appreciation_sweep: Vec<AppreciationStep>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            fees: PurchaseFees::default(),
            policy_rates: PolicyRateTable::default(),
            equity: EquityThresholds::default(),
            income_replacement: IncomeReplacement::default(),
            appreciation_sweep: default_appreciation_sweep(),
        }
    }
}

impl Assumptions {
    /// Built-in values for the Norwegian housing market
    pub fn default_norway() -> Self {
        Self::default()
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> CalcResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory.
    /// Fees missing from the file keep their built-in values.
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;
        let defaults = PurchaseFees::default();

        Ok(Self {
            fees: PurchaseFees {
                document_fee_rate: loaded
                    .fee("document_fee_rate")
                    .unwrap_or(defaults.document_fee_rate),
                deed_registration_fee: loaded
                    .fee("deed_registration_fee")
                    .unwrap_or(defaults.deed_registration_fee),
                mortgage_registration_fee: loaded
                    .fee("mortgage_registration_fee")
                    .unwrap_or(defaults.mortgage_registration_fee),
            },
            policy_rates: PolicyRateTable::from_rows(loaded.policy_rates)?,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rate_lookup() {
        let table = PolicyRateTable::june_2025();
        assert_eq!(table.first_year(), 2025);
        assert_eq!(table.rate_for(2025), Some(4.25));
        assert_eq!(table.rate_for(2031), Some(3.0));
        assert_eq!(table.rate_for(2040), None);
    }

    #[test]
    fn test_table_length_enforced() {
        assert!(PolicyRateTable::from_rows(vec![(2025, 4.0)]).is_err());
    }

    #[test]
    fn test_income_replacement_capped() {
        let replacement = IncomeReplacement::default();
        assert_eq!(replacement.unemployment(30_000.0), 18_000.0);
        assert_eq!(replacement.unemployment(58_500.0), 22_000.0);
        assert_eq!(replacement.sick_pay(40_000.0), 22_000.0);
    }

    #[test]
    fn test_default_sweep() {
        let sweep = Assumptions::default_norway().appreciation_sweep;
        let pcts: Vec<f64> = sweep.iter().map(|s| s.appreciation_pct).collect();
        assert_eq!(pcts, vec![-20.0, -10.0, 0.0, 15.0, 33.3, 50.0]);
    }

    #[test]
    fn test_csv_matches_built_in() {
        let loaded = Assumptions::from_csv().expect("Failed to load assumptions");
        assert_eq!(loaded, Assumptions::default_norway());
    }
}
