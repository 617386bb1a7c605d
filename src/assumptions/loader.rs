//! CSV-based assumption loader
//!
//! Loads market assumptions from CSV files in data/assumptions/

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CalcError, CalcResult};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File holding the projected central-bank policy rate per year
pub const POLICY_RATE_FILE: &str = "policy_rate_forecast.csv";

/// File holding purchase fee parameters as name/value pairs
pub const FEES_FILE: &str = "fees.csv";

#[derive(Debug, Deserialize)]
struct PolicyRateRow {
    year: i32,
    policy_rate: f64,
}

#[derive(Debug, Deserialize)]
struct NamedValueRow {
    name: String,
    value: f64,
}

/// Raw assumption values as read from disk, before being turned into typed tables
#[derive(Debug, Clone, Default)]
pub struct LoadedAssumptions {
    /// (year, policy rate in percent), in file order
    pub policy_rates: Vec<(i32, f64)>,
    /// Fee parameters keyed by name
    pub fees: HashMap<String, f64>,
}

impl LoadedAssumptions {
    /// Load every assumption file from a directory
    pub fn load_from(path: &Path) -> CalcResult<Self> {
        Ok(Self {
            policy_rates: load_policy_rates(&path.join(POLICY_RATE_FILE))?,
            fees: load_fees(&path.join(FEES_FILE))?,
        })
    }

    /// Fee value by name, if present in the file
    pub fn fee(&self, name: &str) -> Option<f64> {
        self.fees.get(name).copied()
    }
}

/// Load the policy-rate forecast table from a CSV file
pub fn load_policy_rates(path: &Path) -> CalcResult<Vec<(i32, f64)>> {
    let file = File::open(path)?;
    load_policy_rates_from_reader(file)
}

/// Load the policy-rate forecast table from any reader
pub fn load_policy_rates_from_reader<R: Read>(reader: R) -> CalcResult<Vec<(i32, f64)>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rates = Vec::new();

    for result in reader.deserialize() {
        let row: PolicyRateRow = result?;
        if !row.policy_rate.is_finite() {
            return Err(CalcError::invalid(
                "policy_rate",
                format!("non-finite rate for year {}", row.year),
            ));
        }
        rates.push((row.year, row.policy_rate));
    }

    // Years must be consecutive so that the forecast lines up with calendar years
    for pair in rates.windows(2) {
        if pair[1].0 != pair[0].0 + 1 {
            return Err(CalcError::invalid(
                "policy_rate_forecast",
                format!("years must be consecutive ({} followed by {})", pair[0].0, pair[1].0),
            ));
        }
    }

    Ok(rates)
}

/// Load fee parameters from a CSV file
pub fn load_fees(path: &Path) -> CalcResult<HashMap<String, f64>> {
    let file = File::open(path)?;
    load_fees_from_reader(file)
}

/// Load fee parameters from any reader
pub fn load_fees_from_reader<R: Read>(reader: R) -> CalcResult<HashMap<String, f64>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut fees = HashMap::new();

    for result in reader.deserialize() {
        let row: NamedValueRow = result?;
        fees.insert(row.name, row.value);
    }

    Ok(fees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_policy_rates_from_reader() {
        let data = "year,policy_rate\n2025,4.25\n2026,4.0\n2027,3.5\n";
        let rates = load_policy_rates_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rates, vec![(2025, 4.25), (2026, 4.0), (2027, 3.5)]);
    }

    #[test]
    fn test_non_consecutive_years_rejected() {
        let data = "year,policy_rate\n2025,4.25\n2027,3.5\n";
        let err = load_policy_rates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_load_fees_from_reader() {
        let data = "name,value\ndocument_fee_rate,0.025\ndeed_registration_fee,585\n";
        let fees = load_fees_from_reader(data.as_bytes()).unwrap();
        assert_eq!(fees.get("document_fee_rate"), Some(&0.025));
        assert_eq!(fees.get("deed_registration_fee"), Some(&585.0));
    }

    #[test]
    fn test_load_default_directory() {
        let loaded = LoadedAssumptions::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
            .expect("Failed to load assumptions");
        assert_eq!(loaded.policy_rates.len(), 10);
        assert_eq!(loaded.policy_rates[0], (2025, 4.25));
        assert_eq!(loaded.fee("mortgage_registration_fee"), Some(585.0));
    }
}
