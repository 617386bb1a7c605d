//! Ten-year mortgage rate forecasts under named scenarios

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::{PolicyRateTable, FORECAST_YEARS};

/// Ceiling applied to the pessimistic and legacy high paths
const HIGH_RATE_CAP: f64 = 8.0;
/// Ceiling applied to the legacy moderate path
const MODERATE_RATE_CAP: f64 = 6.0;
/// Floor applied to the legacy low path
const LOW_RATE_FLOOR: f64 = 1.5;

/// Named rate forecast scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastPolicy {
    /// Policy-rate path plus the usual 1.5 point bank markup
    MainCase,
    /// Policy-rate path plus a competitive 1.0 point markup
    Optimistic,
    /// Policy rate 0.5 higher than the path, 2.0 point markup, capped at 8%
    Pessimistic,
    /// Falls 0.1 a year from the base rate, floored at 1.5%
    LegacyLow,
    /// Climbs from the base rate in shrinking steps, capped at 6%
    LegacyModerate,
    /// Climbs from the base rate in larger steps, capped at 8%
    LegacyHigh,
}

impl ForecastPolicy {
    pub const ALL: [ForecastPolicy; 6] = [
        ForecastPolicy::MainCase,
        ForecastPolicy::Optimistic,
        ForecastPolicy::Pessimistic,
        ForecastPolicy::LegacyLow,
        ForecastPolicy::LegacyModerate,
        ForecastPolicy::LegacyHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ForecastPolicy::MainCase => "Main case (+1.5%)",
            ForecastPolicy::Optimistic => "Optimistic (+1.0%)",
            ForecastPolicy::Pessimistic => "Pessimistic (+2.5%)",
            ForecastPolicy::LegacyLow => "Low",
            ForecastPolicy::LegacyModerate => "Moderate",
            ForecastPolicy::LegacyHigh => "High",
        }
    }
}

/// One year of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub rate_pct: f64,
}

/// A generated forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateForecast {
    pub policy: ForecastPolicy,
    pub points: Vec<ForecastPoint>,
}

impl RateForecast {
    pub fn rate_for(&self, year: i32) -> Option<f64> {
        self.points.iter().find(|p| p.year == year).map(|p| p.rate_pct)
    }

    pub fn average_rate(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.rate_pct).sum::<f64>() / self.points.len() as f64
    }

    pub fn peak_rate(&self) -> f64 {
        self.points.iter().map(|p| p.rate_pct).fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Generate a forecast. `base_rate_pct` only matters for the legacy policies.
pub fn generate_forecast(
    policy: ForecastPolicy,
    base_rate_pct: f64,
    policy_rates: &PolicyRateTable,
) -> RateForecast {
    let rates: Vec<f64> = match policy {
        ForecastPolicy::MainCase => policy_rates.iter().map(|(_, r)| r + 1.5).collect(),
        ForecastPolicy::Optimistic => policy_rates.iter().map(|(_, r)| r + 1.0).collect(),
        ForecastPolicy::Pessimistic => policy_rates
            .iter()
            .map(|(_, r)| (r + 0.5 + 2.0).min(HIGH_RATE_CAP))
            .collect(),
        ForecastPolicy::LegacyLow => (0..FORECAST_YEARS)
            .map(|i| (base_rate_pct - 0.1 * i as f64).max(LOW_RATE_FLOOR))
            .collect(),
        ForecastPolicy::LegacyModerate => drift_path(base_rate_pct, MODERATE_RATE_CAP, |i| match i {
            0..=2 => 0.2,
            3..=4 => 0.1,
            _ => 0.05,
        }),
        ForecastPolicy::LegacyHigh => drift_path(base_rate_pct, HIGH_RATE_CAP, |i| match i {
            0..=1 => 0.5,
            2..=4 => 0.3,
            _ => 0.1,
        }),
    };

    let first_year = policy_rates.first_year();
    let points = rates
        .into_iter()
        .enumerate()
        .map(|(i, rate_pct)| ForecastPoint {
            year: first_year + i as i32,
            rate_pct,
        })
        .collect();

    debug!("generated {:?} forecast from base {:.2}%", policy, base_rate_pct);
    RateForecast { policy, points }
}

/// Raise the running rate by `step(i)` before recording year `i`. The cap
/// limits each recorded value but not the running rate itself.
fn drift_path(base_rate_pct: f64, cap: f64, step: impl Fn(usize) -> f64) -> Vec<f64> {
    let mut current = base_rate_pct;
    (0..FORECAST_YEARS)
        .map(|i| {
            current += step(i);
            current.min(cap)
        })
        .collect()
}

/// Forecasts for every policy, in `ForecastPolicy::ALL` order
pub fn all_forecasts(base_rate_pct: f64, policy_rates: &PolicyRateTable) -> Vec<RateForecast> {
    ForecastPolicy::ALL
        .iter()
        .map(|policy| generate_forecast(*policy, base_rate_pct, policy_rates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn forecast(policy: ForecastPolicy, base: f64) -> RateForecast {
        generate_forecast(policy, base, &PolicyRateTable::june_2025())
    }

    #[test]
    fn test_main_case() {
        let f = forecast(ForecastPolicy::MainCase, 4.99);
        assert_eq!(f.points.len(), 10);
        assert_eq!(f.points[0], ForecastPoint { year: 2025, rate_pct: 5.75 });
        assert_eq!(f.points[9].year, 2034);
        assert_abs_diff_eq!(f.rate_for(2028).unwrap(), 4.6, epsilon = 1e-12);
    }

    #[test]
    fn test_optimistic_and_pessimistic() {
        let opt = forecast(ForecastPolicy::Optimistic, 4.99);
        assert_eq!(opt.rate_for(2025), Some(5.25));

        let pes = forecast(ForecastPolicy::Pessimistic, 4.99);
        assert_eq!(pes.rate_for(2025), Some(6.75));
        assert_eq!(pes.rate_for(2034), Some(5.5));
        assert!(pes.peak_rate() <= HIGH_RATE_CAP);
    }

    #[test]
    fn test_pessimistic_cap() {
        let table = PolicyRateTable::from_rows((2025..2035).map(|y| (y, 7.0)).collect()).unwrap();
        let f = generate_forecast(ForecastPolicy::Pessimistic, 0.0, &table);
        assert!(f.points.iter().all(|p| p.rate_pct == 8.0));
    }

    #[test]
    fn test_legacy_low_floor() {
        let f = forecast(ForecastPolicy::LegacyLow, 2.0);
        assert_eq!(f.points[0].rate_pct, 2.0);
        assert_abs_diff_eq!(f.points[3].rate_pct, 1.7, epsilon = 1e-12);
        assert_eq!(f.points[9].rate_pct, 1.5);
    }

    #[test]
    fn test_legacy_moderate_steps() {
        let f = forecast(ForecastPolicy::LegacyModerate, 4.0);
        let expected = [4.2, 4.4, 4.6, 4.7, 4.8, 4.85, 4.9, 4.95, 5.0, 5.05];
        for (point, want) in f.points.iter().zip(expected) {
            assert_abs_diff_eq!(point.rate_pct, want, epsilon = 1e-9);
        }

        let capped = forecast(ForecastPolicy::LegacyModerate, 5.8);
        assert_eq!(capped.points[1].rate_pct, 6.0);
        assert!(capped.points.iter().all(|p| p.rate_pct <= 6.0));
    }

    #[test]
    fn test_legacy_high_steps() {
        let f = forecast(ForecastPolicy::LegacyHigh, 4.0);
        let expected = [4.5, 5.0, 5.3, 5.6, 5.9, 6.0, 6.1, 6.2, 6.3, 6.4];
        for (point, want) in f.points.iter().zip(expected) {
            assert_abs_diff_eq!(point.rate_pct, want, epsilon = 1e-9);
        }
        assert_eq!(forecast(ForecastPolicy::LegacyHigh, 7.9).peak_rate(), 8.0);
    }

    #[test]
    fn test_average_rate() {
        let f = RateForecast {
            policy: ForecastPolicy::MainCase,
            points: vec![
                ForecastPoint { year: 2025, rate_pct: 4.0 },
                ForecastPoint { year: 2026, rate_pct: 5.0 },
            ],
        };
        assert_abs_diff_eq!(f.average_rate(), 4.5, epsilon = 1e-12);
        let empty = RateForecast {
            policy: ForecastPolicy::MainCase,
            points: Vec::new(),
        };
        assert_eq!(empty.average_rate(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        for policy in ForecastPolicy::ALL {
            assert_eq!(forecast(policy, 4.99), forecast(policy, 4.99));
        }
        assert_eq!(all_forecasts(4.99, &PolicyRateTable::june_2025()).len(), 6);
    }
}
