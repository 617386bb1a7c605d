//! Settlement across a range of property value changes

use serde::{Deserialize, Serialize};

use super::policy::{settle, Investment, SettlementPolicy};
use super::proceeds::net_proceeds;
use crate::assumptions::AppreciationStep;
use crate::error::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub label: String,
    pub appreciation_pct: f64,
    pub sale_price: f64,
    pub net: f64,
    pub payout_a: f64,
    pub payout_b: f64,
    pub gain_a: f64,
    pub gain_b: f64,
}

/// Settle the sale once per appreciation step. Selling costs follow each
/// step's sale price; the outstanding balance and investments stay fixed.
pub fn sweep(
    price: f64,
    selling_cost_pct: f64,
    outstanding: f64,
    investment: &Investment,
    policy: SettlementPolicy,
    steps: &[AppreciationStep],
) -> CalcResult<Vec<SweepRow>> {
    steps
        .iter()
        .map(|step| {
            let proceeds = net_proceeds(price, step.appreciation_pct, selling_cost_pct, outstanding)?;
            let settlement = settle(proceeds.net, investment, policy);
            Ok(SweepRow {
                label: step.label.clone(),
                appreciation_pct: step.appreciation_pct,
                sale_price: proceeds.sale_price,
                net: proceeds.net,
                payout_a: settlement.payout_a,
                payout_b: settlement.payout_b,
                gain_a: settlement.gain_a,
                gain_b: settlement.gain_b,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::default_appreciation_sweep;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_sweep_rows() {
        let investment = Investment::new(520_000.0, 780_000.0, 700_000.0, 1_050_000.0).unwrap();
        let rows = sweep(
            4_500_000.0,
            2.5,
            2_750_000.0,
            &investment,
            SettlementPolicy::ProportionalByInvestment,
            &default_appreciation_sweep(),
        )
        .unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].label, "Sharp fall");
        assert_abs_diff_eq!(rows[0].sale_price, 3_600_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rows[2].net, 4_500_000.0 * 0.975 - 2_750_000.0, epsilon = 1e-6);
        for pair in rows.windows(2) {
            assert!(pair[1].net > pair[0].net);
        }
        for row in &rows {
            assert_abs_diff_eq!(row.payout_a + row.payout_b, row.net, epsilon = 1e-6);
        }
        // A fall below the amount invested is a loss for both
        assert!(rows[0].gain_a < 0.0 && rows[0].gain_b < 0.0);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let investment = Investment::new(1.0, 1.0, 1.0, 1.0).unwrap();
        let steps = vec![AppreciationStep::new("Impossible", -120.0)];
        assert!(sweep(1_000.0, 2.5, 0.0, &investment, SettlementPolicy::Hybrid, &steps).is_err());
    }
}
