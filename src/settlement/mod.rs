//! Sale settlement: net proceeds, distribution between the parties and the
//! appreciation sweep

mod policy;
mod proceeds;
mod sweep;

pub use policy::{settle, settle_all, Investment, Settlement, SettlementPolicy};
pub use proceeds::{net_proceeds, SaleAssumptions, SaleProceeds};
pub use sweep::{sweep, SweepRow};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::AppreciationStep;
use crate::error::CalcResult;
use crate::household::Household;
use crate::loan::AmortizationSchedule;

/// Everything known about a sale in a given year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleAnalysis {
    pub sale: SaleAssumptions,
    pub proceeds: SaleProceeds,
    pub investment: Investment,
    /// Settlement under the chosen policy
    pub settlement: Settlement,
    /// Settlement under every policy, for comparison
    pub alternatives: Vec<Settlement>,
    pub sweep: Vec<SweepRow>,
}

/// Settle a sale of the property bought at `price`, financed by `schedule`.
///
/// The schedule should cover at least `sale.sale_year` years; the balance
/// outstanding and each party's repaid principal are read from its first
/// `sale_year * 12` periods.
pub fn analyze_sale(
    household: &Household,
    price: f64,
    schedule: &AmortizationSchedule,
    sale: &SaleAssumptions,
    policy: SettlementPolicy,
    steps: &[AppreciationStep],
) -> CalcResult<SaleAnalysis> {
    sale.validate()?;

    let outstanding = schedule.balance_after(sale.sale_year * 12);
    let proceeds = net_proceeds(price, sale.appreciation_pct, sale.selling_cost_pct, outstanding)?;
    let investment = Investment::from_schedule(household, schedule, sale.sale_year)?;
    let settlement = settle(proceeds.net, &investment, policy);
    let alternatives = settle_all(proceeds.net, &investment);
    let sweep_rows = sweep(price, sale.selling_cost_pct, outstanding, &investment, policy, steps)?;

    debug!(
        "sale in year {}: net {:.0}, {:?} pays {:.0} / {:.0}",
        sale.sale_year, proceeds.net, policy, settlement.payout_a, settlement.payout_b
    );

    Ok(SaleAnalysis {
        sale: *sale,
        proceeds,
        investment,
        settlement,
        alternatives,
        sweep: sweep_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::default_appreciation_sweep;
    use crate::household::{AllocationPolicy, Party};
    use crate::loan::{full_schedule, LoanTerms};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_analyze_sale_after_five_years() {
        let household = Household::new(
            Party::new("Thale", 37_900.0, 520_000.0),
            Party::new("Jonas", 58_500.0, 780_000.0),
            AllocationPolicy::IncomeProportional,
        );
        let terms = LoanTerms::new(3_200_000.0, 4.99, 25).unwrap();
        let schedule = full_schedule(&terms);
        let sale = SaleAssumptions::default();

        let analysis = analyze_sale(
            &household,
            4_500_000.0,
            &schedule,
            &sale,
            SettlementPolicy::EqualGainSplit,
            &default_appreciation_sweep(),
        )
        .unwrap();

        let outstanding = schedule.balance_after(60);
        assert_abs_diff_eq!(analysis.proceeds.outstanding, outstanding, epsilon = 1e-9);
        assert_abs_diff_eq!(
            analysis.investment.total_invested(),
            1_300_000.0 + terms.principal() - outstanding,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            analysis.settlement.payout_a + analysis.settlement.payout_b,
            analysis.proceeds.net,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(analysis.settlement.gain_a, analysis.settlement.gain_b, epsilon = 1e-6);
        assert_eq!(analysis.alternatives.len(), 4);
        assert_eq!(analysis.sweep.len(), 6);
        assert_abs_diff_eq!(analysis.sweep[4].net, analysis.proceeds.net, epsilon = 1e-6);
    }
}
