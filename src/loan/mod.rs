//! Annuity loan engine: fixed payment and month-by-month amortization

mod engine;
mod extra;
mod schedule;
mod state;
mod terms;

pub use engine::{AmortizationEngine, ScheduleConfig};
pub use extra::{extra_payment_impact, schedule_with_extra, ExtraPaymentImpact, ExtraPaymentPlan};
pub use schedule::{AmortizationPeriod, AmortizationSchedule, ScheduleTotals, YearlySummary};
pub use state::LoanState;
pub use terms::LoanTerms;

use crate::error::CalcResult;

/// Fixed monthly payment for an annuity loan.
///
/// A zero rate repays the principal in equal instalments. A zero term is an
/// `InvalidInput` error.
pub fn fixed_payment(principal: f64, annual_rate_pct: f64, term_years: u32) -> CalcResult<f64> {
    Ok(LoanTerms::new(principal, annual_rate_pct, term_years)?.fixed_payment())
}

/// Amortization schedule for the first `horizon_years` years, or until the
/// loan is repaid if that comes first
pub fn build_schedule(terms: &LoanTerms, horizon_years: u32) -> AmortizationSchedule {
    AmortizationEngine::new(*terms, ScheduleConfig::horizon_years(horizon_years)).run()
}

/// Amortization schedule over the whole term
pub fn full_schedule(terms: &LoanTerms) -> AmortizationSchedule {
    build_schedule(terms, terms.term_years())
}
