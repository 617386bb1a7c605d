//! Month-by-month amortization engine

use log::debug;

use super::extra::ExtraPaymentPlan;
use super::schedule::{AmortizationPeriod, AmortizationSchedule};
use super::state::LoanState;
use super::terms::LoanTerms;
use crate::affordability::tax_deduction;

/// Configuration for a schedule run
#[derive(Debug, Clone, Default)]
pub struct ScheduleConfig {
    /// Number of months to generate (capped by repayment)
    pub horizon_months: u32,

    /// Optional extra principal paid by the parties
    pub extra: Option<ExtraPaymentPlan>,
}

impl ScheduleConfig {
    /// Plain schedule for the first `years` years
    pub fn horizon_years(years: u32) -> Self {
        Self {
            horizon_months: years * 12,
            extra: None,
        }
    }

    /// Plain schedule for the whole loan term
    pub fn full_term(terms: &LoanTerms) -> Self {
        Self::horizon_years(terms.term_years())
    }

    pub fn with_extra(mut self, plan: ExtraPaymentPlan) -> Self {
        self.extra = Some(plan);
        self
    }
}

/// Amortization engine for one set of loan terms
pub struct AmortizationEngine {
    terms: LoanTerms,
    config: ScheduleConfig,
}

impl AmortizationEngine {
    pub fn new(terms: LoanTerms, config: ScheduleConfig) -> Self {
        Self { terms, config }
    }

    /// Generate the schedule. Interest is always charged on the balance
    /// outstanding at the start of the month.
    pub fn run(&self) -> AmortizationSchedule {
        let payment = self.terms.fixed_payment();
        let mut schedule = AmortizationSchedule::new(self.terms.principal(), payment);
        let mut state = LoanState::from_terms(&self.terms);

        for _ in 0..self.config.horizon_months {
            if state.is_paid_off() {
                break;
            }
            state.advance_month();
            let period = self.calculate_month(&mut state, payment);
            schedule.add_period(period);
        }

        debug!(
            "amortized {:.0} at {:.2}% over {} years: {} periods, balance {:.2}",
            self.terms.principal(),
            self.terms.annual_rate_pct(),
            self.terms.term_years(),
            schedule.len(),
            schedule.balance_after(schedule.len() as u32),
        );

        schedule
    }

    fn calculate_month(&self, state: &mut LoanState, fixed_payment: f64) -> AmortizationPeriod {
        let interest = state.remaining * self.terms.monthly_rate();
        let scheduled = fixed_payment - interest;

        // Last contractual month or an overshooting payment settles the balance exactly
        let principal = if state.month >= self.terms.term_months() || scheduled > state.remaining {
            state.remaining
        } else {
            scheduled
        };
        let payment = principal + interest;

        let (extra_a, extra_b) = state.extra_due(self.config.extra.as_ref(), state.remaining - principal);
        state.extra_paid_a += extra_a;
        state.extra_paid_b += extra_b;
        state.remaining = (state.remaining - principal - extra_a - extra_b).max(0.0);

        let deduction = tax_deduction(interest);
        AmortizationPeriod {
            month: state.month,
            year: state.year,
            month_in_year: state.month_in_year,
            payment,
            interest,
            principal,
            extra_a,
            extra_b,
            remaining: state.remaining,
            tax_deduction: deduction,
            net_cost: payment - deduction,
        }
    }
}
