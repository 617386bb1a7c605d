//! Running state of a loan while the schedule is generated

use super::extra::ExtraPaymentPlan;
use super::terms::LoanTerms;

/// State of the loan at the start of a month
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Current month (1-indexed, 0 before the first payment)
    pub month: u32,

    /// Loan year (1-indexed)
    pub year: u32,

    /// Month within the loan year (1-12)
    pub month_in_year: u32,

    /// Outstanding balance before this month's payment
    pub remaining: f64,

    /// Cumulative extra principal paid by party A
    pub extra_paid_a: f64,

    /// Cumulative extra principal paid by party B
    pub extra_paid_b: f64,
}

impl LoanState {
    /// Initialize state at loan start
    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self {
            month: 0,
            year: 1,
            month_in_year: 0,
            remaining: terms.principal(),
            extra_paid_a: 0.0,
            extra_paid_b: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        self.year = (self.month - 1) / 12 + 1;
        self.month_in_year = (self.month - 1) % 12 + 1;
    }

    /// Whether the loan has been repaid in full
    pub fn is_paid_off(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Extra principal due this month, scaled down so it never exceeds
    /// `available` (the balance left after the scheduled principal)
    pub fn extra_due(&self, plan: Option<&ExtraPaymentPlan>, available: f64) -> (f64, f64) {
        let Some(plan) = plan else {
            return (0.0, 0.0);
        };
        if !plan.is_active(self.month) || available <= 0.0 {
            return (0.0, 0.0);
        }

        let (a, b) = (plan.monthly_a, plan.monthly_b);
        let total = a + b;
        if total <= available {
            (a, b)
        } else {
            let scale = available / total;
            let extra_a = a * scale;
            (extra_a, available - extra_a)
        }
    }
}
