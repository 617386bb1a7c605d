//! Extra principal payments on top of the fixed annuity payment

use serde::{Deserialize, Serialize};

use super::engine::{AmortizationEngine, ScheduleConfig};
use super::schedule::AmortizationSchedule;
use super::terms::LoanTerms;
use crate::error::{ensure_non_negative, CalcResult};

/// Monthly extra principal from each party for a limited number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentPlan {
    /// Extra paid by party A each month
    pub monthly_a: f64,
    /// Extra paid by party B each month
    pub monthly_b: f64,
    /// Number of years the extras are paid, starting in month 1
    pub years: u32,
}

impl ExtraPaymentPlan {
    pub fn new(monthly_a: f64, monthly_b: f64, years: u32) -> CalcResult<Self> {
        ensure_non_negative("extra.monthly_a", monthly_a)?;
        ensure_non_negative("extra.monthly_b", monthly_b)?;
        Ok(Self {
            monthly_a,
            monthly_b,
            years,
        })
    }

    /// Whether extras are paid in the given (1-indexed) month
    pub fn is_active(&self, month: u32) -> bool {
        month >= 1 && month <= self.years * 12
    }

    /// Planned extra from party A over the whole plan, ignoring early payoff
    pub fn planned_total_a(&self) -> f64 {
        self.monthly_a * 12.0 * self.years as f64
    }

    /// Planned extra from party B over the whole plan, ignoring early payoff
    pub fn planned_total_b(&self) -> f64 {
        self.monthly_b * 12.0 * self.years as f64
    }

    pub fn planned_total(&self) -> f64 {
        self.planned_total_a() + self.planned_total_b()
    }

    pub fn is_empty(&self) -> bool {
        self.years == 0 || (self.monthly_a == 0.0 && self.monthly_b == 0.0)
    }
}

/// Effect of an extra-payment plan compared with the plain schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    /// Extra principal actually paid by A (stops at payoff)
    pub paid_a: f64,
    /// Extra principal actually paid by B (stops at payoff)
    pub paid_b: f64,
    /// Months until payoff without extras
    pub base_months: u32,
    /// Months until payoff with extras
    pub accelerated_months: u32,
    pub months_saved: u32,
    /// Interest avoided over the life of the loan
    pub interest_saved: f64,
    /// Interest avoided as a percent of the extra paid
    pub return_pct: f64,
}

impl ExtraPaymentImpact {
    pub fn years_saved(&self) -> f64 {
        self.months_saved as f64 / 12.0
    }

    pub fn total_paid(&self) -> f64 {
        self.paid_a + self.paid_b
    }
}

/// Full-term schedule with the plan's extras applied
pub fn schedule_with_extra(terms: &LoanTerms, plan: ExtraPaymentPlan) -> AmortizationSchedule {
    let config = ScheduleConfig::full_term(terms).with_extra(plan);
    AmortizationEngine::new(*terms, config).run()
}

/// Compare full-term schedules with and without the plan
pub fn extra_payment_impact(terms: &LoanTerms, plan: ExtraPaymentPlan) -> ExtraPaymentImpact {
    let base = AmortizationEngine::new(*terms, ScheduleConfig::full_term(terms)).run();
    let accelerated = schedule_with_extra(terms, plan);

    let base_totals = base.totals();
    let accel_totals = accelerated.totals();
    let paid = accel_totals.total_extra_a + accel_totals.total_extra_b;
    let interest_saved = base_totals.total_interest - accel_totals.total_interest;

    ExtraPaymentImpact {
        paid_a: accel_totals.total_extra_a,
        paid_b: accel_totals.total_extra_b,
        base_months: base_totals.months,
        accelerated_months: accel_totals.months,
        months_saved: base_totals.months.saturating_sub(accel_totals.months),
        interest_saved,
        return_pct: if paid > 0.0 { interest_saved / paid * 100.0 } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn terms() -> LoanTerms {
        LoanTerms::new(3_200_000.0, 4.99, 25).unwrap()
    }

    #[test]
    fn test_plan_totals() {
        let plan = ExtraPaymentPlan::new(5_000.0, 3_000.0, 5).unwrap();
        assert_eq!(plan.planned_total_a(), 300_000.0);
        assert_eq!(plan.planned_total_b(), 180_000.0);
        assert!(plan.is_active(60));
        assert!(!plan.is_active(61));
        assert!(ExtraPaymentPlan::new(-1.0, 0.0, 5).is_err());
    }

    #[test]
    fn test_extras_shorten_loan_and_save_interest() {
        let plan = ExtraPaymentPlan::new(5_000.0, 3_000.0, 5).unwrap();
        let impact = extra_payment_impact(&terms(), plan);

        assert_eq!(impact.base_months, 300);
        assert!(impact.accelerated_months < 300);
        assert!(impact.interest_saved > 0.0);
        assert_abs_diff_eq!(impact.years_saved(), impact.months_saved as f64 / 12.0, epsilon = 1e-12);
        assert!(impact.years_saved() > 1.0);
        assert_abs_diff_eq!(impact.total_paid(), 480_000.0, epsilon = 1e-6);
        assert!(impact.return_pct > 0.0);
    }

    #[test]
    fn test_extra_schedule_still_repays_principal() {
        let plan = ExtraPaymentPlan::new(10_000.0, 0.0, 10).unwrap();
        let schedule = schedule_with_extra(&terms(), plan);

        let repaid: f64 = schedule.periods.iter().map(|p| p.total_principal()).sum();
        assert_abs_diff_eq!(repaid, 3_200_000.0, epsilon = 1e-4);
        assert!(schedule.periods.iter().all(|p| p.extra_b == 0.0));
        assert_eq!(schedule.periods.last().unwrap().remaining, 0.0);
    }

    #[test]
    fn test_empty_plan_changes_nothing() {
        let plan = ExtraPaymentPlan::new(0.0, 0.0, 5).unwrap();
        let impact = extra_payment_impact(&terms(), plan);
        assert_eq!(impact.months_saved, 0);
        assert_eq!(impact.interest_saved, 0.0);
        assert_eq!(impact.return_pct, 0.0);
    }
}
