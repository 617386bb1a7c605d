//! Settling extra principal payments between the parties

use serde::{Deserialize, Serialize};

use super::party::{Household, PartyId};
use crate::error::{ensure_non_negative, ensure_percentage, CalcError, CalcResult};
use crate::loan::{fixed_payment, AmortizationSchedule};

/// How extra principal paid by one party is compensated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtraPaymentTreatment {
    /// The payer's ownership share grows with what they paid
    IncreasedOwnership,
    /// Half of the net extra is a loan to the other party, repaid as an annuity
    PartnerLoan {
        internal_rate_pct: f64,
        repayment_years: u32,
    },
    /// The payer is credited against future half-payments
    FuturePaymentCredit,
    /// Part to ownership, part to payment credit, the rest to the common good
    Combination { ownership_pct: f64, credit_pct: f64 },
}

/// Outcome of applying a treatment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreatmentOutcome {
    IncreasedOwnership {
        invested_a: f64,
        invested_b: f64,
        ownership_a_pct: f64,
        ownership_b_pct: f64,
    },
    PartnerLoan {
        /// None when both paid the same, so nothing is owed
        lender: Option<PartyId>,
        amount: f64,
        monthly_repayment: f64,
    },
    FuturePaymentCredit {
        /// Half of the fixed payment, the credit consumed per month
        monthly_credit: f64,
        credit_months_a: f64,
        credit_months_b: f64,
    },
    Combination {
        to_ownership: f64,
        to_credit: f64,
        to_common: f64,
    },
}

/// Apply a treatment to the extras recorded in `schedule` during the first
/// `plan_years` years
pub fn apply_treatment(
    treatment: ExtraPaymentTreatment,
    household: &Household,
    price: f64,
    schedule: &AmortizationSchedule,
    plan_years: u32,
) -> CalcResult<TreatmentOutcome> {
    let totals = schedule.totals_through_year(plan_years);
    let (extra_a, extra_b) = (totals.total_extra_a, totals.total_extra_b);

    match treatment {
        ExtraPaymentTreatment::IncreasedOwnership => {
            if !(price.is_finite() && price > 0.0) {
                return Err(CalcError::invalid("price", "must be a positive number"));
            }
            let share_a = household.principal_share_a();
            let regular_a = totals.total_principal * share_a;
            let regular_b = totals.total_principal - regular_a;
            let invested_a = household.party_a.equity + regular_a + extra_a;
            let invested_b = household.party_b.equity + regular_b + extra_b;

            Ok(TreatmentOutcome::IncreasedOwnership {
                invested_a,
                invested_b,
                ownership_a_pct: (invested_a / price * 100.0).clamp(0.0, 100.0),
                ownership_b_pct: (invested_b / price * 100.0).clamp(0.0, 100.0),
            })
        }
        ExtraPaymentTreatment::PartnerLoan {
            internal_rate_pct,
            repayment_years,
        } => {
            ensure_non_negative("internal_rate_pct", internal_rate_pct)?;
            let (lender, amount) = if extra_a > extra_b {
                (Some(PartyId::A), (extra_a - extra_b) / 2.0)
            } else if extra_b > extra_a {
                (Some(PartyId::B), (extra_b - extra_a) / 2.0)
            } else {
                (None, 0.0)
            };
            let monthly_repayment = fixed_payment(amount, internal_rate_pct, repayment_years)?;

            Ok(TreatmentOutcome::PartnerLoan {
                lender,
                amount,
                monthly_repayment,
            })
        }
        ExtraPaymentTreatment::FuturePaymentCredit => {
            let monthly_credit = schedule.fixed_payment * 0.5;
            let months = |extra: f64| {
                if monthly_credit > 0.0 {
                    extra / monthly_credit
                } else {
                    0.0
                }
            };

            Ok(TreatmentOutcome::FuturePaymentCredit {
                monthly_credit,
                credit_months_a: months(extra_a),
                credit_months_b: months(extra_b),
            })
        }
        ExtraPaymentTreatment::Combination {
            ownership_pct,
            credit_pct,
        } => {
            ensure_percentage("ownership_pct", ownership_pct)?;
            ensure_percentage("credit_pct", credit_pct)?;
            if ownership_pct + credit_pct > 100.0 {
                return Err(CalcError::invalid(
                    "credit_pct",
                    "ownership and credit percentages exceed 100 combined",
                ));
            }
            let total = extra_a + extra_b;
            let to_ownership = total * ownership_pct / 100.0;
            let to_credit = total * credit_pct / 100.0;

            Ok(TreatmentOutcome::Combination {
                to_ownership,
                to_credit,
                to_common: total - to_ownership - to_credit,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AllocationPolicy, Party};
    use crate::loan::{schedule_with_extra, ExtraPaymentPlan, LoanTerms};
    use approx::assert_abs_diff_eq;

    fn household() -> Household {
        Household::new(
            Party::new("A", 37_900.0, 650_000.0),
            Party::new("B", 58_500.0, 650_000.0),
            AllocationPolicy::EqualSplit,
        )
    }

    fn schedule(monthly_a: f64, monthly_b: f64) -> AmortizationSchedule {
        let terms = LoanTerms::new(3_200_000.0, 4.99, 25).unwrap();
        schedule_with_extra(&terms, ExtraPaymentPlan::new(monthly_a, monthly_b, 5).unwrap())
    }

    #[test]
    fn test_increased_ownership_favours_payer() {
        let outcome = apply_treatment(
            ExtraPaymentTreatment::IncreasedOwnership,
            &household(),
            4_500_000.0,
            &schedule(10_000.0, 0.0),
            5,
        )
        .unwrap();

        match outcome {
            TreatmentOutcome::IncreasedOwnership { invested_a, invested_b, ownership_a_pct, ownership_b_pct } => {
                assert_abs_diff_eq!(invested_a - invested_b, 600_000.0, epsilon = 1e-6);
                assert!(ownership_a_pct > ownership_b_pct);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_partner_loan_single_payer() {
        let treatment = ExtraPaymentTreatment::PartnerLoan { internal_rate_pct: 2.0, repayment_years: 5 };
        let outcome = apply_treatment(treatment, &household(), 4_500_000.0, &schedule(0.0, 10_000.0), 5).unwrap();

        match outcome {
            TreatmentOutcome::PartnerLoan { lender, amount, monthly_repayment } => {
                assert_eq!(lender, Some(PartyId::B));
                assert_abs_diff_eq!(amount, 300_000.0, epsilon = 1e-6);
                assert_abs_diff_eq!(monthly_repayment, 5_258.4, epsilon = 1.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_partner_loan_equal_payers_owe_nothing() {
        let treatment = ExtraPaymentTreatment::PartnerLoan { internal_rate_pct: 2.0, repayment_years: 5 };
        let outcome = apply_treatment(treatment, &household(), 4_500_000.0, &schedule(4_000.0, 4_000.0), 5).unwrap();
        assert_eq!(
            outcome,
            TreatmentOutcome::PartnerLoan { lender: None, amount: 0.0, monthly_repayment: 0.0 }
        );
    }

    #[test]
    fn test_future_payment_credit_months() {
        let sched = schedule(9_344.0, 0.0);
        let outcome = apply_treatment(ExtraPaymentTreatment::FuturePaymentCredit, &household(), 4_500_000.0, &sched, 5).unwrap();

        match outcome {
            TreatmentOutcome::FuturePaymentCredit { monthly_credit, credit_months_a, credit_months_b } => {
                assert_abs_diff_eq!(monthly_credit, sched.fixed_payment / 2.0, epsilon = 1e-9);
                assert_abs_diff_eq!(credit_months_a, 9_344.0 * 60.0 / monthly_credit, epsilon = 1e-6);
                assert_eq!(credit_months_b, 0.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_combination_buckets_sum_to_total() {
        let treatment = ExtraPaymentTreatment::Combination { ownership_pct: 50.0, credit_pct: 25.0 };
        let outcome = apply_treatment(treatment, &household(), 4_500_000.0, &schedule(5_000.0, 3_000.0), 5).unwrap();

        match outcome {
            TreatmentOutcome::Combination { to_ownership, to_credit, to_common } => {
                assert_abs_diff_eq!(to_ownership, 240_000.0, epsilon = 1e-6);
                assert_abs_diff_eq!(to_credit, 120_000.0, epsilon = 1e-6);
                assert_abs_diff_eq!(to_common, 120_000.0, epsilon = 1e-6);
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let too_much = ExtraPaymentTreatment::Combination { ownership_pct: 80.0, credit_pct: 30.0 };
        assert!(apply_treatment(too_much, &household(), 4_500_000.0, &schedule(1.0, 1.0), 5).is_err());
    }
}
