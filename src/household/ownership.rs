//! Ownership shares over time, built from equity plus repaid principal

use serde::{Deserialize, Serialize};

use super::allocation::Split;
use super::party::Household;
use crate::error::{ensure_non_negative, CalcError, CalcResult};
use crate::loan::{AmortizationSchedule, LoanTerms};

/// Slack allowed when equity plus loan is compared against the price
const FUNDING_TOLERANCE: f64 = 1e-6;

/// Inputs for ownership tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnershipInputs {
    pub equity_a: f64,
    pub equity_b: f64,
    pub price: f64,
    pub loan: f64,
    pub term_years: u32,
    /// Fraction of each principal payment made by party A
    pub principal_share_a: f64,
}

impl OwnershipInputs {
    pub fn new(
        equity_a: f64,
        equity_b: f64,
        price: f64,
        loan: f64,
        term_years: u32,
        principal_share_a: f64,
    ) -> CalcResult<Self> {
        ensure_non_negative("equity_a", equity_a)?;
        ensure_non_negative("equity_b", equity_b)?;
        ensure_non_negative("loan", loan)?;
        ensure_non_negative("principal_share_a", principal_share_a)?;
        if !(price.is_finite() && price > 0.0) {
            return Err(CalcError::invalid("price", "must be a positive number"));
        }
        if term_years == 0 {
            return Err(CalcError::invalid("term_years", "must be at least 1"));
        }
        if principal_share_a > 1.0 {
            return Err(CalcError::invalid("principal_share_a", "must be at most 1"));
        }
        if equity_a + equity_b + loan > price + FUNDING_TOLERANCE {
            return Err(CalcError::invalid("loan", "equity plus loan must not exceed the price"));
        }
        Ok(Self {
            equity_a,
            equity_b,
            price,
            loan,
            term_years,
            principal_share_a,
        })
    }

    pub fn from_household(household: &Household, price: f64, terms: &LoanTerms) -> CalcResult<Self> {
        Self::new(
            household.party_a.equity,
            household.party_b.equity,
            price,
            terms.principal(),
            terms.term_years(),
            household.principal_share_a(),
        )
    }

    /// Percent of the price owned through equity alone
    pub fn base_pct(&self) -> Split {
        Split::new(self.equity_a / self.price * 100.0, self.equity_b / self.price * 100.0)
    }

    /// Shares after `year` years. Scheduled principal is divided by
    /// `principal_share_a`; extras belong to whoever paid them.
    fn snapshot(&self, year: u32, scheduled: f64, extra_a: f64, extra_b: f64) -> OwnershipSnapshot {
        let repaid = (scheduled + extra_a + extra_b).clamp(0.0, self.loan);
        let scheduled_a = scheduled * self.principal_share_a;
        let base = self.base_pct();
        let (a, b) = clamp_shares(
            base.a + (scheduled_a + extra_a) / self.price * 100.0,
            base.b + (scheduled - scheduled_a + extra_b) / self.price * 100.0,
        );

        OwnershipSnapshot {
            year,
            ownership_a_pct: a,
            ownership_b_pct: b,
            repaid,
            remaining: self.loan - repaid,
        }
    }
}

/// Each party's share of the property after `year` years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnershipSnapshot {
    pub year: u32,
    pub ownership_a_pct: f64,
    pub ownership_b_pct: f64,
    /// Principal repaid so far
    pub repaid: f64,
    /// Principal still outstanding
    pub remaining: f64,
}

impl OwnershipSnapshot {
    pub fn total_pct(&self) -> f64 {
        self.ownership_a_pct + self.ownership_b_pct
    }
}

/// Keep each share within [0, 100] and their sum at or below 100. Inputs are
/// never overfunded, so this only absorbs rounding.
fn clamp_shares(a: f64, b: f64) -> (f64, f64) {
    let a = a.clamp(0.0, 100.0);
    let b = b.clamp(0.0, 100.0);
    let total = a + b;
    if total > 100.0 {
        (a * 100.0 / total, b * 100.0 / total)
    } else {
        (a, b)
    }
}

/// Ownership after `elapsed_years`, assuming the loan is repaid in a straight
/// line (`loan / term` per year).
///
/// This is an approximation: a real annuity repays less principal early on,
/// so it overstates ownership growth in the first years. Use
/// [`ownership_from_schedule`] for the exact figure.
pub fn ownership_over_time(inputs: &OwnershipInputs, elapsed_years: u32) -> OwnershipSnapshot {
    if elapsed_years == 0 {
        return inputs.snapshot(0, 0.0, 0.0, 0.0);
    }
    let annual_principal = inputs.loan / inputs.term_years as f64;
    let repaid = (annual_principal * elapsed_years as f64).min(inputs.loan);
    inputs.snapshot(elapsed_years, repaid, 0.0, 0.0)
}

/// Straight-line ownership for every year from 0 through the loan term
pub fn ownership_series(inputs: &OwnershipInputs) -> Vec<OwnershipSnapshot> {
    (0..=inputs.term_years)
        .map(|year| ownership_over_time(inputs, year))
        .collect()
}

/// Ownership after `elapsed_years` using the principal actually repaid in the
/// schedule. Extra principal is credited to the party who paid it.
pub fn ownership_from_schedule(
    inputs: &OwnershipInputs,
    schedule: &AmortizationSchedule,
    elapsed_years: u32,
) -> OwnershipSnapshot {
    let (scheduled, extra_a, extra_b) = schedule
        .truncated(elapsed_years)
        .iter()
        .fold((0.0, 0.0, 0.0), |(s, a, b), p| (s + p.principal, a + p.extra_a, b + p.extra_b));
    inputs.snapshot(elapsed_years, scheduled, extra_a, extra_b)
}

/// Exact ownership for every year from 0 through the loan term
pub fn exact_ownership_series(
    inputs: &OwnershipInputs,
    schedule: &AmortizationSchedule,
) -> Vec<OwnershipSnapshot> {
    (0..=inputs.term_years)
        .map(|year| ownership_from_schedule(inputs, schedule, year))
        .collect()
}

/// Final ownership under three common co-ownership arrangements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnershipModels {
    /// Fixed 50/50 regardless of contributions
    pub fixed_equal: Split,
    /// Equity plus principal repaid under the chosen allocation policy
    pub chosen_policy: Split,
    /// Equity plus an equal split of the loan portion
    pub equity_plus_equal_loan: Split,
}

pub fn compare_ownership_models(inputs: &OwnershipInputs) -> OwnershipModels {
    let at_term = ownership_over_time(inputs, inputs.term_years);
    let base = inputs.base_pct();
    let half_loan = inputs.loan / inputs.price * 100.0 * 0.5;
    let (a, b) = clamp_shares(base.a + half_loan, base.b + half_loan);

    OwnershipModels {
        fixed_equal: Split::new(50.0, 50.0),
        chosen_policy: Split::new(at_term.ownership_a_pct, at_term.ownership_b_pct),
        equity_plus_equal_loan: Split::new(a, b),
    }
}
