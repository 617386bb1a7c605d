//! Loan terms for a single annuity mortgage

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcError, CalcResult};

/// Principal, nominal rate and term of an annuity loan
///
/// Constructed through [`LoanTerms::new`], which rejects out-of-range values, so
/// every calculator downstream can assume valid terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount financed
    principal: f64,
    /// Nominal annual interest rate in percent (4.99 = 4.99%)
    annual_rate_pct: f64,
    /// Amortization term in years
    term_years: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_pct: f64, term_years: u32) -> CalcResult<Self> {
        ensure_non_negative("principal", principal)?;
        ensure_non_negative("annual_rate_pct", annual_rate_pct)?;
        if term_years == 0 {
            return Err(CalcError::invalid("term_years", "must be at least 1"));
        }
        Ok(Self {
            principal,
            annual_rate_pct,
            term_years,
        })
    }

    /// Same loan at a different interest rate
    pub fn with_rate(&self, annual_rate_pct: f64) -> CalcResult<Self> {
        Self::new(self.principal, annual_rate_pct, self.term_years)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_pct(&self) -> f64 {
        self.annual_rate_pct
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Periodic (monthly) rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / 12.0
    }

    /// Total number of monthly payments over the full term
    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Fixed monthly payment for these terms
    pub fn fixed_payment(&self) -> f64 {
        let n = self.term_months() as f64;
        if self.annual_rate_pct == 0.0 {
            return self.principal / n;
        }
        let r = self.monthly_rate();
        let growth = (1.0 + r).powf(n);
        self.principal * (r * growth) / (growth - 1.0)
    }

    /// Interest charged in the first month, before any principal is repaid
    pub fn first_month_interest(&self) -> f64 {
        self.principal * self.monthly_rate()
    }
}
