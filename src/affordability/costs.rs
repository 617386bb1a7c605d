//! Purchase costs, equity check and the monthly cost picture for a household

use serde::{Deserialize, Serialize};

use super::tax::{debt_service_ratio, effective_debt_service_ratio, tax_deduction, BurdenLevel};
use crate::assumptions::{EquityThresholds, PurchaseFees};
use crate::error::{ensure_non_negative, CalcError, CalcResult};
use crate::household::{Household, Split};
use crate::loan::LoanTerms;

/// One-off costs of buying
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCosts {
    pub document_fee: f64,
    pub registration_fees: f64,
    pub total: f64,
}

pub fn purchase_costs(price: f64, fees: &PurchaseFees) -> CalcResult<PurchaseCosts> {
    ensure_non_negative("price", price)?;
    let document_fee = price * fees.document_fee_rate;
    let registration_fees = fees.deed_registration_fee + fees.mortgage_registration_fee;
    Ok(PurchaseCosts {
        document_fee,
        registration_fees,
        total: document_fee + registration_fees,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquityRating {
    /// Below the legal minimum
    Insufficient,
    /// Financeable, but below the recommended level
    BelowRecommended,
    Adequate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityAssessment {
    pub equity_pct: f64,
    pub rating: EquityRating,
}

pub fn equity_assessment(
    equity: f64,
    price: f64,
    thresholds: &EquityThresholds,
) -> CalcResult<EquityAssessment> {
    ensure_non_negative("equity", equity)?;
    if !(price.is_finite() && price > 0.0) {
        return Err(CalcError::invalid("price", "must be a positive number"));
    }
    let equity_pct = equity / price * 100.0;
    let rating = if equity_pct < thresholds.minimum_pct {
        EquityRating::Insufficient
    } else if equity_pct < thresholds.recommended_pct {
        EquityRating::BelowRecommended
    } else {
        EquityRating::Adequate
    };
    Ok(EquityAssessment { equity_pct, rating })
}

/// Monthly burden for one party
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartyBurden {
    /// Share of payment plus shared costs
    pub cost: f64,
    /// Share of the monthly tax deduction
    pub tax_deduction: f64,
    pub ratio_pct: f64,
    pub effective_ratio_pct: f64,
    pub level: BurdenLevel,
    pub effective_level: BurdenLevel,
    /// Income left after housing cost
    pub disposable_before_deduction: f64,
    /// Income left after housing cost, counting the tax deduction
    pub disposable_after_deduction: f64,
}

impl PartyBurden {
    fn new(income: f64, cost: f64, deduction: f64) -> Self {
        let ratio_pct = debt_service_ratio(cost, income);
        let effective_ratio_pct = effective_debt_service_ratio(cost, income, deduction);
        Self {
            cost,
            tax_deduction: deduction,
            ratio_pct,
            effective_ratio_pct,
            level: BurdenLevel::nominal(ratio_pct),
            effective_level: BurdenLevel::effective(effective_ratio_pct),
            disposable_before_deduction: income - cost,
            disposable_after_deduction: income + deduction - cost,
        }
    }
}

/// Monthly housing cost for a household in the first month of the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCostBreakdown {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub tax_deduction: f64,
    pub shared_costs: f64,
    /// What actually leaves the accounts each month: payment plus shared costs
    pub total: f64,
    pub cost_split: Split,
    pub deduction_split: Split,
    pub party_a: PartyBurden,
    pub party_b: PartyBurden,
}

impl MonthlyCostBreakdown {
    pub fn compute(terms: &LoanTerms, shared_costs: f64, household: &Household) -> CalcResult<Self> {
        ensure_non_negative("shared_costs", shared_costs)?;

        let payment = terms.fixed_payment();
        let interest = terms.first_month_interest();
        let deduction = tax_deduction(interest);
        let total = payment + shared_costs;

        let cost_split = household.split(total)?;
        let deduction_split = household.split(deduction)?;

        Ok(Self {
            payment,
            interest,
            principal: payment - interest,
            tax_deduction: deduction,
            shared_costs,
            total,
            cost_split,
            deduction_split,
            party_a: PartyBurden::new(household.party_a.monthly_income, cost_split.a, deduction_split.a),
            party_b: PartyBurden::new(household.party_b.monthly_income, cost_split.b, deduction_split.b),
        })
    }

    /// Mean of the two parties' nominal ratios
    pub fn average_ratio_pct(&self) -> f64 {
        (self.party_a.ratio_pct + self.party_b.ratio_pct) / 2.0
    }

    /// Combined income left after housing cost and tax deduction
    pub fn total_disposable(&self) -> f64 {
        self.party_a.disposable_after_deduction + self.party_b.disposable_after_deduction
    }
}
