//! Rate scenario cost table and household stress tests

use serde::{Deserialize, Serialize};

use super::tax::{debt_service_ratio, effective_debt_service_ratio, tax_deduction};
use crate::assumptions::IncomeReplacement;
use crate::error::{ensure_non_negative, CalcResult};
use crate::forecast::RateForecast;
use crate::household::{Household, Split};
use crate::loan::LoanTerms;

/// Rate used when every margin has collapsed
pub const CRISIS_RATE_PCT: f64 = 8.0;

/// A labelled interest rate to price the loan at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateScenario {
    pub label: String,
    pub annual_rate_pct: f64,
}

impl RateScenario {
    pub fn new(label: impl Into<String>, annual_rate_pct: f64) -> Self {
        Self {
            label: label.into(),
            annual_rate_pct,
        }
    }
}

/// Today's rate, four forecast years, two shocks and a crisis rate
pub fn default_rate_scenarios(current_rate_pct: f64, forecast: &RateForecast) -> Vec<RateScenario> {
    let mut scenarios = vec![RateScenario::new("Current rate", current_rate_pct)];
    scenarios.extend(
        forecast
            .points
            .iter()
            .skip(1)
            .take(4)
            .map(|p| RateScenario::new(format!("{} forecast", p.year), p.rate_pct)),
    );
    scenarios.push(RateScenario::new("+1% from current", current_rate_pct + 1.0));
    scenarios.push(RateScenario::new("+2% from current", current_rate_pct + 2.0));
    scenarios.push(RateScenario::new("Crisis", CRISIS_RATE_PCT));
    scenarios
}

/// Monthly cost of the loan at one scenario rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCostRow {
    pub label: String,
    pub annual_rate_pct: f64,
    pub payment: f64,
    /// Payment plus shared costs
    pub total: f64,
    pub tax_deduction: f64,
    pub cost_split: Split,
    pub ratio_a_pct: f64,
    pub ratio_b_pct: f64,
    pub effective_ratio_a_pct: f64,
    pub effective_ratio_b_pct: f64,
    /// Change in monthly total against the first scenario
    pub change: f64,
    pub change_pct: f64,
}

pub fn rate_cost_table(
    terms: &LoanTerms,
    shared_costs: f64,
    household: &Household,
    scenarios: &[RateScenario],
) -> CalcResult<Vec<RateCostRow>> {
    ensure_non_negative("shared_costs", shared_costs)?;
    let current_total = terms.fixed_payment() + shared_costs;
    let (income_a, income_b) = (household.party_a.monthly_income, household.party_b.monthly_income);

    scenarios
        .iter()
        .map(|scenario| {
            let scenario_terms = terms.with_rate(scenario.annual_rate_pct)?;
            let payment = scenario_terms.fixed_payment();
            let deduction = tax_deduction(scenario_terms.first_month_interest());
            let total = payment + shared_costs;
            let cost_split = household.split(total)?;
            let deduction_split = household.split(deduction)?;
            let change = total - current_total;

            Ok(RateCostRow {
                label: scenario.label.clone(),
                annual_rate_pct: scenario.annual_rate_pct,
                payment,
                total,
                tax_deduction: deduction,
                cost_split,
                ratio_a_pct: debt_service_ratio(cost_split.a, income_a),
                ratio_b_pct: debt_service_ratio(cost_split.b, income_b),
                effective_ratio_a_pct: effective_debt_service_ratio(cost_split.a, income_a, deduction_split.a),
                effective_ratio_b_pct: effective_debt_service_ratio(cost_split.b, income_b, deduction_split.b),
                change,
                change_pct: if current_total > 0.0 { change / current_total * 100.0 } else { 0.0 },
            })
        })
        .collect()
}

/// Adjusted incomes and rate for one stress scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    pub label: String,
    pub description: String,
    pub income_a: f64,
    pub income_b: f64,
    pub annual_rate_pct: f64,
}

/// Job loss, sick leave and rate shocks for the household
pub fn default_stress_scenarios(
    household: &Household,
    current_rate_pct: f64,
    replacement: &IncomeReplacement,
) -> Vec<StressScenario> {
    let (a, b) = (&household.party_a, &household.party_b);
    let (income_a, income_b) = (a.monthly_income, b.monthly_income);
    let scenario = |label: String, description: String, income_a: f64, income_b: f64, rate: f64| StressScenario {
        label,
        description,
        income_a,
        income_b,
        annual_rate_pct: rate,
    };

    vec![
        scenario(
            "Normal".into(),
            "Both employed, current rate".into(),
            income_a,
            income_b,
            current_rate_pct,
        ),
        scenario(
            format!("{} loses job", a.name),
            format!("{} on unemployment benefit", a.name),
            replacement.unemployment(income_a),
            income_b,
            current_rate_pct,
        ),
        scenario(
            format!("{} loses job", b.name),
            format!("{} on unemployment benefit", b.name),
            income_a,
            replacement.unemployment(income_b),
            current_rate_pct,
        ),
        scenario(
            "Both lose jobs".into(),
            "Both on unemployment benefit".into(),
            replacement.unemployment(income_a),
            replacement.unemployment(income_b),
            current_rate_pct,
        ),
        scenario(
            format!("{} long-term sick", a.name),
            format!("{} on sick pay", a.name),
            replacement.sick_pay(income_a),
            income_b,
            current_rate_pct,
        ),
        scenario(
            "Rate shock (+3%)".into(),
            "Sharp rate increase".into(),
            income_a,
            income_b,
            current_rate_pct + 3.0,
        ),
        scenario(
            "Perfect storm".into(),
            "Reduced incomes and +2% rate".into(),
            replacement.unemployment(income_a),
            replacement.unemployment(income_b),
            current_rate_pct + 2.0,
        ),
    ]
}

/// Outcome of one stress scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    pub label: String,
    pub annual_rate_pct: f64,
    pub total_income: f64,
    pub total_cost: f64,
    pub tax_deduction: f64,
    pub margin_before_deduction: f64,
    pub margin_after_deduction: f64,
    pub can_pay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Every scenario leaves a positive margin
    Low,
    /// One or two scenarios go negative
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    pub results: Vec<StressResult>,
    /// Scenarios with a negative margin before the tax deduction
    pub critical_count: usize,
    pub risk: RiskLevel,
}

pub fn run_stress_tests(
    terms: &LoanTerms,
    shared_costs: f64,
    scenarios: &[StressScenario],
) -> CalcResult<StressReport> {
    ensure_non_negative("shared_costs", shared_costs)?;

    let results = scenarios
        .iter()
        .map(|scenario| {
            let scenario_terms = terms.with_rate(scenario.annual_rate_pct)?;
            let total_cost = scenario_terms.fixed_payment() + shared_costs;
            let deduction = tax_deduction(scenario_terms.first_month_interest());
            let total_income = scenario.income_a + scenario.income_b;

            Ok(StressResult {
                label: scenario.label.clone(),
                annual_rate_pct: scenario.annual_rate_pct,
                total_income,
                total_cost,
                tax_deduction: deduction,
                margin_before_deduction: total_income - total_cost,
                margin_after_deduction: total_income + deduction - total_cost,
                can_pay: total_income >= total_cost,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let critical_count = results.iter().filter(|r| r.margin_before_deduction < 0.0).count();
    let risk = match critical_count {
        0 => RiskLevel::Low,
        1..=2 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    };

    Ok(StressReport {
        results,
        critical_count,
        risk,
    })
}
