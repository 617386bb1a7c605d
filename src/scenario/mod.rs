//! Scenario evaluation
//!
//! A [`ScenarioInput`] holds every parameter of one purchase. The
//! [`Calculator`] keeps the assumptions loaded once and runs every engine
//! component over an input, returning a [`ScenarioReport`].

mod store;

pub use store::{export_json, import_json, JsonFileStore, MemoryStore, ScenarioRecord, ScenarioStore};

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::affordability::{
    default_rate_scenarios, default_stress_scenarios, equity_assessment, household_budget, purchase_costs,
    rate_cost_table, run_stress_tests, BudgetInputs, EquityAssessment, HouseholdBudget, MonthlyCostBreakdown,
    PurchaseCosts, RateCostRow, StressReport,
};
use crate::assumptions::Assumptions;
use crate::error::{ensure_non_negative, CalcError, CalcResult};
use crate::forecast::{generate_forecast, ForecastPolicy, RateForecast};
use crate::household::{
    apply_treatment, compare_ownership_models, exact_ownership_series, ownership_series, AllocationPolicy,
    ExtraPaymentTreatment, Household, OwnershipInputs, OwnershipModels, OwnershipSnapshot, Party, TreatmentOutcome,
};
use crate::loan::{
    extra_payment_impact, full_schedule, schedule_with_extra, AmortizationSchedule, ExtraPaymentImpact,
    ExtraPaymentPlan, LoanTerms, ScheduleTotals, YearlySummary,
};
use crate::settlement::{analyze_sale, SaleAnalysis, SaleAssumptions, SettlementPolicy};

fn default_forecast_policy() -> ForecastPolicy {
    ForecastPolicy::MainCase
}

/// Every input to one purchase calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Purchase price
    pub price: f64,
    /// Nominal annual interest rate in percent
    pub interest_rate_pct: f64,
    pub term_years: u32,
    /// Monthly shared costs on top of the loan payment
    pub shared_costs: f64,

    pub party_a: Party,
    pub party_b: Party,
    pub allocation: AllocationPolicy,

    #[serde(default)]
    pub sale: SaleAssumptions,
    #[serde(default)]
    pub settlement_policy: SettlementPolicy,
    #[serde(default = "default_forecast_policy")]
    pub forecast_policy: ForecastPolicy,

    #[serde(default)]
    pub extra: Option<ExtraPaymentPlan>,
    #[serde(default)]
    pub extra_treatment: Option<ExtraPaymentTreatment>,

    #[serde(default)]
    pub budget: BudgetInputs,
}

impl ScenarioInput {
    pub fn household(&self) -> Household {
        Household::new(self.party_a.clone(), self.party_b.clone(), self.allocation)
    }

    pub fn total_equity(&self) -> f64 {
        self.party_a.equity + self.party_b.equity
    }

    /// Price less the parties' combined equity
    pub fn loan_amount(&self) -> f64 {
        self.price - self.total_equity()
    }

    pub fn loan_terms(&self) -> CalcResult<LoanTerms> {
        LoanTerms::new(self.loan_amount(), self.interest_rate_pct, self.term_years)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(CalcError::invalid("price", "must be a positive number"));
        }
        ensure_non_negative("shared_costs", self.shared_costs)?;
        self.household().validate()?;
        if self.loan_amount() < 0.0 {
            return Err(CalcError::invalid("equity", "combined equity exceeds the purchase price"));
        }
        self.loan_terms()?;
        self.sale.validate()?;
        if self.sale.sale_year == 0 || self.sale.sale_year > self.term_years {
            return Err(CalcError::invalid(
                "sale.sale_year",
                format!("must be between 1 and the loan term ({} years)", self.term_years),
            ));
        }
        if let Some(plan) = &self.extra {
            ExtraPaymentPlan::new(plan.monthly_a, plan.monthly_b, plan.years)?;
        }
        Ok(())
    }
}

/// Everything computed for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub loan: f64,
    pub purchase_costs: PurchaseCosts,
    pub equity: EquityAssessment,
    pub monthly: MonthlyCostBreakdown,

    /// Full-term schedule, extras applied when a plan is given
    pub schedule: AmortizationSchedule,
    pub totals: ScheduleTotals,
    pub yearly: Vec<YearlySummary>,

    pub forecast: RateForecast,
    pub rate_table: Vec<RateCostRow>,
    pub stress: StressReport,

    /// Straight-line ownership by year
    pub ownership: Vec<OwnershipSnapshot>,
    /// Ownership from the principal actually repaid
    pub exact_ownership: Vec<OwnershipSnapshot>,
    pub ownership_models: OwnershipModels,

    pub extra_impact: Option<ExtraPaymentImpact>,
    pub extra_treatment: Option<TreatmentOutcome>,

    pub sale: SaleAnalysis,
    pub budget: HouseholdBudget,
}

/// Runs scenarios against one set of assumptions
#[derive(Debug, Clone)]
pub struct Calculator {
    assumptions: Assumptions,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_norway())
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Calculator with assumptions read from CSV files in `path`
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// The schedule a scenario is evaluated on
    pub fn schedule(&self, input: &ScenarioInput) -> CalcResult<AmortizationSchedule> {
        let terms = input.loan_terms()?;
        Ok(match input.extra {
            Some(plan) if !plan.is_empty() => schedule_with_extra(&terms, plan),
            _ => full_schedule(&terms),
        })
    }

    pub fn evaluate(&self, input: &ScenarioInput) -> CalcResult<ScenarioReport> {
        input.validate()?;
        let assumptions = &self.assumptions;
        let household = input.household();
        let terms = input.loan_terms()?;

        let purchase_costs = purchase_costs(input.price, &assumptions.fees)?;
        let equity = equity_assessment(input.total_equity(), input.price, &assumptions.equity)?;
        let monthly = MonthlyCostBreakdown::compute(&terms, input.shared_costs, &household)?;

        let schedule = self.schedule(input)?;
        let totals = schedule.totals();
        let yearly = schedule.yearly_summary();

        let forecast = generate_forecast(input.forecast_policy, input.interest_rate_pct, &assumptions.policy_rates);
        let main_case = generate_forecast(ForecastPolicy::MainCase, input.interest_rate_pct, &assumptions.policy_rates);
        let rate_table = rate_cost_table(
            &terms,
            input.shared_costs,
            &household,
            &default_rate_scenarios(input.interest_rate_pct, &main_case),
        )?;
        let stress_scenarios =
            default_stress_scenarios(&household, input.interest_rate_pct, &assumptions.income_replacement);
        let stress = run_stress_tests(&terms, input.shared_costs, &stress_scenarios)?;

        let ownership_inputs = OwnershipInputs::from_household(&household, input.price, &terms)?;
        let ownership = ownership_series(&ownership_inputs);
        let exact_ownership = exact_ownership_series(&ownership_inputs, &schedule);
        let ownership_models = compare_ownership_models(&ownership_inputs);

        let (extra_impact, extra_treatment) = match input.extra {
            Some(plan) if !plan.is_empty() => {
                let impact = extra_payment_impact(&terms, plan);
                let treatment = input
                    .extra_treatment
                    .map(|t| apply_treatment(t, &household, input.price, &schedule, plan.years))
                    .transpose()?;
                (Some(impact), treatment)
            }
            _ => (None, None),
        };

        let sale = analyze_sale(
            &household,
            input.price,
            &schedule,
            &input.sale,
            input.settlement_policy,
            &assumptions.appreciation_sweep,
        )?;
        let budget = household_budget(&household, monthly.cost_split, &input.budget)?;

        debug!(
            "evaluated scenario: loan {:.0}, {} periods, risk {:?}",
            terms.principal(),
            schedule.len(),
            stress.risk
        );

        Ok(ScenarioReport {
            loan: terms.principal(),
            purchase_costs,
            equity,
            monthly,
            schedule,
            totals,
            yearly,
            forecast,
            rate_table,
            stress,
            ownership,
            exact_ownership,
            ownership_models,
            extra_impact,
            extra_treatment,
            sale,
            budget,
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
