//! Affordability: tax deduction, debt service ratios, monthly cost picture,
//! rate scenarios, stress tests and the household budget

mod budget;
mod costs;
mod stress;
mod tax;

pub use budget::{
    household_budget, BudgetInputs, HouseholdBudget, PartyBudget, PersonalExpenses, SavingsRating, SharedExpenses,
};
pub use costs::{
    equity_assessment, purchase_costs, EquityAssessment, EquityRating, MonthlyCostBreakdown, PartyBurden,
    PurchaseCosts,
};
pub use stress::{
    default_rate_scenarios, default_stress_scenarios, rate_cost_table, run_stress_tests, RateCostRow, RateScenario,
    RiskLevel, StressReport, StressResult, StressScenario, CRISIS_RATE_PCT,
};
pub use tax::{debt_service_ratio, effective_debt_service_ratio, tax_deduction, BurdenLevel, INTEREST_DEDUCTION_RATE};
