//! Co-ownership mortgage calculator - affordability, cost sharing and sale
//! settlement for two co-borrowers
//!
//! This library provides:
//! - Annuity payment and month-by-month amortization schedules, with optional extra principal
//! - Interest tax deduction, debt service ratios, rate scenarios and stress tests
//! - Ten-year mortgage rate forecasts under named scenarios
//! - Cost allocation between the parties and ownership tracking over time
//! - Sale proceeds, settlement under several policies and an appreciation sweep
//! - Saved scenarios and a calculator that evaluates them end to end

pub mod affordability;
pub mod assumptions;
pub mod error;
pub mod forecast;
pub mod household;
pub mod loan;
pub mod scenario;
pub mod settlement;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use error::{CalcError, CalcResult};
pub use forecast::{generate_forecast, ForecastPolicy, RateForecast};
pub use household::{allocate, AllocationPolicy, Household, Party, Split};
pub use loan::{build_schedule, fixed_payment, AmortizationPeriod, AmortizationSchedule, LoanTerms};
pub use scenario::{Calculator, ScenarioInput, ScenarioRecord, ScenarioReport, ScenarioStore};
pub use settlement::{net_proceeds, settle, SettlementPolicy};
