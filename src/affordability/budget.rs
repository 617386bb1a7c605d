//! Household budget after the purchase: personal debts, living costs and
//! shared running expenses on top of the housing cost

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcResult};
use crate::household::{Household, Split};

/// Monthly outgoings carried by one party alone
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalExpenses {
    pub student_loan: f64,
    pub car_loan: f64,
    pub other_debt: f64,
    pub food: f64,
    pub transport: f64,
    pub miscellaneous: f64,
}

impl PersonalExpenses {
    pub fn debts(&self) -> f64 {
        self.student_loan + self.car_loan + self.other_debt
    }

    pub fn living_costs(&self) -> f64 {
        self.food + self.transport + self.miscellaneous
    }

    fn validate(&self, label: &str) -> CalcResult<()> {
        for (field, value) in [
            ("student_loan", self.student_loan),
            ("car_loan", self.car_loan),
            ("other_debt", self.other_debt),
            ("food", self.food),
            ("transport", self.transport),
            ("miscellaneous", self.miscellaneous),
        ] {
            ensure_non_negative(&format!("{label}.{field}"), value)?;
        }
        Ok(())
    }
}

/// Monthly running costs of the home other than the loan
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedExpenses {
    pub electricity: f64,
    pub internet: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub municipal_fees: f64,
    pub other: f64,
}

impl SharedExpenses {
    pub fn total(&self) -> f64 {
        self.electricity + self.internet + self.insurance + self.maintenance + self.municipal_fees + self.other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsRating {
    /// More than 20% of income left over
    Excellent,
    Good,
    Tight,
    /// Nothing left, or spending exceeds income
    Deficit,
}

impl SavingsRating {
    pub fn from_rate(savings_rate_pct: f64) -> Self {
        if savings_rate_pct > 20.0 {
            SavingsRating::Excellent
        } else if savings_rate_pct > 10.0 {
            SavingsRating::Good
        } else if savings_rate_pct > 0.0 {
            SavingsRating::Tight
        } else {
            SavingsRating::Deficit
        }
    }
}

/// One party's monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyBudget {
    pub income: f64,
    pub housing: f64,
    pub debts: f64,
    pub living_costs: f64,
    pub shared_expenses: f64,
    pub total_expenses: f64,
    /// Income minus every expense, negative when in deficit
    pub disposable: f64,
    pub savings_rate_pct: f64,
    pub rating: SavingsRating,
}

impl PartyBudget {
    fn new(income: f64, housing: f64, personal: &PersonalExpenses, shared_share: f64) -> Self {
        let debts = personal.debts();
        let living_costs = personal.living_costs();
        let total_expenses = housing + debts + living_costs + shared_share;
        let disposable = income - total_expenses;
        let savings_rate_pct = if income > 0.0 { disposable / income * 100.0 } else { 0.0 };

        Self {
            income,
            housing,
            debts,
            living_costs,
            shared_expenses: shared_share,
            total_expenses,
            disposable,
            savings_rate_pct,
            rating: SavingsRating::from_rate(savings_rate_pct),
        }
    }
}

/// Budget inputs beyond the mortgage itself
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetInputs {
    pub party_a: PersonalExpenses,
    pub party_b: PersonalExpenses,
    pub shared: SharedExpenses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdBudget {
    pub party_a: PartyBudget,
    pub party_b: PartyBudget,
    /// Shared running costs as split by the allocation policy
    pub shared_split: Split,
}

impl HouseholdBudget {
    pub fn combined_disposable(&self) -> f64 {
        self.party_a.disposable + self.party_b.disposable
    }
}

/// Build both parties' budgets. `housing` is each party's share of the
/// monthly housing cost, normally the cost split of a
/// [`MonthlyCostBreakdown`](super::MonthlyCostBreakdown).
pub fn household_budget(household: &Household, housing: Split, inputs: &BudgetInputs) -> CalcResult<HouseholdBudget> {
    inputs.party_a.validate("budget.party_a")?;
    inputs.party_b.validate("budget.party_b")?;
    ensure_non_negative("budget.shared", inputs.shared.total())?;

    let shared_split = household.split(inputs.shared.total())?;

    Ok(HouseholdBudget {
        party_a: PartyBudget::new(
            household.party_a.monthly_income,
            housing.a,
            &inputs.party_a,
            shared_split.a,
        ),
        party_b: PartyBudget::new(
            household.party_b.monthly_income,
            housing.b,
            &inputs.party_b,
            shared_split.b,
        ),
        shared_split,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{AllocationPolicy, Party};
    use approx::assert_abs_diff_eq;

    fn household(policy: AllocationPolicy) -> Household {
        Household::new(
            Party::new("Thale", 40_000.0, 650_000.0),
            Party::new("Jonas", 60_000.0, 650_000.0),
            policy,
        )
    }

    fn inputs() -> BudgetInputs {
        BudgetInputs {
            party_a: PersonalExpenses {
                student_loan: 2_900.0,
                food: 4_000.0,
                transport: 1_500.0,
                miscellaneous: 2_000.0,
                ..PersonalExpenses::default()
            },
            party_b: PersonalExpenses {
                car_loan: 3_000.0,
                food: 4_000.0,
                ..PersonalExpenses::default()
            },
            shared: SharedExpenses {
                electricity: 1_500.0,
                internet: 800.0,
                insurance: 1_200.0,
                maintenance: 1_000.0,
                municipal_fees: 800.0,
                other: 0.0,
            },
        }
    }

    #[test]
    fn test_budget_totals() {
        let budget = household_budget(
            &household(AllocationPolicy::EqualSplit),
            Split::new(11_000.0, 11_000.0),
            &inputs(),
        )
        .unwrap();

        assert_eq!(budget.shared_split, Split::new(2_650.0, 2_650.0));
        let a = &budget.party_a;
        assert_eq!(a.debts, 2_900.0);
        assert_eq!(a.living_costs, 7_500.0);
        assert_abs_diff_eq!(a.total_expenses, 11_000.0 + 2_900.0 + 7_500.0 + 2_650.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.disposable, 40_000.0 - 24_050.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.savings_rate_pct, 15_950.0 / 40_000.0 * 100.0, epsilon = 1e-9);
        assert_eq!(a.rating, SavingsRating::Excellent);
        assert_abs_diff_eq!(
            budget.combined_disposable(),
            a.disposable + budget.party_b.disposable,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_shared_costs_follow_policy() {
        let budget = household_budget(
            &household(AllocationPolicy::IncomeProportional),
            Split::default(),
            &inputs(),
        )
        .unwrap();
        assert_abs_diff_eq!(budget.shared_split.a, 5_300.0 * 0.4, epsilon = 1e-9);
        assert_abs_diff_eq!(budget.shared_split.total(), 5_300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_savings_ratings() {
        assert_eq!(SavingsRating::from_rate(25.0), SavingsRating::Excellent);
        assert_eq!(SavingsRating::from_rate(20.0), SavingsRating::Good);
        assert_eq!(SavingsRating::from_rate(5.0), SavingsRating::Tight);
        assert_eq!(SavingsRating::from_rate(0.0), SavingsRating::Deficit);
        assert_eq!(SavingsRating::from_rate(-3.0), SavingsRating::Deficit);
    }

    #[test]
    fn test_zero_income_has_zero_savings_rate() {
        let mut h = household(AllocationPolicy::EqualSplit);
        h.party_a.monthly_income = 0.0;
        let budget = household_budget(&h, Split::new(1_000.0, 1_000.0), &inputs()).unwrap();
        assert_eq!(budget.party_a.savings_rate_pct, 0.0);
        assert!(budget.party_a.disposable < 0.0);
        assert_eq!(budget.party_a.rating, SavingsRating::Deficit);
    }

    #[test]
    fn test_negative_expense_rejected() {
        let mut bad = inputs();
        bad.party_b.food = -10.0;
        assert!(household_budget(&household(AllocationPolicy::EqualSplit), Split::default(), &bad).is_err());
    }
}
