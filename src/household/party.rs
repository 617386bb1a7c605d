//! Co-borrowers and the household they form

use serde::{Deserialize, Serialize};

use super::allocation::{allocate, AllocationPolicy, Split};
use crate::error::{ensure_non_negative, CalcResult};

/// Identifies one of the two co-borrowers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyId {
    A,
    B,
}

impl PartyId {
    pub fn other(&self) -> PartyId {
        match self {
            PartyId::A => PartyId::B,
            PartyId::B => PartyId::A,
        }
    }
}

/// A named co-borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,

    /// Monthly net income
    pub monthly_income: f64,

    /// Cash contributed up front
    pub equity: f64,

    /// Extra principal already paid outside the schedule, credited to the
    /// party's investment when the property is sold
    #[serde(default)]
    pub extra_principal: f64,
}

impl Party {
    pub fn new(name: impl Into<String>, monthly_income: f64, equity: f64) -> Self {
        Self {
            name: name.into(),
            monthly_income,
            equity,
            extra_principal: 0.0,
        }
    }

    pub fn validate(&self, label: &str) -> CalcResult<()> {
        ensure_non_negative(&format!("{label}.monthly_income"), self.monthly_income)?;
        ensure_non_negative(&format!("{label}.equity"), self.equity)?;
        ensure_non_negative(&format!("{label}.extra_principal"), self.extra_principal)
    }
}

/// Two co-borrowers and the policy they use for sharing costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub party_a: Party,
    pub party_b: Party,
    pub allocation: AllocationPolicy,
}

impl Household {
    pub fn new(party_a: Party, party_b: Party, allocation: AllocationPolicy) -> Self {
        Self {
            party_a,
            party_b,
            allocation,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.party_a.validate("party_a")?;
        self.party_b.validate("party_b")?;
        self.allocation.validate()
    }

    pub fn party(&self, id: PartyId) -> &Party {
        match id {
            PartyId::A => &self.party_a,
            PartyId::B => &self.party_b,
        }
    }

    /// Split an amount using the household's allocation policy and incomes
    pub fn split(&self, amount: f64) -> CalcResult<Split> {
        allocate(
            amount,
            self.party_a.monthly_income,
            self.party_b.monthly_income,
            self.allocation,
        )
    }

    /// Fraction of each principal payment attributed to party A
    pub fn principal_share_a(&self) -> f64 {
        self.allocation
            .fraction_a(self.party_a.monthly_income, self.party_b.monthly_income)
    }

    pub fn total_equity(&self) -> f64 {
        self.party_a.equity + self.party_b.equity
    }

    pub fn total_income(&self) -> f64 {
        self.party_a.monthly_income + self.party_b.monthly_income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(policy: AllocationPolicy) -> Household {
        Household::new(
            Party::new("Thale", 37_900.0, 520_000.0),
            Party::new("Jonas", 58_500.0, 780_000.0),
            policy,
        )
    }

    #[test]
    fn test_split_uses_incomes() {
        let split = household(AllocationPolicy::IncomeProportional).split(96_400.0).unwrap();
        assert!((split.a - 37_900.0).abs() < 1e-9);
        assert!((split.b - 58_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_party_lookup_and_totals() {
        let h = household(AllocationPolicy::EqualSplit);
        assert_eq!(h.party(PartyId::B).name, "Jonas");
        assert_eq!(PartyId::A.other(), PartyId::B);
        assert_eq!(h.total_equity(), 1_300_000.0);
        assert_eq!(h.total_income(), 96_400.0);
        assert_eq!(h.principal_share_a(), 0.5);
    }

    #[test]
    fn test_validate_rejects_negative_income() {
        let mut h = household(AllocationPolicy::EqualSplit);
        h.party_b.monthly_income = -1.0;
        assert!(h.validate().is_err());
    }

    #[test]
    fn test_split_rejects_bad_custom_percentage() {
        let h = household(AllocationPolicy::CustomPercentage(150.0));
        assert!(h.split(1_000.0).is_err());
    }
}
