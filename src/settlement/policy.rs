//! Dividing net sale proceeds between the parties

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcResult};
use crate::household::Household;
use crate::loan::AmortizationSchedule;

/// What each party has put into the property up to the sale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub equity_a: f64,
    pub equity_b: f64,
    /// Equity plus principal repaid, extras included
    pub invested_a: f64,
    pub invested_b: f64,
}

impl Investment {
    pub fn new(equity_a: f64, equity_b: f64, invested_a: f64, invested_b: f64) -> CalcResult<Self> {
        ensure_non_negative("equity_a", equity_a)?;
        ensure_non_negative("equity_b", equity_b)?;
        ensure_non_negative("invested_a", invested_a)?;
        ensure_non_negative("invested_b", invested_b)?;
        Ok(Self {
            equity_a,
            equity_b,
            invested_a,
            invested_b,
        })
    }

    /// Equity plus principal repaid during the first `sale_year` years of the
    /// schedule. Scheduled principal is split by the household's allocation
    /// policy, extras go to whoever paid them.
    pub fn from_schedule(household: &Household, schedule: &AmortizationSchedule, sale_year: u32) -> CalcResult<Self> {
        let totals = schedule.totals_through_year(sale_year);
        let repaid_a = totals.total_principal * household.principal_share_a();
        let repaid_b = totals.total_principal - repaid_a;
        let (a, b) = (&household.party_a, &household.party_b);

        Self::new(
            a.equity,
            b.equity,
            a.equity + repaid_a + totals.total_extra_a + a.extra_principal,
            b.equity + repaid_b + totals.total_extra_b + b.extra_principal,
        )
    }

    pub fn total_invested(&self) -> f64 {
        self.invested_a + self.invested_b
    }

    pub fn total_equity(&self) -> f64 {
        self.equity_a + self.equity_b
    }

    /// Party A's fraction of the total invested, 0.5 when nothing is invested
    pub fn investment_ratio_a(&self) -> f64 {
        let total = self.total_invested();
        if total > 0.0 {
            self.invested_a / total
        } else {
            warn!("no investment recorded, splitting proceeds equally");
            0.5
        }
    }

    /// Party A's fraction of the initial equity, 0.5 when there is none
    pub fn equity_ratio_a(&self) -> f64 {
        let total = self.total_equity();
        if total > 0.0 {
            self.equity_a / total
        } else {
            0.5
        }
    }
}

/// Rule for dividing what is left after a sale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementPolicy {
    /// Everything split by share of total investment
    #[default]
    ProportionalByInvestment,
    /// Investments returned first, gain split by initial equity
    ProportionalByEquity,
    /// Investments returned first, gain split 50/50
    EqualGainSplit,
    /// Equity split on a gain, investment split otherwise
    Hybrid,
}

impl SettlementPolicy {
    pub const ALL: [SettlementPolicy; 4] = [
        SettlementPolicy::ProportionalByInvestment,
        SettlementPolicy::ProportionalByEquity,
        SettlementPolicy::EqualGainSplit,
        SettlementPolicy::Hybrid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettlementPolicy::ProportionalByInvestment => "Proportional to total investment",
            SettlementPolicy::ProportionalByEquity => "Proportional to equity",
            SettlementPolicy::EqualGainSplit => "50/50 on gain",
            SettlementPolicy::Hybrid => "Hybrid",
        }
    }
}

/// Payouts under one policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub policy: SettlementPolicy,
    pub net: f64,
    pub payout_a: f64,
    pub payout_b: f64,
    /// Payout minus investment, negative for a loss
    pub gain_a: f64,
    pub gain_b: f64,
}

impl Settlement {
    /// Return on investment in percent, 0 when nothing was invested
    pub fn return_a_pct(&self, investment: &Investment) -> f64 {
        return_pct(self.gain_a, investment.invested_a)
    }

    pub fn return_b_pct(&self, investment: &Investment) -> f64 {
        return_pct(self.gain_b, investment.invested_b)
    }
}

fn return_pct(gain: f64, invested: f64) -> f64 {
    if invested > 0.0 {
        gain / invested * 100.0
    } else {
        0.0
    }
}

/// Divide `net` between the parties. Party B receives `net - payout_a`, so
/// the payouts always add back up to `net`.
pub fn settle(net: f64, investment: &Investment, policy: SettlementPolicy) -> Settlement {
    let gain = net - investment.total_invested();

    let payout_a = match policy {
        SettlementPolicy::ProportionalByInvestment => by_investment(net, investment),
        SettlementPolicy::ProportionalByEquity | SettlementPolicy::Hybrid => {
            if gain > 0.0 {
                investment.invested_a + gain * investment.equity_ratio_a()
            } else {
                by_investment(net, investment)
            }
        }
        SettlementPolicy::EqualGainSplit => {
            if gain > 0.0 {
                investment.invested_a + gain * 0.5
            } else {
                by_investment(net, investment)
            }
        }
    };
    let payout_b = net - payout_a;

    Settlement {
        policy,
        net,
        payout_a,
        payout_b,
        gain_a: payout_a - investment.invested_a,
        gain_b: payout_b - investment.invested_b,
    }
}

fn by_investment(net: f64, investment: &Investment) -> f64 {
    net * investment.investment_ratio_a()
}

/// Settlement under every policy, in `SettlementPolicy::ALL` order
pub fn settle_all(net: f64, investment: &Investment) -> Vec<Settlement> {
    SettlementPolicy::ALL
        .iter()
        .map(|policy| settle(net, investment, *policy))
        .collect()
}
