//! Sale price, selling costs and net proceeds

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_percentage, CalcError, CalcResult};

/// When and how the property is sold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleAssumptions {
    /// Years after purchase
    pub sale_year: u32,
    /// Change in property value, positive for growth
    pub appreciation_pct: f64,
    /// Agent, marketing and other costs as a percent of the sale price
    pub selling_cost_pct: f64,
}

impl SaleAssumptions {
    pub fn new(sale_year: u32, appreciation_pct: f64, selling_cost_pct: f64) -> CalcResult<Self> {
        let sale = Self {
            sale_year,
            appreciation_pct,
            selling_cost_pct,
        };
        sale.validate()?;
        Ok(sale)
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_finite("appreciation_pct", self.appreciation_pct)?;
        if self.appreciation_pct < -100.0 {
            return Err(CalcError::invalid("appreciation_pct", "a property cannot lose more than its value"));
        }
        ensure_percentage("selling_cost_pct", self.selling_cost_pct)
    }
}

impl Default for SaleAssumptions {
    fn default() -> Self {
        Self {
            sale_year: 5,
            appreciation_pct: 33.3,
            selling_cost_pct: 2.5,
        }
    }
}

/// Money flow when the property is sold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleProceeds {
    pub sale_price: f64,
    /// Sale price minus purchase price
    pub value_change: f64,
    pub selling_costs: f64,
    /// Loan balance repaid from the sale
    pub outstanding: f64,
    /// What is left for the owners, negative when the loan exceeds the sale
    pub net: f64,
}

/// `sale_price - selling_costs - outstanding`, where the sale price is the
/// purchase price adjusted by `appreciation_pct`
pub fn net_proceeds(
    price: f64,
    appreciation_pct: f64,
    selling_cost_pct: f64,
    outstanding: f64,
) -> CalcResult<SaleProceeds> {
    ensure_non_negative("price", price)?;
    ensure_non_negative("outstanding", outstanding)?;
    SaleAssumptions::new(0, appreciation_pct, selling_cost_pct)?;

    let sale_price = price * (1.0 + appreciation_pct / 100.0);
    let selling_costs = sale_price * selling_cost_pct / 100.0;

    Ok(SaleProceeds {
        sale_price,
        value_change: sale_price - price,
        selling_costs,
        outstanding,
        net: sale_price - selling_costs - outstanding,
    })
}
