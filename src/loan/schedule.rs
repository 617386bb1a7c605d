//! Amortization schedule output structures

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;

/// A single month of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    // Timing
    pub month: u32,
    pub year: u32,
    pub month_in_year: u32,

    // Payment split
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,

    // Extra principal paid on top of the fixed payment
    pub extra_a: f64,
    pub extra_b: f64,

    /// Balance after this month's principal and extras, never negative
    pub remaining: f64,

    // Tax effect
    pub tax_deduction: f64,
    pub net_cost: f64,
}

impl AmortizationPeriod {
    /// Total principal repaid this month, scheduled plus extras
    pub fn total_principal(&self) -> f64 {
        self.principal + self.extra_a + self.extra_b
    }
}

/// Yearly aggregate of the monthly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub extra: f64,
    pub tax_deduction: f64,
    pub closing_balance: f64,
}

/// Totals across a schedule (or a horizon of it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub months: u32,
    pub total_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_extra_a: f64,
    pub total_extra_b: f64,
    pub total_tax_deduction: f64,
    /// Interest as a percent of everything paid to the bank
    pub interest_share_pct: f64,
    pub outstanding: f64,
}

/// Complete amortization schedule for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Amount financed
    pub principal: f64,
    /// Fixed monthly payment
    pub fixed_payment: f64,
    /// Month-by-month periods
    pub periods: Vec<AmortizationPeriod>,
}

impl AmortizationSchedule {
    pub fn new(principal: f64, fixed_payment: f64) -> Self {
        Self {
            principal,
            fixed_payment,
            periods: Vec::new(),
        }
    }

    pub fn add_period(&mut self, period: AmortizationPeriod) {
        self.periods.push(period);
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn first(&self) -> Option<&AmortizationPeriod> {
        self.periods.first()
    }

    /// Outstanding balance after `months` payments. Zero months gives the
    /// original principal; months past the end give the final balance.
    pub fn balance_after(&self, months: u32) -> f64 {
        if months == 0 {
            return self.principal;
        }
        let idx = (months as usize).min(self.periods.len());
        match idx.checked_sub(1).and_then(|i| self.periods.get(i)) {
            Some(period) => period.remaining,
            None => self.principal,
        }
    }

    /// Periods falling within the first `years` loan years
    pub fn truncated(&self, years: u32) -> &[AmortizationPeriod] {
        let end = ((years as usize) * 12).min(self.periods.len());
        &self.periods[..end]
    }

    /// Totals over the whole schedule
    pub fn totals(&self) -> ScheduleTotals {
        Self::totals_of(self.principal, &self.periods)
    }

    /// Totals over the first `years` loan years
    pub fn totals_through_year(&self, years: u32) -> ScheduleTotals {
        Self::totals_of(self.principal, self.truncated(years))
    }

    fn totals_of(principal: f64, periods: &[AmortizationPeriod]) -> ScheduleTotals {
        let mut totals = ScheduleTotals {
            months: periods.len() as u32,
            total_payment: 0.0,
            total_interest: 0.0,
            total_principal: 0.0,
            total_extra_a: 0.0,
            total_extra_b: 0.0,
            total_tax_deduction: 0.0,
            interest_share_pct: 0.0,
            outstanding: periods.last().map(|p| p.remaining).unwrap_or(principal),
        };

        for period in periods {
            totals.total_payment += period.payment;
            totals.total_interest += period.interest;
            totals.total_principal += period.principal;
            totals.total_extra_a += period.extra_a;
            totals.total_extra_b += period.extra_b;
            totals.total_tax_deduction += period.tax_deduction;
        }

        let paid = totals.total_interest + totals.total_principal;
        if paid > 0.0 {
            totals.interest_share_pct = totals.total_interest / paid * 100.0;
        }
        totals
    }

    /// Aggregate months into loan years
    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        let mut years: Vec<YearlySummary> = Vec::new();

        for period in &self.periods {
            let needs_new = years.last().map_or(true, |y| y.year != period.year);
            if needs_new {
                years.push(YearlySummary {
                    year: period.year,
                    payment: 0.0,
                    interest: 0.0,
                    principal: 0.0,
                    extra: 0.0,
                    tax_deduction: 0.0,
                    closing_balance: period.remaining,
                });
            }
            if let Some(row) = years.last_mut() {
                row.payment += period.payment;
                row.interest += period.interest;
                row.principal += period.principal;
                row.extra += period.extra_a + period.extra_b;
                row.tax_deduction += period.tax_deduction;
                row.closing_balance = period.remaining;
            }
        }

        years
    }

    /// Write every period as a CSV row with a header
    pub fn write_csv<W: Write>(&self, writer: W) -> CalcResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for period in &self.periods {
            csv_writer.serialize(period)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(month: u32, principal: f64, interest: f64, remaining: f64) -> AmortizationPeriod {
        AmortizationPeriod {
            month,
            year: (month - 1) / 12 + 1,
            month_in_year: (month - 1) % 12 + 1,
            payment: principal + interest,
            interest,
            principal,
            extra_a: 0.0,
            extra_b: 0.0,
            remaining,
            tax_deduction: interest * 0.22,
            net_cost: principal + interest * 0.78,
        }
    }

    fn sample() -> AmortizationSchedule {
        let mut schedule = AmortizationSchedule::new(1_300.0, 110.0);
        let mut remaining = 1_300.0;
        for month in 1..=13 {
            remaining -= 100.0;
            schedule.add_period(period(month, 100.0, 10.0, remaining));
        }
        schedule
    }

    #[test]
    fn test_balance_after() {
        let schedule = sample();
        assert_eq!(schedule.balance_after(0), 1_300.0);
        assert_eq!(schedule.balance_after(1), 1_200.0);
        assert_eq!(schedule.balance_after(13), 0.0);
        assert_eq!(schedule.balance_after(500), 0.0);
    }

    #[test]
    fn test_yearly_summary_groups_by_year() {
        let years = sample().yearly_summary();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 1);
        assert!((years[0].principal - 1_200.0).abs() < 1e-9);
        assert!((years[0].closing_balance - 100.0).abs() < 1e-9);
        assert!((years[1].principal - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_through_year() {
        let totals = sample().totals_through_year(1);
        assert_eq!(totals.months, 12);
        assert!((totals.total_interest - 120.0).abs() < 1e-9);
        assert!((totals.outstanding - 100.0).abs() < 1e-9);
        // 120 interest out of 1320 paid
        assert!((totals.interest_share_pct - 120.0 / 1_320.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_csv_has_header_and_rows() {
        let mut buffer = Vec::new();
        sample().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("month,year,month_in_year,payment"));
        assert_eq!(lines.count(), 13);
    }
}
