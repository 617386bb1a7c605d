//! Co-mortgage CLI
//!
//! Evaluates a saved scenario and prints a summary report

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use co_mortgage::{Calculator, ScenarioInput, ScenarioRecord, ScenarioReport};

#[derive(Parser, Debug)]
#[command(name = "co-mortgage", version)]
#[command(about = "Mortgage affordability, cost sharing and sale settlement for two co-borrowers")]
struct Args {
    /// Scenario JSON file: a saved record or a bare input
    scenario: PathBuf,

    /// Write the amortization schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// Directory with assumption CSV files (built-in values if omitted)
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Print the full report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    Record(ScenarioRecord),
    Input(ScenarioInput),
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let calculator = match &args.assumptions {
        Some(dir) => Calculator::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => Calculator::new(),
    };

    let file = File::open(&args.scenario).with_context(|| format!("opening {}", args.scenario.display()))?;
    let parsed: ScenarioFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.scenario.display()))?;
    let (name, input) = match parsed {
        ScenarioFile::Record(record) => (record.name, record.input),
        ScenarioFile::Input(input) => (args.scenario.display().to_string(), input),
    };

    let report = calculator.evaluate(&input).context("evaluating scenario")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&name, &input, &report);
    }

    if let Some(path) = &args.schedule_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report.schedule.write_csv(file).context("writing schedule")?;
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}

fn print_summary(name: &str, input: &ScenarioInput, report: &ScenarioReport) {
    let (a, b) = (&input.party_a.name, &input.party_b.name);

    println!("Scenario: {}", name);
    println!("{}", "=".repeat(60));
    println!("  Price:            {:>14.0}", input.price);
    println!(
        "  Equity:           {:>14.0} ({:.1}%, {:?})",
        input.total_equity(),
        report.equity.equity_pct,
        report.equity.rating
    );
    println!("  Loan:             {:>14.0}", report.loan);
    println!("  Purchase costs:   {:>14.0}", report.purchase_costs.total);
    println!("  Allocation:       {}", input.allocation.label());
    println!("  Combined income:  {:>14.0}", input.household().total_income());

    let monthly = &report.monthly;
    println!("\nMonthly cost (first month):");
    println!("  Payment:          {:>14.2}", monthly.payment);
    println!("  Interest:         {:>14.2}", monthly.interest);
    println!("  Principal:        {:>14.2}", monthly.principal);
    println!("  Tax deduction:    {:>14.2}", monthly.tax_deduction);
    println!("  Total with costs: {:>14.2}", monthly.total);
    println!("  Average ratio:    {:>13.1}%", monthly.average_ratio_pct());
    for (label, burden) in [(a, &monthly.party_a), (b, &monthly.party_b)] {
        println!(
            "  {:<10} pays {:>10.0}  ratio {:>5.1}% ({:?})  effective {:>5.1}% ({:?})",
            label, burden.cost, burden.ratio_pct, burden.level, burden.effective_ratio_pct, burden.effective_level
        );
    }

    let totals = &report.totals;
    println!("\nLoan totals ({} months):", totals.months);
    println!("  Interest:         {:>14.0}", totals.total_interest);
    println!("  Tax deduction:    {:>14.0}", totals.total_tax_deduction);
    println!("  Interest share:   {:>13.1}%", totals.interest_share_pct);
    if let Some(impact) = &report.extra_impact {
        println!(
            "  Extras save {} months ({:.1} years) and {:.0} in interest",
            impact.months_saved,
            impact.years_saved(),
            impact.interest_saved
        );
    }

    println!("\nRate forecast ({}):", report.forecast.policy.label());
    for point in &report.forecast.points {
        println!("  {}: {:>5.2}%", point.year, point.rate_pct);
    }
    println!("  Average: {:>5.2}%", report.forecast.average_rate());

    println!("\n{:<22} {:>7} {:>10} {:>8} {:>8}", "Rate scenario", "Rate", "Total", a, b);
    for row in &report.rate_table {
        println!(
            "{:<22} {:>6.2}% {:>10.0} {:>7.1}% {:>7.1}%",
            row.label, row.annual_rate_pct, row.total, row.ratio_a_pct, row.ratio_b_pct
        );
    }

    println!("\nStress tests (risk {:?}):", report.stress.risk);
    for result in &report.stress.results {
        println!(
            "  {:<24} margin {:>10.0}  {}",
            result.label,
            result.margin_before_deduction,
            if result.can_pay { "ok" } else { "SHORTFALL" }
        );
    }

    let sale = &report.sale;
    println!("\nSale in year {}:", sale.sale.sale_year);
    println!("  Sale price:       {:>14.0}", sale.proceeds.sale_price);
    println!("  Outstanding:      {:>14.0}", sale.proceeds.outstanding);
    println!("  Net proceeds:     {:>14.0}", sale.proceeds.net);
    for settlement in &sale.alternatives {
        println!(
            "  {:<34} {:<8} {:>10.0} ({:>6.1}%)  {:<8} {:>10.0} ({:>6.1}%)",
            settlement.policy.label(),
            a,
            settlement.payout_a,
            settlement.return_a_pct(&sale.investment),
            b,
            settlement.payout_b,
            settlement.return_b_pct(&sale.investment)
        );
    }

    let budget = &report.budget;
    println!("\nMonthly budget:");
    for (label, party) in [(a, &budget.party_a), (b, &budget.party_b)] {
        println!(
            "  {:<10} disposable {:>10.0}  savings {:>5.1}% ({:?})",
            label, party.disposable, party.savings_rate_pct, party.rating
        );
    }
    println!("  Combined disposable: {:>10.0}", budget.combined_disposable());

    println!("\nOwnership at term end:");
    if let Some(last) = report.exact_ownership.last() {
        println!("  {:<10} {:>6.1}%", a, last.ownership_a_pct);
        println!("  {:<10} {:>6.1}%", b, last.ownership_b_pct);
    }
}
