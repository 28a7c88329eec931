//! CSV export of projection results
//!
//! Renders a projection into a semicolon-delimited text block: a summary
//! section for both viewpoints followed by the full year table. Numbers use
//! a `.` decimal point and two decimals; unavailable figures read `n/a`.
//! The formatting contract lives entirely here, outside the core.

use std::io::Write;

use csv::WriterBuilder;

use crate::projection::{IrrOutcome, ProjectionResult};

/// Write the full report for one projection run
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), csv::Error> {
    let mut w = WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(writer);

    let summary = result.summary();
    let years = summary.years;

    w.write_record(["Summary"])?;
    w.write_record([""])?;

    if let Some(entrant) = &summary.entrant {
        w.write_record(["Entrant investor (year 0 raise)"])?;
        w.write_record(row("Invested amount", fmt(entrant.invested), "MSEK"))?;
        w.write_record(row(
            "Ownership after year 0 raise",
            fmt(entrant.ownership_after_entry_percent),
            "%",
        ))?;
        w.write_record(row(
            &format!("Ownership after {years} years"),
            fmt(entrant.final_ownership_percent),
            "%",
        ))?;
        w.write_record(row(
            &format!("Value after {years} years"),
            fmt(entrant.final_value),
            "MSEK",
        ))?;
        w.write_record(row(&format!("IRR ({years} years)"), fmt_irr(&entrant.irr), ""))?;
        w.write_record([""])?;
    }

    w.write_record(["Simulated owner"])?;
    w.write_record(row("Entry value", fmt(summary.owner.entry_value), "MSEK"))?;
    w.write_record(row(
        &format!("Ownership after {years} years"),
        fmt(summary.owner.final_ownership_percent),
        "%",
    ))?;
    w.write_record(row(
        &format!("Value after {years} years"),
        fmt(summary.owner.final_value),
        "MSEK",
    ))?;
    w.write_record(row(
        &format!("IRR ({years} years)"),
        fmt_irr(&summary.owner.irr),
        "",
    ))?;
    w.write_record([""])?;

    w.write_record(["Result", "Value", "Unit"])?;
    w.write_record(row(
        &format!("Substance value year {years}"),
        fmt(summary.final_substance_value),
        "MSEK",
    ))?;
    w.write_record(row(
        &format!("Market value year {years}"),
        fmt(summary.final_market_value),
        "MSEK",
    ))?;

    if let Some(halt) = &result.halt {
        w.write_record(row(
            "Simulation halted",
            halt.year.to_string(),
            "undefined valuation; later years omitted",
        ))?;
    }
    w.write_record([""])?;

    w.write_record([
        "Year",
        "Phase",
        "Substance",
        "Cash",
        "MarketValue",
        "TotalShares",
        "SimOwnerShares",
        "Ownership%",
        "AttributableValue",
        "Raise",
        "Dilution%",
        "PricePerShare",
    ])?;
    for snapshot in &result.snapshots {
        w.write_record([
            snapshot.year.to_string(),
            snapshot.phase.as_str().to_string(),
            fmt(snapshot.substance_value),
            fmt(snapshot.cash),
            fmt(snapshot.market_value),
            snapshot.total_share_count.to_string(),
            snapshot.sim_owner_share_count.to_string(),
            fmt(snapshot.ownership_share_percent),
            fmt(snapshot.attributable_share_value),
            opt_fmt(snapshot.raise_amount),
            opt_fmt(snapshot.dilution_percent),
            format!("{:.6}", snapshot.price_per_share),
        ])?;
    }

    w.flush()?;
    Ok(())
}

/// Render the report to a string
pub fn csv_string(result: &ProjectionResult) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn row(label: &str, value: String, unit: &str) -> [String; 3] {
    [label.to_string(), value, unit.to_string()]
}

fn fmt(value: f64) -> String {
    format!("{value:.2}")
}

fn opt_fmt(value: Option<f64>) -> String {
    value.map(fmt).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_irr(outcome: &IrrOutcome) -> String {
    match outcome {
        IrrOutcome::Rate(rate) => format!("{:.2}%", rate * 100.0),
        IrrOutcome::TotalLoss => "-100.00%".to_string(),
        IrrOutcome::NotConverged(_) => "n/a (not converged)".to_string(),
        IrrOutcome::Undefined => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{SimulationParameters, YearEvent};
    use crate::projection::project;

    fn params() -> SimulationParameters {
        SimulationParameters {
            initial_nav: 10.0,
            initial_market_value: 10.0,
            initial_cash: 0.0,
            substance_discount_percent: 0.0,
            ownership_share_percent: 50.0,
            initial_share_count: 1_000,
            default_raise_amount: 0.0,
            default_management_cost: 0.0,
            default_growth_percent: 0.0,
        }
    }

    fn schedule() -> Vec<YearEvent> {
        let mut events: Vec<_> = (0..=10).map(|_| YearEvent::quiet(0.0)).collect();
        events[0].raise_amount = Some(10.0);
        events[1].growth_percent = 100.0;
        events
    }

    #[test]
    fn report_uses_semicolons_and_dot_decimals() {
        let result = project(&params(), &schedule()).unwrap();
        let csv = csv_string(&result).unwrap();

        assert!(csv.contains(';'));
        assert!(csv.contains("Entrant investor (year 0 raise)"));
        assert!(csv.contains("Invested amount;10.00;MSEK"));
        assert!(csv.contains("Ownership after year 0 raise;50.00;%"));
        assert!(csv.contains("Simulated owner"));
        assert!(csv.contains("IRR (10 years)"));
        // Decimal comma must never appear in numeric fields
        assert!(csv.lines().all(|l| !l.contains(",")));
    }

    #[test]
    fn year_table_lists_every_snapshot() {
        let result = project(&params(), &schedule()).unwrap();
        let csv = csv_string(&result).unwrap();

        let table_rows = csv
            .lines()
            .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
            .count();
        assert_eq!(table_rows, result.snapshots.len());
        assert!(csv.contains("before financing"));
        assert!(csv.contains("after financing"));
    }

    #[test]
    fn halted_run_carries_a_cutoff_marker() {
        let mut events = schedule();
        events[2].growth_percent = -100.0;
        events[2].management_cost = 12.0; // drains the year 0 raise proceeds
        events[2].raise_amount = Some(5.0);

        let result = project(&params(), &events).unwrap();
        assert!(result.halt.is_some());

        let csv = csv_string(&result).unwrap();
        assert!(csv.contains("Simulation halted;2"));
    }
}
