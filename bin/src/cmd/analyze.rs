//! Analyze command implementation.

use anyhow::{Context, Result, bail};
use marasi::pipeline::{AnalysisReport, DatasetInput, analyze};
use marasi::{RawSeries, Strength};
use marasi_pulse::find_dataset;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Align the given datasets on the quarterly axis and report correlations.
///
/// Each argument is `name=path.json` where `name` must be a registered
/// dataset (the registry supplies the field mapping and aggregation) and
/// the file holds a JSON array of document rows, as written by
/// `marasi fetch`.
pub(crate) fn run_analysis(args: &[String], top: usize, format: &str) -> Result<()> {
    if args.is_empty() {
        bail!("no datasets given; pass at least one --dataset NAME=PATH");
    }

    let mut inputs = Vec::with_capacity(args.len());
    for arg in args {
        let Some((name, path)) = arg.split_once('=') else {
            bail!("invalid dataset argument '{arg}'; expected NAME=PATH");
        };
        let Some(info) = find_dataset(name) else {
            bail!("unknown dataset '{name}'; see `marasi datasets`");
        };

        let rows = load_rows(Path::new(path))?;
        let series = RawSeries::from_values(info.name, rows)?;
        inputs.push(DatasetInput::new(series, info.field_mapping(), info.aggregation));
    }

    let report = analyze(inputs)?;

    match format {
        "text" => print_text(&report, top),
        "json" => print_json(&report, top)?,
        other => bail!("unknown format '{other}'; expected text or json"),
    }

    Ok(())
}

fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: Value = serde_json::from_str(&body)
        .with_context(|| format!("parsing {}", path.display()))?;
    match value {
        Value::Array(rows) => Ok(rows),
        _ => bail!("{} does not contain a JSON array of rows", path.display()),
    }
}

fn print_text(report: &AnalysisReport, top: usize) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Market Correlation Analysis                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("{}\n", report.table.data());

    let (first, last) = report.table.span();
    println!("Coverage ({} to {}, {} quarters):", first, last, report.coverage.rows);
    for column in &report.coverage.columns {
        println!(
            "  {:32} {:>4}/{:<4} ({}%)",
            column.name, column.observed, report.coverage.rows, column.completeness
        );
    }

    println!("\nCorrelation matrix:");
    let rounded = report.correlation.rounded(2);
    print!("  {:32}", "");
    for name in rounded.names() {
        print!(" {:>10.10}", name);
    }
    println!();
    for (i, name) in rounded.names().iter().enumerate() {
        print!("  {:32}", name);
        for j in 0..rounded.size() {
            match rounded.get(i, j) {
                Some(r) => print!(" {:>10.2}", r),
                None => print!(" {:>10}", "-"),
            }
        }
        println!();
    }

    println!("\nTop insights:");
    if report.insights.is_empty() {
        println!("  (no defined factor pairs)");
    }
    for pair in report.insights.iter().take(top) {
        let marker = match pair.strength() {
            Strength::Strong => "**",
            Strength::Moderate => "  ",
        };
        println!("  {marker} {} vs {}: {pair}", pair.left, pair.right);
    }

    if !report.dropped_records.is_empty() {
        println!("\nDropped records:");
        for (dataset, count) in &report.dropped_records {
            println!("  {dataset}: {count} unparsable record(s) skipped");
        }
    }

    if !report.omissions.is_empty() {
        println!("\nOmitted datasets:");
        for omission in &report.omissions {
            println!("  {}: {}", omission.dataset, omission.reason);
        }
    }
    println!();
}

fn print_json(report: &AnalysisReport, top: usize) -> Result<()> {
    let rounded = report.correlation.rounded(2);
    let insights: Vec<Value> = report
        .insights
        .iter()
        .take(top)
        .map(|pair| {
            json!({
                "left": pair.left,
                "right": pair.right,
                "r": pair.r,
                "label": pair.to_string(),
            })
        })
        .collect();

    let out = json!({
        "periods": report.table.periods().iter().map(|q| q.label()).collect::<Vec<_>>(),
        "columns": report.table.columns(),
        "correlation": rounded.to_grid(),
        "insights": insights,
        "coverage": report.coverage,
        "dropped_records": report.dropped_records,
        "omissions": report.omissions,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
