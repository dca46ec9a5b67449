//! Aligning datasets sampled at different frequencies.
//!
//! This example demonstrates:
//! - Daily FX rates averaged into quarters from ISO dates
//! - Annual population counts fanned out across all four quarters
//! - Monthly CPI grouped by division, one column per group
//! - Counting transactions per quarter instead of averaging them

use marasi::pipeline::{DatasetInput, analyze};
use marasi::{Aggregation, FieldMapping, RawSeries};
use serde_json::json;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Daily observations land in their enclosing quarter.
    let fx = RawSeries::from_values(
        "exchange_rate",
        vec![
            json!({"Date": "2022-01-10", "Value": 3.671}),
            json!({"Date": "2022-02-18", "Value": 3.672}),
            json!({"Date": "2022-03-29", "Value": 3.673}),
            json!({"Date": "2022-05-04", "Value": 3.674}),
            json!({"Date": "2022-08-15", "Value": 3.676}),
            json!({"Date": "2022-11-02", "Value": 3.678}),
        ],
    )?;

    // A bare year covers all four of its quarters.
    let population = RawSeries::from_values(
        "population",
        vec![
            json!({"Year": "2022", "Value": 3_550_000.0}),
        ],
    )?;

    // Grouped dataset: one output column per CPI division.
    let cpi = RawSeries::from_values(
        "cpi",
        vec![
            json!({"Time Period": "2022-01-01", "Value": 101.0, "CPI Division": "Housing"}),
            json!({"Time Period": "2022-02-01", "Value": 101.5, "CPI Division": "Housing"}),
            json!({"Time Period": "2022-04-01", "Value": 102.2, "CPI Division": "Housing"}),
            json!({"Time Period": "2022-07-01", "Value": 103.0, "CPI Division": "Housing"}),
            json!({"Time Period": "2022-10-01", "Value": 103.8, "CPI Division": "Housing"}),
            json!({"Time Period": "2022-01-01", "Value": 99.5, "CPI Division": "Transport"}),
            json!({"Time Period": "2022-04-01", "Value": 100.1, "CPI Division": "Transport"}),
            json!({"Time Period": "2022-07-01", "Value": 100.9, "CPI Division": "Transport"}),
            json!({"Time Period": "2022-10-01", "Value": 101.4, "CPI Division": "Transport"}),
        ],
    )?;

    // Count aggregation ignores the value magnitudes.
    let sales = RawSeries::from_values(
        "sales_volume",
        vec![
            json!({"Quarter": "2022Q1", "Contract Amount": 1_200_000.0}),
            json!({"Quarter": "2022Q1", "Contract Amount": 950_000.0}),
            json!({"Quarter": "2022Q2", "Contract Amount": 2_100_000.0}),
            json!({"Quarter": "2022Q3", "Contract Amount": 880_000.0}),
            json!({"Quarter": "2022Q3", "Contract Amount": 1_400_000.0}),
            json!({"Quarter": "2022Q3", "Contract Amount": 760_000.0}),
            json!({"Quarter": "2022Q4", "Contract Amount": 1_050_000.0}),
        ],
    )?;

    let report = analyze(vec![
        DatasetInput::new(fx, FieldMapping::new("Date", "Value"), Aggregation::Mean),
        DatasetInput::new(
            population,
            FieldMapping::new("Year", "Value"),
            Aggregation::Mean,
        ),
        DatasetInput::new(
            cpi,
            FieldMapping::new("Time Period", "Value").with_group("CPI Division"),
            Aggregation::Mean,
        ),
        DatasetInput::new(
            sales,
            FieldMapping::new("Quarter", "Contract Amount"),
            Aggregation::Count,
        ),
    ])?;

    println!("{}\n", report.table.data());

    println!("Columns:");
    for column in report.table.columns() {
        println!("  {column}");
    }

    println!("\nFactor pairs:");
    for pair in &report.insights {
        println!("  {} vs {}: {pair}", pair.left, pair.right);
    }

    Ok(())
}
