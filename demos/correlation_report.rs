//! End-to-end correlation report over synthetic market data.
//!
//! This example demonstrates:
//! - Building raw datasets from JSON document rows
//! - Resampling each dataset onto the quarterly axis
//! - Unifying the series onto one shared index
//! - Printing the coverage report and the top factor pairs

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
    // Rents climb over 2022-2023.
    let rentals = RawSeries::from_values(
        "rentals",
        vec![
            json!({"Quarter": "2022Q1", "Average Rent": 52_000.0}),
            json!({"Quarter": "2022Q2", "Average Rent": 54_500.0}),
            json!({"Quarter": "2022Q3", "Average Rent": 57_000.0}),
            json!({"Quarter": "2022Q4", "Average Rent": 60_000.0}),
            json!({"Quarter": "2023Q1", "Average Rent": 63_500.0}),
            json!({"Quarter": "2023Q2", "Average Rent": 66_000.0}),
        ],
    )?;

    // GDP moves with rents; note the dashed period labels.
    let gdp = RawSeries::from_values(
        "gdp",
        vec![
            json!({"Time Period": "Q1-2022", "Value": 100.0}),
            json!({"Time Period": "Q2-2022", "Value": 101.5}),
            json!({"Time Period": "Q3-2022", "Value": 103.0}),
            json!({"Time Period": "Q4-2022", "Value": 104.0}),
            json!({"Time Period": "Q1-2023", "Value": 106.0}),
            json!({"Time Period": "Q2-2023", "Value": 107.5}),
        ],
    )?;

    // Hotel occupancy moves against rents in this synthetic scenario.
    let occupancy = RawSeries::from_values(
        "hotel_occupancy",
        vec![
            json!({"Time Period": "2022Q1", "Value": 84.0}),
            json!({"Time Period": "2022Q2", "Value": 81.0}),
            json!({"Time Period": "2022Q3", "Value": 78.5}),
            json!({"Time Period": "2022Q4", "Value": 76.0}),
            json!({"Time Period": "2023Q1", "Value": 73.0}),
            json!({"Time Period": "2023Q2", "Value": 71.5}),
        ],
    )?;

    let report = analyze(vec![
        DatasetInput::new(
            rentals,
            FieldMapping::new("Quarter", "Average Rent"),
            Aggregation::Mean,
        ),
        DatasetInput::new(
            gdp,
            FieldMapping::new("Time Period", "Value"),
            Aggregation::Mean,
        ),
        DatasetInput::new(
            occupancy,
            FieldMapping::new("Time Period", "Value"),
            Aggregation::Mean,
        ),
    ])?;

    println!("{}\n", report.table.data());

    let (first, last) = report.table.span();
    println!("Coverage {first} to {last} ({} quarters):", report.coverage.rows);
    for column in &report.coverage.columns {
        println!("  {:32} {}%", column.name, column.completeness);
    }

    println!("\nTop factor pairs:");
    for pair in report.insights.iter().take(5) {
        println!("  {} vs {}: {pair}", pair.left, pair.right);
    }

    Ok(())
}
