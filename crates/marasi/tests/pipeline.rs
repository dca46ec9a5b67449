//! End-to-end pipeline scenarios over mixed-format, mixed-frequency
//! datasets.

use approx::assert_relative_eq;
use marasi::pipeline::{DatasetInput, analyze};
use marasi::{Aggregation, FieldMapping, Quarter, RawSeries};
use serde_json::json;

fn q(year: i32, quarter: u8) -> Quarter {
    Quarter::new(year, quarter).unwrap()
}

/// Mixed label formats, annual fan-out, daily dates, and grouped CPI all
/// land on one quarterly index.
#[test]
fn mixed_frequency_datasets_align_on_one_index() {
    let rentals = DatasetInput::new(
        RawSeries::from_values(
            "rentals",
            vec![
                json!({"Quarter": "2021Q1", "Average Rent": 5000.0}),
                json!({"Quarter": "Q2-2021", "Average Rent": 5100.0}),
                json!({"Quarter": "2021Q3", "Average Rent": 5300.0}),
                json!({"Quarter": "2021Q4", "Average Rent": 5400.0}),
            ],
        )
        .unwrap(),
        FieldMapping::new("Quarter", "Average Rent"),
        Aggregation::Mean,
    );

    let population = DatasetInput::new(
        RawSeries::from_values(
            "population",
            vec![json!({"Year": 2021, "Value": 3_500_000.0})],
        )
        .unwrap(),
        FieldMapping::new("Year", "Value"),
        Aggregation::Mean,
    );

    let fx = DatasetInput::new(
        RawSeries::from_values(
            "exchange_rate",
            vec![
                json!({"Date": "2021-01-05", "Value": 3.671}),
                json!({"Date": "2021-02-10", "Value": 3.673}),
                json!({"Date": "2021-07-20", "Value": 3.675}),
            ],
        )
        .unwrap(),
        FieldMapping::new("Date", "Value"),
        Aggregation::Mean,
    );

    let cpi = DatasetInput::new(
        RawSeries::from_values(
            "cpi",
            vec![
                json!({"Time Period": "2021-01-31", "Value": 104.0, "CPI Division": "Housing"}),
                json!({"Time Period": "2021-02-28", "Value": 104.5, "CPI Division": "Housing"}),
                json!({"Time Period": "2021-04-30", "Value": 105.0, "CPI Division": "Housing"}),
            ],
        )
        .unwrap(),
        FieldMapping::new("Time Period", "Value").with_group("CPI Division"),
        Aggregation::Mean,
    );

    let report = analyze(vec![rentals, population, fx, cpi]).unwrap();

    // Everything spans 2021Q1..2021Q4.
    assert_eq!(report.table.span(), (q(2021, 1), q(2021, 4)));
    assert_eq!(report.table.len(), 4);
    assert_eq!(
        report.table.columns(),
        [
            "rentals_Average_Rent",
            "population_Value",
            "exchange_rate_Value",
            "cpi_Value_Housing",
        ]
    );

    // Daily FX aggregated to a quarterly mean.
    let fx_values = report.table.values("exchange_rate_Value").unwrap();
    assert_relative_eq!(fx_values[0].unwrap(), 3.672);
    assert_relative_eq!(fx_values[2].unwrap(), 3.675);
    assert_eq!(fx_values[3], None);

    // Monthly CPI averaged within each quarter.
    let cpi_values = report.table.values("cpi_Value_Housing").unwrap();
    assert_relative_eq!(cpi_values[0].unwrap(), 104.25);
    assert_relative_eq!(cpi_values[1].unwrap(), 105.0);

    // Annual population fanned out to all four quarters.
    let pop_values = report.table.values("population_Value").unwrap();
    assert!(pop_values.iter().all(|v| *v == Some(3_500_000.0)));

    assert!(report.omissions.is_empty());
}

/// Disjoint spans unify onto the union calendar with explicit leading and
/// trailing gaps.
#[test]
fn disjoint_spans_unify_to_union_calendar() {
    let gdp_rows = Quarter::span(q(2020, 1), q(2021, 4))
        .iter()
        .enumerate()
        .map(|(i, quarter)| json!({"Time Period": quarter.label(), "Value": 100.0 + i as f64}))
        .collect();
    let rent_rows = Quarter::span(q(2019, 3), q(2020, 2))
        .iter()
        .enumerate()
        .map(|(i, quarter)| json!({"Quarter": quarter.label(), "Average Rent": 5000.0 + i as f64}))
        .collect();

    let report = analyze(vec![
        DatasetInput::new(
            RawSeries::from_values("gdp", gdp_rows).unwrap(),
            FieldMapping::new("Time Period", "Value"),
            Aggregation::Mean,
        ),
        DatasetInput::new(
            RawSeries::from_values("rentals", rent_rows).unwrap(),
            FieldMapping::new("Quarter", "Average Rent"),
            Aggregation::Mean,
        ),
    ])
    .unwrap();

    assert_eq!(report.table.len(), 10);
    assert_eq!(report.table.span(), (q(2019, 3), q(2021, 4)));

    let gdp = report.table.values("gdp_Value").unwrap();
    assert_eq!(gdp[0], None); // 2019Q3
    assert_eq!(gdp[1], None); // 2019Q4
    assert!(gdp[2].is_some()); // 2020Q1

    // Coverage reflects the gaps: GDP observed 8 of 10 quarters.
    let gdp_coverage = report
        .coverage
        .columns
        .iter()
        .find(|c| c.name == "gdp_Value")
        .unwrap();
    assert_eq!(gdp_coverage.observed, 8);
    assert_relative_eq!(gdp_coverage.completeness, 80.0);
}

/// The ranked insights carry the narrative labels the dashboard shows.
#[test]
fn insights_rank_and_label_factor_pairs() {
    let base = [1.0, 2.0, 3.0, 4.0, 5.0];
    let make = |name: &str, period_field: &str, value_field: &str, f: &dyn Fn(f64) -> f64| {
        let rows = base
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let quarter = q(2020 + i as i32 / 4, (i % 4) as u8 + 1);
                json!({period_field: quarter.label(), value_field: f(*v)})
            })
            .collect();
        DatasetInput::new(
            RawSeries::from_values(name, rows).unwrap(),
            FieldMapping::new(period_field, value_field),
            Aggregation::Mean,
        )
    };

    let report = analyze(vec![
        make("rentals", "Quarter", "Average Rent", &|v| 5000.0 + v * 100.0),
        make("gdp", "Time Period", "Value", &|v| 100.0 + v * 2.0),
        make("vacancy", "Quarter", "Rate", &|v| 20.0 - v * 3.0),
    ])
    .unwrap();

    // All three series are affine in the same base: every pair is exact.
    assert_eq!(report.insights.len(), 3);
    for pair in &report.insights {
        assert_relative_eq!(pair.r.abs(), 1.0);
    }

    let rent_vs_vacancy = report
        .insights
        .iter()
        .find(|p| p.left == "rentals_Average_Rent" && p.right == "vacancy_Rate")
        .unwrap();
    assert_relative_eq!(rent_vs_vacancy.r, -1.0);
    assert_eq!(rent_vs_vacancy.to_string(), "Strong negative correlation: -1.00");

    // Top-k is a plain slice of the ranked list.
    let top2: Vec<_> = report.insights.iter().take(2).collect();
    assert_eq!(top2.len(), 2);
}

/// Correlation of unrelated pairs is unaffected by a third column's gaps,
/// end to end.
#[test]
fn pairwise_complete_policy_end_to_end() {
    let full = |name: &str, field: &str, values: &[f64]| {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| json!({"Quarter": q(2021, (i % 4) as u8 + 1).label(), field: v}))
            .collect();
        DatasetInput::new(
            RawSeries::from_values(name, rows).unwrap(),
            FieldMapping::new("Quarter", field),
            Aggregation::Mean,
        )
    };

    let gappy = DatasetInput::new(
        RawSeries::from_values(
            "sparse",
            vec![
                json!({"Quarter": "2021Q1", "Value": 9.0}),
                json!({"Quarter": "2021Q4", "Value": 1.0}),
            ],
        )
        .unwrap(),
        FieldMapping::new("Quarter", "Value"),
        Aggregation::Mean,
    );

    let with_sparse = analyze(vec![
        full("a", "Value", &[1.0, 2.0, 4.0, 8.0]),
        full("b", "Amount", &[2.0, 3.0, 5.0, 7.0]),
        gappy,
    ])
    .unwrap();
    let without_sparse = analyze(vec![
        full("a", "Value", &[1.0, 2.0, 4.0, 8.0]),
        full("b", "Amount", &[2.0, 3.0, 5.0, 7.0]),
    ])
    .unwrap();

    let r1 = with_sparse
        .correlation
        .by_name("a_Value", "b_Amount")
        .unwrap();
    let r2 = without_sparse
        .correlation
        .by_name("a_Value", "b_Amount")
        .unwrap();
    assert_relative_eq!(r1, r2);
}
