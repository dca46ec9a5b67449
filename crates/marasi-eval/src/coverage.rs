//! Data-coverage reporting over a unified table.
//!
//! The data-quality view shows, per series, how much of the unified period
//! index actually has observations, plus the overall span. Formatting the
//! span for display is the presentation layer's job; this module only
//! computes the numbers.

use marasi_align::UnifiedTable;
use marasi_traits::{Quarter, Result, stats::round_to};
use serde::{Deserialize, Serialize};

/// Completeness of one column over the unified index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCoverage {
    /// Column name.
    pub name: String,
    /// Number of non-missing observations.
    pub observed: usize,
    /// `observed / rows * 100`, rounded to one decimal place.
    pub completeness: f64,
}

/// Coverage of every column plus the table's overall span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Per-column completeness, in declaration order.
    pub columns: Vec<ColumnCoverage>,
    /// First quarter of the unified index.
    pub first_period: Quarter,
    /// Last quarter of the unified index.
    pub last_period: Quarter,
    /// Total number of rows (quarters) in the unified index.
    pub rows: usize,
}

/// Computes per-column completeness and the overall span.
///
/// # Errors
///
/// Returns an error only when a column read fails.
pub fn coverage(table: &UnifiedTable) -> Result<CoverageReport> {
    let rows = table.len();
    let (first_period, last_period) = table.span();

    let mut columns = Vec::with_capacity(table.columns().len());
    for name in table.columns() {
        let observed = table
            .values(name)?
            .iter()
            .filter(|v| v.is_some())
            .count();
        columns.push(ColumnCoverage {
            name: name.clone(),
            observed,
            completeness: round_to(observed as f64 / rows as f64 * 100.0, 1),
        });
    }

    Ok(CoverageReport {
        columns,
        first_period,
        last_period,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use marasi_align::{ResampledSeries, unify};
    use std::collections::BTreeMap;

    fn q(year: i32, quarter: u8) -> Quarter {
        Quarter::new(year, quarter).unwrap()
    }

    #[test]
    fn test_coverage_percentages_and_span() {
        let mut full = BTreeMap::new();
        let mut sparse = BTreeMap::new();
        let mut current = q(2020, 1);
        for i in 0..6 {
            full.insert(current, i as f64);
            if i % 2 == 0 {
                sparse.insert(current, i as f64);
            }
            current = current.next();
        }

        let table = unify(&[
            ResampledSeries::from_values("full", full),
            ResampledSeries::from_values("sparse", sparse),
        ])
        .unwrap();

        let report = coverage(&table).unwrap();
        assert_eq!(report.rows, 6);
        assert_eq!(report.first_period, q(2020, 1));
        assert_eq!(report.last_period, q(2021, 2));

        assert_eq!(report.columns[0].name, "full");
        assert_eq!(report.columns[0].observed, 6);
        assert_relative_eq!(report.columns[0].completeness, 100.0);

        assert_eq!(report.columns[1].observed, 3);
        assert_relative_eq!(report.columns[1].completeness, 50.0);
    }

    #[test]
    fn test_completeness_rounded_to_one_decimal() {
        let mut a = BTreeMap::new();
        let mut b = BTreeMap::new();
        let mut current = q(2020, 1);
        for i in 0..3 {
            a.insert(current, i as f64);
            if i == 0 {
                b.insert(current, 1.0);
            }
            current = current.next();
        }
        let table = unify(&[
            ResampledSeries::from_values("a", a),
            ResampledSeries::from_values("b", b),
        ])
        .unwrap();

        let report = coverage(&table).unwrap();
        // 1/3 of 3 rows: 33.333...% rounds to 33.3.
        assert_relative_eq!(report.columns[1].completeness, 33.3);
    }
}
