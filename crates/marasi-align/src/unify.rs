//! Reindexing resampled series onto one shared, gap-free quarterly index.
//!
//! Unification computes the union calendar (global minimum to global
//! maximum quarter across all inputs, step one quarter) and reindexes
//! every series onto it. Periods a series did not observe become explicit
//! nulls: not zero, and never forward-filled. Forward fill is a charting
//! choice the presentation layer may apply afterwards; applied here it
//! would corrupt the correlation statistics downstream.

use crate::resample::ResampledSeries;
use marasi_traits::{MarasiError, Quarter, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Name of the period label column in the unified frame.
pub const PERIOD_COLUMN: &str = "period";

/// Multiple resampled series on one shared quarterly index.
///
/// `UnifiedTable` wraps a Polars `DataFrame` holding a `period` label
/// column plus one nullable `f64` column per input series, in declaration
/// order. The row count always equals the number of quarters between the
/// global minimum and maximum inclusive; the index itself has no gaps even
/// where values are missing.
///
/// # Example
///
/// ```
/// use marasi_align::{UnifiedTable, unify, ResampledSeries};
/// use marasi_traits::Quarter;
/// use std::collections::BTreeMap;
///
/// let mut values = BTreeMap::new();
/// values.insert(Quarter::new(2022, 1).unwrap(), 5000.0);
/// values.insert(Quarter::new(2022, 3).unwrap(), 6000.0);
/// let series = ResampledSeries::from_values("rentals_Average_Rent", values);
///
/// let table = unify(&[series]).unwrap();
/// assert_eq!(table.len(), 3); // 2022Q1..2022Q3, gap at Q2 kept as null
/// ```
#[derive(Debug, Clone)]
pub struct UnifiedTable {
    index: Vec<Quarter>,
    names: Vec<String>,
    frame: DataFrame,
}

impl UnifiedTable {
    /// The quarterly index, first to last, no gaps.
    #[must_use]
    pub fn periods(&self) -> &[Quarter] {
        &self.index
    }

    /// The value column names in declaration order (the `period` column is
    /// not included).
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.names
    }

    /// Number of rows (quarters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// First and last quarter of the index.
    ///
    /// Unification never produces an empty index, so the span is always
    /// available.
    #[must_use]
    pub fn span(&self) -> (Quarter, Quarter) {
        (self.index[0], self.index[self.index.len() - 1])
    }

    /// A column's values in index order, with `None` marking missing
    /// periods.
    ///
    /// # Errors
    ///
    /// Returns [`MarasiError::ColumnNotFound`] for unknown names.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if !self.names.iter().any(|n| n == name) {
            return Err(MarasiError::ColumnNotFound(name.to_string()));
        }
        let chunked = self
            .frame
            .column(name)?
            .as_materialized_series()
            .f64()?
            .clone();
        Ok(chunked.into_iter().collect())
    }

    /// The underlying DataFrame, for charting and display.
    #[must_use]
    pub const fn data(&self) -> &DataFrame {
        &self.frame
    }

    /// Consumes self and returns the underlying DataFrame.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

/// Unifies a set of resampled series onto the shared quarterly index.
///
/// Series with no observations contribute nothing to the span and are
/// skipped (the pipeline reports them as omissions). The remaining series
/// keep their values where present and get explicit nulls elsewhere.
///
/// # Errors
///
/// - [`MarasiError::InsufficientData`] when no input series has any
///   observations.
/// - [`MarasiError::DuplicateColumn`] when two series share an output
///   name; aggregation upstream guarantees one value per period, so a name
///   collision can only be a caller wiring mistake.
pub fn unify(series: &[ResampledSeries]) -> Result<UnifiedTable> {
    let mut seen = HashSet::new();
    for s in series {
        if !seen.insert(s.name()) {
            return Err(MarasiError::DuplicateColumn(s.name().to_string()));
        }
    }

    let populated: Vec<&ResampledSeries> = series.iter().filter(|s| !s.is_empty()).collect();
    if populated.is_empty() {
        return Err(MarasiError::InsufficientData(
            "no series with any observations to unify".to_string(),
        ));
    }

    let global_min = populated
        .iter()
        .filter_map(|s| s.min_period())
        .min()
        .expect("populated series have a min period");
    let global_max = populated
        .iter()
        .filter_map(|s| s.max_period())
        .max()
        .expect("populated series have a max period");

    let index = Quarter::span(global_min, global_max);
    let labels: Vec<String> = index.iter().map(Quarter::label).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(populated.len() + 1);
    columns.push(Column::new(PERIOD_COLUMN.into(), labels));

    let mut names = Vec::with_capacity(populated.len());
    for s in &populated {
        let reindexed: Vec<Option<f64>> = index.iter().map(|q| s.get(*q)).collect();
        columns.push(Column::new(s.name().into(), reindexed));
        names.push(s.name().to_string());
    }

    let frame = DataFrame::new(columns)?;
    Ok(UnifiedTable {
        index,
        names,
        frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn q(year: i32, quarter: u8) -> Quarter {
        Quarter::new(year, quarter).unwrap()
    }

    fn series(name: &str, points: &[(Quarter, f64)]) -> ResampledSeries {
        let values: BTreeMap<Quarter, f64> = points.iter().copied().collect();
        ResampledSeries::from_values(name, values)
    }

    #[test]
    fn test_unify_spans_union_of_periods() {
        // GDP 2020Q1..2021Q4 and rents 2019Q3..2020Q2 unify to a table
        // indexed 2019Q3..2021Q4: 10 quarters.
        let gdp = series(
            "gdp_Value",
            &[(q(2020, 1), 100.0), (q(2021, 4), 110.0)],
        );
        let rent = series(
            "rentals_Average_Rent",
            &[(q(2019, 3), 5000.0), (q(2020, 2), 5200.0)],
        );

        let table = unify(&[gdp, rent]).unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(table.span(), (q(2019, 3), q(2021, 4)));
        assert_eq!(
            table.len(),
            Quarter::quarters_between(q(2019, 3), q(2021, 4))
        );

        // GDP has no observations before 2020Q1: explicit missing, not 0.
        let gdp_values = table.values("gdp_Value").unwrap();
        assert_eq!(gdp_values[0], None); // 2019Q3
        assert_eq!(gdp_values[1], None); // 2019Q4
        assert_relative_eq!(gdp_values[2].unwrap(), 100.0); // 2020Q1
        assert_eq!(gdp_values[9], Some(110.0)); // 2021Q4
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let a = series("b_col", &[(q(2022, 1), 1.0)]);
        let b = series("a_col", &[(q(2022, 1), 2.0)]);
        let table = unify(&[a, b]).unwrap();
        // Declaration order, not alphabetical.
        assert_eq!(table.columns(), ["b_col", "a_col"]);
    }

    #[test]
    fn test_interior_gaps_stay_null() {
        let s = series("x", &[(q(2022, 1), 1.0), (q(2022, 3), 3.0)]);
        let table = unify(&[s]).unwrap();
        let values = table.values("x").unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_empty_series_skipped() {
        let populated = series("x", &[(q(2022, 1), 1.0)]);
        let empty = series("y", &[]);
        let table = unify(&[populated, empty]).unwrap();
        assert_eq!(table.columns(), ["x"]);
    }

    #[test]
    fn test_all_empty_is_insufficient_data() {
        let err = unify(&[series("x", &[])]).unwrap_err();
        assert!(matches!(err, MarasiError::InsufficientData(_)));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let a = series("x", &[(q(2022, 1), 1.0)]);
        let b = series("x", &[(q(2022, 2), 2.0)]);
        let err = unify(&[a, b]).unwrap_err();
        assert!(matches!(err, MarasiError::DuplicateColumn(_)));
    }

    #[test]
    fn test_unknown_column_lookup() {
        let table = unify(&[series("x", &[(q(2022, 1), 1.0)])]).unwrap();
        assert!(matches!(
            table.values("nope"),
            Err(MarasiError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_frame_has_period_column() {
        let table = unify(&[series("x", &[(q(2022, 1), 1.0)])]).unwrap();
        let frame = table.data();
        assert!(
            frame
                .get_column_names()
                .iter()
                .any(|n| n.as_str() == PERIOD_COLUMN)
        );
        assert_eq!(frame.height(), 1);
    }
}
