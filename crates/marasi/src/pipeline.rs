//! End-to-end analytics pipeline with the partial-results policy.
//!
//! A pipeline run takes fully-materialized raw datasets (fetching is the
//! data-access collaborator's job), resamples each onto the quarterly
//! axis, unifies the survivors onto one index, and derives the
//! correlation matrix, ranked insights, and coverage report. Per-dataset
//! failures (schema mismatches, empty series) become omission entries and
//! the run continues with the rest; the run as a whole only fails when
//! nothing at all survives.
//!
//! The pipeline is synchronous, side-effect-free and reentrant: it owns
//! its inputs for the duration of the call and caches nothing.

use marasi_align::{Aggregation, ResampledSeries, UnifiedTable, resample, unify};
use marasi_eval::{CorrelationMatrix, CoverageReport, FactorPair, correlate, coverage, rank_pairs};
use marasi_traits::{FieldMapping, MarasiError, RawSeries, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One dataset entering a pipeline run: raw rows plus the per-call schema
/// configuration.
#[derive(Debug, Clone)]
pub struct DatasetInput {
    /// The raw document rows.
    pub series: RawSeries,
    /// Which fields hold the period, value, and optional group key.
    pub fields: FieldMapping,
    /// How same-quarter observations are reduced.
    pub aggregation: Aggregation,
}

impl DatasetInput {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(series: RawSeries, fields: FieldMapping, aggregation: Aggregation) -> Self {
        Self {
            series,
            fields,
            aggregation,
        }
    }
}

/// A dataset that was excluded from the run, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOmission {
    /// Dataset name.
    pub dataset: String,
    /// Human-readable reason for the exclusion.
    pub reason: String,
}

/// Everything a presentation layer needs from one analytics run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// All surviving series on the shared quarterly index.
    pub table: UnifiedTable,
    /// The unrounded correlation matrix.
    pub correlation: CorrelationMatrix,
    /// All defined factor pairs, strongest first. Callers slice their
    /// top-k.
    pub insights: Vec<FactorPair>,
    /// Per-column completeness and overall span.
    pub coverage: CoverageReport,
    /// Records dropped per dataset because of unparsable periods or
    /// values.
    pub dropped_records: BTreeMap<String, usize>,
    /// Datasets excluded from the run.
    pub omissions: Vec<DatasetOmission>,
}

/// Runs the full alignment-and-correlation pipeline.
///
/// # Errors
///
/// Returns [`MarasiError::InsufficientData`] when no dataset contributes
/// any usable observations. Individual dataset failures are reported in
/// [`AnalysisReport::omissions`] instead of failing the run.
///
/// # Example
///
/// ```
/// use marasi::pipeline::{DatasetInput, analyze};
/// use marasi::{Aggregation, FieldMapping, RawSeries};
/// use serde_json::json;
///
/// let rentals = RawSeries::from_values("rentals", vec![
///     json!({"Quarter": "2022Q1", "Average Rent": 5000.0}),
///     json!({"Quarter": "2022Q2", "Average Rent": 6000.0}),
/// ]).unwrap();
/// let gdp = RawSeries::from_values("gdp", vec![
///     json!({"Time Period": "2022Q1", "Value": 100.0}),
///     json!({"Time Period": "2022Q2", "Value": 104.0}),
/// ]).unwrap();
///
/// let report = analyze(vec![
///     DatasetInput::new(rentals, FieldMapping::new("Quarter", "Average Rent"), Aggregation::Mean),
///     DatasetInput::new(gdp, FieldMapping::new("Time Period", "Value"), Aggregation::Mean),
/// ]).unwrap();
///
/// assert_eq!(report.table.columns().len(), 2);
/// ```
pub fn analyze(inputs: Vec<DatasetInput>) -> Result<AnalysisReport> {
    let mut all_series: Vec<ResampledSeries> = Vec::new();
    let mut dropped_records = BTreeMap::new();
    let mut omissions = Vec::new();

    for input in &inputs {
        let name = input.series.name.clone();
        match resample(&input.series, &input.fields, input.aggregation) {
            Ok(resampled) => {
                if resampled.dropped_records > 0 {
                    dropped_records.insert(name.clone(), resampled.dropped_records);
                }
                let usable: Vec<ResampledSeries> = resampled
                    .series
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect();
                if usable.is_empty() {
                    omissions.push(DatasetOmission {
                        dataset: name,
                        reason: "no records survived resampling".to_string(),
                    });
                } else {
                    all_series.extend(usable);
                }
            }
            Err(err) => omissions.push(DatasetOmission {
                dataset: name,
                reason: err.to_string(),
            }),
        }
    }

    if all_series.is_empty() {
        return Err(MarasiError::InsufficientData(
            "no dataset contributed any usable observations".to_string(),
        ));
    }

    let table = unify(&all_series)?;
    let correlation = correlate(&table)?;
    let insights = rank_pairs(&correlation);
    let coverage = coverage(&table)?;

    Ok(AnalysisReport {
        table,
        correlation,
        insights,
        coverage,
        dropped_records,
        omissions,
    })
}
