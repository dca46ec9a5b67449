//! Resampling raw document rows onto the canonical quarterly axis.
//!
//! Resampling normalizes every record's period label, drops unparsable
//! records (counting them for diagnostics), groups the survivors by
//! canonical quarter and optional group key, and reduces each group with
//! the configured aggregator. The aggregator is the deduplication
//! mechanism: output series cannot contain duplicate periods by
//! construction, with no later dedup pass.

use marasi_traits::{
    FieldMapping, MarasiError, ParsedPeriod, Quarter, RawSeries, Result, group_key,
    numeric_value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How observations falling into the same quarter are reduced to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Arithmetic mean of the observations.
    Mean,
    /// Sum of the observations.
    Sum,
    /// Number of surviving records; the value field is ignored.
    /// Used for transaction-volume style metrics.
    Count,
}

impl Aggregation {
    /// Lower-case name, matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Count => "count",
        }
    }
}

/// One value per canonical quarter, named by its source.
///
/// Keys are quarters; there are no duplicates and no placeholder values.
/// Periods with no observations are simply absent until unification makes
/// the gaps explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    name: String,
    values: BTreeMap<Quarter, f64>,
}

impl ResampledSeries {
    /// Creates a resampled series from already-reduced per-quarter values.
    #[must_use]
    pub fn from_values(name: impl Into<String>, values: BTreeMap<Quarter, f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// The output column name, e.g. `"rentals_Average_Rent"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The per-quarter values.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<Quarter, f64> {
        &self.values
    }

    /// The value for a quarter, if observed.
    #[must_use]
    pub fn get(&self, quarter: Quarter) -> Option<f64> {
        self.values.get(&quarter).copied()
    }

    /// Earliest observed quarter.
    #[must_use]
    pub fn min_period(&self) -> Option<Quarter> {
        self.values.keys().next().copied()
    }

    /// Latest observed quarter.
    #[must_use]
    pub fn max_period(&self) -> Option<Quarter> {
        self.values.keys().next_back().copied()
    }

    /// Number of observed quarters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The outcome of resampling one raw dataset.
#[derive(Debug, Clone)]
pub struct Resampled {
    /// One series without grouping, one per group value otherwise, in
    /// first-seen order.
    pub series: Vec<ResampledSeries>,
    /// Records dropped because their period or value was unusable.
    /// Surfaced for diagnostics; never fatal.
    pub dropped_records: usize,
}

/// Sum/count accumulator for one (group, quarter) cell.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn reduce(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Mean => self.sum / self.count as f64,
            Aggregation::Sum => self.sum,
            Aggregation::Count => self.count as f64,
        }
    }
}

/// Resamples a raw dataset onto the quarterly axis.
///
/// Each record's period is normalized; records whose period (or, for
/// value-carrying aggregations, whose value) is unusable are dropped and
/// counted. Year-only periods fan out to all four quarters of the year,
/// each carrying the same observation. With a group field configured the
/// output contains one series per group value, named
/// `{dataset}_{value_field}_{group}`; otherwise a single series named
/// `{dataset}_{value_field}`.
///
/// # Errors
///
/// Returns [`MarasiError::SchemaMismatch`] when a mapped field is absent
/// from a record. That rejects the whole dataset: a missing field is a
/// schema problem, not a row defect, and guessing a substitute would be
/// worse than failing.
///
/// # Example
///
/// ```
/// use marasi_align::{Aggregation, resample};
/// use marasi_traits::{FieldMapping, RawSeries};
/// use serde_json::json;
///
/// let raw = RawSeries::from_values("rentals", vec![
///     json!({"Quarter": "2022Q1", "Average Rent": 5000.0}),
///     json!({"Quarter": "2022Q1", "Average Rent": 7000.0}),
///     json!({"Quarter": "2022Q2", "Average Rent": 6000.0}),
/// ]).unwrap();
///
/// let fields = FieldMapping::new("Quarter", "Average Rent");
/// let out = resample(&raw, &fields, Aggregation::Mean).unwrap();
/// assert_eq!(out.series.len(), 1);
/// assert_eq!(out.series[0].len(), 2);
/// ```
pub fn resample(
    raw: &RawSeries,
    fields: &FieldMapping,
    aggregation: Aggregation,
) -> Result<Resampled> {
    let base_name = sanitize(&format!("{}_{}", raw.name, fields.value));

    // Groups in first-seen order; group cardinality is small enough that a
    // linear scan beats maintaining a side index.
    let mut groups: Vec<(Option<String>, BTreeMap<Quarter, Accumulator>)> = Vec::new();
    let mut dropped = 0usize;

    for record in &raw.records {
        let period_value =
            record
                .get(&fields.period)
                .ok_or_else(|| MarasiError::SchemaMismatch {
                    dataset: raw.name.clone(),
                    field: fields.period.clone(),
                })?;

        let group = match &fields.group {
            Some(group_field) => {
                let value =
                    record
                        .get(group_field)
                        .ok_or_else(|| MarasiError::SchemaMismatch {
                            dataset: raw.name.clone(),
                            field: group_field.clone(),
                        })?;
                match group_key(value) {
                    Some(key) => Some(key),
                    None => {
                        dropped += 1;
                        continue;
                    }
                }
            }
            None => None,
        };

        let Ok(period) = ParsedPeriod::from_value(period_value) else {
            dropped += 1;
            continue;
        };

        let value = if aggregation == Aggregation::Count {
            // Count ignores the value field entirely.
            0.0
        } else {
            let value_field =
                record
                    .get(&fields.value)
                    .ok_or_else(|| MarasiError::SchemaMismatch {
                        dataset: raw.name.clone(),
                        field: fields.value.clone(),
                    })?;
            match numeric_value(value_field) {
                Some(v) => v,
                None => {
                    dropped += 1;
                    continue;
                }
            }
        };

        let slot = match groups.iter().position(|(key, _)| *key == group) {
            Some(i) => i,
            None => {
                groups.push((group, BTreeMap::new()));
                groups.len() - 1
            }
        };
        let cells = &mut groups[slot].1;
        for quarter in period.quarters() {
            cells.entry(quarter).or_default().push(value);
        }
    }

    let series = groups
        .into_iter()
        .map(|(group, cells)| {
            let name = match group {
                Some(key) => format!("{base_name}_{}", sanitize(&key)),
                None => base_name.clone(),
            };
            let values = cells
                .into_iter()
                .map(|(quarter, acc)| (quarter, acc.reduce(aggregation)))
                .collect();
            ResampledSeries { name, values }
        })
        .collect();

    Ok(Resampled {
        series,
        dropped_records: dropped,
    })
}

/// Column-name sanitizer: alphanumerics survive, runs of anything else
/// collapse to a single underscore.
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    out
}
