//! Raw dataset types and the per-call field mapping.
//!
//! Datasets arrive as ordered sequences of JSON document rows whose field
//! names vary per source ("Quarter" vs "Time Period", "Value" vs
//! "Contract Amount", and so on). Rather than hardcoding column-name
//! conventions, every pipeline call is configured with a [`FieldMapping`]
//! naming which field holds the period, which holds the value, and which
//! (if any) holds a grouping key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single raw document row: field name to JSON value.
pub type RawRecord = serde_json::Map<String, Value>;

/// An ordered sequence of raw document rows for one dataset.
///
/// Owned transiently by a pipeline invocation; nothing here persists.
///
/// # Example
///
/// ```
/// use marasi_traits::RawSeries;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"Quarter": "2022Q1", "Average Rent": 5000.0}),
///     json!({"Quarter": "2022Q2", "Average Rent": 6000.0}),
/// ];
/// let series = RawSeries::from_values("rentals", rows).unwrap();
/// assert_eq!(series.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSeries {
    /// Dataset name, used as the prefix of output column names.
    pub name: String,
    /// The raw document rows, in source order.
    pub records: Vec<RawRecord>,
}

impl RawSeries {
    /// Creates a raw series from already-materialized document rows.
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Creates a raw series from arbitrary JSON values, requiring each to
    /// be an object.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first non-object row.
    pub fn from_values(
        name: impl Into<String>,
        rows: Vec<Value>,
    ) -> crate::Result<Self> {
        let name = name.into();
        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match row {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(crate::MarasiError::Other(format!(
                        "dataset '{name}' row {i} is not an object: {other}"
                    )));
                }
            }
        }
        Ok(Self { name, records })
    }

    /// Number of raw records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Names the document fields a dataset keeps its period, value, and
/// optional grouping key in.
///
/// # Example
///
/// ```
/// use marasi_traits::FieldMapping;
///
/// let fields = FieldMapping::new("Quarter", "Average Rent").with_group("Usage");
/// assert_eq!(fields.group.as_deref(), Some("Usage"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Field holding the period label.
    pub period: String,
    /// Field holding the numeric observation.
    pub value: String,
    /// Optional field holding a grouping key (e.g. property area, CPI
    /// division); when set, resampling yields one series per group value.
    pub group: Option<String>,
}

impl FieldMapping {
    /// Creates a mapping with no grouping key.
    #[must_use]
    pub fn new(period: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            value: value.into(),
            group: None,
        }
    }

    /// Sets the grouping field.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Extracts a numeric observation from a raw JSON field value.
///
/// Numbers are taken as-is; numeric strings are parsed (upstream CSV
/// ingestion frequently stringifies numbers). Anything else is `None`.
#[must_use]
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Renders a raw JSON field value as a group key.
///
/// Strings are used verbatim; numbers and booleans are stringified so that
/// e.g. an integer district code still groups correctly.
#[must_use]
pub fn group_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_series_from_values() {
        let rows = vec![json!({"Quarter": "2022Q1", "Value": 1.0})];
        let series = RawSeries::from_values("gdp", rows).unwrap();
        assert_eq!(series.name, "gdp");
        assert_eq!(series.len(), 1);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_raw_series_rejects_non_object_rows() {
        let rows = vec![json!([1, 2, 3])];
        assert!(RawSeries::from_values("gdp", rows).is_err());
    }

    #[test]
    fn test_numeric_value_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric_value(&json!(5000.0)), Some(5000.0));
        assert_eq!(numeric_value(&json!(42)), Some(42.0));
        assert_eq!(numeric_value(&json!("6000")), Some(6000.0));
        assert_eq!(numeric_value(&json!(" 6.5 ")), Some(6.5));
        assert_eq!(numeric_value(&json!("AED 5000")), None);
        assert_eq!(numeric_value(&json!(null)), None);
        assert_eq!(numeric_value(&json!(true)), None);
    }

    #[test]
    fn test_group_key() {
        assert_eq!(group_key(&json!("Business Bay")), Some("Business Bay".to_string()));
        assert_eq!(group_key(&json!(7)), Some("7".to_string()));
        assert_eq!(group_key(&json!(null)), None);
    }

    #[test]
    fn test_field_mapping_builder() {
        let fields = FieldMapping::new("Time Period", "Value");
        assert_eq!(fields.period, "Time Period");
        assert!(fields.group.is_none());

        let grouped = fields.with_group("CPI Division");
        assert_eq!(grouped.group.as_deref(), Some("CPI Division"));
    }
}
