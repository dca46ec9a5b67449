//! Dataset registry: the economic and property datasets the dashboard
//! analyzes, each with its own document schema.
//!
//! The upstream sources disagree on field names ("Quarter" vs
//! "Time Period" vs "Year" vs "Date") and on sampling frequency (quarterly
//! rents, monthly CPI, annual population, daily FX). The registry captures
//! each dataset's field mapping and default aggregation so the pipeline
//! can be wired per call instead of hardcoding column conventions.

use marasi_align::Aggregation;
use marasi_traits::FieldMapping;
use serde::{Deserialize, Serialize};

/// Metadata about a dataset known to the analytics pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Unique identifier, used on the CLI and as the column-name prefix.
    pub name: &'static str,

    /// Resource path on the open-data API.
    pub resource: &'static str,

    /// Human-readable description.
    pub description: &'static str,

    /// Field holding the period label.
    pub period_field: &'static str,

    /// Field holding the numeric observation.
    pub value_field: &'static str,

    /// Optional field holding a grouping key.
    pub group_field: Option<&'static str>,

    /// Default aggregation onto the quarterly axis.
    pub aggregation: Aggregation,
}

impl DatasetInfo {
    /// The field mapping for this dataset.
    #[must_use]
    pub fn field_mapping(&self) -> FieldMapping {
        let mapping = FieldMapping::new(self.period_field, self.value_field);
        match self.group_field {
            Some(group) => mapping.with_group(group),
            None => mapping,
        }
    }
}

/// All datasets the pipeline knows how to align.
#[must_use]
pub fn available_datasets() -> Vec<DatasetInfo> {
    vec![
        DatasetInfo {
            name: "rentals",
            resource: "rentals/quarterly",
            description: "Average residential rent per quarter",
            period_field: "Quarter",
            value_field: "Average Rent",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "sales_amount",
            resource: "transactions/sales",
            description: "Mean sale contract amount per quarter",
            period_field: "Quarter",
            value_field: "Contract Amount",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "sales_volume",
            resource: "transactions/sales",
            description: "Number of sale transactions per quarter",
            period_field: "Quarter",
            value_field: "Contract Amount",
            group_field: None,
            aggregation: Aggregation::Count,
        },
        DatasetInfo {
            name: "hotel_occupancy",
            resource: "tourism/hotel-occupancy",
            description: "Hotel occupancy rate, quarterly",
            period_field: "Time Period",
            value_field: "Value",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "gdp",
            resource: "economy/gdp",
            description: "Gross domestic product at constant prices, quarterly",
            period_field: "Time Period",
            value_field: "Value",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "cpi",
            resource: "economy/cpi",
            description: "Consumer price index, monthly, by division",
            period_field: "Time Period",
            value_field: "Value",
            group_field: Some("CPI Division"),
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "population",
            resource: "demographics/population",
            description: "Resident population, annual",
            period_field: "Year",
            value_field: "Value",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
        DatasetInfo {
            name: "exchange_rate",
            resource: "economy/exchange-rates",
            description: "USD exchange rate, daily",
            period_field: "Date",
            value_field: "Value",
            group_field: None,
            aggregation: Aggregation::Mean,
        },
    ]
}

/// Looks a dataset up by name.
#[must_use]
pub fn find_dataset(name: &str) -> Option<DatasetInfo> {
    available_datasets().into_iter().find(|d| d.name == name)
}
