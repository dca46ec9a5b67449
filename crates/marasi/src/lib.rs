#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marasi-analytics/marasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # marasi
//!
//! Real-estate market analytics over heterogeneous economic time series.
//!
//! marasi is an umbrella crate that re-exports all marasi sub-crates for
//! convenience and hosts the end-to-end pipeline entry point.
//!
//! ## Quick Start
//!
//! ```ignore
//! use marasi::pipeline::{DatasetInput, analyze};
//! use marasi::{Aggregation, FieldMapping, RawSeries};
//!
//! let inputs = vec![
//!     DatasetInput::new(rentals, FieldMapping::new("Quarter", "Average Rent"), Aggregation::Mean),
//!     DatasetInput::new(gdp, FieldMapping::new("Time Period", "Value"), Aggregation::Mean),
//! ];
//!
//! let report = analyze(inputs)?;
//! for pair in report.insights.iter().take(5) {
//!     println!("{} vs {}: {pair}", pair.left, pair.right);
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types (canonical quarters, raw records, errors)
//! - [`align`] - Quarterly resampling and index unification
//! - [`eval`] - Correlation, insight ranking, coverage reporting
//! - [`pulse`] - Open-data API client and dataset registry
//!
//! ## Architecture
//!
//! The pipeline is a straight data flow:
//!
//! 1. **Normalize** heterogeneous period labels onto the quarterly axis
//! 2. **Resample** each raw dataset to one value per quarter
//! 3. **Unify** all series onto one shared, gap-free index
//! 4. **Correlate** column pairs with pairwise-complete observations and
//!    rank the strongest factor pairs

/// Version information for the marasi crate.
///
/// This constant contains the current version of marasi as specified in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;

/// Core types for the marasi framework.
pub mod traits {
    pub use marasi_traits::*;
}

/// Quarterly resampling and index unification.
pub mod align {
    pub use marasi_align::*;
}

/// Correlation analysis and coverage reporting.
pub mod eval {
    pub use marasi_eval::*;
}

/// Open-data API client and dataset registry.
pub mod pulse {
    pub use marasi_pulse::*;
}

// Flat re-exports of the everyday types.
pub use marasi_align::{Aggregation, Resampled, ResampledSeries, UnifiedTable, resample, unify};
pub use marasi_eval::{
    ColumnCoverage, CorrelationMatrix, CoverageReport, Direction, FactorPair, Strength, correlate,
    coverage, rank_pairs,
};
pub use marasi_traits::{
    FieldMapping, MarasiError, ParsedPeriod, Quarter, RawRecord, RawSeries, Result, parse_period,
};
pub use pipeline::{AnalysisReport, DatasetInput, DatasetOmission, analyze};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
