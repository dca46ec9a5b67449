//! Quarterly resampling and index unification for marasi.
//!
//! This crate turns raw, irregularly-sampled dataset rows into series
//! aligned on the canonical quarterly axis:
//!
//! - [`resample`] reduces raw records to one value per quarter with a
//!   configured aggregation, dropping and counting unparsable rows
//! - [`unify`] reindexes multiple resampled series onto one shared,
//!   gap-free quarterly index with explicit nulls for missing periods
//!
//! # Example
//!
//! ```rust,ignore
//! use marasi_align::{Aggregation, resample, unify};
//! use marasi_traits::FieldMapping;
//!
//! let fields = FieldMapping::new("Quarter", "Average Rent");
//! let rents = resample(&raw_rents, &fields, Aggregation::Mean)?;
//! let table = unify(&rents.series)?;
//! ```

pub mod resample;
pub mod unify;

// Re-export main types
pub use resample::{Aggregation, Resampled, ResampledSeries, resample};
pub use unify::{PERIOD_COLUMN, UnifiedTable, unify};
