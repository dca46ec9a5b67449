#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marasi-analytics/marasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Marasi real-estate market analytics framework.
//!
//! This crate provides the canonical quarterly time axis, the raw document
//! row types produced by data sources, the per-call field mapping contract,
//! and the shared error taxonomy.

/// The version of the marasi-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod period;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{MarasiError, Result};
pub use period::{ParsedPeriod, Quarter, parse_period};
pub use types::{FieldMapping, RawRecord, RawSeries, group_key, numeric_value};
