//! Correlation analysis and coverage reporting for marasi.
//!
//! This crate computes the analytical outputs the dashboard layer renders:
//!
//! - Pairwise-complete Pearson correlation matrices over a unified table
//! - Ranked factor-pair insights with strength/direction labels
//! - Per-series data-coverage statistics
//!
//! # Example
//!
//! ```rust,ignore
//! use marasi_eval::{correlate, coverage, rank_pairs};
//!
//! let matrix = correlate(&table)?;
//! let top5: Vec<_> = rank_pairs(&matrix).into_iter().take(5).collect();
//! let quality = coverage(&table)?;
//! ```

pub mod corr;
pub mod coverage;
pub mod insights;

// Re-export main types
pub use corr::{CorrelationMatrix, MIN_OVERLAP, correlate};
pub use coverage::{ColumnCoverage, CoverageReport, coverage};
pub use insights::{Direction, FactorPair, Strength, rank_pairs};
