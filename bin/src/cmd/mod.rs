//! CLI subcommand modules.
//!
//! This module contains the implementations for all marasi CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod datasets;
pub(crate) mod fetch;
