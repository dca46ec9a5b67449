//! Open-data API client and dataset registry for Marasi.
//!
//! This crate is the data-access collaborator of the analytics pipeline:
//! it knows which datasets exist, which document fields carry their
//! periods, values and group keys, and how to fetch their raw rows from
//! the hosted open-data API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marasi_pulse::{PulseClient, find_dataset};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PulseClient::from_env()?;
//!
//!     let info = find_dataset("rentals").unwrap();
//!     let raw = client.dataset(&info).await?;
//!
//!     println!("{} rows of {}", raw.len(), info.description);
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `MARASI_DATA_URL` (and optionally `MARASI_API_KEY`) in your
//! environment or `.env` file:
//!
//! ```bash
//! MARASI_DATA_URL=https://data.example.com/v1
//! ```

mod client;
mod error;
mod registry;

pub use client::PulseClient;
pub use error::PulseError;
pub use registry::{DatasetInfo, available_datasets, find_dataset};

/// Result type for open-data API operations.
pub type Result<T> = std::result::Result<T, PulseError>;
