//! Ingestion and aggregation of the UCI auto-mpg fuel-economy dataset.
//!
//! [`Corpus::load`] fetches the raw file if needed, expands its tabs into a
//! cleaned cache, and parses every line into a [`Record`] with manufacturer
//! names canonicalized. [`aggregate`] computes per-year and per-make averages.

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod corpus;
pub mod corrections;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;

pub use corpus::{CacheFiles, Corpus, SortOrder};
pub use error::{Error, ErrorKind, Result};
pub use record::Record;
