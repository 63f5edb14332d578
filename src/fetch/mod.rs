//! Acquisition of the raw dataset.

mod basic;
mod client;

pub use basic::{DEFAULT_SOURCE_URL, HttpSource};
pub use client::DatasetSource;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// GETs `url` and returns the body as text.
///
/// # Errors
///
/// Returns [`Error::Fetch`] on transport failure or a non-success status.
#[tracing::instrument(skip(client))]
pub fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    info!("Requesting dataset");

    let resp = client
        .get(url)
        .send()
        .map_err(|e| Error::fetch(url, e))?;
    let status = resp.status();
    info!(status = status.as_u16(), "Dataset request completed");

    let resp = resp.error_for_status().map_err(|e| {
        warn!(status = status.as_u16(), "Dataset request was not successful");
        Error::fetch(url, e)
    })?;

    resp.text().map_err(|e| Error::fetch(url, e))
}
