use super::client::DatasetSource;
use crate::error::Result;

pub const DEFAULT_SOURCE_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/auto-mpg/auto-mpg.data";

/// Downloads the dataset with a blocking HTTP GET.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }
}

impl DatasetSource for HttpSource {
    fn fetch_raw(&self) -> Result<String> {
        super::fetch_text(&self.client, &self.url)
    }
}
