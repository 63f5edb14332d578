use crate::error::Result;

/// Supplies the raw, tab-delimited dataset when no local copy exists.
pub trait DatasetSource {
    fn fetch_raw(&self) -> Result<String>;
}
