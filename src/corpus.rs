//! The in-memory collection of records and its cache-aware loader.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::cleaner::{TextCleaner, part_path, remove_partial};
use crate::config::{CLEAN_FILE_NAME, RAW_FILE_NAME};
use crate::error::{Error, Result};
use crate::fetch::DatasetSource;
use crate::parser::FieldParser;
use crate::record::Record;

/// Locations of the two cache files: the raw download and its cleaned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFiles {
    pub raw: PathBuf,
    pub cleaned: PathBuf,
}

impl CacheFiles {
    pub fn new(raw: impl Into<PathBuf>, cleaned: impl Into<PathBuf>) -> Self {
        Self {
            raw: raw.into(),
            cleaned: cleaned.into(),
        }
    }

    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(RAW_FILE_NAME), dir.join(CLEAN_FILE_NAME))
    }
}

/// Ordering applied by [`Corpus::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// make, model, year, mpg
    #[default]
    Default,
    /// year, make, model, mpg
    Year,
    /// mpg, make, model, year
    Mpg,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "year" => Ok(Self::Year),
            "mpg" => Ok(Self::Mpg),
            other => Err(format!(
                "unknown sort order '{other}' (expected default, year or mpg)"
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Year => "year",
            Self::Mpg => "mpg",
        };
        f.write_str(name)
    }
}

/// Records in file order until one of the sort methods is called.
///
/// Sorting takes `&mut self`, so it cannot happen while an iterator from
/// [`Corpus::iter`] is alive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads the dataset, producing missing cache files on the way.
    ///
    /// An existing cleaned cache is read directly. Otherwise the raw cache is
    /// cleaned first, and if that is also missing it is fetched from `source`
    /// and written to disk. Loading from unchanged caches always yields the
    /// same corpus.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed line ([`Error::Parse`] or [`Error::Value`],
    /// tagged with its 1-based line number) or when neither cache can be read
    /// or produced. No partial corpus is returned.
    #[tracing::instrument(
        skip_all,
        fields(raw = %cache.raw.display(), cleaned = %cache.cleaned.display())
    )]
    pub fn load<S>(cache: &CacheFiles, source: &S, parser: &FieldParser) -> Result<Self>
    where
        S: DatasetSource + ?Sized,
    {
        info!("Starting to load data");

        if !cache.cleaned.exists() {
            if !cache.raw.exists() {
                info!("Raw dataset not cached, fetching");
                let text = source.fetch_raw()?;
                write_cache(&cache.raw, &text)?;
                info!(bytes = text.len(), "Raw dataset cached");
            }
            TextCleaner::new().clean_file(&cache.raw, &cache.cleaned)?;
        } else {
            debug!("Using cleaned cache");
        }

        let file = File::open(&cache.cleaned)
            .map_err(|e| Error::io(format!("opening {}", cache.cleaned.display()), e))?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .map_err(|e| Error::io(format!("reading {}", cache.cleaned.display()), e))?;
            let record = parser.parse(&line).map_err(|e| e.at_line(index + 1))?;
            records.push(record);
        }

        info!(records = records.len(), "Finished loading data");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// A fresh iterator over the current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn sort(&mut self, order: SortOrder) {
        debug!(%order, "Sorting corpus");
        match order {
            SortOrder::Default => self.sort_by_default(),
            SortOrder::Year => self.sort_by_year(),
            SortOrder::Mpg => self.sort_by_fuel_economy(),
        }
    }

    pub fn sort_by_default(&mut self) {
        self.records.sort();
    }

    pub fn sort_by_year(&mut self) {
        self.records.sort_by(|a, b| {
            a.year()
                .cmp(&b.year())
                .then_with(|| a.make().cmp(b.make()))
                .then_with(|| a.model().cmp(b.model()))
                .then_with(|| a.mpg().total_cmp(&b.mpg()))
        });
    }

    pub fn sort_by_fuel_economy(&mut self) {
        self.records.sort_by(|a, b| {
            a.mpg()
                .total_cmp(&b.mpg())
                .then_with(|| a.make().cmp(b.make()))
                .then_with(|| a.model().cmp(b.model()))
                .then_with(|| a.year().cmp(&b.year()))
        });
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Writes `contents` to `path` through a `.part` file renamed into place.
fn write_cache(path: &Path, contents: &str) -> Result<()> {
    let part = part_path(path);
    let written = fs::write(&part, contents)
        .map_err(|e| Error::io(format!("writing {}", part.display()), e))
        .and_then(|()| {
            fs::rename(&part, path)
                .map_err(|e| Error::io(format!("renaming {}", part.display()), e))
        });
    if written.is_err() {
        remove_partial(&part);
    }
    written
}
