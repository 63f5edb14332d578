//! Tab expansion for the raw dataset.
//!
//! The raw file separates the car name from the numeric columns with a tab.
//! Cleaning replaces every tab with spaces up to the next tab stop so the
//! whole line can be split on runs of spaces.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_TAB_SIZE: usize = 8;

/// Expands each `\t` in `line` to spaces, padding to the next multiple of
/// `tab_size`. The column resets after `\n` and `\r`.
pub fn expand_tabs(line: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;

    for ch in line.chars() {
        match ch {
            '\t' => {
                if tab_size > 0 {
                    let pad = tab_size - column % tab_size;
                    out.extend(std::iter::repeat_n(' ', pad));
                    column += pad;
                }
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
pub struct TextCleaner {
    tab_size: usize,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
        }
    }

    pub fn with_tab_size(tab_size: usize) -> Self {
        Self { tab_size }
    }

    pub fn clean_line(&self, line: &str) -> String {
        expand_tabs(line, self.tab_size)
    }

    /// Cleans every line, keeping line terminators exactly as given.
    pub fn clean<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.clean_line(line.as_ref()))
            .collect()
    }

    /// Streams `raw` into `cleaned`, expanding tabs line by line.
    ///
    /// Output goes to a sibling `.part` file that is renamed into place once
    /// fully flushed. On failure the partial file is removed, so an existing
    /// `cleaned` path always holds a complete cache. Returns the number of
    /// lines written.
    #[tracing::instrument(skip_all, fields(raw = %raw.display(), cleaned = %cleaned.display()))]
    pub fn clean_file(&self, raw: &Path, cleaned: &Path) -> Result<usize> {
        info!("Cleaning raw dataset");
        let part = part_path(cleaned);

        match self.write_cleaned(raw, &part) {
            Ok(lines) => {
                fs::rename(&part, cleaned).map_err(|e| {
                    Error::io(format!("renaming {} into place", part.display()), e)
                })?;
                info!(lines, "Finished cleaning dataset");
                Ok(lines)
            }
            Err(e) => {
                remove_partial(&part);
                Err(e)
            }
        }
    }

    fn write_cleaned(&self, raw: &Path, out: &Path) -> Result<usize> {
        let input = File::open(raw)
            .map_err(|e| Error::io(format!("opening {}", raw.display()), e))?;
        let output = File::create(out)
            .map_err(|e| Error::io(format!("creating {}", out.display()), e))?;

        let mut reader = BufReader::new(input);
        let mut writer = BufWriter::new(output);
        let mut line = String::new();
        let mut count = 0usize;

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| Error::io(format!("reading {}", raw.display()), e))?;
            if read == 0 {
                break;
            }
            writer
                .write_all(self.clean_line(&line).as_bytes())
                .map_err(|e| Error::io(format!("writing {}", out.display()), e))?;
            count += 1;
        }

        writer
            .flush()
            .map_err(|e| Error::io(format!("flushing {}", out.display()), e))?;
        debug!(lines = count, "Cleaned lines written");
        Ok(count)
    }
}

pub(crate) fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Deletes a leftover `.part` file. A file that was never created is fine;
/// any other failure is logged and otherwise ignored so the original error
/// reaches the caller.
pub(crate) fn remove_partial(part: &Path) {
    match fs::remove_file(part) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            warn!(error = %e, path = %part.display(), "Failed to remove partial cache");
        }
        _ => {}
    }
}
