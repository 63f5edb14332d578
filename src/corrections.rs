//! Manufacturer-name corrections.

use std::collections::HashMap;

/// Misspelled manufacturer tokens found in the dataset, paired with the
/// canonical spelling.
static STANDARD_CORRECTIONS: &[(&str, &str)] = &[
    ("chevroelt", "chevrolet"),
    ("chevy", "chevrolet"),
    ("maxda", "mazda"),
    ("mercedes-benz", "mercedes"),
    ("toyouta", "toyota"),
    ("vokswagen", "volkswagen"),
    ("vw", "volkswagen"),
];

/// Immutable lookup from a misspelled manufacturer token to its canonical form.
///
/// Lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    entries: HashMap<&'static str, &'static str>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CorrectionTable {
    /// The fixed table used for the auto-mpg dataset.
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_CORRECTIONS)
    }

    pub fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: pairs.iter().copied().collect(),
        }
    }

    /// Returns the canonical spelling if `make` is a known misspelling.
    pub fn correction(&self, make: &str) -> Option<&'static str> {
        self.entries.get(make).copied()
    }

    /// Returns the canonical spelling of `make`, or `make` itself when unlisted.
    pub fn canonicalize<'a>(&self, make: &'a str) -> &'a str {
        self.correction(make).unwrap_or(make)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
