//! A single normalized vehicle entry.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// One vehicle from the dataset: manufacturer, model, model year and fuel economy.
///
/// Equality, ordering and hashing all work on the `(make, model, year, mpg)`
/// tuple. `mpg` is ordered with [`f64::total_cmp`] and hashed by bit pattern,
/// so the three stay consistent for every value a `Record` can hold.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    #[serde(rename = "Make")]
    make: String,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "MPG")]
    mpg: f64,
}

impl Record {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, mpg: f64) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            // -0.0 and 0.0 are the same fuel economy
            mpg: if mpg == 0.0 { 0.0 } else { mpg },
        }
    }

    /// Builds a record from untyped text fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] if `year` is not an integer or `mpg` is not a number.
    pub fn coerce(make: &str, model: &str, year: &str, mpg: &str) -> Result<Self> {
        let year_value = year
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::value("year", year))?;
        let mpg_value = mpg
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::value("mpg", mpg))?;
        Ok(Self::new(make, model, year_value, mpg_value))
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn mpg(&self) -> f64 {
        self.mpg
    }

    /// Equality against a value of unknown type.
    ///
    /// Returns `None` when `other` is not a `Record`.
    pub fn eq_any(&self, other: &dyn Any) -> Option<bool> {
        other.downcast_ref::<Record>().map(|r| self == r)
    }

    /// Ordering against a value of unknown type.
    ///
    /// Returns `None` when `other` is not a `Record`.
    pub fn partial_cmp_any(&self, other: &dyn Any) -> Option<Ordering> {
        other.downcast_ref::<Record>().map(|r| self.cmp(r))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.make
            .cmp(&other.make)
            .then_with(|| self.model.cmp(&other.model))
            .then_with(|| self.year.cmp(&other.year))
            .then_with(|| self.mpg.total_cmp(&other.mpg))
    }
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.make.hash(state);
        self.model.hash(state);
        self.year.hash(state);
        self.mpg.to_bits().hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the fractional part on whole numbers (20.0, not 20)
        write!(
            f,
            "Record('{}', '{}', {}, {:?})",
            self.make, self.model, self.year, self.mpg
        )
    }
}

impl FromStr for Record {
    type Err = Error;

    /// Parses the text produced by `Display` back into a record.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::parse(format!("not a record: {s}"));

        let body = s
            .trim()
            .strip_prefix("Record('")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        // make is a single token, so the first quote-comma-quote ends it
        let (make, rest) = body.split_once("', '").ok_or_else(malformed)?;
        let mut tail = rest.rsplitn(3, ", ");
        let mpg = tail.next().ok_or_else(malformed)?;
        let year = tail.next().ok_or_else(malformed)?;
        let model = tail
            .next()
            .and_then(|m| m.strip_suffix('\''))
            .ok_or_else(malformed)?;

        Self::coerce(make, model, year, mpg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(record: &Record) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_coerce_converts_types() {
        let car = Record::coerce("Dodge", "Dart", "1990", "20").unwrap();
        assert_eq!(car.make(), "Dodge");
        assert_eq!(car.model(), "Dart");
        assert_eq!(car.year(), 1990);
        assert_eq!(car.mpg(), 20.0);
    }

    #[test]
    fn test_coerce_rejects_non_numeric_fields() {
        let err = Record::coerce("ford", "pinto", "seventy", "25").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let err = Record::coerce("ford", "pinto", "71", "?").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().contains("mpg"));
    }

    #[test]
    fn test_display() {
        let car = Record::new("Dodge", "Dart", 1990, 20.0);
        assert_eq!(car.to_string(), "Record('Dodge', 'Dart', 1990, 20.0)");

        let car = Record::new("amc", "", 70, 18.5);
        assert_eq!(car.to_string(), "Record('amc', '', 70, 18.5)");
    }

    #[test]
    fn test_eq_and_hash() {
        let a = Record::new("Dodge", "Dart", 1990, 20.0);
        let b = Record::new("Dodge", "Dart", 1990, 20.0);
        let c = Record::new("Toyota", "Camry", 1992, 25.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<Record> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_negative_zero_mpg_equals_zero() {
        let a = Record::coerce("Dodge", "Dart", "70", "-0").unwrap();
        let b = Record::new("Dodge", "Dart", 70, 0.0);
        let c = Record::new("Dodge", "Dart", 70, -0.0);

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&c), hash_of(&b));
        assert_eq!(a.to_string(), "Record('Dodge', 'Dart', 70, 0.0)");
    }

    #[test]
    fn test_ordering() {
        let car = Record::new("Dodge", "Dart", 1990, 20.0);
        let lower_make = Record::new("AMC", "Rebel", 1995, 25.0);
        let lower_mpg = Record::new("Dodge", "Dart", 1990, 19.0);
        let higher_make = Record::new("Ford", "Torino", 1990, 20.0);
        let higher_mpg = Record::new("Dodge", "Dart", 1990, 22.0);

        assert!(lower_make < car);
        assert!(lower_mpg < car);
        assert!(car < higher_make);
        assert!(car < higher_mpg);
        assert!(!(car > higher_mpg));
    }

    #[test]
    fn test_ordering_is_transitive() {
        let a = Record::new("amc", "gremlin", 70, 21.0);
        let b = Record::new("amc", "hornet", 70, 18.0);
        let c = Record::new("amc", "hornet", 71, 15.0);
        assert!(a < b && b < c);
        assert!(a < c);
    }

    #[test]
    fn test_comparison_with_other_type_is_not_comparable() {
        let car = Record::new("ford", "torino", 70, 17.0);
        assert_eq!(car.eq_any(&"ford torino"), None);
        assert_eq!(car.partial_cmp_any(&17.0_f64), None);

        let same = car.clone();
        assert_eq!(car.eq_any(&same), Some(true));
        assert_eq!(car.partial_cmp_any(&same), Some(Ordering::Equal));
    }

    #[test]
    fn test_display_round_trip() {
        let cars = [
            Record::new("chevrolet", "chevelle malibu", 70, 18.0),
            Record::new("ford", "", 71, 25.5),
            Record::new("amc", "ambassador dpl", 70, 15.0),
        ];
        for car in cars {
            let parsed: Record = car.to_string().parse().unwrap();
            assert_eq!(parsed, car);
        }
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        let err = "AutoCar('a', 'b', 1, 2.0)".parse::<Record>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
