//! Grouped fuel-economy averages.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::corpus::Corpus;
use crate::record::Record;

/// Mean mpg per grouping key. Only keys observed in the corpus are present.
pub type AggregateResult<K> = HashMap<K, f64>;

/// One `(key, average)` row, as handed to the output writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage<K> {
    pub key: K,
    pub average_mpg: f64,
}

/// Averages mpg over every group of records sharing `key_fn(record)`.
pub fn group_average<K, F>(corpus: &Corpus, key_fn: F) -> AggregateResult<K>
where
    K: Eq + Hash,
    F: Fn(&Record) -> K,
{
    let mut totals: HashMap<K, (f64, usize)> = HashMap::new();

    for record in corpus {
        let entry = totals.entry(key_fn(record)).or_insert((0.0, 0));
        entry.0 += record.mpg();
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// Average mpg per model year.
pub fn mpg_by_year(corpus: &Corpus) -> AggregateResult<i32> {
    group_average(corpus, |r| r.year())
}

/// Average mpg per (canonicalized) manufacturer.
pub fn mpg_by_make(corpus: &Corpus) -> AggregateResult<String> {
    group_average(corpus, |r| r.make().to_string())
}

/// Orders an aggregate ascending by key.
pub fn sorted_averages<K: Ord>(result: AggregateResult<K>) -> Vec<GroupAverage<K>> {
    let mut rows: Vec<_> = result
        .into_iter()
        .map(|(key, average_mpg)| GroupAverage { key, average_mpg })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    rows
}
