use std::fs;

use autompg::aggregate::{mpg_by_make, mpg_by_year, sorted_averages};
use autompg::fetch::DatasetSource;
use autompg::output::{write_averages, write_records};
use autompg::parser::FieldParser;
use autompg::{CacheFiles, Corpus, ErrorKind, Record, Result, SortOrder};
use tempfile::TempDir;

const SAMPLE: &str = include_str!("fixtures/auto-mpg.sample.data");

struct FixtureSource;

impl DatasetSource for FixtureSource {
    fn fetch_raw(&self) -> Result<String> {
        Ok(SAMPLE.to_string())
    }
}

struct UnreachableSource;

impl DatasetSource for UnreachableSource {
    fn fetch_raw(&self) -> Result<String> {
        panic!("dataset should have been read from the cache");
    }
}

fn load_fixture(dir: &TempDir) -> Corpus {
    let cache = CacheFiles::in_dir(dir.path());
    Corpus::load(&cache, &FixtureSource, &FieldParser::default()).expect("Failed to load fixture")
}

#[test]
fn test_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let corpus = load_fixture(&dir);

    assert_eq!(corpus.len(), 8);
    assert_eq!(
        corpus.records()[0],
        Record::new("chevrolet", "chevelle malibu", 70, 18.0)
    );
    assert_eq!(corpus.records()[2].make(), "chevrolet");
    assert_eq!(corpus.records()[5].make(), "volkswagen");
    assert_eq!(corpus.records()[6].make(), "toyota");
    assert_eq!(corpus.records()[6].model(), "corona mark ii");
}

#[test]
fn test_mpg_by_year() {
    let dir = TempDir::new().unwrap();
    let corpus = load_fixture(&dir);

    let by_year = mpg_by_year(&corpus);

    assert_eq!(by_year.len(), 3);
    assert_eq!(by_year[&70], 18.6);
    assert_eq!(by_year[&71], 26.0);
    assert_eq!(by_year[&73], 29.0);
}

#[test]
fn test_mpg_by_make_uses_canonical_names() {
    let dir = TempDir::new().unwrap();
    let corpus = load_fixture(&dir);

    let rows = sorted_averages(mpg_by_make(&corpus));
    let makes: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();

    assert_eq!(
        makes,
        vec!["buick", "chevrolet", "fiat", "ford", "toyota", "volkswagen"]
    );
    assert_eq!(rows[1].average_mpg, 14.0);
    assert_eq!(rows[5].average_mpg, 26.5);
}

#[test]
fn test_second_load_reads_cleaned_cache() {
    let dir = TempDir::new().unwrap();
    let first = load_fixture(&dir);

    let cache = CacheFiles::in_dir(dir.path());
    fs::remove_file(&cache.raw).unwrap();
    let second = Corpus::load(&cache, &UnreachableSource, &FieldParser::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_line_fails_load() {
    let dir = TempDir::new().unwrap();
    let cache = CacheFiles::in_dir(dir.path());
    let mut raw = SAMPLE.to_string();
    raw.push_str("31.0   4   76.00      52.00      1649.      16.5   74  3\n");
    fs::write(&cache.raw, raw).unwrap();

    let err = Corpus::load(&cache, &UnreachableSource, &FieldParser::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("line 9"));
}

#[test]
fn test_sorted_csv_output() {
    let dir = TempDir::new().unwrap();
    let mut corpus = load_fixture(&dir);
    corpus.sort(SortOrder::Mpg);

    let mut out = Vec::new();
    write_records(&mut out, &corpus).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "Make,Model,Year,MPG");
    assert_eq!(lines[1], "chevrolet,c20,70,10.0");
    assert_eq!(lines[8], "fiat,128,73,29.0");
}

#[test]
fn test_year_averages_csv_output() {
    let dir = TempDir::new().unwrap();
    let corpus = load_fixture(&dir);

    let mut out = Vec::new();
    write_averages(&mut out, "Year", &sorted_averages(mpg_by_year(&corpus))).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Year,Average MPG\n70,18.6\n71,26.0\n73,29.0\n"
    );
}
