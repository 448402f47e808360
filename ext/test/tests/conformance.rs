//! Conformance tests that run the YAML fixture corpus.
//!
//! Run with: cargo test -p crit-test --test conformance

use std::fs;
use std::path::{Path, PathBuf};

use crit_test::fixture::Fixture;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn run_fixture_file(file: &str) {
    let path = fixtures_dir().join(file);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

    let fixtures = Fixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());

    for fixture in fixtures {
        println!("running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn baseline() {
    run_fixture_file("01_baseline.yaml");
}

#[test]
fn identity() {
    run_fixture_file("02_identity.yaml");
}

#[test]
fn ranges() {
    run_fixture_file("03_ranges.yaml");
}

#[test]
fn data_templates() {
    run_fixture_file("04_data.yaml");
}

#[test]
fn enchantments_and_potions() {
    run_fixture_file("05_enchantments.yaml");
}

#[test]
fn authoring_errors() {
    run_fixture_file("06_errors.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let known = [
        "01_baseline.yaml",
        "02_identity.yaml",
        "03_ranges.yaml",
        "04_data.yaml",
        "05_enchantments.yaml",
        "06_errors.yaml",
    ];

    let mut on_disk: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .map(|entry| entry.expect("dir entry").file_name().into_string().unwrap())
        .collect();
    on_disk.sort();

    assert_eq!(on_disk, known, "fixture files and tests are out of sync");
}
