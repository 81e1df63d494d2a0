//! Registry and configuration integration tests

mod common;

use std::io::Write;
use std::sync::Arc;

use common::fixtures::{fixture_path, load_fixture};
use impress_stdnum::{
    NumberKind, RangeTable, Registry, StandardNumber, StdnumConfig, StdnumError, ValidationError,
};
use tempfile::NamedTempFile;

#[test]
fn test_scan_sample_lines() {
    let registry = Registry::default();
    for line in load_fixture("scan_sample.txt").lines() {
        let (tag, text) = line.split_once(" | ").unwrap();
        let kind: NumberKind = tag.parse().unwrap();
        let found = registry.recognize(text);
        assert!(
            found.iter().any(|n| n.kind == kind),
            "{} not recognized in {:?}: {:?}",
            kind,
            text,
            found
        );
    }
}

#[test]
fn test_lookup_fans_in_variants() {
    let registry = Registry::from_tags(["issn", "sici"]).unwrap();
    let variants = registry.lookup("SICI 0002-8231(199412)45:10<737:TIODIM>2.3.TX;2-M");
    assert_eq!(
        variants,
        vec![
            "ISSN 00028231",
            "ISSN 0002-8231",
            "SICI 0002-8231(199412)45:10<737:TIODIM>2.3.TX;2-M",
        ]
    );
}

#[test]
fn test_unmatched_text_is_empty_not_error() {
    let registry = Registry::default();
    assert!(registry.lookup("The quick brown fox").is_empty());
    assert!(registry.recognize("").is_empty());
}

#[test]
fn test_unknown_tag() {
    assert_eq!(
        Registry::from_tags(["isbn", "upn"]).unwrap_err(),
        ValidationError::UnknownFamily("upn".to_string())
    );
    assert!(Registry::default().create_by_tag("Orcid").is_ok());
}

#[test]
fn test_ranges_from_fixture() {
    let table = RangeTable::load(&fixture_path("isbn_ranges.json")).unwrap();
    let registry = Registry::from_tags(["isbn"])
        .unwrap()
        .with_ranges(Arc::new(table));

    let id = registry.check(NumberKind::Isbn, "0306406152").unwrap();
    assert_eq!(id.format().as_deref(), Some("0-306-40615-2"));

    let err = registry.check(NumberKind::Isbn, "3161484100").unwrap_err();
    assert!(matches!(err, ValidationError::ChecksumMismatch { .. }));
    // unassigned range in the fixture leaves the digits alone
    let id = registry.check(NumberKind::Isbn, "316148410X").unwrap();
    assert_eq!(id.format().as_deref(), Some("316148410X"));
}

#[test]
fn test_registry_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "families = [\"isbn\", \"ean\"]\nprefer_ean = true\nisbn_ranges = {:?}",
        fixture_path("isbn_ranges.json").display().to_string()
    )
    .unwrap();
    file.flush().unwrap();

    let config = StdnumConfig::load(file.path()).unwrap();
    let registry = Registry::from_config(&config).unwrap();
    assert_eq!(registry.kinds(), &[NumberKind::Isbn, NumberKind::Ean]);

    let found = registry.recognize("0-306-40615-2");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].canonical, "9780306406157");
    assert_eq!(found[0].formatted.as_deref(), Some("978-0-306-40615-7"));
}

#[test]
fn test_config_with_missing_ranges_file() {
    let config = StdnumConfig {
        isbn_ranges: Some("/nonexistent/ranges.json".into()),
        ..StdnumConfig::default()
    };
    assert!(matches!(
        Registry::from_config(&config),
        Err(StdnumError::Io(_))
    ));
}

#[test]
fn test_create_mode_registry() {
    let registry = Registry::default().with_create_checksum(true);
    let id = registry.check(NumberKind::Iban, "GB00 WEST 1234 5698 7654 32").unwrap();
    assert_eq!(id.canonical_value(), Some("GB82WEST12345698765432"));
    let id = registry.check(NumberKind::Zdb, "2025443").unwrap();
    assert_eq!(id.format().as_deref(), Some("2025443-X"));
}
