//! ISBN range table
//!
//! Hyphenating an ISBN needs the registration-group/registrant ranges
//! published by the International ISBN Agency. This module holds an
//! already-parsed table of rules; reading the agency's XML export is left
//! to the embedding application, which can hand over rules as a JSON list
//! or build them in code.
//!
//! A built-in snapshot covering the largest registration groups is shared
//! read-only by every [`Isbn`](crate::Isbn) that is not given its own table.

use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StdnumError};

/// One row of the range table.
///
/// An ISBN-13 whose digits start with `prefix` (hyphens ignored) and whose
/// next `begin.len()` digits fall inside `[begin, end]` has a registrant
/// element of `length` digits. A length of 0 marks an unassigned range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    /// EAN prefix and registration group, e.g. `978-0`
    pub prefix: String,
    /// Lower bound of the range (inclusive)
    pub begin: String,
    /// Upper bound of the range (inclusive), same width as `begin`
    pub end: String,
    /// Length of the registrant element
    pub length: usize,
}

impl RangeRule {
    pub fn new(prefix: &str, begin: &str, end: &str, length: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            begin: begin.to_string(),
            end: end.to_string(),
            length,
        }
    }

    fn digits_prefix(&self) -> String {
        self.prefix.chars().filter(char::is_ascii_digit).collect()
    }

    fn matches(&self, isbn13: &str) -> bool {
        let prefix = self.digits_prefix();
        let Some(rest) = isbn13.strip_prefix(prefix.as_str()) else {
            return false;
        };
        match rest.get(..self.begin.len()) {
            Some(window) => self.begin.as_str() <= window && window <= self.end.as_str(),
            None => false,
        }
    }

    fn validate(&self) -> Result<()> {
        let prefix = self.digits_prefix();
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !(prefix.starts_with("978") || prefix.starts_with("979")) || prefix.len() < 4 {
            return Err(StdnumError::RangeTable(format!(
                "prefix {:?} is not an EAN prefix plus group",
                self.prefix
            )));
        }
        if self.prefix.chars().any(|c| !(c.is_ascii_digit() || c == '-')) {
            return Err(StdnumError::RangeTable(format!(
                "prefix {:?} contains foreign characters",
                self.prefix
            )));
        }
        if !all_digits(&self.begin) || !all_digits(&self.end) || self.begin.len() != self.end.len()
        {
            return Err(StdnumError::RangeTable(format!(
                "range {}-{} must be two digit strings of equal width",
                self.begin, self.end
            )));
        }
        if self.begin > self.end {
            return Err(StdnumError::RangeTable(format!(
                "range {}-{} is reversed",
                self.begin, self.end
            )));
        }
        if self.length > self.begin.len() || prefix.len() + self.length >= 12 {
            return Err(StdnumError::RangeTable(format!(
                "registrant length {} does not fit prefix {}",
                self.length, self.prefix
            )));
        }
        Ok(())
    }
}

/// Ordered, immutable list of range rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    rules: Vec<RangeRule>,
}

lazy_static! {
    static ref DEFAULT_TABLE: Arc<RangeTable> = Arc::new(RangeTable {
        rules: DEFAULT_RULES
            .iter()
            .map(|(prefix, begin, end, length)| RangeRule::new(prefix, begin, end, *length))
            .collect(),
    });
}

impl RangeTable {
    /// Build a table from parsed rules, rejecting malformed ones
    pub fn new(rules: Vec<RangeRule>) -> Result<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        tracing::debug!("ISBN range table with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Parse a JSON array of rules
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<RangeRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// Load a JSON rule file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading ISBN ranges from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Built-in snapshot, created on first use and shared afterwards
    pub fn shared_default() -> Arc<RangeTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    pub fn rules(&self) -> &[RangeRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule covering a 13-digit ISBN
    pub fn lookup(&self, isbn13: &str) -> Option<&RangeRule> {
        self.rules.iter().find(|rule| rule.matches(isbn13))
    }

    /// Hyphenate a 13-digit ISBN into prefix, group, registrant,
    /// publication and check elements.
    ///
    /// Returns `None` when no rule covers the number or the range is
    /// unassigned.
    pub fn hyphenate(&self, isbn13: &str) -> Option<String> {
        if isbn13.len() != 13 || !isbn13.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let rule = self.lookup(isbn13)?;
        if rule.length == 0 {
            tracing::trace!("ISBN {} falls in an unassigned range", isbn13);
            return None;
        }
        let prefix_len = rule.digits_prefix().len();
        let registrant_end = prefix_len + rule.length;
        Some(format!(
            "{}-{}-{}-{}-{}",
            &isbn13[..3],
            &isbn13[3..prefix_len],
            &isbn13[prefix_len..registrant_end],
            &isbn13[registrant_end..12],
            &isbn13[12..]
        ))
    }
}

/// Snapshot of the agency's ranges for the largest groups
const DEFAULT_RULES: &[(&str, &str, &str, usize)] = &[
    // English language
    ("978-0", "0000000", "1999999", 2),
    ("978-0", "2000000", "2279999", 3),
    ("978-0", "2280000", "2289999", 4),
    ("978-0", "2290000", "6479999", 3),
    ("978-0", "6480000", "6489999", 7),
    ("978-0", "6490000", "6999999", 3),
    ("978-0", "7000000", "8499999", 4),
    ("978-0", "8500000", "8999999", 5),
    ("978-0", "9000000", "9499999", 6),
    ("978-0", "9500000", "9999999", 7),
    ("978-1", "0000000", "0999999", 2),
    ("978-1", "1000000", "3999999", 3),
    ("978-1", "4000000", "5499999", 4),
    ("978-1", "5500000", "8697999", 5),
    ("978-1", "8698000", "9729999", 6),
    ("978-1", "9730000", "9877999", 4),
    ("978-1", "9878000", "9989999", 6),
    ("978-1", "9990000", "9999999", 7),
    // French language
    ("978-2", "0000000", "1999999", 2),
    ("978-2", "2000000", "3499999", 3),
    ("978-2", "3500000", "3999999", 5),
    ("978-2", "4000000", "6999999", 3),
    ("978-2", "7000000", "8399999", 4),
    ("978-2", "8400000", "8999999", 5),
    ("978-2", "9000000", "9499999", 6),
    ("978-2", "9500000", "9999999", 7),
    // German language
    ("978-3", "0000000", "0299999", 2),
    ("978-3", "0300000", "0339999", 3),
    ("978-3", "0340000", "0369999", 4),
    ("978-3", "0370000", "0399999", 5),
    ("978-3", "0400000", "1999999", 2),
    ("978-3", "2000000", "6999999", 3),
    ("978-3", "7000000", "8499999", 4),
    ("978-3", "8500000", "8999999", 5),
    ("978-3", "9000000", "9499999", 6),
    ("978-3", "9500000", "9539999", 7),
    ("978-3", "9540000", "9699999", 5),
    ("978-3", "9700000", "9849999", 7),
    ("978-3", "9850000", "9999999", 5),
    // Japan
    ("978-4", "0000000", "1999999", 2),
    ("978-4", "2000000", "6999999", 3),
    ("978-4", "7000000", "8499999", 4),
    ("978-4", "8500000", "8999999", 5),
    ("978-4", "9000000", "9499999", 6),
    ("978-4", "9500000", "9999999", 7),
    // China
    ("978-7", "0000000", "0999999", 2),
    ("978-7", "1000000", "4999999", 3),
    ("978-7", "5000000", "7999999", 4),
    ("978-7", "8000000", "8999999", 5),
    ("978-7", "9000000", "9999999", 6),
    // France (979)
    ("979-10", "000000", "199999", 2),
    ("979-10", "200000", "699999", 3),
    ("979-10", "700000", "899999", 4),
    ("979-10", "900000", "975999", 5),
    ("979-10", "976000", "999999", 6),
    // Korea (979)
    ("979-11", "000000", "249999", 2),
    ("979-11", "250000", "549999", 3),
    ("979-11", "550000", "849999", 4),
    ("979-11", "850000", "949999", 5),
    ("979-11", "950000", "999999", 6),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_is_well_formed() {
        let table = RangeTable::shared_default();
        assert!(!table.is_empty());
        assert!(RangeTable::new(table.rules().to_vec()).is_ok());
    }

    #[test]
    fn test_shared_default_across_threads() {
        let first = RangeTable::shared_default();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let table = RangeTable::shared_default();
                        (Arc::ptr_eq(&table, &first), table.hyphenate("9780306406157"))
                    })
                })
                .collect();
            for handle in handles {
                let (same_table, hyphenated) = handle.join().unwrap();
                assert!(same_table);
                assert_eq!(hyphenated.as_deref(), Some("978-0-306-40615-7"));
            }
        });
    }

    #[test]
    fn test_hyphenate_defaults() {
        let table = RangeTable::shared_default();
        assert_eq!(
            table.hyphenate("9780306406157").as_deref(),
            Some("978-0-306-40615-7")
        );
        assert_eq!(
            table.hyphenate("9783161484100").as_deref(),
            Some("978-3-16-148410-0")
        );
        assert_eq!(
            table.hyphenate("9791032300824").as_deref(),
            Some("979-10-323-0082-4")
        );
    }

    #[test]
    fn test_unknown_group_is_unhyphenated() {
        let table = RangeTable::shared_default();
        assert_eq!(table.hyphenate("9789995701234"), None);
        assert_eq!(table.hyphenate("978030640615"), None);
    }

    #[test]
    fn test_unassigned_range() {
        let table = RangeTable::new(vec![RangeRule::new("978-0", "0000000", "9999999", 0)]).unwrap();
        assert!(table.lookup("9780306406157").is_some());
        assert_eq!(table.hyphenate("9780306406157"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        let table = RangeTable::new(vec![
            RangeRule::new("978-0", "3000000", "3999999", 4),
            RangeRule::new("978-0", "0000000", "9999999", 2),
        ])
        .unwrap();
        assert_eq!(
            table.hyphenate("9780306406157").as_deref(),
            Some("978-0-3064-0615-7")
        );
    }

    #[test]
    fn test_rejects_bad_rules() {
        let reversed = RangeRule::new("978-0", "5000000", "4000000", 2);
        assert!(matches!(
            RangeTable::new(vec![reversed]),
            Err(StdnumError::RangeTable(_))
        ));
        let not_isbn = RangeRule::new("977-0", "0000000", "1999999", 2);
        assert!(RangeTable::new(vec![not_isbn]).is_err());
        let uneven = RangeRule::new("978-0", "00000", "1999999", 2);
        assert!(RangeTable::new(vec![uneven]).is_err());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"prefix": "978-0", "begin": "0000000", "end": "9999999", "length": 3}}]"#
        )
        .unwrap();
        let table = RangeTable::load(file.path()).unwrap();
        assert_eq!(table.rules().len(), 1);
        assert_eq!(
            table.hyphenate("9780306406157").as_deref(),
            Some("978-0-306-40615-7")
        );
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            RangeTable::from_json("{not json"),
            Err(StdnumError::RangeTable(_))
        ));
    }
}
