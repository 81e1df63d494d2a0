//! impress-stdnum: standard number recognition for the impress suite
//!
//! Recognizes, normalizes, checksum-validates and formats identifiers
//! found in bibliographic and commercial records:
//! - Book and music numbers (ISBN-10/13, ISMN)
//! - Serials (ISSN, SICI, ZDB)
//! - Names and works (ISNI, ORCID, ISWC, ISTC, ISAN)
//! - Trade items and accounts (EAN, UPC, GTIN, IBAN)
//! - Catalogue and persistent identifiers (PPN, ARK, DOI)
//!
//! Every family implements [`StandardNumber`]; [`Registry`] runs a set of
//! families over free text and collects what validates.
//!
//! ```
//! use impress_stdnum::{Isbn, StandardNumber};
//!
//! let mut isbn = Isbn::default();
//! isbn.set("ISBN 0-306-40615-2").normalize();
//! assert!(isbn.is_valid());
//! assert_eq!(isbn.isbn13(), Some("9780306406157"));
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod families;
pub mod ffi;
pub mod identifier;
pub mod isbn_range;
pub mod number;
pub mod registry;

pub use config::StdnumConfig;
pub use error::{Result, StdnumError, ValidationError};
pub use families::*;
pub use ffi::*;
pub use identifier::Identifier;
pub use isbn_range::{RangeRule, RangeTable};
pub use number::{NumberKind, NumberState, StandardNumber};
pub use registry::{RecognizedNumber, Registry};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
