//! Foreign function interface
//!
//! Flat functions over the default [`Registry`] for Swift/Kotlin callers,
//! exported through UniFFI when the `uniffi` feature is enabled.

use crate::error::ValidationError;
use crate::number::NumberKind;
use crate::registry::{RecognizedNumber, Registry};

/// Every standard number the default registry finds in `text`
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recognize_ffi(text: String) -> Vec<RecognizedNumber> {
    Registry::default().recognize(&text)
}

/// Validate `text` as one family, named by tag
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn check_ffi(family: String, text: String) -> Result<RecognizedNumber, ValidationError> {
    let registry = Registry::default();
    let id = registry.check(family.parse()?, &text)?;
    RecognizedNumber::from_identifier(&id).ok_or(ValidationError::NoCandidateFound)
}

/// Tags of all supported families
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn supported_families_ffi() -> Vec<String> {
    NumberKind::all()
        .iter()
        .map(|kind| kind.tag().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_ffi() {
        let found = recognize_ffi("DOI http://dx.doi.org/10.1000/182".to_string());
        let doi = found
            .iter()
            .find(|n| n.kind == NumberKind::Doi)
            .unwrap();
        assert_eq!(doi.canonical, "10.1000/182");
    }

    #[test]
    fn test_check_ffi() {
        let issn = check_ffi("issn".to_string(), "0317-8471".to_string()).unwrap();
        assert_eq!(issn.formatted.as_deref(), Some("0317-8471"));
        assert_eq!(
            check_ffi("upn".to_string(), "1".to_string()).unwrap_err(),
            ValidationError::UnknownFamily("upn".to_string())
        );
        assert!(matches!(
            check_ffi("ean".to_string(), "4006381333932".to_string()),
            Err(ValidationError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_supported_families() {
        let families = supported_families_ffi();
        assert_eq!(families.len(), 17);
        assert!(families.contains(&"sici".to_string()));
    }
}
