//! Error types for impress-stdnum

use thiserror::Error;

/// Result type alias for operations that load configuration or tables
pub type Result<T> = std::result::Result<T, StdnumError>;

/// Why a candidate failed to become a valid standard number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum ValidationError {
    /// The recognition grammar matched nothing in the input
    #[error("No candidate found")]
    NoCandidateFound,

    /// Candidate found, but its check symbol disagrees with the computed one
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },

    /// Wrong number of symbols for the family (or for an IBAN's country)
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: String, found: usize },

    /// Registry lookup failed
    #[error("Unknown standard number family: {0}")]
    UnknownFamily(String),

    /// A character outside the family's alphabet survived recognition
    #[error("Malformed character {character:?} at position {position}")]
    MalformedCharacter { character: char, position: usize },
}

impl ValidationError {
    pub(crate) fn length(expected: impl Into<String>, found: usize) -> Self {
        ValidationError::LengthMismatch {
            expected: expected.into(),
            found,
        }
    }

    pub(crate) fn checksum(expected: impl ToString, found: impl ToString) -> Self {
        ValidationError::ChecksumMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn malformed(character: char, position: usize) -> Self {
        ValidationError::MalformedCharacter {
            character,
            position,
        }
    }
}

/// Main error type for configuration and table loading
#[derive(Error, Debug)]
pub enum StdnumError {
    /// Validation failure bubbling out of a strict operation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO failure while reading a config or range file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// ISBN range table could not be parsed or contains a bad rule
    #[error("Range table error: {0}")]
    RangeTable(String),
}

impl From<toml::de::Error> for StdnumError {
    fn from(err: toml::de::Error) -> Self {
        StdnumError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for StdnumError {
    fn from(err: serde_json::Error) -> Self {
        StdnumError::RangeTable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::NoCandidateFound.to_string(), "No candidate found");
        assert_eq!(
            ValidationError::checksum('2', '1').to_string(),
            "Checksum mismatch: expected 2, found 1"
        );
        assert_eq!(
            ValidationError::malformed('?', 3).to_string(),
            "Malformed character '?' at position 3"
        );
    }

    #[test]
    fn test_validation_error_converts() {
        let err: StdnumError = ValidationError::UnknownFamily("foo".into()).into();
        assert!(matches!(err, StdnumError::Validation(_)));
        assert!(err.to_string().contains("foo"));
    }
}
