//! Tagged union over every standard number family
//!
//! [`Identifier`] lets callers hold "some standard number" without boxing
//! a trait object. It implements [`StandardNumber`] by forwarding to the
//! family it wraps.

use crate::error::ValidationError;
use crate::families::*;
use crate::number::{NumberKind, StandardNumber};

macro_rules! identifier_union {
    ($($family:ident),* $(,)?) => {
        /// Any standard number, tagged with its family
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Identifier {
            $($family($family),)*
        }

        impl Identifier {
            /// Empty number of the given family
            pub fn new(kind: NumberKind) -> Self {
                match kind {
                    $(NumberKind::$family => Identifier::$family($family::default()),)*
                }
            }
        }

        $(
            impl From<$family> for Identifier {
                fn from(number: $family) -> Self {
                    Identifier::$family(number)
                }
            }
        )*

        impl StandardNumber for Identifier {
            fn kind(&self) -> NumberKind {
                match self {
                    $(Identifier::$family(n) => n.kind(),)*
                }
            }

            fn set(&mut self, value: &str) -> &mut Self {
                match self {
                    $(Identifier::$family(n) => { n.set(value); })*
                }
                self
            }

            fn create_checksum(&mut self, create: bool) -> &mut Self {
                match self {
                    $(Identifier::$family(n) => { n.create_checksum(create); })*
                }
                self
            }

            fn normalize(&mut self) -> &mut Self {
                match self {
                    $(Identifier::$family(n) => { n.normalize(); })*
                }
                self
            }

            fn verify(&mut self) -> Result<&mut Self, ValidationError> {
                match self {
                    $(Identifier::$family(n) => { n.verify()?; })*
                }
                Ok(self)
            }

            fn canonical_value(&self) -> Option<&str> {
                match self {
                    $(Identifier::$family(n) => n.canonical_value(),)*
                }
            }

            fn format(&self) -> Option<String> {
                match self {
                    $(Identifier::$family(n) => n.format(),)*
                }
            }

            fn typed_variants(&self) -> Vec<String> {
                match self {
                    $(Identifier::$family(n) => n.typed_variants(),)*
                }
            }

            fn reset(&mut self) -> &mut Self {
                match self {
                    $(Identifier::$family(n) => { n.reset(); })*
                }
                self
            }
        }
    };
}

identifier_union!(
    Ark, Doi, Ean, Gtin, Iban, Isan, Isbn, Ismn, Isni, Issn, Istc, Iswc, Orcid, Ppn, Sici, Upc,
    Zdb,
);

impl Identifier {
    /// The wrapped ISBN, for ISBN-only settings such as `prefer_ean`
    pub fn as_isbn_mut(&mut self) -> Option<&mut Isbn> {
        match self {
            Identifier::Isbn(isbn) => Some(isbn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_kind() {
        for kind in NumberKind::all() {
            assert_eq!(Identifier::new(*kind).kind(), *kind);
        }
    }

    #[test]
    fn test_dispatch() {
        let mut id = Identifier::new(NumberKind::Issn);
        id.set("ISSN 0317-8471").normalize();
        assert_eq!(id.canonical_value(), Some("03178471"));
        assert!(id.is_valid());
        assert_eq!(id.format().as_deref(), Some("0317-8471"));
        id.reset();
        assert_eq!(id.canonical_value(), None);
    }

    #[test]
    fn test_verify_error_passes_through() {
        let mut id = Identifier::new(NumberKind::Ean);
        let err = id.set("4006381333932").normalize().verify().unwrap_err();
        assert_eq!(err, ValidationError::checksum('1', '2'));
    }

    #[test]
    fn test_isbn_settings() {
        let mut id = Identifier::new(NumberKind::Isbn);
        id.as_isbn_mut().unwrap().prefer_ean(true);
        id.set("0-306-40615-2").normalize();
        assert!(id.is_valid());
        assert_eq!(id.canonical_value(), Some("9780306406157"));
        assert!(Identifier::new(NumberKind::Doi).as_isbn_mut().is_none());
    }
}
