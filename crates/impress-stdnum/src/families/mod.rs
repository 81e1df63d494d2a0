//! Standard number families, one module each

pub mod ark;
pub mod doi;
pub mod ean;
pub mod gtin;
pub mod iban;
pub mod isan;
pub mod isbn;
pub mod ismn;
pub mod isni;
pub mod issn;
pub mod istc;
pub mod iswc;
pub mod orcid;
pub mod ppn;
pub mod sici;
pub mod upc;
pub mod zdb;

pub use ark::Ark;
pub use doi::Doi;
pub use ean::Ean;
pub use gtin::Gtin;
pub use iban::{iban_length, Iban};
pub use isan::Isan;
pub use isbn::{Isbn, IsbnForms};
pub use ismn::Ismn;
pub use isni::Isni;
pub use issn::Issn;
pub use istc::Istc;
pub use iswc::Iswc;
pub use orcid::Orcid;
pub use ppn::Ppn;
pub use sici::Sici;
pub use upc::Upc;
pub use zdb::Zdb;
