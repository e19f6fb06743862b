//! Per-article extraction errors.
//!
//! Each variant aborts the article being extracted and nothing else. The classification
//! tables are exhaustive, so an unknown tag means the dump grew a category this crate
//! does not know about yet.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A microstructure entry whose grammatical category is neither extracted nor skipped.
    #[error("unrecognized grammatical structure: {tag}")]
    UnknownStructure { tag: String },

    /// A variant cross-reference with a relation tag outside the known set.
    #[error("unrecognized variant relation: {tag}")]
    UnknownVariantRelation { tag: String },

    /// A plural block whose category tag is outside the known set.
    #[error("unrecognized plural category: {tag}")]
    UnknownPluralCategory { tag: String },

    #[error("<{parent}> is missing required child <{child}>")]
    MissingChild { parent: String, child: String },

    #[error("<{element}> is missing required attribute {attribute}")]
    MissingAttribute { element: String, attribute: String },

    /// A variant reference too short to carry its disambiguating suffix.
    #[error("malformed article reference: {reference:?}")]
    MalformedReference { reference: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
