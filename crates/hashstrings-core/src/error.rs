//! Error types for table construction.
//!
//! Each build stage has its own error enum; [`BuildError`] wraps all of them
//! for callers that run the whole pipeline.

use thiserror::Error;

/// Errors raised while building a [`CharMap`](crate::CharMap).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharMapError {
    /// A symbol class was declared with no member characters
    #[error("Symbol class '{0}' has no members")]
    EmptyClass(String),

    /// The same class name was declared twice
    #[error("Symbol class '{0}' is declared more than once")]
    DuplicateClass(String),

    /// The class name cannot be used as part of a C identifier
    #[error("Symbol class name '{0}' is not a valid identifier")]
    InvalidClassName(String),

    /// All symbol codes that fit the packed field width are in use
    #[error("Cannot allocate symbol class '{name}': all {limit} symbol ids are in use")]
    SymbolSpaceExhausted {
        /// Name of the class that could not be allocated
        name: String,
        /// Maximum number of symbol classes
        limit: usize,
    },
}

impl CharMapError {
    /// Name of the class the error is about.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Self::EmptyClass(name)
            | Self::DuplicateClass(name)
            | Self::InvalidClassName(name)
            | Self::SymbolSpaceExhausted { name, .. } => name,
        }
    }
}

/// Errors raised while splitting and hashing keyword specifications.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeywordError {
    /// The keyword string has no primary name before its first separator
    #[error("Keyword {position} has an empty name: '{raw}'")]
    EmptyKeyword {
        /// 1-based position in the keyword list
        position: usize,
        /// The raw keyword specification
        raw: String,
    },

    /// The primary name cannot be used as part of a C identifier
    #[error("Keyword {position} name '{name}' is not a valid identifier")]
    InvalidKeywordName {
        /// 1-based position in the keyword list
        position: usize,
        /// The offending primary name
        name: String,
    },

    /// Two keywords produce the same emitted identifier
    #[error("Keyword {position} '{name}' duplicates keyword {previous}")]
    DuplicateKeyword {
        /// 1-based position of the later keyword
        position: usize,
        /// 1-based position of the earlier keyword
        previous: usize,
        /// The duplicated primary name
        name: String,
    },
}

impl KeywordError {
    /// 1-based position of the offending keyword.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::EmptyKeyword { position, .. }
            | Self::InvalidKeywordName { position, .. }
            | Self::DuplicateKeyword { position, .. } => *position,
        }
    }
}

/// Errors raised while laying out the search tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Two hashed texts share a hash value
    #[error("Hash collision 0x{hash:016x} between \"{first}\" and \"{second}\"")]
    HashCollision {
        /// The shared hash value
        hash: u64,
        /// Source text of the first record
        first: String,
        /// Source text of the second record
        second: String,
    },

    /// More records than the index type can address
    #[error("Too many records for a search table: {0}")]
    TooManyRecords(usize),
}

/// Any error raised by the table-building pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Character map construction failed
    #[error("Invalid mapping: {0}")]
    CharMap(#[from] CharMapError),

    /// Keyword splitting failed
    #[error("Invalid keyword: {0}")]
    Keyword(#[from] KeywordError),

    /// Search tree construction failed
    #[error("Cannot build search table: {0}")]
    Tree(#[from] TreeError),
}
