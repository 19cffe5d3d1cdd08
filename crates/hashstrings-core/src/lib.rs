//! Static keyword lookup tables.
//!
//! This crate builds the data behind a generated keyword table:
//!
//! - [`charmap`]: collapses the 256 byte values into literal codes and
//!   symbol-class codes, packed into 9-bit fields
//! - [`keyword`]: splits `primary[,alias]*` specifications and hashes every
//!   alias through the character map
//! - [`tree`]: sorts the hashes and lays them out as a flat, pre-order binary
//!   search tree that needs no pointers or allocation at lookup time
//!
//! [`KeywordTable::build`] runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use hashstrings_core::{ClassSpec, KeywordTable, MappingSpec};
//!
//! let mapping = MappingSpec {
//!     ignore_case: true,
//!     classes: vec![ClassSpec::new("digit", "0-9")],
//! };
//! let table = KeywordTable::build(&mapping, ["http", "https", "h2"])
//!     .expect("table should build");
//!
//! assert_eq!(table.lookup("HTTPS"), 2);
//! assert_eq!(table.lookup("h7"), 3); // digits form one symbol class
//! assert_eq!(table.lookup("ftp"), 0);
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod charmap;
pub mod error;
pub mod keyword;
pub mod tree;

pub use charmap::{CharMap, CharMapBuilder, ClassSpec, MapEntry, MappingSpec, SymbolClass};
pub use error::{BuildError, CharMapError, KeywordError, TreeError};
pub use keyword::{Fnv1aMixer, HashMixer, HashRecord, KeywordEntry, KeywordHasher, KeywordSet};
pub use tree::{SkipTable, TreeBuilder, TreeNode};

/// Everything produced for one input: the map, the keywords and the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    /// Character map used for hashing
    pub charmap: CharMap,
    /// Keywords and their hash records
    pub keywords: KeywordSet,
    /// Search tree over the records
    pub skip_table: SkipTable,
}

impl KeywordTable {
    /// Build with the default [`Fnv1aMixer`].
    pub fn build<I, S>(mapping: &MappingSpec, keywords: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self::build_with_mixer(mapping, keywords, Fnv1aMixer)
    }

    /// Build with a custom mixer.
    pub fn build_with_mixer<I, S, M>(
        mapping: &MappingSpec,
        keywords: I,
        mixer: M,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
        M: HashMixer,
    {
        let charmap = CharMap::from_spec(mapping)?;
        let keywords = KeywordHasher::with_mixer(&charmap, mixer).hash_keywords(keywords)?;
        let skip_table = TreeBuilder::new(keywords.records().to_vec()).build()?;

        Ok(Self {
            charmap,
            keywords,
            skip_table,
        })
    }

    /// Resolve a text with the default mixer; 0 means unknown.
    #[must_use]
    pub fn lookup(&self, text: impl AsRef<[u8]>) -> u32 {
        self.skip_table
            .lookup(text, &KeywordHasher::new(&self.charmap))
    }
}

/// Whether `name` is a C identifier (`[A-Za-z_][A-Za-z0-9_]*`).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
