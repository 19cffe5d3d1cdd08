//! Keyword splitting and hashing.
//!
//! A keyword specification has the form `primary[,alias]*` (`;` works as a
//! separator too). The primary name becomes the emitted identifier; the
//! aliases are the texts that are actually hashed. Without aliases the
//! primary name itself is hashed.
//!
//! Texts are byte strings, so aliases may hold any byte value the character
//! map covers; only the primary name is restricted to an ASCII identifier.
//!
//! ```
//! use hashstrings_core::{CharMap, KeywordHasher};
//!
//! let map = CharMap::identity();
//! let set = KeywordHasher::new(&map)
//!     .hash_keywords(["if", "else", "elif,elif;elsif"])
//!     .expect("keywords are valid");
//!
//! assert_eq!(set.entries().len(), 3);
//! assert_eq!(set.records().len(), 4);
//! assert_eq!(set.entries()[2].identifier(), "Elif");
//! ```

mod mixer;

pub use mixer::{Fnv1aMixer, HashMixer};

use std::collections::HashMap;

use tracing::debug;

use crate::{CharMap, KeywordError};

/// Bytes that separate the primary name from its aliases.
pub const SEPARATORS: [u8; 2] = [b',', b';'];

/// One configured keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    name: String,
    aliases: Vec<Vec<u8>>,
    target_index: u32,
}

impl KeywordEntry {
    /// Split a raw `primary[,alias]*` specification.
    ///
    /// `position` is the 1-based index in the keyword list and becomes the
    /// entry's target index. Empty alias segments are ignored.
    pub fn parse(raw: &[u8], position: usize) -> Result<Self, KeywordError> {
        let mut segments = raw.split(|b| SEPARATORS.contains(b));
        let name = segments.next().unwrap_or_default();

        if name.is_empty() {
            return Err(KeywordError::EmptyKeyword {
                position,
                raw: String::from_utf8_lossy(raw).into_owned(),
            });
        }
        let Some(name) = std::str::from_utf8(name)
            .ok()
            .filter(|name| crate::is_identifier(name))
        else {
            return Err(KeywordError::InvalidKeywordName {
                position,
                name: String::from_utf8_lossy(name).into_owned(),
            });
        };

        let aliases = segments
            .filter(|s| !s.is_empty())
            .map(<[u8]>::to_vec)
            .collect();

        Ok(Self {
            name: name.to_string(),
            aliases,
            target_index: u32::try_from(position).unwrap_or(u32::MAX),
        })
    }

    /// Primary name, verbatim.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit aliases in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[Vec<u8>] {
        &self.aliases
    }

    /// 1-based identifier value; 0 is reserved for "unknown".
    #[must_use]
    pub const fn target_index(&self) -> u32 {
        self.target_index
    }

    /// Identifier suffix used in generated code: the name with its first
    /// character upper-cased.
    #[must_use]
    pub fn identifier(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Texts that resolve to this keyword.
    pub fn hashed_texts(&self) -> impl Iterator<Item = &[u8]> {
        let primary = self.aliases.is_empty().then_some(self.name.as_bytes());
        primary
            .into_iter()
            .chain(self.aliases.iter().map(Vec::as_slice))
    }
}

/// One hashed text and the keyword it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashRecord {
    /// Hash of `source_text` through the character map
    pub hash: u64,
    /// The bytes that were hashed
    pub source_text: Vec<u8>,
    /// Target index of the owning [`KeywordEntry`]
    pub target_index: u32,
}

/// Result of hashing a keyword list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    entries: Vec<KeywordEntry>,
    records: Vec<HashRecord>,
}

impl KeywordSet {
    /// Keywords in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// One record per hashed text, unsorted.
    #[must_use]
    pub fn records(&self) -> &[HashRecord] {
        &self.records
    }

    /// Keyword for a target index, if any.
    #[must_use]
    pub fn entry(&self, target_index: u32) -> Option<&KeywordEntry> {
        let i = usize::try_from(target_index.checked_sub(1)?).ok()?;
        self.entries.get(i)
    }

    /// Value of the `MaxIndex` sentinel: one past the last target index.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.entries.len() + 1
    }
}

/// Hashes texts through a [`CharMap`].
#[derive(Debug, Clone)]
pub struct KeywordHasher<'a, M = Fnv1aMixer> {
    map: &'a CharMap,
    mixer: M,
}

impl<'a> KeywordHasher<'a> {
    /// Hasher using the default [`Fnv1aMixer`].
    #[must_use]
    pub const fn new(map: &'a CharMap) -> Self {
        Self {
            map,
            mixer: Fnv1aMixer,
        }
    }
}

impl<'a, M: HashMixer> KeywordHasher<'a, M> {
    /// Hasher with a custom mixer.
    pub const fn with_mixer(map: &'a CharMap, mixer: M) -> Self {
        Self { map, mixer }
    }

    /// The mixer in use.
    pub const fn mixer(&self) -> &M {
        &self.mixer
    }

    /// Hash a text byte by byte through the character map.
    pub fn hash(&self, text: impl AsRef<[u8]>) -> u64 {
        self.mixer
            .hash_codes(text.as_ref().iter().map(|&b| self.map.code(b)))
    }

    /// Split and hash every keyword specification.
    pub fn hash_keywords<I, S>(&self, keywords: I) -> Result<KeywordSet, KeywordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut set = KeywordSet::default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (i, raw) in keywords.into_iter().enumerate() {
            let position = i + 1;
            let entry = KeywordEntry::parse(raw.as_ref(), position)?;

            if let Some(&previous) = seen.get(&entry.identifier()) {
                return Err(KeywordError::DuplicateKeyword {
                    position,
                    previous,
                    name: entry.name.clone(),
                });
            }
            seen.insert(entry.identifier(), position);

            for text in entry.hashed_texts() {
                set.records.push(HashRecord {
                    hash: self.hash(text),
                    source_text: text.to_vec(),
                    target_index: entry.target_index,
                });
            }
            set.entries.push(entry);
        }

        debug!(
            keywords = set.entries.len(),
            records = set.records.len(),
            "hashed keywords"
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charmap::{ClassSpec, MappingSpec};

    #[test]
    fn test_parse_primary_only() {
        let entry = KeywordEntry::parse(b"while", 3).unwrap();
        assert_eq!(entry.name(), "while");
        assert!(entry.aliases().is_empty());
        assert_eq!(entry.target_index(), 3);
        assert_eq!(entry.hashed_texts().collect::<Vec<_>>(), [b"while"]);
    }

    #[test]
    fn test_parse_aliases_with_mixed_separators() {
        let entry = KeywordEntry::parse(b"Colour,color;colour,", 1).unwrap();
        assert_eq!(entry.name(), "Colour");
        assert_eq!(entry.aliases(), [b"color".to_vec(), b"colour".to_vec()]);
        assert_eq!(
            entry.hashed_texts().collect::<Vec<_>>(),
            [&b"color"[..], &b"colour"[..]]
        );
    }

    #[test]
    fn test_trailing_separator_hashes_primary() {
        let entry = KeywordEntry::parse(b"end;", 1).unwrap();
        assert_eq!(entry.hashed_texts().collect::<Vec<_>>(), [b"end"]);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert_eq!(
            KeywordEntry::parse(b",alias", 4),
            Err(KeywordError::EmptyKeyword {
                position: 4,
                raw: ",alias".to_string(),
            })
        );
        assert!(matches!(
            KeywordEntry::parse(b"", 1),
            Err(KeywordError::EmptyKeyword { .. })
        ));
    }

    #[test]
    fn test_non_identifier_rejected() {
        assert!(matches!(
            KeywordEntry::parse(b"not-valid", 1),
            Err(KeywordError::InvalidKeywordName { .. })
        ));
        assert!(matches!(
            KeywordEntry::parse(b"caf\xe9", 1),
            Err(KeywordError::InvalidKeywordName { .. })
        ));
    }

    #[test]
    fn test_identifier_capitalised() {
        let entry = KeywordEntry::parse(b"while", 1).unwrap();
        assert_eq!(entry.identifier(), "While");
        let entry = KeywordEntry::parse(b"_private", 1).unwrap();
        assert_eq!(entry.identifier(), "_private");
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let map = CharMap::identity();
        let err = KeywordHasher::new(&map)
            .hash_keywords(["if", "If"])
            .unwrap_err();
        assert_eq!(
            err,
            KeywordError::DuplicateKeyword {
                position: 2,
                previous: 1,
                name: "If".to_string(),
            }
        );
    }

    #[test]
    fn test_hash_determinism() {
        let map = CharMap::identity();
        let hasher = KeywordHasher::new(&map);
        assert_eq!(hasher.hash("return"), hasher.hash("return"));
        assert_ne!(hasher.hash("return"), hasher.hash("retunr"));
    }

    #[test]
    fn test_case_fold_hashes_equal() {
        let spec = MappingSpec {
            ignore_case: true,
            classes: Vec::new(),
        };
        let map = CharMap::from_spec(&spec).unwrap();
        let hasher = KeywordHasher::new(&map);
        assert_eq!(hasher.hash("SELECT"), hasher.hash("select"));
    }

    #[test]
    fn test_symbol_class_members_hash_equal() {
        let spec = MappingSpec {
            ignore_case: false,
            classes: vec![ClassSpec::new("digit", "0-9")],
        };
        let map = CharMap::from_spec(&spec).unwrap();
        let hasher = KeywordHasher::new(&map);
        assert_eq!(hasher.hash("v1"), hasher.hash("v7"));
        assert_ne!(hasher.hash("v1"), hasher.hash("vx"));
    }

    #[test]
    fn test_records_carry_target_indices() {
        let map = CharMap::identity();
        let set = KeywordHasher::new(&map)
            .hash_keywords(["if", "else,else,otherwise", "while"])
            .unwrap();

        let targets: Vec<_> = set
            .records()
            .iter()
            .map(|r| (r.source_text.as_slice(), r.target_index))
            .collect();
        assert_eq!(
            targets,
            [
                (&b"if"[..], 1),
                (&b"else"[..], 2),
                (&b"otherwise"[..], 2),
                (&b"while"[..], 3)
            ]
        );
        assert_eq!(set.max_index(), 4);
        assert_eq!(set.entry(2).map(KeywordEntry::name), Some("else"));
        assert_eq!(set.entry(0), None);
        assert_eq!(set.entry(4), None);
    }

    #[test]
    fn test_high_byte_aliases() {
        let entry = KeywordEntry::parse(b"cafe,caf\xe9;caf\xc3\xa9", 1).unwrap();
        assert_eq!(entry.name(), "cafe");
        assert_eq!(entry.aliases(), [b"caf\xe9".to_vec(), b"caf\xc3\xa9".to_vec()]);

        let map = CharMap::identity();
        let hasher = KeywordHasher::new(&map);
        assert_ne!(hasher.hash(b"caf\xe9"), hasher.hash("café"));
    }
}
