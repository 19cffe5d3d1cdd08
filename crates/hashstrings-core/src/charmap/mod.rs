//! Byte-to-symbol remapping.
//!
//! A [`CharMap`] assigns every input byte a 9-bit *code*. Literal entries keep
//! (possibly case-folded) byte values in `0..=255`; symbol-class entries use
//! `256 + id`, so the two ranges never overlap inside a packed field.
//!
//! # Example
//!
//! ```
//! use hashstrings_core::charmap::{CharMapBuilder, MapEntry};
//!
//! let mut builder = CharMapBuilder::new();
//! builder.ignore_case(true);
//! builder.add_class("digit", "0-9").expect("class should be allocated");
//! let map = builder.build();
//!
//! assert_eq!(map.get(b'Q'), MapEntry::Literal(b'q'));
//! assert_eq!(map.get(b'7'), MapEntry::Symbol(0));
//! assert_eq!(map.code(b'7'), 256);
//! ```

mod builder;
mod packed;

pub use builder::{CharMapBuilder, ClassSpec, MappingSpec};
pub use packed::{FIELDS_PER_WORD, FIELD_BITS, FIELD_MASK, PACKED_WORDS, pack, unpack_field};

/// First code used for symbol classes; literal bytes occupy the codes below it.
pub const SYMBOL_OFFSET: u16 = 256;

/// Number of symbol classes that fit in a 9-bit field above the literal range.
pub const MAX_SYMBOLS: usize = 256;

/// What a single input byte maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEntry {
    /// The byte hashes as this literal value
    Literal(u8),
    /// The byte belongs to the symbol class with this id
    Symbol(u16),
}

impl MapEntry {
    /// Numeric code folded into the hash and stored in the packed table.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Literal(b) => b as u16,
            Self::Symbol(id) => SYMBOL_OFFSET + id,
        }
    }

    /// Decode a packed field value.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        if code < SYMBOL_OFFSET {
            Self::Literal(code as u8)
        } else {
            Self::Symbol(code - SYMBOL_OFFSET)
        }
    }
}

/// A named group of bytes that hash as one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolClass {
    name: String,
    id: u16,
    members: Vec<u8>,
}

impl SymbolClass {
    /// Class name as declared in the mapping specification.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequential id, starting at 0 in declaration order.
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Code of this class in the packed table (`256 + id`).
    #[must_use]
    pub const fn code(&self) -> u16 {
        SYMBOL_OFFSET + self.id
    }

    /// Bytes named by the member string, ascending and without duplicates.
    ///
    /// A later class may claim some of these bytes again; [`CharMap::get`] is
    /// authoritative for the final assignment.
    #[must_use]
    pub fn members(&self) -> &[u8] {
        &self.members
    }
}

/// Complete mapping for all 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    entries: [MapEntry; 256],
    classes: Vec<SymbolClass>,
}

impl Default for CharMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl CharMap {
    /// Every byte maps to itself and no symbol classes exist.
    #[must_use]
    pub fn identity() -> Self {
        let mut entries = [MapEntry::Literal(0); 256];
        for (b, entry) in (0u8..=255).zip(entries.iter_mut()) {
            *entry = MapEntry::Literal(b);
        }
        Self {
            entries,
            classes: Vec::new(),
        }
    }

    /// Build a map from a declarative specification.
    pub fn from_spec(spec: &MappingSpec) -> Result<Self, crate::CharMapError> {
        CharMapBuilder::from_spec(spec).map(CharMapBuilder::build)
    }

    /// Entry for a byte.
    #[must_use]
    pub const fn get(&self, byte: u8) -> MapEntry {
        self.entries[byte as usize]
    }

    /// Hash code for a byte.
    #[must_use]
    pub const fn code(&self, byte: u8) -> u16 {
        self.entries[byte as usize].code()
    }

    /// All 256 entries in byte order.
    #[must_use]
    pub const fn entries(&self) -> &[MapEntry; 256] {
        &self.entries
    }

    /// Symbol classes in declaration order; index equals id.
    #[must_use]
    pub fn classes(&self) -> &[SymbolClass] {
        &self.classes
    }

    /// Look up a symbol class by id.
    #[must_use]
    pub fn class(&self, id: u16) -> Option<&SymbolClass> {
        self.classes.get(usize::from(id))
    }

    /// Whether any symbol classes were declared.
    #[must_use]
    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    /// The table packed as 9-bit fields, seven per word.
    #[must_use]
    pub fn packed(&self) -> [u64; PACKED_WORDS] {
        pack(&self.entries)
    }

    fn set(&mut self, byte: u8, entry: MapEntry) {
        self.entries[byte as usize] = entry;
    }
}
