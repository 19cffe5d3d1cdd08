use tracing::debug;

use super::{CharMap, MAX_SYMBOLS, MapEntry, SymbolClass};
use crate::CharMapError;

/// One symbol class as declared: a name and its member string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    /// Class name, emitted as part of an enum identifier
    pub name: String,
    /// Member bytes, with `low-high` ranges
    pub members: Vec<u8>,
}

impl ClassSpec {
    /// Create a class declaration.
    pub fn new(name: impl Into<String>, members: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            members: members.into(),
        }
    }
}

/// Declarative input for [`CharMapBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSpec {
    /// Fold `A`-`Z` onto `a`-`z`
    pub ignore_case: bool,
    /// Symbol classes in declaration order
    pub classes: Vec<ClassSpec>,
}

/// Incrementally builds a [`CharMap`].
///
/// Case folding is applied before any class, so a class listing upper-case
/// letters still claims them when `ignore_case` is set.
#[derive(Debug, Clone)]
pub struct CharMapBuilder {
    map: CharMap,
    ignore_case: bool,
    next_symbol: u16,
}

impl Default for CharMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CharMapBuilder {
    /// Start from the identity map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: CharMap::identity(),
            ignore_case: false,
            next_symbol: 0,
        }
    }

    /// Run a whole mapping through a fresh builder.
    pub fn from_spec(mapping: &MappingSpec) -> Result<Self, CharMapError> {
        let mut builder = Self::new();
        builder.ignore_case(mapping.ignore_case);
        for class in &mapping.classes {
            builder.add_class(&class.name, &class.members)?;
        }
        Ok(builder)
    }

    /// Enable case folding of `A`-`Z` for bytes not claimed by a class.
    pub fn ignore_case(&mut self, enabled: bool) -> &mut Self {
        if enabled && !self.ignore_case {
            for upper in b'A'..=b'Z' {
                if matches!(self.map.get(upper), MapEntry::Literal(_)) {
                    self.map.set(upper, MapEntry::Literal(upper.to_ascii_lowercase()));
                }
            }
        }
        self.ignore_case |= enabled;
        self
    }

    /// Allocate the next symbol id and assign it to every member byte.
    ///
    /// Returns the new class id.
    pub fn add_class(
        &mut self,
        name: &str,
        members: impl AsRef<[u8]>,
    ) -> Result<u16, CharMapError> {
        let members = members.as_ref();
        if !crate::is_identifier(name) {
            return Err(CharMapError::InvalidClassName(name.to_string()));
        }
        if self.map.classes.iter().any(|c| c.name == name) {
            return Err(CharMapError::DuplicateClass(name.to_string()));
        }
        if members.is_empty() {
            return Err(CharMapError::EmptyClass(name.to_string()));
        }
        if usize::from(self.next_symbol) >= MAX_SYMBOLS {
            return Err(CharMapError::SymbolSpaceExhausted {
                name: name.to_string(),
                limit: MAX_SYMBOLS,
            });
        }

        let id = self.next_symbol;
        self.next_symbol += 1;

        let bytes = expand_members(members);
        for &b in &bytes {
            self.map.set(b, MapEntry::Symbol(id));
        }

        debug!(class = name, id, members = bytes.len(), "allocated symbol class");

        self.map.classes.push(SymbolClass {
            name: name.to_string(),
            id,
            members: bytes,
        });
        Ok(id)
    }

    /// Number of classes allocated so far.
    #[must_use]
    pub fn class_count(&self) -> usize {
        usize::from(self.next_symbol)
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> CharMap {
        self.map
    }
}

/// Resolve a member string into the sorted set of bytes it names.
///
/// A `-` with a byte on both sides is a range operator covering
/// `prev..=next`; at either end of the string it is a literal member.
fn expand_members(members: &[u8]) -> Vec<u8> {
    let mut set = [false; 256];

    for (i, &c) in members.iter().enumerate() {
        let is_range = c == b'-' && i > 0 && i + 1 < members.len();
        if is_range {
            let (low, high) = (members[i - 1], members[i + 1]);
            for b in low..=high {
                set[b as usize] = true;
            }
        } else {
            set[c as usize] = true;
        }
    }

    (0u8..=255).filter(|&b| set[b as usize]).collect()
}
