//! Packed 9-bit field layout.
//!
//! ```text
//! -------- ________ -------- ________ -------- ________ -------- ________
//! .ggggggg ggFFFFFF FFFeeeee eeeeDDDD DDDDDccc ccccccBB BBBBBBBa aaaaaaaa
//! ```
//!
//! Field `a` of word `w` holds the code of byte `7 * w`, field `b` the code of
//! byte `7 * w + 1`, and so on. The top bit of every word is unused, as are
//! the fields of the last word past byte 255.

use super::MapEntry;

/// Width of one packed field.
pub const FIELD_BITS: u32 = 9;

/// Mask selecting one field.
pub const FIELD_MASK: u64 = (1 << FIELD_BITS) - 1;

/// Fields stored in each 64-bit word.
pub const FIELDS_PER_WORD: usize = (u64::BITS / FIELD_BITS) as usize;

/// Words needed to hold all 256 entries.
pub const PACKED_WORDS: usize = 256 / FIELDS_PER_WORD + 1;

/// Pack entries into 9-bit fields.
#[must_use]
pub fn pack(entries: &[MapEntry; 256]) -> [u64; PACKED_WORDS] {
    let mut words = [0u64; PACKED_WORDS];
    for (i, entry) in entries.iter().enumerate() {
        let shift = (i % FIELDS_PER_WORD) as u32 * FIELD_BITS;
        words[i / FIELDS_PER_WORD] |= u64::from(entry.code()) << shift;
    }
    words
}

/// Extract field `field` (0-based) from a packed word.
#[must_use]
pub const fn unpack_field(word: u64, field: usize) -> u16 {
    ((word >> (field as u32 * FIELD_BITS)) & FIELD_MASK) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charmap::{CharMapBuilder, SYMBOL_OFFSET};

    #[test]
    fn test_layout_constants() {
        assert_eq!(FIELDS_PER_WORD, 7);
        assert_eq!(PACKED_WORDS, 37);
        assert_eq!(FIELD_MASK, 0x1ff);
    }

    #[test]
    fn test_identity_first_word() {
        let words = crate::CharMap::identity().packed();
        // bytes 0..7 -> fields 0..7
        let expected = (0u64..7).fold(0, |acc, b| acc | (b << (b * 9)));
        assert_eq!(words[0], expected);
        assert_eq!(words[0] >> 63, 0);
    }

    #[test]
    fn test_every_byte_recoverable() {
        let mut builder = CharMapBuilder::new();
        builder.ignore_case(true);
        builder.add_class("digit", "0-9").unwrap();
        builder.add_class("high", "\u{7f}").unwrap();
        let map = builder.build();
        let words = map.packed();

        for b in 0u8..=255 {
            let i = usize::from(b);
            let code = unpack_field(words[i / FIELDS_PER_WORD], i % FIELDS_PER_WORD);
            assert_eq!(MapEntry::from_code(code), map.get(b));
        }
        assert_eq!(unpack_field(words[48 / 7], 48 % 7), SYMBOL_OFFSET);
    }

    #[test]
    fn test_trailing_fields_are_zero() {
        let words = crate::CharMap::identity().packed();
        // the last word holds bytes 252..=255 in fields 0..4
        for field in 4..FIELDS_PER_WORD {
            assert_eq!(unpack_field(words[PACKED_WORDS - 1], field), 0);
        }
    }
}
