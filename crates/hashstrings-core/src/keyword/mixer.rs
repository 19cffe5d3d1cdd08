/// Order-sensitive combiner folding 9-bit codes into a 64-bit hash.
///
/// Implementations must be deterministic: a generated table is only valid
/// for consumers that hash with the same mixer.
pub trait HashMixer {
    /// Starting value before any code is mixed in.
    fn seed(&self) -> u64;

    /// Fold one code into the running hash.
    fn mix(&self, hash: u64, code: u16) -> u64;

    /// Hash a whole code sequence.
    fn hash_codes<I>(&self, codes: I) -> u64
    where
        I: IntoIterator<Item = u16>,
    {
        codes
            .into_iter()
            .fold(self.seed(), |hash, code| self.mix(hash, code))
    }
}

/// 64-bit FNV-1a applied to codes instead of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aMixer;

impl Fnv1aMixer {
    /// FNV-1a 64-bit offset basis.
    pub const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    /// FNV 64-bit prime.
    pub const PRIME: u64 = 0x0000_0100_0000_01b3;
}

impl HashMixer for Fnv1aMixer {
    fn seed(&self) -> u64 {
        Self::OFFSET_BASIS
    }

    fn mix(&self, hash: u64, code: u16) -> u64 {
        (hash ^ u64::from(code)).wrapping_mul(Self::PRIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_is_seed() {
        assert_eq!(Fnv1aMixer.hash_codes(std::iter::empty()), Fnv1aMixer::OFFSET_BASIS);
    }

    #[test]
    fn test_matches_fnv1a_for_literal_bytes() {
        // reference value of FNV-1a 64 for "a"
        assert_eq!(Fnv1aMixer.hash_codes([u16::from(b'a')]), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_order_sensitive() {
        let ab = Fnv1aMixer.hash_codes([97, 98]);
        let ba = Fnv1aMixer.hash_codes([98, 97]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_symbol_codes_differ_from_literals() {
        // code 256 + 97 must not alias literal 97
        assert_ne!(Fnv1aMixer.hash_codes([97]), Fnv1aMixer.hash_codes([353]));
    }
}
