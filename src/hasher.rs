//! Key hashing strategies.
//!
//! A table is parameterized over a [`KeyHasher`] fixed at construction. The
//! default, [`MurmurMix`], is a small seeded multiplicative mix: fast and
//! deterministic, but not resistant to adversarial collisions. Tables that
//! index untrusted keys should use [`BuildHasherKeys`] over a randomized
//! `BuildHasher` such as `std::collections::hash_map::RandomState`.

use core::hash::BuildHasher;

/// Maps the bytes of a key to a 32-bit hash.
///
/// Implementations must be deterministic for the lifetime of a table: every
/// entry caches its hash at insertion and lookups recompute it.
pub trait KeyHasher {
    fn hash(&self, key: &[u8]) -> u32;
}

/// Seeded Murmur-style byte mix, the default hasher.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MurmurMix;

impl MurmurMix {
    pub const SEED: u32 = 0x1234_5678;
    pub const MULTIPLIER: u32 = 0x5bd1_e995;

    /// Hashes `key` without needing an instance.
    pub const fn hash_bytes(key: &[u8]) -> u32 {
        let mut h = Self::SEED;
        let mut i = 0;
        while i < key.len() {
            h ^= key[i] as u32;
            h = h.wrapping_mul(Self::MULTIPLIER);
            h ^= h >> 15;
            i += 1;
        }
        h
    }
}

impl KeyHasher for MurmurMix {
    #[inline]
    fn hash(&self, key: &[u8]) -> u32 {
        Self::hash_bytes(key)
    }
}

/// Plain functions and closures are hashers too.
impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u32,
{
    #[inline]
    fn hash(&self, key: &[u8]) -> u32 {
        self(key)
    }
}

/// Adapts any `BuildHasher` to a `KeyHasher` by folding its 64-bit output.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherKeys<S>(pub S);

impl<S: BuildHasher> KeyHasher for BuildHasherKeys<S> {
    #[inline]
    fn hash(&self, key: &[u8]) -> u32 {
        let h = self.0.hash_one(key);
        (h ^ (h >> 32)) as u32
    }
}
