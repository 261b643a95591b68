//! Keyed SipHash-2-4 over key text
//!
//! The legacy shift-xor fold in [`crate::ShiftXor`] keeps only the last few
//! dozen bytes of a key and clusters similar keys into neighboring buckets.
//! [`SipText`] is the stronger alternative for tables that don't need legacy
//! placement. It's plain SipHash-2-4 as described in the SipHash paper,
//! including the length byte and zero padding in the final block, so any
//! variable length text can be hashed.
//!
//! The 128-bit key can be supplied directly or derived from an arbitrary
//! seed. Seed derivation uses Blake2s with a fixed prefix, and takes the first
//! 16 bytes of the digest as the two key words.
//!
//! SipHash is defined by Jean-Philippe Aumasson and Daniel J.Bernstein in
//! their paper "SipHash: a fast short-input PRF" (2012).

use crate::BucketHasher;
use blake2::{Blake2s256, Digest};
use std::fmt::{self, Debug};

/// Internal state of one SipHash instance
#[derive(Clone, Copy, Eq, PartialEq)]
struct SipState {
    /// State variable V0 as defined in the SipHash paper
    v0: u64,
    /// State variable V1 as defined in the SipHash paper
    v1: u64,
    /// State variable V2 as defined in the SipHash paper
    v2: u64,
    /// State variable V3 as defined in the SipHash paper
    v3: u64,
}

impl SipState {
    /// Initialize the state from the two key words, as in the SipHash paper.
    #[inline(always)]
    fn from_key(k0: u64, k1: u64) -> Self {
        Self {
            v0: k0 ^ 0x736f_6d65_7073_6575,
            v1: k1 ^ 0x646f_7261_6e64_6f6d,
            v2: k0 ^ 0x6c79_6765_6e65_7261,
            v3: k1 ^ 0x7465_6462_7974_6573,
        }
    }

    /// One `SipRound` as defined in the SipHash paper
    ///
    /// Modifies the `SipState` in-place.
    #[inline(always)]
    fn sip_round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(13);
        self.v3 = self.v3.rotate_left(16);
        self.v1 ^= self.v0;
        self.v3 ^= self.v2;
        self.v0 = self.v0.rotate_left(32);

        self.v2 = self.v2.wrapping_add(self.v1);
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(17);
        self.v3 = self.v3.rotate_left(21);
        self.v1 ^= self.v2;
        self.v3 ^= self.v0;
        self.v2 = self.v2.rotate_left(32);
    }

    /// Absorb one 64-bit message word with two compression rounds.
    #[inline(always)]
    fn compress(&mut self, word: u64) {
        self.v3 ^= word;
        self.sip_round();
        self.sip_round();
        self.v0 ^= word;
    }

    /// Run the four finalization rounds and fold the state to 64 bits.
    #[inline(always)]
    fn finalize(mut self) -> u64 {
        self.v2 ^= 0xff;
        self.sip_round();
        self.sip_round();
        self.sip_round();
        self.sip_round();
        self.v0 ^ self.v1 ^ self.v2 ^ self.v3
    }
}

/// Keyed SipHash-2-4 [`BucketHasher`]
///
/// Placement depends on the key, so two tables only agree on bucket numbers
/// if they were built with the same key.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct SipText {
    /// First key word, `k0` in the SipHash paper
    k0: u64,
    /// Second key word, `k1` in the SipHash paper
    k1: u64,
}

impl Debug for SipText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SipText[ {:#018x}, {:#018x} ]", self.k0, self.k1)
    }
}

impl SipText {
    /// Prefix mixed into the Blake2s input by [`Self::from_seed()`]
    const SEED_PREFIX: &'static [u8] = b"chainx SipText v1";

    /// Construct a hasher from the two 64-bit key words.
    pub fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    /// Construct a hasher from a 16-byte key, read as two little endian words.
    pub fn from_key_bytes(key: &[u8; 16]) -> Self {
        Self::new(
            u64::from_le_bytes(key[0..8].try_into().expect("slice length matches")),
            u64::from_le_bytes(key[8..16].try_into().expect("slice length matches")),
        )
    }

    /// Derive a hasher key from a seed of any length.
    ///
    /// The same seed always gives the same key, and so the same placement.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut hasher = Blake2s256::new();
        hasher.update(Self::SEED_PREFIX);
        hasher.update(seed);
        let digest = hasher.finalize();
        Self::from_key_bytes(digest[0..16].try_into().expect("slice length matches"))
    }
}

impl BucketHasher for SipText {
    fn hash_text(&self, text: &[u8]) -> u64 {
        let mut s = SipState::from_key(self.k0, self.k1);
        let mut words = text.chunks_exact(8);
        for word in &mut words {
            s.compress(u64::from_le_bytes(
                word.try_into().expect("chunk length matches"),
            ));
        }

        // Final block: remaining bytes, zero padded, length in the top byte
        let mut last = [0_u8; 8];
        let tail = words.remainder();
        last[..tail.len()].copy_from_slice(tail);
        last[7] = text.len() as u8;
        s.compress(u64::from_le_bytes(last));

        s.finalize()
    }
}
