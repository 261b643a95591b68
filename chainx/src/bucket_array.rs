//! Bucket storage and bucket selection for the chained hash table
//!
//! This module implements the two layers under [`crate::ChainedHashTable`].
//! The bucket array itself is a fixed-length `Vec` of [`chain::Chain`]s,
//! one per bucket, allocated once and never resized. Each chain is a plain
//! append-only sequence that keeps items in their arrival order.
//!
//! Bucket selection lives in [`hash`]. Elements are never hashed directly:
//! each one exposes a text form through [`hash::TextKey`], a
//! [`hash::BucketHasher`] folds that text into a 64-bit word, and the word is
//! reduced modulo the bucket count. The default hasher reproduces the legacy
//! shift-xor placement bit for bit.

pub(crate) mod chain;
pub(crate) mod hash;
