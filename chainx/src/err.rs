//! Error types for the `chainx` crate

/// Errors applicable to constructing a [`crate::ChainedHashTable`]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The table was configured with zero buckets.
    ///
    /// Every element hashes to an index modulo the bucket count, so a table
    /// needs at least one bucket before it can accept any insert.
    #[error("hash table capacity must be at least one bucket")]
    ZeroCapacity,
}
