#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![doc = include_str!("../README.md")]
// @@ begin lint list maintained by maint/add_warning @@
#![allow(renamed_and_removed_lints)] // @@REMOVE_WHEN(ci_arti_stable)
#![allow(unknown_lints)] // @@REMOVE_WHEN(ci_arti_nightly)
#![warn(missing_docs)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::cargo_common_metadata)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::checked_conversions)]
#![warn(clippy::cognitive_complexity)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::exhaustive_structs)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![deny(clippy::fallible_impl_from)]
#![deny(clippy::implicit_clone)]
#![deny(clippy::large_stack_arrays)]
#![warn(clippy::manual_ok_or)]
#![deny(clippy::missing_docs_in_private_items)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::option_option)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![warn(clippy::rc_buffer)]
#![deny(clippy::ref_option_ref)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::trait_duplication_in_bounds)]
#![deny(clippy::unnecessary_wraps)]
#![warn(clippy::unseparated_literal_suffix)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::mod_module_files)]
#![allow(clippy::let_unit_value)] // This can reasonably be done for explicitness
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_raw_string_hashes)] // complained-about code is fine, often best
#![allow(clippy::needless_lifetimes)]
//! <!-- @@ end lint list maintained by maint/add_warning @@ -->

mod bucket_array;
mod err;
mod iter;
mod siphash;

// Export bucket_array::chain API only to the fuzzer.
// (This is not stable; you should not use it except for testing.)
#[cfg(feature = "bucket-array")]
pub use bucket_array::chain::Chain;

use bucket_array::chain::Chain as BucketChain;
use log::{debug, trace};
use std::fmt::{self, Debug, Display};
use std::io;

pub use bucket_array::hash::{BucketHasher, HashWord, ShiftXor, TextKey};
pub use err::Error;
pub use iter::{Cursor, Iter};
pub use siphash::SipText;

/// Number of buckets used when no capacity is given
pub const DEFAULT_SIZE: usize = 1_048_576;

/// Hash table with a fixed number of buckets and separate chaining
///
/// Elements are placed by hashing their [`TextKey`] text with `H`, and each
/// bucket keeps its elements in insertion order. The bucket count is set at
/// construction and never changes, so chains simply grow longer as the table
/// fills. Equal elements are stored once.
///
/// The table is not synchronized. Share it across threads only behind your
/// own lock.
#[derive(Clone)]
pub struct ChainedHashTable<T, H = ShiftXor> {
    /// One chain per bucket, never empty and never resized
    buckets: Vec<BucketChain<T>>,
    /// Number of distinct elements across all buckets
    len: usize,
    /// Text hash used to choose buckets
    hasher: H,
}

impl<T> ChainedHashTable<T> {
    /// Make a new empty table with [`DEFAULT_SIZE`] buckets and the legacy
    /// [`ShiftXor`] hash.
    pub fn new() -> Self {
        Self::allocate(DEFAULT_SIZE, ShiftXor::new())
    }

    /// Make a new empty table with `capacity` buckets and the legacy
    /// [`ShiftXor`] hash.
    ///
    /// Fails with [`Error::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        ChainedHashTableBuilder::new().capacity(capacity).build()
    }
}

impl<T: TextKey + PartialEq> ChainedHashTable<T> {
    /// Make a table with `capacity` buckets holding every element of `range`.
    ///
    /// Elements are inserted in order with [`Self::insert()`], so a later
    /// element equal to an earlier one is dropped.
    pub fn from_range<I: IntoIterator<Item = T>>(
        range: I,
        capacity: usize,
    ) -> Result<Self, Error> {
        ChainedHashTableBuilder::new()
            .capacity(capacity)
            .build_from(range)
    }
}

impl<T, H> ChainedHashTable<T, H> {
    /// Allocate `capacity` empty buckets.
    ///
    /// Callers have already rejected a zero capacity.
    fn allocate(capacity: usize, hasher: H) -> Self {
        debug_assert!(capacity > 0);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, BucketChain::new);
        debug!("allocated hash table with {} buckets", capacity);
        Self {
            buckets,
            len: 0,
            hasher,
        }
    }

    /// Number of distinct elements in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the table holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The text hash this table places elements with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Cursor at the first element of the first non-empty bucket.
    ///
    /// Equal to [`Self::end()`] when the table is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::begin(&self.buckets)
    }

    /// Cursor at the end position, just past the last item of the last bucket.
    ///
    /// This is the same position for every call until the table is modified.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::end(&self.buckets)
    }

    /// Iterate over all elements in bucket order, then insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets, self.len)
    }
}

impl<T: TextKey + PartialEq, H: BucketHasher> ChainedHashTable<T, H> {
    /// Bucket number that `element` hashes to in this table.
    pub fn bucket_index(&self, element: &T) -> usize {
        let text = element.text_key();
        bucket_array::hash::bucket_index(
            self.hasher.hash_text(text.as_bytes()),
            self.buckets.len(),
        )
    }

    /// Add `element` to the end of its bucket unless an equal element is
    /// already stored there.
    ///
    /// Returns `true` if the element was added, and `false` if it was a
    /// duplicate and the table is unchanged.
    pub fn insert(&mut self, element: T) -> bool {
        let bucket = self.bucket_index(&element);
        match self.buckets[bucket].insert_unique(element) {
            Ok(_) => {
                self.len += 1;
                true
            }
            Err(_) => {
                trace!("dropped duplicate element in bucket {}", bucket);
                false
            }
        }
    }

    /// Look for an element equal to `element`.
    ///
    /// Returns a cursor at the stored element, or one equal to
    /// [`Self::end()`] if there is none. Never modifies the table.
    pub fn find(&self, element: &T) -> Cursor<'_, T> {
        let bucket = self.bucket_index(element);
        match self.buckets[bucket].position(element) {
            Some(item) => Cursor::new(&self.buckets, bucket, item),
            None => self.end(),
        }
    }

    /// Check whether an element equal to `element` is stored.
    pub fn contains(&self, element: &T) -> bool {
        !self.find(element).is_end()
    }

    /// Look up the stored element equal to `element`.
    pub fn get(&self, element: &T) -> Option<&T> {
        self.find(element).get()
    }
}

impl<T: Display, H> ChainedHashTable<T, H> {
    /// Write every element in iteration order, each followed by one space.
    ///
    /// This is the same text as the [`Display`] implementation.
    pub fn dump<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl<T> Default for ChainedHashTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug, H> Debug for ChainedHashTable<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Display, H> Display for ChainedHashTable<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in self {
            write!(f, "{} ", element)?;
        }
        Ok(())
    }
}

impl<'a, T, H> IntoIterator for &'a ChainedHashTable<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: TextKey + PartialEq, H: BucketHasher> Extend<T> for ChainedHashTable<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            let _ = self.insert(element);
        }
    }
}

impl<T: TextKey + PartialEq> FromIterator<T> for ChainedHashTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Builder for creating [`ChainedHashTable`] instances with custom settings
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChainedHashTableBuilder<H = ShiftXor> {
    /// Number of buckets for tables built from here
    capacity: usize,
    /// Text hash for tables built from here
    hasher: H,
}

impl ChainedHashTableBuilder {
    /// Create a new [`ChainedHashTableBuilder`] with default settings:
    /// [`DEFAULT_SIZE`] buckets and the legacy [`ShiftXor`] hash.
    ///
    /// Immediately calling [`Self::build()`] would be equivalent to using
    /// [`ChainedHashTable::new()`].
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_SIZE,
            hasher: ShiftXor::new(),
        }
    }
}

impl Default for ChainedHashTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BucketHasher + Clone> ChainedHashTableBuilder<H> {
    /// Select the number of buckets.
    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// Select a different text hash, keeping the other settings.
    pub fn hasher<G: BucketHasher + Clone>(&self, hasher: G) -> ChainedHashTableBuilder<G> {
        ChainedHashTableBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Build an empty table with the selected options.
    ///
    /// Fails with [`Error::ZeroCapacity`] if the capacity is zero.
    pub fn build<T>(&self) -> Result<ChainedHashTable<T, H>, Error> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(ChainedHashTable::allocate(self.capacity, self.hasher.clone()))
    }

    /// Build a table with the selected options, then insert every element of
    /// `range` in order.
    pub fn build_from<T, I>(&self, range: I) -> Result<ChainedHashTable<T, H>, Error>
    where
        T: TextKey + PartialEq,
        I: IntoIterator<Item = T>,
    {
        let mut table = self.build()?;
        let mut offered = 0_usize;
        for element in range {
            offered += 1;
            let _ = table.insert(element);
        }
        debug!(
            "range build kept {} of {} elements, dropped {} duplicates",
            table.len(),
            offered,
            offered - table.len()
        );
        Ok(table)
    }
}
