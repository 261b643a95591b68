//! Positions within a table, and iteration over its elements
//!
//! A [`Cursor`] names one position in the bucket array: a bucket number and
//! an item index within that bucket's chain. It also remembers the last
//! bucket, which bounds every forward step. The end position is the end of
//! that last bucket's chain, whether or not the chain is empty.
//!
//! Cursors compare by position, never by the value they point at. That makes
//! them usable the way the legacy container's iterators were: compare with
//! [`crate::ChainedHashTable::end()`], read, then advance.
//!
//! [`Iter`] wraps a cursor in the standard [`Iterator`] interface.

use crate::bucket_array::chain::Chain;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;

/// Read-only, forward-only position in a [`crate::ChainedHashTable`]
///
/// Cursors borrow the table, so the table can't be modified while any
/// cursor into it is alive.
pub struct Cursor<'a, T> {
    /// The whole bucket array of the table this cursor points into
    buckets: &'a [Chain<T>],
    /// Current bucket number
    bucket: usize,
    /// Current item index within the current bucket
    item: usize,
    /// The last bucket, which bounds every advance and holds the end position
    last_bucket: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Position a cursor at a specific item in a specific bucket.
    ///
    /// The item index may equal the bucket length only for the last bucket.
    pub(crate) fn new(buckets: &'a [Chain<T>], bucket: usize, item: usize) -> Self {
        Self {
            buckets,
            bucket,
            item,
            last_bucket: buckets.len().saturating_sub(1),
        }
    }

    /// Position a cursor at the first element of the first non-empty bucket,
    /// or at the end position if every bucket is empty.
    pub(crate) fn begin(buckets: &'a [Chain<T>]) -> Self {
        match buckets.iter().position(|chain| !chain.is_empty()) {
            Some(bucket) => Self::new(buckets, bucket, 0),
            None => Self::end(buckets),
        }
    }

    /// Position a cursor at the end of the last bucket.
    pub(crate) fn end(buckets: &'a [Chain<T>]) -> Self {
        let last_bucket = buckets.len().saturating_sub(1);
        let item = buckets
            .get(last_bucket)
            .map_or(0, |chain| chain.item_range().end);
        Self::new(buckets, last_bucket, item)
    }

    /// Check whether this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.bucket == self.last_bucket && self.get().is_none()
    }

    /// Bucket number of the current position.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    /// Look up the element at the current position.
    ///
    /// Returns `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.buckets
            .get(self.bucket)
            .and_then(|chain| chain.item(self.item))
    }

    /// Step to the next element, skipping empty buckets.
    ///
    /// Moves to the next item in the current bucket. If that runs off the end
    /// of a bucket other than the last, moves on to the first item of the next
    /// non-empty bucket, stopping early at the last bucket. Reaching an empty
    /// last bucket this way leaves the cursor at the end position.
    ///
    /// Panics if the cursor is already at the end position.
    pub fn advance(&mut self) {
        assert!(!self.is_end(), "advanced a cursor past the end of its table");

        self.item += 1;
        if self.item == self.buckets[self.bucket].len() && self.bucket != self.last_bucket {
            self.bucket += 1;
            while self.bucket != self.last_bucket && self.buckets[self.bucket].is_empty() {
                self.bucket += 1;
            }
            self.item = 0;
        }
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            bucket: self.bucket,
            item: self.item,
            last_bucket: self.last_bucket,
        }
    }
}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.buckets.as_ptr(), other.buckets.as_ptr())
            && self.bucket == other.bucket
            && self.item == other.item
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("bucket", &self.bucket)
            .field("item", &self.item)
            .field("last_bucket", &self.last_bucket)
            .finish()
    }
}

/// Iterator over the elements of a [`crate::ChainedHashTable`]
///
/// Yields elements in ascending bucket order, and in insertion order within
/// each bucket.
pub struct Iter<'a, T> {
    /// Position of the next element to yield
    cursor: Cursor<'a, T>,
    /// Number of elements not yet yielded
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Iterate over a whole bucket array holding `len` elements.
    pub(crate) fn new(buckets: &'a [Chain<T>], len: usize) -> Self {
        Self {
            cursor: Cursor::begin(buckets),
            remaining: len,
        }
    }

    /// The position of the next element this iterator would yield.
    pub fn cursor(&self) -> Cursor<'a, T> {
        self.cursor.clone()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_end() {
            return None;
        }
        let item = self.cursor.get();
        self.cursor.advance();
        self.remaining = self.remaining.saturating_sub(1);
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}
