//! Storage for one bucket of the table
//!
//! A [`Chain`] holds every element whose text hashed to its bucket. The only
//! supported write is appending an element that isn't already present, so a
//! chain never holds duplicates and always lists its items oldest first.
//! Items are addressed by their index within the chain, which stays valid
//! for as long as the chain is not mutated.

use std::ops::Range;

/// One bucket's worth of colliding elements, in arrival order
#[cfg_attr(feature = "bucket-array", visibility::make(pub))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Chain<T> {
    /// Items stored in this bucket, oldest first
    items: Vec<T>,
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Chain<T> {
    /// Create a new empty chain. Does not allocate.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items in this chain.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the chain has no items.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the valid item range for this chain.
    ///
    /// The end of the range is the chain's end position.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn item_range(&self) -> Range<usize> {
        0..self.items.len()
    }

    /// Look up one item, or `None` at or past the end position.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn item(&self, item: usize) -> Option<&T> {
        self.items.get(item)
    }
}

impl<T: PartialEq> Chain<T> {
    /// Find the index of the item equal to `value`, with a linear scan.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    pub(crate) fn position(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Append a new item unless an equal one is already present.
    ///
    /// On success returns the index of the new item. If an equal item exists,
    /// makes no changes and hands `value` back as the error.
    #[cfg_attr(feature = "bucket-array", visibility::make(pub))]
    pub(crate) fn insert_unique(&mut self, value: T) -> Result<usize, T> {
        if self.position(&value).is_some() {
            Err(value)
        } else {
            self.items.push(value);
            Ok(self.items.len() - 1)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Chain;

    #[test]
    fn append_keeps_arrival_order() {
        let mut chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.insert_unique("cat"), Ok(0));
        assert_eq!(chain.insert_unique("ant"), Ok(1));
        assert_eq!(chain.insert_unique("cat"), Err("cat"));
        assert_eq!(chain.insert_unique("bee"), Ok(2));
        assert_eq!(chain.item_range(), 0..3);
        let items: Vec<_> = chain.item_range().filter_map(|i| chain.item(i)).collect();
        assert_eq!(items, [&"cat", &"ant", &"bee"]);
    }

    #[test]
    fn lookup_by_index_and_value() {
        let mut chain = Chain::new();
        for word in ["x", "y", "z"] {
            assert!(chain.insert_unique(word.to_owned()).is_ok());
        }
        assert_eq!(chain.position(&"y".to_owned()), Some(1));
        assert_eq!(chain.position(&"w".to_owned()), None);
        assert_eq!(chain.item(2).map(String::as_str), Some("z"));
        assert_eq!(chain.item(3), None);
        assert_eq!(chain.len(), 3);
    }
}
