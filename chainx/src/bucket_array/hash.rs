//! Text hashing layer
//!
//! This turns an element into a bucket number in three steps. The element
//! yields its text form through [`TextKey`], a [`BucketHasher`] folds the
//! bytes of that text into a 64-bit word, and [`bucket_index`] reduces the
//! word modulo the number of buckets.
//!
//! The default hasher, [`ShiftXor`], is the legacy shift-xor fold. It's a
//! weak hash but its placement is reproducible, so tables built with it put
//! every key into the same bucket the legacy container would have chosen.
//! The accumulator width is a type parameter ([`HashWord`]) since the legacy
//! fold wraps at the width of the platform's `size_t`.

use num_traits::{AsPrimitive, WrappingShl, Zero};
use std::borrow::Cow;
use std::marker::PhantomData;
use std::ops::{BitOr, BitXor, Not};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can be hashed by their text form
///
/// Equality of elements is still decided by [`PartialEq`]. Two elements that
/// compare equal must produce the same text, otherwise they can land in
/// different buckets and both be kept.
pub trait TextKey {
    /// Borrow or build the text this element is hashed by.
    fn text_key(&self) -> Cow<'_, str>;
}

impl TextKey for str {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TextKey for String {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl TextKey for Box<str> {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TextKey for Rc<str> {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TextKey for Arc<str> {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TextKey for Cow<'_, str> {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl TextKey for char {
    fn text_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<K: TextKey + ?Sized> TextKey for &K {
    fn text_key(&self) -> Cow<'_, str> {
        (**self).text_key()
    }
}

/// Hash function over the text form of a key
pub trait BucketHasher {
    /// Fold the bytes of a key's text into a 64-bit hash word.
    fn hash_text(&self, text: &[u8]) -> u64;
}

/// Unsigned words usable as the [`ShiftXor`] accumulator
pub trait HashWord:
    Copy
    + Zero
    + From<u8>
    + Not<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + WrappingShl
    + AsPrimitive<u64>
{
    /// Widen one text byte the way a signed C `char` promotes to this word.
    ///
    /// Bytes below `0x80` are unchanged. Anything above has its high bits
    /// filled with ones.
    #[inline(always)]
    fn from_text_byte(byte: u8) -> Self {
        let code = Self::from(byte);
        if byte & 0x80 == 0 {
            code
        } else {
            (!Self::zero()).wrapping_shl(8) | code
        }
    }
}

impl<
        T: Copy
            + Zero
            + From<u8>
            + Not<Output = Self>
            + BitOr<Output = Self>
            + BitXor<Output = Self>
            + WrappingShl
            + AsPrimitive<u64>,
    > HashWord for T
{
}

/// The legacy shift-xor string hash
///
/// Starting from zero, every byte of the text is folded in as
/// `h = (h << 2) ^ byte`, wrapping at the width of `W`. Use `u64` to match
/// 64-bit builds of the legacy container and `u32` for 32-bit ones.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ShiftXor<W = u64>(PhantomData<W>);

impl<W> ShiftXor<W> {
    /// Create the hasher. It has no state.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<W> Default for ShiftXor<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: HashWord> BucketHasher for ShiftXor<W> {
    #[inline(always)]
    fn hash_text(&self, text: &[u8]) -> u64 {
        text.iter()
            .fold(W::zero(), |hash, &byte| {
                hash.wrapping_shl(2) ^ W::from_text_byte(byte)
            })
            .as_()
    }
}

/// Reduce a hash word to a bucket number.
///
/// Panics if `num_buckets` is zero. Tables never have zero buckets.
#[inline(always)]
pub(crate) fn bucket_index(hash: u64, num_buckets: usize) -> usize {
    let divisor = u64::try_from(num_buckets).expect("bucket count always fits in a u64");
    usize::try_from(hash % divisor).expect("bucket index is below a usize bucket count")
}

#[cfg(test)]
mod test {
    use super::{bucket_index, BucketHasher, HashWord, ShiftXor, TextKey};
    use std::borrow::Cow;

    #[test]
    fn shift_xor_short_keys() {
        let h = ShiftXor::<u64>::new();
        assert_eq!(h.hash_text(b""), 0);
        assert_eq!(h.hash_text(b"a"), 0x61);
        // ((0x61 << 2) ^ 0x62) = 0x184 ^ 0x62
        assert_eq!(h.hash_text(b"ab"), 0x1e6);
        assert_eq!(h.hash_text(b"abc"), (0x1e6 << 2) ^ 0x63);
    }

    #[test]
    fn shift_xor_wraps_at_word_width() {
        // 40 bytes shift the first one out of a 64-bit word entirely
        let long = [0x7f_u8; 40];
        let mut expect = 0_u64;
        for &b in &long {
            expect = expect.wrapping_shl(2) ^ u64::from(b);
        }
        assert_eq!(ShiftXor::<u64>::new().hash_text(&long), expect);

        let mut expect32 = 0_u32;
        for &b in &long {
            expect32 = expect32.wrapping_shl(2) ^ u32::from(b);
        }
        assert_eq!(
            ShiftXor::<u32>::new().hash_text(&long),
            u64::from(expect32)
        );
    }

    #[test]
    fn high_bytes_sign_extend() {
        assert_eq!(<u64 as HashWord>::from_text_byte(0x41), 0x41);
        assert_eq!(
            <u64 as HashWord>::from_text_byte(0xc3),
            0xffff_ffff_ffff_ffc3
        );
        assert_eq!(<u32 as HashWord>::from_text_byte(0x80), 0xffff_ff80);

        // "é" is 0xc3 0xa9 in UTF-8
        let h = ShiftXor::<u64>::new().hash_text("é".as_bytes());
        let first: u64 = 0xffff_ffff_ffff_ffc3;
        assert_eq!(h, (first << 2) ^ 0xffff_ffff_ffff_ffa9);
    }

    #[test]
    fn index_reduction() {
        assert_eq!(bucket_index(0, 1), 0);
        assert_eq!(bucket_index(0x1e6, 4), 2);
        assert_eq!(bucket_index(u64::MAX, 1_048_576), 1_048_575);
    }

    #[test]
    fn text_key_forms() {
        let owned = String::from("bee");
        assert_eq!(owned.text_key(), "bee");
        assert_eq!("bee".text_key(), "bee");
        assert_eq!((&&owned).text_key(), "bee");
        assert_eq!('x'.text_key(), "x");
        assert!(matches!(owned.text_key(), Cow::Borrowed(_)));
        let shared: std::sync::Arc<str> = "ant".into();
        assert_eq!(shared.text_key(), "ant");
    }
}
