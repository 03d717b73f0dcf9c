//! Bucket routing: the caller-supplied hash capability and its stock impls.

/// Maps a key to the index of the bucket that stores it.
///
/// The table stores one implementation and consults it once per keyed
/// operation. The result must lie in `[0, num_buckets)` for the table the
/// implementation was handed to, and must be pure: the same key always
/// yields the same index for the lifetime of the table. Routing a key
/// outside the bucket range is a caller bug; the table stops it with a
/// panic rather than touching another chain.
pub trait BucketHash {
    /// Bucket index for `key`.
    fn index(&self, key: u64) -> usize;
}

/// Any plain `Fn(u64) -> usize` serves as a hash function.
impl<F> BucketHash for F
where
    F: Fn(u64) -> usize,
{
    #[inline]
    fn index(&self, key: u64) -> usize {
        self(key)
    }
}

/// Remainder routing: `key % modulus`. With the modulus equal to the
/// table's bucket count, the range contract holds for every key.
#[derive(Copy, Clone, Debug)]
pub struct Modulo(pub usize);

impl BucketHash for Modulo {
    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.0 as u64) as usize
    }
}
