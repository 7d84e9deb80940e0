use std::num::NonZeroUsize;
use std::slice::Chunks;

/// Lazily split `items` into contiguous slices of `size` items.
///
/// Every slice holds exactly `size` items except possibly the last, which
/// holds the remainder. An empty input yields no slices.
pub fn chunks<T>(items: &[T], size: NonZeroUsize) -> Chunks<'_, T> {
    items.chunks(size.get())
}

/// Number of slices [`chunks`] yields for `len` items
pub fn chunk_count(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get())
}
