//! Chunk planning.

use super::ByteRange;

/// Partition `[0, file_size)` into consecutive inclusive ranges of
/// `chunk_size` bytes. The last range is shorter when `file_size` is not a
/// multiple of `chunk_size`.
///
/// Returns an empty vec when `file_size` is 0. A `chunk_size` of 0 is
/// treated as 1.
pub fn plan_chunks(file_size: u64, chunk_size: u64) -> Vec<ByteRange> {
    let chunk_size = chunk_size.max(1);
    let count = file_size.div_ceil(chunk_size);

    let mut out = Vec::with_capacity(count as usize);
    let mut start = 0u64;
    while start < file_size {
        let end = (start + chunk_size - 1).min(file_size - 1);
        out.push(ByteRange::new(start, end));
        start = end + 1;
    }
    out
}
