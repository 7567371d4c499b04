//! Circular indexing for whole-clip wraparound reads.

/// Mathematical floor-mod of `index` by `len`: always in `[0, len)`.
///
/// Unlike `%`, a negative `index` wraps from the end, so `wrap_index(-1, 4)`
/// is 3. `len` must be non-zero.
#[inline]
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Source frame for output frame `frame` when the clip is rolled forward by
/// `offset` frames.
#[inline]
pub fn source_frame(frame: usize, offset: i64, total_frames: usize) -> usize {
    wrap_index(frame as i64 - offset, total_frames)
}
