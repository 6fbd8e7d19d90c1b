//! Bounds-checked linear search and insertion (lfind, lsearch).
//!
//! The table is a flat, caller-owned byte sequence of `count` elements, each
//! `width` bytes, scanned front-to-back in element strides. The comparator
//! follows the three-way-compare convention; only the zero (equal) case is
//! observed. Unlike the C originals, every size is validated before the
//! first comparison and the inserting variant checks that the caller really
//! reserved a spare slot before copying the key in.

use thiserror::Error;

use crate::errno::{self, ErrorKind, FailureKind};

/// Largest byte span a table may cover.
const MAX_TABLE_BYTES: usize = isize::MAX as usize;

/// Validation failures for `lfind`/`lsearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A populated table needs a nonzero element width.
    #[error("element width must be nonzero")]
    ZeroWidth,
    /// The key slice is shorter than one element.
    #[error("key is shorter than the element width")]
    KeyTooShort,
    /// The table slice is shorter than `count * width` bytes.
    #[error("table is shorter than count * width bytes")]
    TableTooShort,
    /// `lsearch` found no match and the table has no room for one more element.
    #[error("no reserved slot for insertion")]
    NoSpareSlot,
    /// `count * width` exceeds the maximum representable size.
    #[error("table spans more than the maximum representable size")]
    TableTooLarge,
}

impl FailureKind for SearchError {
    fn kind(&self) -> ErrorKind {
        match self {
            SearchError::TableTooLarge => ErrorKind::Range,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Searches `table` for the first element the comparator reports equal to
/// `key`.
///
/// Returns `Ok(Some(element))` on a match, `Ok(None)` when no element
/// matches. A zero-count table succeeds trivially without inspecting the key
/// or the table. Never mutates the count. O(n), stable first-match order.
pub fn lfind<'a, F>(
    key: &[u8],
    table: &'a [u8],
    count: usize,
    width: usize,
    cmp: F,
) -> Result<Option<&'a [u8]>, SearchError>
where
    F: Fn(&[u8], &[u8]) -> i32,
{
    lfind_with(key, table, count, width, |elem, key, _ctx| cmp(elem, key), &())
}

/// `lfind` with an opaque context value threaded into every comparison.
pub fn lfind_with<'a, C, F>(
    key: &[u8],
    table: &'a [u8],
    count: usize,
    width: usize,
    cmp: F,
    context: &C,
) -> Result<Option<&'a [u8]>, SearchError>
where
    C: ?Sized,
    F: Fn(&[u8], &[u8], &C) -> i32,
{
    errno::observe(lfind_with_impl(key, table, count, width, cmp, context))
}

fn lfind_with_impl<'a, C, F>(
    key: &[u8],
    table: &'a [u8],
    count: usize,
    width: usize,
    cmp: F,
    context: &C,
) -> Result<Option<&'a [u8]>, SearchError>
where
    C: ?Sized,
    F: Fn(&[u8], &[u8], &C) -> i32,
{
    if count == 0 {
        return Ok(None);
    }
    validate(key, table.len(), count, width)?;
    Ok(scan(key, table, count, width, &cmp, context).map(|at| &table[at..at + width]))
}

/// Searches `table` for `key` and appends it when absent.
///
/// On a match, behaves exactly like [`lfind`] and leaves `count` alone. On a
/// miss, copies `width` bytes of `key` into the slot immediately past the
/// last element, increments `count`, and returns the appended slot. The
/// caller must have reserved backing storage for at least one extra element;
/// a miss without that room fails with [`SearchError::NoSpareSlot`] and
/// mutates nothing.
pub fn lsearch<'a, F>(
    key: &[u8],
    table: &'a mut [u8],
    count: &mut usize,
    width: usize,
    cmp: F,
) -> Result<&'a mut [u8], SearchError>
where
    F: Fn(&[u8], &[u8]) -> i32,
{
    lsearch_with(key, table, count, width, |elem, key, _ctx| cmp(elem, key), &())
}

/// `lsearch` with an opaque context value threaded into every comparison.
pub fn lsearch_with<'a, C, F>(
    key: &[u8],
    table: &'a mut [u8],
    count: &mut usize,
    width: usize,
    cmp: F,
    context: &C,
) -> Result<&'a mut [u8], SearchError>
where
    C: ?Sized,
    F: Fn(&[u8], &[u8], &C) -> i32,
{
    errno::observe(lsearch_with_impl(key, table, count, width, cmp, context))
}

fn lsearch_with_impl<'a, C, F>(
    key: &[u8],
    table: &'a mut [u8],
    count: &mut usize,
    width: usize,
    cmp: F,
    context: &C,
) -> Result<&'a mut [u8], SearchError>
where
    C: ?Sized,
    F: Fn(&[u8], &[u8], &C) -> i32,
{
    // The inserting variant always needs a usable key and width, even for an
    // empty table: the miss path copies `width` bytes in.
    if width == 0 {
        return Err(SearchError::ZeroWidth);
    }
    if key.len() < width {
        return Err(SearchError::KeyTooShort);
    }
    validate(key, table.len(), *count, width)?;

    let at = match scan(key, table, *count, width, &cmp, context) {
        Some(at) => at,
        None => {
            let end = (*count)
                .checked_add(1)
                .and_then(|n| n.checked_mul(width))
                .ok_or(SearchError::TableTooLarge)?;
            if end > table.len() {
                return Err(SearchError::NoSpareSlot);
            }
            let at = end - width;
            table[at..end].copy_from_slice(&key[..width]);
            *count += 1;
            at
        }
    };
    Ok(&mut table[at..at + width])
}

/// Size validation shared by both entry points.
fn validate(key: &[u8], table_len: usize, count: usize, width: usize) -> Result<(), SearchError> {
    if count == 0 {
        return Ok(());
    }
    if width == 0 {
        return Err(SearchError::ZeroWidth);
    }
    let span = count.checked_mul(width).ok_or(SearchError::TableTooLarge)?;
    if span > MAX_TABLE_BYTES {
        return Err(SearchError::TableTooLarge);
    }
    if key.len() < width {
        return Err(SearchError::KeyTooShort);
    }
    if table_len < span {
        return Err(SearchError::TableTooShort);
    }
    Ok(())
}

/// Front-to-back stride scan. Returns the byte offset of the first element
/// the comparator reports equal, or `None`.
fn scan<C, F>(key: &[u8], table: &[u8], count: usize, width: usize, cmp: &F, context: &C) -> Option<usize>
where
    C: ?Sized,
    F: Fn(&[u8], &[u8], &C) -> i32,
{
    (0..count)
        .map(|i| i * width)
        .find(|&at| cmp(&table[at..at + width], &key[..width], context) == 0)
}
