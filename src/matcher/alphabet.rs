//! Pattern alphabet for the bit-parallel scan.
//!
//! Each distinct pattern character maps to a bitmask with one bit per
//! occurrence position, MSB-first: bit `pattern.len() - i - 1` is set when the
//! character occurs at pattern position `i`. Characters absent from the
//! pattern simply have no entry; lookups fall back to an all-zero mask.

use std::collections::HashMap;

/// Build the character -> position-mask table for `pattern`.
///
/// Callers must have verified `pattern.len() <= 32` already; the mask is a
/// `u32` and longer patterns cannot be encoded.
pub(crate) fn alphabet(pattern: &[char]) -> HashMap<char, u32> {
    let mut table: HashMap<char, u32> = HashMap::with_capacity(pattern.len());
    for (i, &ch) in pattern.iter().enumerate() {
        *table.entry(ch).or_insert(0) |= 1 << (pattern.len() - i - 1);
    }
    table
}
