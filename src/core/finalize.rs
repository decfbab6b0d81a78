//! Field deduplication
//!
//! Fields accumulate in a context in insertion order and may repeat names.
//! Before dispatch they are reduced so each name appears once, holding the
//! most recently set value. Winners keep the relative order of the positions
//! they were set at: scanning backwards, each name's first sighting is kept
//! and the survivors are then restored to forward order.

use super::field::Field;
use std::collections::HashSet;

/// Below this many fields a linear scan beats hashing.
const LINEAR_SCAN_LIMIT: usize = 16;

/// Append the distinct fields of `src` to `out` (last value wins).
pub(crate) fn distinct_into(src: &[Field], out: &mut Vec<Field>) {
    let start = out.len();
    out.reserve(src.len());

    if src.len() <= LINEAR_SCAN_LIMIT {
        for field in src.iter().rev() {
            if !out[start..].iter().any(|kept| kept.name == field.name) {
                out.push(field.clone());
            }
        }
    } else {
        let mut seen: HashSet<&str> = HashSet::with_capacity(src.len());
        for field in src.iter().rev() {
            if seen.insert(field.name.as_str()) {
                out.push(field.clone());
            }
        }
    }

    out[start..].reverse();
}

/// Deduplicated copy of `src`.
pub fn distinct_fields(src: &[Field]) -> Vec<Field> {
    let mut out = Vec::with_capacity(src.len());
    distinct_into(src, &mut out);
    out
}
