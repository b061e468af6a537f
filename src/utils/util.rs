//! Small pure helpers shared by notation and move generation.

/// Clamps a row or column index into `0..=7` so out-of-range tiles can still
/// be rendered.
#[inline]
pub fn clamp_to_board(index: i8) -> u8 {
    index.clamp(0, 7) as u8
}

/// Returns `true` when `getter` yields a distinct value for every item.
pub fn unique_among_all<T, K, F>(items: &[T], getter: F) -> bool
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut seen: Vec<K> = Vec::with_capacity(items.len());
    for item in items {
        let key = getter(item);
        if seen.contains(&key) {
            return false;
        }
        seen.push(key);
    }
    true
}
