//! Read-only reporting helpers over keyed values.

use std::cmp::Ordering;

/// Collect every key whose value ties for the maximum.
///
/// Empty input yields an empty vec. Result order follows input order.
/// Values that do not compare with themselves (NaN) never win.
pub fn tied_maxima<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Vec<K>
where
    V: PartialOrd,
{
    let mut best: Option<V> = None;
    let mut keys = Vec::new();

    for (key, value) in entries {
        if value.partial_cmp(&value).is_none() {
            continue;
        }
        // The first comparable value counts as a new maximum.
        let ordering = match best.as_ref() {
            None => Some(Ordering::Greater),
            Some(current) => value.partial_cmp(current),
        };
        match ordering {
            Some(Ordering::Greater) => {
                best = Some(value);
                keys.clear();
                keys.push(key);
            }
            Some(Ordering::Equal) => keys.push(key),
            _ => {}
        }
    }

    keys
}
