//! Ordering of resolved version strings

use std::cmp::Ordering;

/// Compare two version strings by their numeric parts
///
/// `1.10.0` sorts after `1.9.0`. Versions whose numeric parts are equal
/// (`1.0.0-alpha01` and `1.0.0-beta01`) fall back to plain string order so
/// that distinct versions never compare equal.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse_parts = |s: &str| -> Vec<u64> {
        s.split(['.', '-', '_', '+'])
            .filter_map(|p| p.parse().ok())
            .collect()
    };

    let parts_a = parse_parts(a);
    let parts_b = parse_parts(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        match pa.cmp(pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    parts_a
        .len()
        .cmp(&parts_b.len())
        .then_with(|| a.cmp(b))
}
