use std::cmp::Ordering;

/// Compare two dotted version strings segment-by-segment.
///
/// Segments are compared numerically up to the length of the longer string;
/// a missing or non-numeric segment counts as `0`. This drives the
/// upgrade-eligibility decision, so it must stay a pure function.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use langpack_manager::version::compare_versions;
///
/// assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
/// assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let max_len = a_parts.len().max(b_parts.len());

    for i in 0..max_len {
        let part_a = segment(&a_parts, i);
        let part_b = segment(&b_parts, i);
        match part_a.cmp(&part_b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Numeric value of the i-th segment; missing or non-numeric segments are 0.
fn segment(parts: &[&str], i: usize) -> u64 {
    parts
        .get(i)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
