//! Display-string helpers for `|`-delimited multi-value fields.

/// Pair two parallel `|`-delimited lists into one display string.
///
/// Lists that split to the same length combine elementwise as `"a (b)"`
/// joined with `"; "`. Lists of different lengths fall back to the unsplit
/// raw values joined as `"a: b"`. The downstream import format relies on
/// the fallback shape, so the asymmetry is intentional.
pub fn zip_columns(col_a: &str, col_b: &str) -> Option<String> {
    if col_a.is_empty() && col_b.is_empty() {
        return None;
    }

    let a_parts: Vec<&str> = col_a.split('|').collect();
    let b_parts: Vec<&str> = col_b.split('|').collect();

    if a_parts.len() == b_parts.len() {
        let pairs: Vec<String> = a_parts
            .iter()
            .zip(&b_parts)
            .map(|(a, b)| format!("{a} ({b})"))
            .collect();
        Some(pairs.join("; "))
    } else {
        Some(format!("{col_a}: {col_b}"))
    }
}

/// Re-delimit a `|`-separated list for display: `"a|b"` becomes `"a; b"`.
pub fn relist(value: &str) -> String {
    value.split('|').collect::<Vec<_>>().join("; ")
}
