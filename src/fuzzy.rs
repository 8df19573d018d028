//! Fuzzy section-name matching.
//!
//! Headings are written by hand, so lookups tolerate case, plural forms, the
//! split "Required/Optional Inputs" layout and small typos.

/// Largest edit distance still treated as a typo.
const MAX_TYPO_DISTANCE: usize = 2;

/// Distance relative to the longer name must stay strictly below this ratio.
const MAX_TYPO_RATIO: f64 = 0.2;

/// Classic Levenshtein distance over chars, using two rolling rows.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Whether `found` looks like a typo of `expected`.
///
/// Comparison is case-insensitive. Both the absolute and the relative
/// distance must be small, which keeps "Inputs" and "Outputs" apart.
pub fn is_similar_section(found: &str, expected: &str) -> bool {
    let found = found.trim().to_lowercase();
    let expected = expected.trim().to_lowercase();
    if found.is_empty() || expected.is_empty() {
        return false;
    }

    let distance = edit_distance(&found, &expected);
    if distance == 0 {
        return true;
    }
    if distance > MAX_TYPO_DISTANCE {
        return false;
    }

    let longest = found.chars().count().max(expected.chars().count());
    (distance as f64 / longest as f64) < MAX_TYPO_RATIO
}

/// Whether a heading titled `actual` satisfies a request for `expected`.
pub fn matches_section_name(actual: &str, expected: &str) -> bool {
    let actual = actual.trim();
    let expected = expected.trim();
    if actual.is_empty() || expected.is_empty() {
        return false;
    }

    if actual.eq_ignore_ascii_case(expected) {
        return true;
    }

    // singular/plural
    if actual.eq_ignore_ascii_case(&format!("{expected}s"))
        || format!("{actual}s").eq_ignore_ascii_case(expected)
    {
        return true;
    }

    if expected.eq_ignore_ascii_case("Inputs")
        && (actual.eq_ignore_ascii_case("Required Inputs")
            || actual.eq_ignore_ascii_case("Optional Inputs"))
    {
        return true;
    }

    is_similar_section(actual, expected)
}
