//! Deterministic similarity scores (0-100)
//!
//! `ratio` is the Indel similarity `2·LCS / (|a| + |b|)` from `rapidfuzz`,
//! scaled to 100 and rounded half-to-even. `partial_ratio` aligns the
//! shorter string against the best window of the longer one. Both operate on
//! Unicode scalar values.

use rapidfuzz::fuzz;

/// Similarity of two strings, 0-100.
///
/// Two empty strings score 100; one empty string scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best similarity of the shorter string against any window of the longer
/// one, 0-100.
///
/// Windows are every full-length window of the longer string plus the
/// shorter prefix and suffix windows at its edges. Any empty input scores 0.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let (len_s, len_l) = (short.len(), long.len());

    let prefixes = (1..len_s).map(|end| &long[..end]);
    let full = (0..=len_l - len_s).map(|start| &long[start..start + len_s]);
    let suffixes = (len_l - len_s + 1..len_l).map(|start| &long[start..]);

    let mut best = 0;
    for window in prefixes.chain(full).chain(suffixes) {
        best = best.max(ratio_chars(short, window));
        if best == 100 {
            break;
        }
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100,
        (true, false) | (false, true) => return 0,
        _ => {}
    }

    let similarity = fuzz::ratio(a.iter().copied(), b.iter().copied());
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identity_and_disjoint() {
        assert_eq!(ratio("john smith", "john smith"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("abc", ""), 0);
    }

    #[test]
    fn test_ratio_known_values() {
        // LCS("kitten", "sitting") = 4 -> 8 / 13
        assert_eq!(ratio("kitten", "sitting"), 62);
        // LCS = 17 of 20 + 20
        assert_eq!(ratio("abcdefghijklmnopqrst", "abcdefghijklmnopquvw"), 85);
        // LCS = 21 of 25 + 25
        assert_eq!(ratio("abcdefghijklmnopqrstuvwxy", "abcdefghijklmnopqrstu1234"), 84);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        assert_eq!(ratio("jon smith", "john smith"), ratio("john smith", "jon smith"));
    }

    #[test]
    fn test_half_even_rounding() {
        // 2·1 / 16 = 12.5 -> 12
        assert_eq!(ratio("a", "abcdefghijklmno"), 12);
        // 2·3 / 16 = 37.5 -> 38
        assert_eq!(ratio("abc", "abcdefghijklm"), 38);
        // 2·1 / 3 = 66.7 -> 67
        assert_eq!(ratio("a", "ab"), 67);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert_eq!(ratio("müller", "muller"), 83);
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(partial_ratio("john smith", "mr john smith junior"), 100);
        assert_eq!(partial_ratio("mr john smith junior", "john smith"), 100);
    }

    #[test]
    fn test_partial_ratio_edge_windows() {
        // "smithx" is best aligned with the 4-char suffix "smit"
        assert_eq!(partial_ratio("smithx", "john smit"), 80);
        assert_eq!(partial_ratio("", "abc"), 0);
        assert_eq!(partial_ratio("abc", ""), 0);
    }

    #[test]
    fn test_partial_ratio_not_below_ratio() {
        let pairs = [
            ("john smith", "smith john"),
            ("ali hassan", "ali hassan mohamed"),
            ("kim", "kim jong un"),
        ];
        for (a, b) in pairs {
            assert!(partial_ratio(a, b) >= ratio(a, b), "{} / {}", a, b);
        }
    }
}
