//! Spreadsheet-column style letter suffixes (bijective base-26).

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Letter suffix for the 1-based position `n`: 1 -> "a", 26 -> "z",
/// 27 -> "aa", 52 -> "az", 53 -> "ba", ...
///
/// `n == 0` has no digits and yields the empty string.
pub fn nth_suffix(n: u64) -> String {
    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        let rem = (rest - 1) % 26;
        digits.push(ALPHABET[rem as usize]);
        rest = (rest - 1) / 26;
    }
    digits.reverse();
    // Only ASCII letters are ever pushed.
    digits.into_iter().map(char::from).collect()
}

/// Inverse of [`nth_suffix`]: the 1-based rank of a lowercase suffix.
///
/// Returns `None` for empty input, characters outside `a..=z`, or ranks
/// that do not fit in a `u64`.
pub fn suffix_rank(suffix: &str) -> Option<u64> {
    if suffix.is_empty() {
        return None;
    }
    suffix.bytes().try_fold(0u64, |acc, b| {
        if !b.is_ascii_lowercase() {
            return None;
        }
        acc.checked_mul(26)?.checked_add(u64::from(b - b'a') + 1)
    })
}

/// Restartable, lazy sequence "a", "b", ..., "z", "aa", ...
pub fn suffixes() -> impl Iterator<Item = String> {
    (1u64..).map(nth_suffix)
}
