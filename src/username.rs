//! Ordinal to username enumeration
//!
//! Candidate usernames are produced by reading an ordinal as a numeral in
//! base 37 over the characters allowed in a username. Ordinals below the base
//! map to a single symbol, so `0` is `"a"` rather than an empty prefix.

/// Characters valid in a username, in digit-value order
pub const USERNAME_ALPHABET: &[u8; 37] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

/// Longest username the upstream site accepts
pub const MAX_USERNAME_LENGTH: u32 = 39;

/// Maps ordinals onto candidate usernames
///
/// The enumeration is injective and total over `[0, bound())`.
///
/// # Example
///
/// ```
/// use hubcrawl::username::UsernameEnumerator;
///
/// let enumerator = UsernameEnumerator::default();
/// assert_eq!(enumerator.ordinal_to_username(1), "b");
/// assert_eq!(enumerator.ordinal_to_username(100), "c0");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UsernameEnumerator {
    max_length: u32,
}

impl Default for UsernameEnumerator {
    fn default() -> Self {
        Self::new(MAX_USERNAME_LENGTH)
    }
}

impl UsernameEnumerator {
    /// Creates an enumerator whose ordinal space is `[0, 37^(max_length + 1))`
    pub fn new(max_length: u32) -> Self {
        Self { max_length }
    }

    /// Radix of the numeral system
    pub fn base() -> u128 {
        USERNAME_ALPHABET.len() as u128
    }

    /// Exclusive upper bound of the ordinal space
    ///
    /// Saturates to `u128::MAX` when `37^(max_length + 1)` does not fit; every
    /// `u128` ordinal still yields a username of at most 25 symbols.
    pub fn bound(&self) -> u128 {
        Self::base()
            .checked_pow(self.max_length + 1)
            .unwrap_or(u128::MAX)
    }

    /// Converts an ordinal into its username, most significant symbol first
    pub fn ordinal_to_username(&self, ordinal: u128) -> String {
        let base = Self::base();
        let mut symbols = Vec::new();
        let mut n = ordinal;

        while n >= base {
            symbols.push(USERNAME_ALPHABET[(n % base) as usize]);
            n /= base;
        }
        symbols.push(USERNAME_ALPHABET[n as usize]);
        symbols.reverse();

        symbols.into_iter().map(char::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_single_symbol_range() {
        let enumerator = UsernameEnumerator::default();
        for n in 0..37u128 {
            let name = enumerator.ordinal_to_username(n);
            assert_eq!(name.len(), 1);
            assert_eq!(name.as_bytes()[0], USERNAME_ALPHABET[n as usize]);
        }
    }

    #[test]
    fn test_known_values() {
        let enumerator = UsernameEnumerator::default();
        assert_eq!(enumerator.ordinal_to_username(0), "a");
        assert_eq!(enumerator.ordinal_to_username(1), "b");
        assert_eq!(enumerator.ordinal_to_username(26), "0");
        assert_eq!(enumerator.ordinal_to_username(36), "-");
        assert_eq!(enumerator.ordinal_to_username(37), "ba");
        assert_eq!(enumerator.ordinal_to_username(100), "c0");
        assert_eq!(enumerator.ordinal_to_username(37 * 37 - 1), "--");
        assert_eq!(enumerator.ordinal_to_username(37 * 37), "baa");
    }

    #[test]
    fn test_injective_over_sample() {
        let enumerator = UsernameEnumerator::default();
        let mut seen = HashSet::new();

        // Dense low range plus a sparse sweep through large ordinals
        let dense = 0..5_000u128;
        let sparse = (0..5_000u128).map(|i| 1_000_003u128 * i * i + 7_919);

        for ordinal in dense.chain(sparse) {
            let name = enumerator.ordinal_to_username(ordinal);
            assert!(seen.insert(name), "duplicate username for {}", ordinal);
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn test_bound() {
        assert_eq!(UsernameEnumerator::new(0).bound(), 37);
        assert_eq!(UsernameEnumerator::new(1).bound(), 37 * 37);
        assert_eq!(UsernameEnumerator::default().bound(), u128::MAX);
    }

    #[test]
    fn test_bound_saturates_past_25_symbols() {
        assert_eq!(UsernameEnumerator::new(23).bound(), 37u128.pow(24));
        assert_eq!(UsernameEnumerator::new(24).bound(), u128::MAX);

        let enumerator = UsernameEnumerator::default();
        assert_eq!(enumerator.ordinal_to_username(u128::MAX).len(), 25);
        assert_eq!(enumerator.ordinal_to_username(37u128.pow(24) - 1).len(), 24);
    }

    #[test]
    fn test_large_ordinal_within_length_limit() {
        let enumerator = UsernameEnumerator::default();
        let name = enumerator.ordinal_to_username(u128::MAX);
        assert!(name.len() <= MAX_USERNAME_LENGTH as usize);
        assert!(name.bytes().all(|b| USERNAME_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_last_ordinal_of_small_space() {
        let enumerator = UsernameEnumerator::new(1);
        let last = enumerator.ordinal_to_username(enumerator.bound() - 1);
        assert_eq!(last, "--");
    }
}
