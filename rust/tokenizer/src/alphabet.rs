//! The fixed base alphabet that seeds every vocabulary.
//!
//! Id 0 is the word-boundary marker `Ġ`. It is followed by the lowercase
//! ASCII letters, the ASCII punctuation characters and the decimal digits,
//! in that order. Characters outside this set can still be learned as parts
//! of merged symbols, but never get an id of their own.

use std::iter;

/// Marker prefixed to every word of a document except the first.
pub const BOUNDARY_MARKER: char = '\u{0120}';

/// Vocabulary id of [`BOUNDARY_MARKER`], also the default unknown id.
pub const BOUNDARY_ID: u32 = 0;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
const DIGITS: &str = "0123456789";

/// Number of symbols in the base alphabet (marker + 26 + 32 + 10).
pub const BASE_ALPHABET_SIZE: usize = 69;

/// Base symbols in id order.
pub fn base_symbols() -> impl Iterator<Item = char> {
    iter::once(BOUNDARY_MARKER)
        .chain(LETTERS.chars())
        .chain(PUNCTUATION.chars())
        .chain(DIGITS.chars())
}

/// Whether `c` has its own id in every vocabulary.
pub fn is_base_symbol(c: char) -> bool {
    c == BOUNDARY_MARKER
        || c.is_ascii_lowercase()
        || c.is_ascii_punctuation()
        || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_size() {
        assert_eq!(base_symbols().count(), BASE_ALPHABET_SIZE);
    }

    #[test]
    fn test_marker_is_first() {
        assert_eq!(base_symbols().next(), Some(BOUNDARY_MARKER));
        assert_eq!(BOUNDARY_ID, 0);
    }

    #[test]
    fn test_alphabet_order() {
        let symbols: Vec<char> = base_symbols().collect();
        assert_eq!(symbols[1], 'a');
        assert_eq!(symbols[26], 'z');
        assert_eq!(symbols[27], '!');
        assert_eq!(symbols[58], '~');
        assert_eq!(symbols[59], '0');
        assert_eq!(symbols[68], '9');
    }

    #[test]
    fn test_is_base_symbol_agrees_with_list() {
        for c in base_symbols() {
            assert!(is_base_symbol(c), "{c:?} should be a base symbol");
        }
        assert!(!is_base_symbol('A'));
        assert!(!is_base_symbol(' '));
        assert!(!is_base_symbol('é'));
    }
}
