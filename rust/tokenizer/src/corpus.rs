//! Corpus preprocessing.
//!
//! Documents are split on whitespace. The first word of a document is kept
//! as-is and every following word gets the boundary marker as a prefix, so
//! word separation survives without a literal space character. Decoding
//! turns the markers back into spaces.

use std::collections::HashMap;

use crate::alphabet::BOUNDARY_MARKER;

/// Boundary-marked words of a corpus with their occurrence counts.
///
/// Iteration follows first occurrence in the corpus. Training breaks
/// frequency ties by this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    words: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`.
    pub fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&slot) => self.words[slot].1 += 1,
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push((word, 1));
            }
        }
    }

    /// Occurrence count of `word`, if it was seen.
    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&slot| self.words[slot].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sum of all counts.
    pub fn total_words(&self) -> u64 {
        self.words.iter().map(|(_, count)| count).sum()
    }

    /// Words and counts in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.words.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

/// Split one document into boundary-marked words.
pub fn boundary_marked_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().enumerate().map(|(i, word)| {
        if i == 0 {
            word.to_string()
        } else {
            let mut marked = String::with_capacity(word.len() + BOUNDARY_MARKER.len_utf8());
            marked.push(BOUNDARY_MARKER);
            marked.push_str(word);
            marked
        }
    })
}

/// Build the word frequency table of a corpus.
pub fn word_frequencies<I, S>(documents: I) -> WordFrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = WordFrequencyTable::new();
    for document in documents {
        for word in boundary_marked_words(document.as_ref()) {
            table.add(word);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_word_unmarked() {
        let words: Vec<String> = boundary_marked_words("the cat  sat\n").collect();
        assert_eq!(words, vec!["the", "Ġcat", "Ġsat"]);
    }

    #[test]
    fn test_blank_document() {
        assert_eq!(boundary_marked_words("  \t ").count(), 0);
        assert!(word_frequencies(["", "   "]).is_empty());
    }

    #[test]
    fn test_counts_across_documents() {
        let table = word_frequencies(["the cat", "the dog the cat"]);
        assert_eq!(table.get("the"), Some(2));
        assert_eq!(table.get("Ġthe"), Some(1));
        assert_eq!(table.get("Ġcat"), Some(2));
        assert_eq!(table.get("Ġdog"), Some(1));
        assert_eq!(table.get("cat"), None);
        assert_eq!(table.len(), 4);
        assert_eq!(table.total_words(), 6);
    }

    #[test]
    fn test_first_occurrence_order() {
        let table = word_frequencies(["b a", "a b c"]);
        let order: Vec<&str> = table.iter().map(|(word, _)| word).collect();
        assert_eq!(order, vec!["b", "Ġa", "a", "Ġb", "Ġc"]);
    }

    #[test]
    fn test_no_case_folding() {
        let table = word_frequencies(["Hello hello"]);
        assert_eq!(table.get("Hello"), Some(1));
        assert_eq!(table.get("Ġhello"), Some(1));
    }
}
