//! Vocabulary management.
//!
//! The vocabulary starts with the 69 base symbols (see [`crate::alphabet`])
//! and grows by one merged symbol per learned merge rule. Ids are positions
//! in the list: they are assigned once and never reused or reordered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::alphabet::{base_symbols, BASE_ALPHABET_SIZE};

/// Ordered list of symbols. A symbol's id is its position.
///
/// Serialized as a plain JSON array of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    /// Id → symbol
    symbols: Vec<String>,

    /// Symbol → first id carrying it
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    /// Create a vocabulary holding only the base alphabet.
    pub fn base() -> Self {
        base_symbols().map(String::from).collect::<Vec<_>>().into()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Append a symbol and return its id.
    ///
    /// Appending a string that is already present still takes a new id;
    /// lookups by string keep resolving to the earlier one.
    pub fn push(&mut self, symbol: String) -> u32 {
        let id = self.symbols.len() as u32;
        self.ids.entry(symbol.clone()).or_insert(id);
        self.symbols.push(symbol);
        id
    }

    /// Id of `symbol`, if present.
    pub fn id_of(&self, symbol: &str) -> Option<u32> {
        self.ids.get(symbol).copied()
    }

    /// Symbol carried by `id`, if in range.
    pub fn symbol(&self, id: u32) -> Option<&str> {
        self.symbols.get(id as usize).map(String::as_str)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Whether the first [`BASE_ALPHABET_SIZE`] entries are the base alphabet.
    pub fn starts_with_base_alphabet(&self) -> bool {
        self.symbols.len() >= BASE_ALPHABET_SIZE
            && base_symbols()
                .zip(&self.symbols)
                .all(|(c, symbol)| symbol.chars().eq(std::iter::once(c)))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::base()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Vocabulary {}

impl From<Vec<String>> for Vocabulary {
    fn from(symbols: Vec<String>) -> Self {
        let mut ids = HashMap::with_capacity(symbols.len());
        for (id, symbol) in symbols.iter().enumerate() {
            ids.entry(symbol.clone()).or_insert(id as u32);
        }
        Self { symbols, ids }
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.symbols
    }
}
