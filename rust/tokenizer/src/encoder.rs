//! Text → token ids.
//!
//! Words are boundary-marked exactly as during training, split into
//! characters, and then every merge rule is replayed in learned order.
//! Replaying a best-first ranking on the new text would give different,
//! non-reproducible splits; the recorded order is the model.

use rayon::prelude::*;
use std::collections::HashMap;

use crate::corpus::boundary_marked_words;
use crate::merges::merge_pair;
use crate::model::Model;

/// Interned id for characters the model has never seen. No rule matches it.
const UNSEEN_SYMBOL: u32 = u32::MAX;

impl Model {
    /// Encode `text` into vocabulary ids.
    ///
    /// Symbols missing from the vocabulary map to [`Model::unknown_id`].
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let mut ids = Vec::new();
        let mut cache: HashMap<String, Vec<u32>> = HashMap::new();

        for word in boundary_marked_words(text) {
            match cache.get(&word) {
                Some(encoded) => ids.extend_from_slice(encoded),
                None => {
                    let encoded = self.encode_word(&word);
                    ids.extend_from_slice(&encoded);
                    cache.insert(word, encoded);
                }
            }
        }

        ids
    }

    /// Encode many texts in parallel.
    pub fn encode_batch<S>(&self, texts: &[S]) -> Vec<Vec<u32>>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.encode(text.as_ref())).collect()
    }

    /// Split one boundary-marked word and map its symbols to vocabulary ids.
    fn encode_word(&self, word: &str) -> Vec<u32> {
        let mut split: Vec<u32> = word
            .chars()
            .map(|c| self.symbols.get_char(c).unwrap_or(UNSEEN_SYMBOL))
            .collect();

        for rule in &self.rules {
            if split.len() < 2 {
                break;
            }
            merge_pair(&mut split, rule.pair, rule.merged);
        }

        split
            .into_iter()
            .map(|symbol| {
                self.vocab_ids
                    .get(symbol as usize)
                    .copied()
                    .flatten()
                    .unwrap_or(self.unknown_id())
            })
            .collect()
    }
}
