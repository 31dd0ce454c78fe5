//! BPE Tokenizer Training
//!
//! Learns merge rules from a word frequency table by repeatedly merging
//! the most frequent adjacent symbol pair.
//!
//! Algorithm:
//! 1. Split every distinct word into its characters
//! 2. Count all adjacent pair frequencies, weighted by word count
//!    (parallelized with rayon)
//! 3. Merge the most frequent pair everywhere, recording a new rule
//! 4. Repeat until the vocabulary reaches the target size
//!
//! Ties go to the pair seen first while scanning words in first-occurrence
//! order. Parallel counting keeps each pair's first position and reduces to
//! the minimum, so the parallel and sequential paths learn the same rules.

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::alphabet::BASE_ALPHABET_SIZE;
use crate::corpus::{word_frequencies, WordFrequencyTable};
use crate::error::{Error, Result};
use crate::merges::{merge_pair, MergeRule, MergeTable};
use crate::model::Model;
use crate::symbols::{Pair, SymbolTable};
use crate::vocab::Vocabulary;

/// Words per rayon work item when counting pairs.
const PAIR_COUNT_CHUNK: usize = 1024;

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Target vocabulary size (including the base alphabet)
    pub vocab_size: usize,
    /// Minimum frequency for a pair to be considered for merging
    pub min_frequency: u64,
    /// Log progress every N merges (0 disables)
    pub log_interval: usize,
    /// Count pairs and apply merges on the rayon thread pool
    pub parallel: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 1000,
            min_frequency: 1,
            log_interval: 100,
            parallel: true,
        }
    }
}

/// A distinct word as its current split, with its corpus count.
#[derive(Debug, Clone)]
struct Word {
    symbols: Vec<u32>,
    count: u64,
}

/// Running total for one pair, plus where it was first seen.
#[derive(Debug, Clone, Copy)]
struct PairStat {
    count: u64,
    /// (word index, position within the word)
    first_seen: (usize, usize),
}

type PairCounts = HashMap<Pair, PairStat>;

/// BPE trainer: learns merge rules from a corpus.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a new trainer with the given configuration.
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train from raw documents.
    pub fn train_from_documents<I, S>(&self, documents: I) -> Result<Model>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.train(&word_frequencies(documents))
    }

    /// Train from a precomputed word frequency table.
    ///
    /// Fails if the target vocabulary size is smaller than the base
    /// alphabet. A target equal to the alphabet size learns no merges.
    pub fn train(&self, words: &WordFrequencyTable) -> Result<Model> {
        let target = self.config.vocab_size;
        if target < BASE_ALPHABET_SIZE {
            return Err(Error::Config(format!(
                "vocab_size {target} is smaller than the base alphabet ({BASE_ALPHABET_SIZE})"
            )));
        }

        let mut vocab = Vocabulary::base();
        let mut merges = MergeTable::new();
        let mut symbols = SymbolTable::new();

        let mut split: Vec<Word> = words
            .iter()
            .map(|(word, count)| Word {
                symbols: word.chars().map(|c| symbols.intern_char(c)).collect(),
                count,
            })
            .collect();

        let max_merges = target - vocab.len();
        info!(
            "Training BPE: {} unique words ({} total), target {} merges",
            split.len(),
            words.total_words(),
            max_merges
        );

        while vocab.len() < target {
            let pair_counts = self.count_pairs(&split);

            let Some((pair, count)) = best_pair(&pair_counts) else {
                warn!(
                    "Stopping early after {} merges: no adjacent pairs left",
                    merges.len()
                );
                break;
            };
            if count < self.config.min_frequency {
                info!(
                    "Stopping early after {} merges: best pair frequency {} is below min_frequency={}",
                    merges.len(),
                    count,
                    self.config.min_frequency
                );
                break;
            }

            let rule = MergeRule::new(symbols.resolve(pair.0), symbols.resolve(pair.1));
            let merged = symbols.intern(&rule.merged);
            self.apply_merge(&mut split, pair, merged);

            let new_id = vocab.push(rule.merged.clone());
            let rank = merges.push(rule);

            if self.config.log_interval > 0 && (rank + 1) % self.config.log_interval == 0 {
                debug!(
                    "  Merge {}/{}: ({:?}, {:?}) → {} (freq={})",
                    rank + 1,
                    max_merges,
                    symbols.resolve(pair.0),
                    symbols.resolve(pair.1),
                    new_id,
                    count
                );
            }
        }

        info!(
            "Training complete: {} merges learned, vocab size = {}",
            merges.len(),
            vocab.len()
        );

        Model::new(vocab, merges)
    }

    /// Count all adjacent pair frequencies across all words.
    fn count_pairs(&self, words: &[Word]) -> PairCounts {
        if !self.config.parallel || words.len() <= PAIR_COUNT_CHUNK {
            return count_chunk(0, words);
        }

        // Each chunk counts on its own, then the partial tables are merged
        words
            .par_chunks(PAIR_COUNT_CHUNK)
            .enumerate()
            .map(|(i, chunk)| count_chunk(i * PAIR_COUNT_CHUNK, chunk))
            .reduce(PairCounts::new, merge_counts)
    }

    /// Replace every occurrence of `pair` in every word with `merged`.
    fn apply_merge(&self, words: &mut [Word], pair: Pair, merged: u32) {
        if self.config.parallel {
            words
                .par_iter_mut()
                .for_each(|word| merge_pair(&mut word.symbols, pair, merged));
        } else {
            for word in words {
                merge_pair(&mut word.symbols, pair, merged);
            }
        }
    }
}

fn count_chunk(offset: usize, words: &[Word]) -> PairCounts {
    let mut counts = PairCounts::new();
    for (i, word) in words.iter().enumerate() {
        for (pos, window) in word.symbols.windows(2).enumerate() {
            let stat = counts.entry((window[0], window[1])).or_insert(PairStat {
                count: 0,
                first_seen: (offset + i, pos),
            });
            stat.count += word.count;
        }
    }
    counts
}

fn merge_counts(mut total: PairCounts, part: PairCounts) -> PairCounts {
    for (pair, stat) in part {
        total
            .entry(pair)
            .and_modify(|t| {
                t.count += stat.count;
                t.first_seen = t.first_seen.min(stat.first_seen);
            })
            .or_insert(stat);
    }
    total
}

/// Highest count wins; equal counts go to the earliest first sighting.
fn best_pair(counts: &PairCounts) -> Option<(Pair, u64)> {
    counts
        .iter()
        .max_by(|(_, a), (_, b)| {
            a.count
                .cmp(&b.count)
                .then_with(|| b.first_seen.cmp(&a.first_seen))
        })
        .map(|(&pair, stat)| (pair, stat.count))
}
