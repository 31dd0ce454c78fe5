//! The trained model: a validated vocabulary and merge table.
//!
//! A `Model` is immutable once built. Encoding and decoding only read it,
//! so one model can serve any number of threads.

use crate::alphabet::{BASE_ALPHABET_SIZE, BOUNDARY_ID};
use crate::error::{corrupt, Error, Result};
use crate::merges::MergeTable;
use crate::symbols::{Pair, SymbolTable};
use crate::vocab::Vocabulary;

/// A merge rule resolved to interned symbol ids.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompiledRule {
    pub(crate) pair: Pair,
    pub(crate) merged: u32,
}

#[derive(Debug, Clone)]
pub struct Model {
    vocab: Vocabulary,
    merges: MergeTable,
    unknown_id: u32,

    /// Every string named by the vocabulary or the merge table
    pub(crate) symbols: SymbolTable,

    /// Merge rules in learned order, over `symbols` ids
    pub(crate) rules: Vec<CompiledRule>,

    /// Interned symbol id → vocabulary id
    pub(crate) vocab_ids: Vec<Option<u32>>,
}

impl Model {
    /// Build a model, checking that `vocab` and `merges` describe one
    /// training run.
    ///
    /// The vocabulary must start with the base alphabet and hold exactly one
    /// extra symbol per rule, and rule `k` must produce
    /// `vocab[BASE_ALPHABET_SIZE + k]` by concatenating its pair.
    pub fn new(vocab: Vocabulary, merges: MergeTable) -> Result<Self> {
        if !vocab.starts_with_base_alphabet() {
            return Err(corrupt("vocabulary does not start with the base alphabet"));
        }
        if vocab.len() != BASE_ALPHABET_SIZE + merges.len() {
            return Err(corrupt(format!(
                "vocabulary has {} symbols but {} base symbols plus {} merges require {}",
                vocab.len(),
                BASE_ALPHABET_SIZE,
                merges.len(),
                BASE_ALPHABET_SIZE + merges.len()
            )));
        }

        for (rank, rule) in merges.iter().enumerate() {
            if !rule.is_consistent() {
                return Err(corrupt(format!(
                    "merge {rank}: {:?} + {:?} does not produce {:?}",
                    rule.left, rule.right, rule.merged
                )));
            }
            let id = (BASE_ALPHABET_SIZE + rank) as u32;
            if vocab.symbol(id) != Some(rule.merged.as_str()) {
                return Err(corrupt(format!(
                    "merge {rank} produces {:?} but vocabulary id {id} is {:?}",
                    rule.merged,
                    vocab.symbol(id).unwrap_or_default()
                )));
            }
        }

        let mut symbols = SymbolTable::new();
        for symbol in vocab.iter() {
            symbols.intern(symbol);
        }
        let rules = merges
            .iter()
            .map(|rule| CompiledRule {
                pair: (symbols.intern(&rule.left), symbols.intern(&rule.right)),
                merged: symbols.intern(&rule.merged),
            })
            .collect();
        let vocab_ids = (0..symbols.len() as u32)
            .map(|id| vocab.id_of(symbols.resolve(id)))
            .collect();

        Ok(Self {
            vocab,
            merges,
            unknown_id: BOUNDARY_ID,
            symbols,
            rules,
            vocab_ids,
        })
    }

    /// Use `id` for symbols missing from the vocabulary.
    ///
    /// Defaults to [`BOUNDARY_ID`], which makes unknown symbols
    /// indistinguishable from word boundaries in the id stream.
    pub fn with_unknown_id(mut self, id: u32) -> Result<Self> {
        if id as usize >= self.vocab.len() {
            return Err(Error::Config(format!(
                "unknown id {id} is outside a vocabulary of {} symbols",
                self.vocab.len()
            )));
        }
        self.unknown_id = id;
        Ok(self)
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    pub fn unknown_id(&self) -> u32 {
        self.unknown_id
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    pub fn id_to_symbol(&self, id: u32) -> Option<&str> {
        self.vocab.symbol(id)
    }

    pub fn symbol_to_id(&self, symbol: &str) -> Option<u32> {
        self.vocab.id_of(symbol)
    }

    pub fn into_parts(self) -> (Vocabulary, MergeTable) {
        (self.vocab, self.merges)
    }
}

impl Default for Model {
    /// The untrained model: base alphabet, no merges.
    fn default() -> Self {
        let vocab = Vocabulary::base();
        let mut symbols = SymbolTable::new();
        for symbol in vocab.iter() {
            symbols.intern(symbol);
        }
        let vocab_ids = (0..vocab.len() as u32).map(Some).collect();
        Self {
            vocab,
            merges: MergeTable::new(),
            unknown_id: BOUNDARY_ID,
            symbols,
            rules: Vec::new(),
            vocab_ids,
        }
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.vocab == other.vocab
            && self.merges == other.merges
            && self.unknown_id == other.unknown_id
    }
}

impl Eq for Model {}
