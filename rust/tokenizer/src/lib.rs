//! Chatbot Tokenizer: a word-boundary-aware BPE tokenizer.
//!
//! This crate learns a subword vocabulary from a text corpus and uses it to
//! turn text into token ids and back. It supports:
//!
//! - A fixed base alphabet (lowercase ASCII letters, punctuation, digits)
//!   plus a word-boundary marker `Ġ`
//! - Deterministic training: the merge order, tie-breaks included, is
//!   reproducible run to run and with or without rayon
//! - Encoding by replaying merge rules in learned order
//! - Serialization to/from `vocab.json` and `merges.json`
//! - Optional Python bindings (feature `python`)
//!
//! ## Architecture
//!
//! 1. The corpus is split into words; every word after the first in a
//!    document is prefixed with `Ġ`
//! 2. Starting from characters, the most frequent adjacent pair is merged
//!    into a new symbol, over and over
//! 3. Training stops when the vocabulary reaches the target size
//!
//! ## Usage
//!
//! ```rust
//! use chatbot_tokenizer::{Trainer, TrainerConfig};
//!
//! let config = TrainerConfig {
//!     vocab_size: 100,
//!     ..Default::default()
//! };
//! let trainer = Trainer::new(config);
//! let model = trainer
//!     .train_from_documents(["the cat sat on the mat"])
//!     .unwrap();
//!
//! let ids = model.encode("the cat");
//! assert_eq!(model.decode(&ids).unwrap(), "the cat");
//! ```

pub mod alphabet;
pub mod corpus;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod merges;
pub mod model;
pub mod store;
mod symbols;
pub mod tokenizer;
pub mod trainer;
pub mod vocab;

#[cfg(feature = "python")]
pub mod python;

// Re-export main types
pub use alphabet::{BASE_ALPHABET_SIZE, BOUNDARY_ID, BOUNDARY_MARKER};
pub use corpus::{word_frequencies, WordFrequencyTable};
pub use error::{Error, Result};
pub use merges::{MergeRule, MergeTable};
pub use model::Model;
pub use store::ModelArtifacts;
pub use tokenizer::Tokenizer;
pub use trainer::{Trainer, TrainerConfig};
pub use vocab::Vocabulary;

/// Python module entry point
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn chatbot_tokenizer_rs(_py: pyo3::Python, m: &pyo3::types::PyModule) -> pyo3::PyResult<()> {
    m.add_class::<python::PyTokenizer>()?;
    Ok(())
}
