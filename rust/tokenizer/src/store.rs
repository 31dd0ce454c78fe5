//! Model persistence.
//!
//! A model is stored as two human-readable JSON documents:
//!
//! - `vocab.json`: the vocabulary as an array of strings, in id order
//! - `merges.json`: the merge table as an array of `[[left, right], merged]`
//!
//! Loading re-validates everything through [`Model::new`]. Malformed JSON
//! and inconsistent contents are both reported as
//! [`Error::CorruptModel`]; nothing is ever partially loaded.

use std::fs;
use std::path::Path;

use crate::error::{corrupt, Error, Result};
use crate::merges::MergeTable;
use crate::model::Model;
use crate::vocab::Vocabulary;

pub const VOCAB_FILE: &str = "vocab.json";
pub const MERGES_FILE: &str = "merges.json";

/// Serialized vocabulary and merge table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifacts {
    pub vocab: Vec<u8>,
    pub merges: Vec<u8>,
}

/// Serialize a model.
pub fn save(model: &Model) -> Result<ModelArtifacts> {
    Ok(ModelArtifacts {
        vocab: serde_json::to_vec_pretty(model.vocab())?,
        merges: serde_json::to_vec_pretty(model.merges())?,
    })
}

/// Deserialize and validate a model.
pub fn load(artifacts: &ModelArtifacts) -> Result<Model> {
    let vocab: Vocabulary = serde_json::from_slice(&artifacts.vocab)
        .map_err(|e| corrupt(format!("{VOCAB_FILE}: {e}")))?;
    let merges: MergeTable = serde_json::from_slice(&artifacts.merges)
        .map_err(|e| corrupt(format!("{MERGES_FILE}: {e}")))?;
    Model::new(vocab, merges)
}

/// Write `vocab.json` and `merges.json` into `dir`, creating it if needed.
pub fn save_dir(model: &Model, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    let artifacts = save(model)?;
    fs::create_dir_all(dir)?;
    fs::write(dir.join(VOCAB_FILE), artifacts.vocab)?;
    fs::write(dir.join(MERGES_FILE), artifacts.merges)?;
    log::info!("Saved model ({} symbols) to {}", model.len(), dir.display());
    Ok(())
}

/// Read `vocab.json` and `merges.json` from `dir`.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Model> {
    let dir = dir.as_ref();
    let artifacts = ModelArtifacts {
        vocab: fs::read(dir.join(VOCAB_FILE))?,
        merges: fs::read(dir.join(MERGES_FILE))?,
    };
    let model = load(&artifacts)?;
    log::info!("Loaded model ({} symbols) from {}", model.len(), dir.display());
    Ok(model)
}

impl TryFrom<&ModelArtifacts> for Model {
    type Error = Error;

    fn try_from(artifacts: &ModelArtifacts) -> Result<Self> {
        load(artifacts)
    }
}
