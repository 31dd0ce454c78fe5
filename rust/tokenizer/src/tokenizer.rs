//! Stateful train/encode/decode/save/load surface.
//!
//! [`Tokenizer`] owns at most one [`Model`]. Calls that need a model fail
//! with [`Error::NotTrained`] until one has been trained or loaded. A failed
//! train or load keeps the previous model.

use std::path::Path;

use crate::alphabet::BOUNDARY_ID;
use crate::error::{Error, Result};
use crate::model::Model;
use crate::store::{self, ModelArtifacts};
use crate::trainer::{Trainer, TrainerConfig};

#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TrainerConfig,
    unknown_id: u32,
    model: Option<Model>,
}

impl Tokenizer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            unknown_id: BOUNDARY_ID,
            model: None,
        }
    }

    /// Wrap an existing model.
    pub fn from_model(model: Model) -> Self {
        Self {
            config: TrainerConfig::default(),
            unknown_id: model.unknown_id(),
            model: Some(model),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Id emitted for symbols missing from the vocabulary.
    ///
    /// Checked against the current model right away, and against every
    /// model trained or loaded later.
    pub fn set_unknown_id(&mut self, id: u32) -> Result<()> {
        if let Some(model) = &self.model {
            let updated = model.clone().with_unknown_id(id)?;
            self.model = Some(updated);
        }
        self.unknown_id = id;
        Ok(())
    }

    /// Learn a new model with `vocab_size` symbols from `corpus`.
    pub fn train<I, S>(&mut self, corpus: I, vocab_size: usize) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = TrainerConfig {
            vocab_size,
            ..self.config.clone()
        };
        let model = Trainer::new(config.clone()).train_from_documents(corpus)?;
        self.model = Some(model.with_unknown_id(self.unknown_id)?);
        self.config = config;
        Ok(())
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self.trained()?.encode(text))
    }

    pub fn encode_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.trained()?.encode_batch(texts))
    }

    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.trained()?.decode(ids)
    }

    pub fn save(&self) -> Result<ModelArtifacts> {
        store::save(self.trained()?)
    }

    pub fn load(&mut self, artifacts: &ModelArtifacts) -> Result<()> {
        let model = store::load(artifacts)?;
        self.model = Some(model.with_unknown_id(self.unknown_id)?);
        Ok(())
    }

    pub fn save_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        store::save_dir(self.trained()?, dir)
    }

    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let model = store::load_dir(dir)?;
        self.model = Some(model.with_unknown_id(self.unknown_id)?);
        Ok(())
    }

    fn trained(&self) -> Result<&Model> {
        self.model.as_ref().ok_or(Error::NotTrained)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TrainerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::BASE_ALPHABET_SIZE;

    fn quiet() -> Tokenizer {
        Tokenizer::new(TrainerConfig {
            log_interval: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_untrained_calls_fail() {
        let tokenizer = quiet();
        assert!(!tokenizer.is_trained());
        assert!(matches!(tokenizer.encode("hi"), Err(Error::NotTrained)));
        assert!(matches!(tokenizer.decode(&[1]), Err(Error::NotTrained)));
        assert!(matches!(tokenizer.save(), Err(Error::NotTrained)));
        assert!(matches!(
            tokenizer.encode_batch(&["hi"]),
            Err(Error::NotTrained)
        ));
    }

    #[test]
    fn test_train_then_use() {
        let mut tokenizer = quiet();
        tokenizer
            .train(["the cat sat", "the cat ran"], BASE_ALPHABET_SIZE + 8)
            .unwrap();
        assert!(tokenizer.is_trained());
        assert_eq!(tokenizer.config().vocab_size, BASE_ALPHABET_SIZE + 8);

        let ids = tokenizer.encode("the cat").unwrap();
        assert_eq!(tokenizer.decode(&ids).unwrap(), "the cat");
    }

    #[test]
    fn test_failed_train_keeps_model() {
        let mut tokenizer = quiet();
        tokenizer.train(["ab ab"], BASE_ALPHABET_SIZE + 1).unwrap();
        let before = tokenizer.model().cloned();

        let err = tokenizer.train(["ab ab"], 3).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(tokenizer.model().cloned(), before);
        assert_eq!(tokenizer.config().vocab_size, BASE_ALPHABET_SIZE + 1);
    }

    #[test]
    fn test_save_load() {
        let mut source = quiet();
        source.train(["low lower lowest"], BASE_ALPHABET_SIZE + 5).unwrap();
        let artifacts = source.save().unwrap();

        let mut target = quiet();
        target.load(&artifacts).unwrap();
        assert_eq!(target.model(), source.model());

        let mut broken = artifacts.clone();
        broken.merges.clear();
        assert!(matches!(target.load(&broken), Err(Error::CorruptModel(_))));
        assert_eq!(target.model(), source.model());
    }

    #[test]
    fn test_save_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = quiet();
        source.train(["hello hello world"], BASE_ALPHABET_SIZE + 4).unwrap();
        source.save_dir(dir.path()).unwrap();

        let mut target = quiet();
        target.load_dir(dir.path()).unwrap();
        assert_eq!(
            target.encode("hello world").unwrap(),
            source.encode("hello world").unwrap()
        );
    }

    #[test]
    fn test_unknown_id() {
        let mut tokenizer = quiet();
        tokenizer.set_unknown_id(30).unwrap();
        tokenizer.train(["ab ab"], BASE_ALPHABET_SIZE + 1).unwrap();
        assert_eq!(tokenizer.encode("Z").unwrap(), vec![30]);

        let err = tokenizer.set_unknown_id(1_000).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(tokenizer.encode("Z").unwrap(), vec![30]);

        tokenizer.set_unknown_id(BOUNDARY_ID).unwrap();
        assert_eq!(tokenizer.encode("Z").unwrap(), vec![BOUNDARY_ID]);
    }

    #[test]
    fn test_from_model() {
        let tokenizer = Tokenizer::from_model(Model::default());
        assert!(tokenizer.is_trained());
        assert_eq!(tokenizer.decode(&[1, 0, 2]).unwrap(), "a b");
    }
}
