use pyo3::exceptions::{PyIOError, PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::Error;
use crate::tokenizer::Tokenizer;
use crate::trainer::TrainerConfig;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::Config(_) | Error::CorruptModel(_) => PyValueError::new_err(err.to_string()),
            Error::IdOutOfRange { .. } => PyIndexError::new_err(err.to_string()),
            Error::NotTrained => PyRuntimeError::new_err(err.to_string()),
            Error::Io(_) | Error::SerdeJson(_) => PyIOError::new_err(err.to_string()),
        }
    }
}

/// Python wrapper for the tokenizer
#[pyclass(name = "Tokenizer", module = "chatbot_tokenizer_rs")]
pub struct PyTokenizer {
    pub(crate) inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    #[new]
    #[pyo3(signature = (vocab_size=1000, min_frequency=1))]
    pub fn new(vocab_size: usize, min_frequency: u64) -> Self {
        let config = TrainerConfig {
            vocab_size,
            min_frequency,
            ..Default::default()
        };
        Self {
            inner: Tokenizer::new(config),
        }
    }

    /// Learn a vocabulary from a list of documents
    #[pyo3(signature = (corpus, vocab_size=None))]
    pub fn train(&mut self, corpus: Vec<String>, vocab_size: Option<usize>) -> PyResult<()> {
        let vocab_size = vocab_size.unwrap_or(self.inner.config().vocab_size);
        Ok(self.inner.train(&corpus, vocab_size)?)
    }

    /// Encode text to a list of token IDs
    pub fn encode(&self, text: &str) -> PyResult<Vec<u32>> {
        Ok(self.inner.encode(text)?)
    }

    /// Decode a list of token IDs to a string
    pub fn decode(&self, ids: Vec<u32>) -> PyResult<String> {
        Ok(self.inner.decode(&ids)?)
    }

    /// Write vocab.json and merges.json into a directory
    #[pyo3(signature = (dir="."))]
    pub fn save(&self, dir: &str) -> PyResult<()> {
        Ok(self.inner.save_dir(dir)?)
    }

    /// Read vocab.json and merges.json from a directory
    #[pyo3(signature = (dir="."))]
    pub fn load(&mut self, dir: &str) -> PyResult<()> {
        Ok(self.inner.load_dir(dir)?)
    }

    pub fn __len__(&self) -> usize {
        self.inner.model().map_or(0, |model| model.len())
    }
}
