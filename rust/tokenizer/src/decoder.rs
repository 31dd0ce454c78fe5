//! Token ids → text.

use rayon::prelude::*;

use crate::alphabet::BOUNDARY_MARKER;
use crate::error::{Error, Result};
use crate::model::Model;

impl Model {
    /// Decode ids back into text, turning boundary markers into spaces.
    ///
    /// Fails on the first id outside the vocabulary.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut text = String::new();
        for &id in ids {
            let symbol = self.id_to_symbol(id).ok_or(Error::IdOutOfRange {
                id,
                len: self.len(),
            })?;
            text.push_str(symbol);
        }
        Ok(text.replace(BOUNDARY_MARKER, " "))
    }

    /// Decode many id sequences in parallel.
    pub fn decode_batch<S>(&self, batch: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<[u32]> + Sync,
    {
        batch.par_iter().map(|ids| self.decode(ids.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::alphabet::{BASE_ALPHABET_SIZE, BOUNDARY_ID};
    use crate::error::Error;
    use crate::merges::{MergeRule, MergeTable};
    use crate::model::Model;
    use crate::vocab::Vocabulary;

    fn marker_model() -> Model {
        let mut vocab = Vocabulary::base();
        let mut merges = MergeTable::new();
        for rule in [MergeRule::new("Ġ", "c"), MergeRule::new("Ġc", "a")] {
            vocab.push(rule.merged.clone());
            merges.push(rule);
        }
        Model::new(vocab, merges).unwrap()
    }

    #[test]
    fn test_decode_replaces_markers() {
        let model = marker_model();
        let ids = model.encode("a ca cat");
        assert_eq!(model.decode(&ids).unwrap(), "a ca cat");
    }

    #[test]
    fn test_decode_bare_marker() {
        let model = Model::default();
        assert_eq!(model.decode(&[BOUNDARY_ID]).unwrap(), " ");
        assert_eq!(model.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_decode_out_of_range() {
        let model = marker_model();
        let len = BASE_ALPHABET_SIZE + 2;
        let err = model.decode(&[1, len as u32]).unwrap_err();
        assert!(matches!(err, Error::IdOutOfRange { id, len: l } if id == len as u32 && l == len));
    }

    #[test]
    fn test_decode_batch() {
        let model = marker_model();
        let batch = vec![model.encode("a ca"), model.encode("ca")];
        assert_eq!(model.decode_batch(&batch).unwrap(), vec!["a ca", "ca"]);

        let bad = vec![vec![1], vec![u32::MAX]];
        assert!(model.decode_batch(&bad).is_err());
    }
}
