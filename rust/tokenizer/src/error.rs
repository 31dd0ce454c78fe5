use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no model has been trained or loaded")]
    NotTrained,

    #[error("corrupt model: {0}")]
    CorruptModel(String),

    #[error("token id {id} is out of range for a vocabulary of {len} symbols")]
    IdOutOfRange { id: u32, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub(crate) fn corrupt<S: Into<String>>(msg: S) -> Error {
    Error::CorruptModel(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotTrained;
        assert_eq!(err.to_string(), "no model has been trained or loaded");

        let err = Error::IdOutOfRange { id: 99, len: 70 };
        assert_eq!(
            err.to_string(),
            "token id 99 is out of range for a vocabulary of 70 symbols"
        );

        let err = corrupt("truncated");
        assert_eq!(err.to_string(), "corrupt model: truncated");
    }
}
