use std::io;

/// Failures that can stop a round from starting or the app from booting.
///
/// Rejected transitions (a late answer, a stale timer signal) are not errors
/// and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("word source returned an empty word")]
    EmptyWord,
    #[error("dataset `{0}` is not bundled with this build")]
    MissingDataset(String),
    #[error("dataset `{name}` could not be parsed: {source}")]
    MalformedDataset {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset `{0}` has no usable words")]
    EmptyDataset(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_message_is_user_readable() {
        assert_eq!(
            GameError::EmptyWord.to_string(),
            "word source returned an empty word"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: GameError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, GameError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
