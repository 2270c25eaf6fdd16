//! Error type shared by every detectlab operation.

/// Errors produced by the sampler, the exporters and the results/config loaders.
///
/// Undefined rates (zero denominators) are not errors; they are `None` results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("abstract {doi} has no rewritten text")]
    MissingRewrite { doi: String },

    #[error("results line {line}: {message}")]
    Results { line: usize, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn results(line: usize, message: impl Into<String>) -> Self {
        Self::Results {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::invalid("sample count 5 exceeds population 3").to_string(),
            "invalid argument: sample count 5 exceeds population 3"
        );
        assert_eq!(
            Error::results(7, "bad label").to_string(),
            "results line 7: bad label"
        );
        assert_eq!(
            Error::MissingRewrite {
                doi: "10.1/x".to_string()
            }
            .to_string(),
            "abstract 10.1/x has no rewritten text"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
