use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {column} value {value:?}: {reason}")]
    InvalidValue {
        column: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Validation(String),
}

impl Error {
    pub fn invalid_value(column: &str, value: &str, reason: impl ToString) -> Self {
        Error::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
