// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;
use tsad_core::TsadError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tsad(#[from] TsadError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InvalidInput(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Stable code reported in the stderr error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Tsad(err) => err.code(),
            Self::InvalidInput(_) => "invalid_input",
            Self::Io { .. } => "io_error",
            Self::Json { .. } => "json_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use tsad_core::TsadError;

    #[test]
    fn codes_follow_error_class() {
        assert_eq!(
            CliError::from(TsadError::invalid_input("bad")).code(),
            "invalid_input"
        );
        assert_eq!(CliError::invalid_input("flag").code(), "invalid_input");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CliError::io("failed to read 'y.json'", io);
        assert_eq!(err.code(), "io_error");
        assert_eq!(err.to_string(), "failed to read 'y.json': missing");
    }

    #[test]
    fn tsad_errors_keep_their_message() {
        let err = CliError::from(TsadError::invalid_input("alpha out of range"));
        assert_eq!(err.to_string(), "invalid input: alpha out of range");
    }
}
