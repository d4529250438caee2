// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LibraryError>;

/// Message used when a failed response carries no readable `detail`.
pub const GENERIC_API_FAILURE: &str = "API request failed";

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx backend response. `message` is the server's `detail` text.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Malformed backend response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LibraryError::Transport(_))
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            LibraryError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LibraryError::Decode(err.to_string())
        } else {
            LibraryError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_server_message_verbatim() {
        let err = LibraryError::Remote {
            status: 500,
            message: "Error creating document: boom".to_string(),
        };
        assert_eq!(err.to_string(), "Error creating document: boom");
        assert_eq!(err.user_message(), "Error creating document: boom");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_flag() {
        assert!(LibraryError::Transport("refused".into()).is_transport());
    }
}
