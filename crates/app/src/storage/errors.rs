//! Storage errors.

use std::io::{self, ErrorKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode document {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode document {key}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if matches!(
                source.kind(),
                ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_interrupted_io_is_transient() {
        let timed_out = StorageError::io("orders", io::Error::from(ErrorKind::TimedOut));
        let denied = StorageError::io("orders", io::Error::from(ErrorKind::PermissionDenied));

        assert!(timed_out.is_transient());
        assert!(!denied.is_transient());
        assert!(!StorageError::InvalidKey("..".to_string()).is_transient());
    }
}
