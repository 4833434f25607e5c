//! Error types shared across Scriptcast crates.

/// Top-level error type for Scriptcast operations.
///
/// Library crates keep their own narrower enums; this one is what they
/// collapse into at crate boundaries that mix concerns.
#[derive(Debug, thiserror::Error)]
pub enum ScriptcastError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Audio decode error: {message}")]
    Decode { message: String },

    #[error("Synthesis error: {message}")]
    Synthesis { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ScriptcastError.
pub type ScriptcastResult<T> = Result<T, ScriptcastError>;

impl ScriptcastError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis {
            message: msg.into(),
        }
    }

    /// Whether this error means a referenced script or section is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ScriptcastError::not_found("Section", "abc");
        assert_eq!(err.to_string(), "Section not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_is_not_not_found() {
        let err = ScriptcastError::decode("truncated frame");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("truncated frame"));
    }
}
