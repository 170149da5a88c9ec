//! Error taxonomy for difftriage.
//!
//! Most resolution failures are swallowed at the call site (the pipeline
//! degrades to an empty change set rather than aborting), so these variants
//! mostly surface in logs. Only output-writing failures abort a run.

/// Errors produced while resolving or rendering a change set.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("git error: {0}")]
    Git(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for difftriage operations.
pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_display() {
        let err = TriageError::Git("merge-base failed".to_string());
        assert!(err.to_string().contains("git error"));
        assert!(err.to_string().contains("merge-base failed"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TriageError = io.into();
        assert!(err.to_string().contains("io error"));
    }
}
