//! Error types for the development helper

use thiserror::Error;

/// Gallery dev error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external program could not be started at all
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully
    #[error("Command `{command}` failed with {}", describe_code(.code))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Identifier rejected by validation
    #[error("Invalid identifier: {message}")]
    InvalidIdentifier {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },
}

#[allow(clippy::ref_option)]
fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(
        || "termination by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}

/// Result type alias for gallery dev operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = Error::CommandFailed {
            command: "docker kill abc".to_string(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "Command `docker kill abc` failed with exit code 1");

        let err = Error::CommandFailed {
            command: "docker kill abc".to_string(),
            code: None,
        };
        assert!(err.to_string().ends_with("termination by signal"));
    }

    #[test]
    fn test_spawn_display() {
        let err = Error::Spawn {
            program: "docker".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to run `docker`"));
    }
}
