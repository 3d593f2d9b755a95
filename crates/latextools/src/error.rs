/// Error types for latextools

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LatexError>;

#[derive(Error, Debug)]
pub enum LatexError {
    /// The content-source arguments were not one of the accepted combinations.
    #[error("{0}")]
    Argument(String),

    #[error("Latex compiler {program} not found.")]
    CompilerNotFound { program: String },

    /// The compiler exited non-zero. `output` is its stdout followed by stderr.
    #[error("{output}")]
    CompileFailed { output: String, status: Option<i32> },

    #[error("Invalid project path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory already exists: {0}")]
    DirectoryExists(String),

    #[error("Cannot write '{0}': destination is read-only")]
    ReadOnly(String),

    #[error("File is not valid UTF-8: {0}")]
    NotUtf8(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LatexError {
    pub fn argument(message: impl Into<String>) -> Self {
        LatexError::Argument(message.into())
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LatexError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build the error for a failed compiler run from its captured pipes.
    ///
    /// Either stream is left out when empty.
    pub fn compile_failed(stdout: &[u8], stderr: &[u8], status: Option<i32>) -> Self {
        let mut output = String::new();
        if !stdout.is_empty() {
            output.push_str(&String::from_utf8_lossy(stdout));
        }
        if !stderr.is_empty() {
            output.push_str(&String::from_utf8_lossy(stderr));
        }
        LatexError::CompileFailed { output, status }
    }
}
