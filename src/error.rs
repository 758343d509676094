use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for blend operations
#[derive(Error, Diagnostic, Debug)]
pub enum BlendError {
    #[error("IO error: {0}")]
    #[diagnostic(code(blend::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(blend::io))]
    Io { path: PathBuf, message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(blend::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Gradient error: {message}")]
    #[diagnostic(code(blend::gradient))]
    Gradient { message: String },

    #[error("Fragments error with {path}: {message}")]
    #[diagnostic(code(blend::fragments))]
    Fragments {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Project error with {path}: {message}")]
    #[diagnostic(code(blend::project))]
    Project {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(blend::image))]
    Image { path: PathBuf, message: String },
}

impl BlendError {
    /// Wrap an `image` crate failure for the file it concerns.
    pub fn image(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        BlendError::Image {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlendError>;
