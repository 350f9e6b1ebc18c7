//! Error types for svgl-tui
//!
//! Wraps library errors and terminal I/O errors for unified handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Library error (configuration, catalog, preferences)
    #[error("Service error: {0}")]
    Service(#[from] libsvgl::SvglError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),
}

pub type Result<T> = std::result::Result<T, TuiError>;
