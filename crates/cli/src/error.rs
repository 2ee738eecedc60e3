//! CLI error types.
//!
//! Each variant names the stage that failed: settings, reading an input
//! file, understanding its contents, or printing the result.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum CliError {
    /// Settings could not be loaded, merged or validated.
    #[display("Configuration error: {message}")]
    Config { message: String },

    #[display("Cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not JSON of the expected shape.
    #[display("Invalid input in {}: {message}", path.display())]
    InvalidInput { path: PathBuf, message: String },

    #[display("Cannot write output: {message}")]
    Output { message: String },
}

impl CliError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        CliError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn read_input(path: &Path, source: std::io::Error) -> Self {
        CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        }
    }
}
