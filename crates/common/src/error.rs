//! Error types for the bid adapter.
//!
//! Fallible operations return `Result<T, Report<AdapterError>>` so callers get
//! the full context chain from [`error_stack`].

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// Settings could not be loaded, merged or validated.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The bid server response did not have the expected structure.
    #[display("Invalid bid response: {message}")]
    InvalidResponse { message: String },

    #[display("Serialization error: {message}")]
    Serialization { message: String },
}
