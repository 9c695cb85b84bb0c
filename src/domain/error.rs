//! Error types for the artfeed client.
//!
//! This module defines the centralized error type [`ArtfeedError`], the local
//! [`ValidationError`] taxonomy, and a [`Result`] alias used throughout the
//! crate. All errors derive their `Error` implementation via `thiserror`.
//!
//! Errors fall into three user-facing families:
//!
//! - **Validation**: local, synchronous, never touches network state
//! - **Network**: transport failure or non-success status on list/create
//! - **Generation**: the image service returned no image
//!
//! None of them is fatal; every failure is recovered by re-issuing the action.

use std::fmt;
use thiserror::Error;

/// A required submission input that was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Author name was empty.
    Name,
    /// No successfully generated image was available.
    Photo,
}

impl Field {
    /// Wire/display name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Photo => "photo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local input problems detected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The prompt was empty or whitespace-only.
    #[error("Please enter a prompt.")]
    EmptyPrompt,

    /// One or more submission fields were missing.
    ///
    /// All missing fields are reported together so a caller can surface
    /// every problem at once.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    SubmissionPending,

    /// The owning context was disposed; no further actions are accepted.
    #[error("the gallery has been disposed")]
    Disposed,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The main error type for artfeed operations.
///
/// # Examples
///
/// ```
/// use artfeed::domain::{ArtfeedError, Field, ValidationError};
///
/// let err = ArtfeedError::from(ValidationError::MissingFields(vec![Field::Name, Field::Photo]));
/// assert_eq!(err.to_string(), "Validation error: missing required fields: name, photo");
/// ```
#[derive(Debug, Error)]
pub enum ArtfeedError {
    /// Local input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Listing or creating posts failed (transport, non-2xx, or bad body).
    #[error("Network error: {0}")]
    Network(String),

    /// The image service did not return an image.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No post with this id is in the loaded feed.
    #[error("No post with id {0}")]
    PostNotFound(String),

    /// Image data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArtfeedError {
    /// Returns the validation error, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// A specialized `Result` type for artfeed operations.
pub type Result<T> = std::result::Result<T, ArtfeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let err = ValidationError::MissingFields(vec![Field::Name, Field::Photo]);
        assert_eq!(err.to_string(), "missing required fields: name, photo");
    }

    #[test]
    fn as_validation_only_matches_validation() {
        let err = ArtfeedError::from(ValidationError::EmptyPrompt);
        assert_eq!(err.as_validation(), Some(&ValidationError::EmptyPrompt));
        assert!(ArtfeedError::Network("boom".into()).as_validation().is_none());
    }
}
