//! Errors
//!
//! Custom error types used throughout the `random_tree` crate.
use thiserror::Error;

/// Errors that can occur when building or querying a random tree.
#[derive(Debug, Error)]
pub enum RandomTreeError {
    /// First value is what was being checked, second is expected, third is what was passed.
    #[error("Shape mismatch for {0}, expected {1} but {2} provided.")]
    ShapeMismatch(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidConfig(String, String, String),
    /// Prediction was requested before any tree exists.
    #[error("The learner has no tree, fit it or supply an existing tree before predicting.")]
    UnfittedModel,
    /// A flat table could not be read as a tree.
    #[error("Invalid tree table: {0}")]
    InvalidTree(String),
    /// Unable to write config to file.
    #[error("Unable to write config to file: {0}")]
    UnableToWrite(String),
    /// Unable to read config from file.
    #[error("Unable to read config from a file {0}")]
    UnableToRead(String),
}
