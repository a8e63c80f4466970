//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, missing shape parameters, invalid generator weights,
//! capacity violations of the unique-shape sampler, sprite factory failures,
//! and generic errors.
use thiserror::Error;

use crate::sprite::Shape;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no shape parameters configured for shape '{shape}'")]
    MissingShapeParams { shape: Shape },

    #[error("invalid generator weights: {0}")]
    InvalidWeights(String),

    #[error(
        "requested {requested} sprites with unique shapes, but the distribution only produces {available} distinct shapes"
    )]
    Capacity { requested: usize, available: usize },

    #[error("gave up drawing an unused shape after {attempts} rejected samples")]
    RejectionLimit { attempts: usize },

    #[error("unknown factor '{key}'")]
    UnknownFactor { key: String },

    #[error("missing factor '{key}'")]
    MissingFactor { key: String },

    #[error("invalid factor '{key}': {reason}")]
    InvalidFactor { key: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
