//! Error Types
//!
//! Every failure either tool can report to the curator. All of them are
//! fatal: the binaries print the message and exit non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ApolloError>;

#[derive(Debug, Error)]
pub enum ApolloError {
    /// The data root environment variable is absent or empty.
    #[error("Environment variable {0} not set")]
    MissingEnvironment(&'static str),

    /// A required command-line value was not supplied.
    #[error("No {0} provided")]
    MissingArgument(&'static str),

    /// A species or track name that is not a single directory name.
    #[error("Invalid {what} '{value}': must be a single directory name")]
    InvalidName { what: &'static str, value: String },

    #[error("Installation for species {species} already exists at {}", path.display())]
    InstallationExists { species: String, path: PathBuf },

    #[error("This species ({species}) does not have a build directory under {}", path.display())]
    InstallationMissing { species: String, path: PathBuf },

    #[error("A track with the label ({label}) already exists for the species ({species})")]
    TrackExists { label: String, species: String },

    #[error("Direct selection {index} does not match any track type (expected 1-{available})")]
    InvalidDirectSelection { index: usize, available: usize },

    /// Too many rejected confirmations during track type selection.
    #[error("Can't make up your mind, eh? Aborting...")]
    SelectionExhausted,

    /// The operator declined the final confirmation.
    #[error("Aborting...")]
    Declined,

    #[error("Standard input closed while waiting for an answer")]
    InputClosed,

    #[error("Failed to encode track configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ApolloError {
    /// Wraps an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
