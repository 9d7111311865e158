//! Error types and classification for hourglass.
//!
//! This crate provides:
//! - [`HgError`] - Top-level error enum for slot discovery
//! - Domain-specific errors ([`ListingError`], [`ConfigError`])
//! - [`ErrorCategory`] for deciding whether a failure stops the whole scan

use thiserror::Error;

/// Top-level error type for hourglass.
#[derive(Error, Debug)]
pub enum HgError {
    /// Remote directory listing errors
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    /// Configuration errors (topic sources, intervals, CLI input)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// None of the candidate namenodes answered the health probe
    #[error("No namenode is up and running (tried: {})", tried.join(", "))]
    NoNamenodeAvailable { tried: Vec<String> },

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors returned by a directory lister for a single path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// The directory does not exist
    #[error("Directory not found: {0}")]
    NotFound(String),

    /// Request could not be sent or the connection failed
    #[error("Transport failed for {path}: {message}")]
    Transport { path: String, message: String },

    /// The remote service answered with an exception
    #[error("Remote exception for {path}: {exception}: {message}")]
    Remote {
        path: String,
        exception: String,
        message: String,
    },

    /// The listing response could not be decoded
    #[error("Invalid listing response for {path}: {message}")]
    Decode { path: String, message: String },
}

impl ListingError {
    /// The directory path the failed listing was issued for.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound(path) => path,
            Self::Transport { path, .. } => path,
            Self::Remote { path, .. } => path,
            Self::Decode { path, .. } => path,
        }
    }
}

/// Configuration errors.
///
/// All of these indicate a programming or deployment mistake rather than a
/// transient remote condition, so they stop the scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested topic has no entry in the sources document
    #[error("{0} -> topic is not configured")]
    UnknownTopic(String),

    /// The topic's roots cannot be resolved to a list of HDFS paths
    #[error("{topic} -> input.primaryRoot must be an array of HDFS paths: {reason}")]
    MalformedTopic { topic: String, reason: String },

    /// The sources document could not be read or parsed
    #[error("Invalid sources document: {0}")]
    Sources(String),

    /// The interval end precedes its start after flooring to the hour
    #[error("Invalid interval: {0}")]
    Interval(String),

    /// Any other invalid setting
    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    /// The topic at fault, when the error is tied to one.
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::UnknownTopic(topic) => Some(topic),
            Self::MalformedTopic { topic, .. } => Some(topic),
            _ => None,
        }
    }
}

/// Error classification for scan control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Absorbed where it happens; the scan continues with fewer files
    ///
    /// Examples: directory not found, namenode timeout on one listing
    Recoverable,

    /// Stops the scan with no partial results
    ///
    /// Examples: malformed topic roots, unknown topic, no namenode
    Fatal,
}

/// Classifies an error to determine whether the scan may continue.
pub fn classify_error(error: &HgError) -> ErrorCategory {
    match error {
        HgError::Listing(_) => ErrorCategory::Recoverable,
        HgError::Config(_) => ErrorCategory::Fatal,
        HgError::NoNamenodeAvailable { .. } => ErrorCategory::Fatal,
        HgError::Other(_) => ErrorCategory::Fatal,
    }
}

/// Result type alias using HgError.
pub type Result<T> = std::result::Result<T, HgError>;
