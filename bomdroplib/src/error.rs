//! Error types for bomdroplib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating or exporting the dataset
#[derive(Error, Debug)]
pub enum BomdropError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Dataset or feed JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A unit cost that cannot be divided into the reference total
    #[error(
        "invalid unit cost {cost}: must be a positive, finite number whose quantity fits in 64 bits"
    )]
    InvalidCost { cost: f64 },

    /// A reference total that is negative or not finite
    #[error("invalid reference total {total}: must be a non-negative, finite number")]
    InvalidReferenceTotal { total: f64 },

    /// A verification date that is not a calendar date
    #[error("invalid date '{value}': expected a calendar date such as 2025-10-22")]
    InvalidDate { value: String },

    /// Structural defects found while validating the dataset
    #[error("invalid dataset ({} issue(s)): {}", .0.len(), join_issues(.0))]
    InvalidDataset(Vec<DatasetIssue>),

    /// Failed to parse the site configuration
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// A text pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A preview card could not be rendered
    #[error("failed to render card for '{id}': {message}")]
    CardRender { id: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single structural problem in the dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    /// Two records share an id
    #[error("duplicate comparison id '{id}'")]
    DuplicateId { id: String },

    /// An id that cannot be used as a URL segment or file name
    #[error("comparison id '{id}' must be lowercase ASCII letters, digits and '-'")]
    UnsafeId { id: String },

    /// A record points at a category that was never declared
    #[error("comparison '{id}' references unknown category '{category}'")]
    UnknownCategory { id: String, category: String },

    /// Two categories share a slug
    #[error("duplicate category slug '{slug}'")]
    DuplicateCategory { slug: String },

    /// A category slug that cannot be used as a URL segment
    #[error("category slug '{slug}' must be lowercase ASCII letters, digits and '-'")]
    UnsafeCategory { slug: String },
}

fn join_issues(issues: &[DatasetIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
