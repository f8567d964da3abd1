//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `gitforest` application. It uses the `thiserror` library to create an
//! `Error` enum covering the fatal failure modes of a resolution run.
//!
//! Only conditions that abort the entire run live here: a conflicting
//! declaration for a destination path, a failed `git clone`, a missing root
//! configuration file, and I/O failures. Per-line parse and validation
//! problems are deliberately *not* `Error` variants — they are recoverable
//! and are modelled as [`crate::config::Diagnostic`] values that the
//! resolver records and skips past.

use thiserror::Error;

/// Main error type for gitforest operations
#[derive(Error, Debug)]
pub enum Error {
    /// The root configuration file is missing or unreadable.
    ///
    /// Reported before any processing begins; distinct from a parse error
    /// inside a readable file.
    #[error("Setup error: configuration file '{path}' not found")]
    Setup { path: String },

    /// Two declarations name the same destination path with a different
    /// repository or branch.
    ///
    /// Includes both declarations so the conflict can be diagnosed without
    /// re-running.
    #[error(
        "Conflict detected for path '{path}': \
         {existing_repo}@{} vs {repo}@{}",
        existing_branch.as_deref().unwrap_or("HEAD"),
        branch.as_deref().unwrap_or("HEAD")
    )]
    Conflict {
        path: String,
        existing_repo: String,
        existing_branch: Option<String>,
        repo: String,
        branch: Option<String>,
    },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, ref (branch or `HEAD` for the default
    /// branch), and the underlying error message.
    #[error("Git clone error for {url}@{r#ref}: {message}")]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
