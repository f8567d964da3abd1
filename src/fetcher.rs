//! # Repository Fetching
//!
//! This module defines the [`Fetcher`] trait, the seam between the
//! resolution engine and the external version-control tool, plus
//! [`GitFetcher`], the production implementation that shells out to the
//! system `git` command.
//!
//! Using the system git means authentication comes for free: SSH keys from
//! `~/.ssh/`, credential helpers, personal access tokens, and anything else
//! configured in `~/.gitconfig`.
//!
//! The trait exists so the resolver can be tested with a mock fetcher that
//! records calls and simulates failures without touching the network.
//! Arguments are always passed to the process as a structured vector, never
//! interpolated into a shell string.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// How a destination came to hold the requested repository state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// The fetcher cloned the repository into the destination.
    Created,
    /// The destination already existed; the fetcher was not invoked.
    Unchanged,
}

/// External collaborator that ensures a destination contains a repository.
pub trait Fetcher {
    /// Clone `repo` at `branch` (default branch when `None`) into `dest`.
    ///
    /// Only called for destinations that do not yet exist; a nonzero
    /// external result is a fatal [`Error::GitClone`].
    fn materialize(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<Materialized>;
}

/// The default [`Fetcher`], invoking the system `git clone`.
pub struct GitFetcher;

impl Fetcher for GitFetcher {
    fn materialize(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<Materialized> {
        // Declared paths may be nested, e.g. PATH "./vendor/name".
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut command = Command::new("git");
        command.arg("clone");
        if let Some(branch) = branch {
            command.args(["--branch", branch]);
        }
        command.arg(repo).arg(dest);

        let ref_name = branch.unwrap_or("HEAD");
        let output = command.output().map_err(|e| Error::GitClone {
            url: repo.to_string(),
            r#ref: ref_name.to_string(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Provide helpful error message for common auth failures
            let message = if stderr.contains("Authentication failed")
                || stderr.contains("Permission denied")
                || stderr.contains("Could not read from remote repository")
            {
                format!(
                    "Authentication failed. Make sure you have access to the repository.\n\
                    For private repos, ensure you have:\n\
                    - SSH key added to ssh-agent\n\
                    - Git credentials configured\n\
                    - Personal access token set up\n\
                    Error: {}",
                    stderr
                )
            } else {
                stderr.to_string()
            };

            return Err(Error::GitClone {
                url: repo.to_string(),
                r#ref: ref_name.to_string(),
                message,
            });
        }

        Ok(Materialized::Created)
    }
}

// Note: integration tests for GitFetcher would require actual git
// repositories and network access; the resolver's behavior around fetching
// is covered with mock fetchers in resolver::tests.
