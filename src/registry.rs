//! # Job Registry
//!
//! The deduplicating, conflict-detecting store of resolved jobs, and the
//! central invariant-holder of a resolution run: at any time the registry
//! holds at most one job per destination path, and never two declarations
//! with the same destination and a differing repository or branch.
//!
//! Jobs are kept in insertion order, which is also the processing order of
//! the resolver's worklist — the registry grows at the tail while the
//! resolver consumes it from the head, giving breadth-first discovery over
//! the dependency graph. A `HashMap` from destination path to job slot
//! backs the dedup and conflict lookups.
//!
//! The registry is a plain value owned by the resolver; there is no
//! process-wide singleton.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A resolved unit of work: clone `repo` at `branch` into `path`.
///
/// Immutable once registered. `path` is the unique key across the
/// registry; `branch` of `None` means the repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub repo: String,
    pub branch: Option<String>,
    pub path: String,
}

/// Outcome of a successful registration attempt.
///
/// A conflicting declaration is not an outcome but an
/// [`Error::Conflict`] — it aborts the entire run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// The destination path was new; a job was appended to the worklist.
    Added,
    /// An identical declaration already exists; nothing was inserted.
    Duplicate,
}

/// Ordered collection of jobs with a destination-path index.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    by_path: HashMap<String, usize>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration under its destination path.
    ///
    /// - Unknown path: the job is appended and `Added` is returned.
    /// - Known path with an identical `(repo, branch)` — where "no branch"
    ///   compares equal only to "no branch" — returns `Duplicate` without
    ///   inserting anything.
    /// - Known path with a differing `(repo, branch)` returns
    ///   [`Error::Conflict`] carrying both declarations.
    pub fn register(
        &mut self,
        repo: &str,
        branch: Option<&str>,
        path: &str,
    ) -> Result<Registered> {
        if let Some(&slot) = self.by_path.get(path) {
            let existing = &self.jobs[slot];
            if existing.repo == repo && existing.branch.as_deref() == branch {
                return Ok(Registered::Duplicate);
            }
            return Err(Error::Conflict {
                path: path.to_string(),
                existing_repo: existing.repo.clone(),
                existing_branch: existing.branch.clone(),
                repo: repo.to_string(),
                branch: branch.map(str::to_string),
            });
        }

        self.by_path.insert(path.to_string(), self.jobs.len());
        self.jobs.push(Job {
            repo: repo.to_string(),
            branch: branch.map(str::to_string),
            path: path.to_string(),
        });
        Ok(Registered::Added)
    }

    /// All registered jobs in registration (and processing) order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Job at a worklist slot, if registered yet.
    ///
    /// The resolver iterates by index because registration during
    /// processing grows the collection under it.
    pub fn get(&self, slot: usize) -> Option<&Job> {
        self.jobs.get(slot)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
