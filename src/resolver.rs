//! # Resolution Driver
//!
//! The worklist engine at the heart of gitforest. Starting from a root
//! configuration file, it parses declarations, registers them in the
//! [`JobRegistry`], materializes each job through a [`Fetcher`], and — when
//! a freshly materialized destination contains a `dependencies.cfg` — feeds
//! that nested configuration back through the same parse-and-register path,
//! growing the worklist as it goes.
//!
//! ## Worklist loop
//!
//! Recursion is modelled as a FIFO queue: the registry is an ordered,
//! growable collection and the driver walks it by index, so jobs discovered
//! mid-run are processed after everything registered before them
//! (breadth-first over the dependency graph). The loop terminates because a
//! nested configuration can only add jobs with destination paths not seen
//! before — identical re-declarations are absorbed as duplicates and
//! differing ones abort the run — and the set of distinct destination paths
//! is finite.
//!
//! ## Failure semantics
//!
//! All-or-nothing workspace setup: a fetch failure or a conflicting
//! declaration aborts the entire run immediately. A fatal abort may leave
//! destinations from earlier iterations materialized on disk; these are
//! valid clones and are left in place. Per-line parse and validation
//! problems are non-fatal: the line is skipped, a [`Diagnostic`] is
//! recorded, and resolution continues.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{self, Diagnostic, DiagnosticKind, Entry, NESTED_CONFIG_NAME};
use crate::error::{Error, Result};
use crate::fetcher::{Fetcher, Materialized};
use crate::registry::{Job, JobRegistry, Registered};
use crate::safety::is_safe;

/// The finished state of a successful resolution run.
#[derive(Debug)]
pub struct Resolution {
    /// Every materialized job, in registration (first-seen) order.
    pub jobs: Vec<Job>,
    /// Non-fatal parse and validation problems encountered along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives a full resolution run over a workspace directory.
///
/// Owns the job registry for the duration of the run; relative destination
/// paths from configuration files resolve against `root_dir`.
pub struct Resolver<F> {
    fetcher: F,
    root_dir: PathBuf,
    registry: JobRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl<F: Fetcher> Resolver<F> {
    pub fn new(fetcher: F, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            root_dir: root_dir.into(),
            registry: JobRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the full resolution starting from `root_config`.
    ///
    /// A missing root configuration is a [`Error::Setup`]; conflicts and
    /// fetch failures abort with the corresponding error. On success the
    /// returned [`Resolution`] holds the final job list and any recorded
    /// diagnostics.
    pub fn resolve(mut self, root_config: &Path) -> Result<Resolution> {
        let source = root_config.display().to_string();
        let content = fs::read_to_string(root_config).map_err(|_| Error::Setup {
            path: source.clone(),
        })?;
        self.ingest(&content, &source)?;

        let mut next = 0;
        while let Some(job) = self.registry.get(next).cloned() {
            next += 1;
            info!(
                "processing [{}/{}] {}",
                next,
                self.registry.len(),
                job.path
            );

            let dest = self.root_dir.join(&job.path);
            let outcome = if dest.is_dir() {
                debug!("directory '{}' already exists, skipping clone", job.path);
                Materialized::Unchanged
            } else {
                self.fetcher
                    .materialize(&job.repo, job.branch.as_deref(), &dest)?
            };
            debug!("{}: {:?}", job.path, outcome);

            let nested = dest.join(NESTED_CONFIG_NAME);
            if nested.is_file() {
                let nested_source = nested.display().to_string();
                let nested_content = fs::read_to_string(&nested)?;
                self.ingest(&nested_content, &nested_source)?;
            }
        }

        Ok(Resolution {
            jobs: self.registry.jobs().to_vec(),
            diagnostics: self.diagnostics,
        })
    }

    /// Parse one configuration file's content and register its declarations.
    ///
    /// Skipped lines become diagnostics; a conflicting declaration is the
    /// only fatal outcome here.
    fn ingest(&mut self, content: &str, source: &str) -> Result<()> {
        info!("parsing {source}");
        for item in config::parse(content, source) {
            let entry = match item {
                Ok(entry) => entry,
                Err(diag) => {
                    warn!("{diag}");
                    self.diagnostics.push(diag);
                    continue;
                }
            };

            let dest = entry
                .path
                .clone()
                .unwrap_or_else(|| config::derive_path(&entry.repo));

            // Derived paths are built from the untrusted REPO string, so
            // the safety gate runs after derivation.
            if let Some(diag) = unsafe_field(&entry, &dest, source) {
                warn!("{diag}");
                self.diagnostics.push(diag);
                continue;
            }

            match self
                .registry
                .register(&entry.repo, entry.branch.as_deref(), &dest)?
            {
                Registered::Added => debug!("registered {} -> {}", entry.repo, dest),
                Registered::Duplicate => debug!("duplicate declaration for {dest}, absorbed"),
            }
        }
        Ok(())
    }
}

/// Check every field of a declaration against the safety whitelist.
///
/// Returns a diagnostic for the first unsafe field, or `None` when the
/// declaration may proceed to registration. An absent branch is vacuously
/// safe.
fn unsafe_field(entry: &Entry, dest: &str, source: &str) -> Option<Diagnostic> {
    let fields = [
        ("REPO", Some(entry.repo.as_str())),
        ("BRANCH", entry.branch.as_deref()),
        ("PATH", Some(dest)),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            if !is_safe(value) {
                return Some(Diagnostic {
                    source: source.to_string(),
                    line: entry.line,
                    kind: DiagnosticKind::UnsafeValue {
                        field,
                        value: value.to_string(),
                    },
                });
            }
        }
    }
    None
}
