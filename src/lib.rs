//! # Gitforest Library
//!
//! This library provides the core functionality for resolving and
//! materializing a workspace of git repositories declared in `workspace.cfg`
//! files. It is designed to be used by the `gitforest` command-line tool but
//! can also be embedded in other applications that need transitive,
//! conflict-checked repository resolution.
//!
//! ## Quick Example
//!
//! ```
//! use gitforest::config;
//! use gitforest::registry::{JobRegistry, Registered};
//!
//! // Parse a configuration line
//! let entries: Vec<_> = config::parse(r#"REPO "https://host/group/name.git""#, "workspace.cfg")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(entries.len(), 1);
//!
//! // Destination paths default to the last locator segment
//! let path = config::derive_path(&entries[0].repo);
//! assert_eq!(path, "./name");
//!
//! // Register the job; identical re-declarations are absorbed
//! let mut registry = JobRegistry::new();
//! let outcome = registry.register(&entries[0].repo, None, &path).unwrap();
//! assert_eq!(outcome, Registered::Added);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `KEY "value"` line grammar of
//!   `workspace.cfg` and nested `dependencies.cfg` files, plus destination
//!   path derivation.
//! - **Safety (`safety`)**: the character whitelist applied to every value
//!   before it can reach the external git invocation.
//! - **Registry (`registry`)**: the ordered, deduplicating job store that
//!   detects conflicting declarations for a destination path.
//! - **Resolution (`resolver`)**: the FIFO worklist driver that
//!   materializes jobs and recursively ingests configurations discovered
//!   inside freshly cloned repositories.
//! - **Fetching (`fetcher`)**: the trait boundary to the external `git`
//!   tool, mockable for tests.
//! - **Manifest (`manifest`)**: export of the final registry back to the
//!   line grammar.
//!
//! ## Execution Flow
//!
//! 1. Parse the root configuration into declarations.
//! 2. Derive missing destination paths, gate every value through the
//!    safety whitelist, and register the survivors.
//! 3. Pop the next pending job, clone it (or skip when the destination
//!    already exists), and probe for a nested `dependencies.cfg`.
//! 4. Ingest nested configurations exactly like the root, growing the
//!    worklist, until no pending job remains.
//! 5. Export the final registry as `dependencies.txt`.
//!
//! The run is strictly sequential and all-or-nothing: a clone failure or a
//! conflicting declaration aborts it; malformed or unsafe lines are skipped
//! with diagnostics.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod safety;
