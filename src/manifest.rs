//! # Result Export
//!
//! Serializes the final job registry back to the `KEY "value"` line
//! grammar, one line per job. An absent branch is rendered as the literal
//! placeholder `HEAD`, which distinguishes "use the default branch" from an
//! explicit revision; consumers must not round-trip the placeholder as a
//! real revision name.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::registry::Job;

/// Placeholder written for jobs that use the repository's default branch.
pub const DEFAULT_BRANCH_PLACEHOLDER: &str = "HEAD";

/// Default manifest file name, written beside the root configuration.
pub const MANIFEST_NAME: &str = "dependencies.txt";

/// Render jobs as manifest text, one `REPO ... BRANCH ... PATH ...` line
/// per job in registration order.
pub fn render(jobs: &[Job]) -> String {
    let mut out = String::new();
    for job in jobs {
        let branch = job.branch.as_deref().unwrap_or(DEFAULT_BRANCH_PLACEHOLDER);
        // Infallible for String targets.
        let _ = writeln!(
            out,
            "REPO \"{}\" BRANCH \"{}\" PATH \"{}\"",
            job.repo, branch, job.path
        );
    }
    out
}

/// Write the rendered manifest to `path`, replacing any previous content.
pub fn write(jobs: &[Job], path: &Path) -> Result<()> {
    fs::write(path, render(jobs))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(repo: &str, branch: Option<&str>, path: &str) -> Job {
        Job {
            repo: repo.to_string(),
            branch: branch.map(str::to_string),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_render_default_branch_as_head_placeholder() {
        let jobs = vec![job("https://x/y/z.git", None, "./z")];
        assert_eq!(
            render(&jobs),
            "REPO \"https://x/y/z.git\" BRANCH \"HEAD\" PATH \"./z\"\n"
        );
    }

    #[test]
    fn test_render_explicit_branch() {
        let jobs = vec![job("https://x/y/z.git", Some("dev"), "./z")];
        assert_eq!(
            render(&jobs),
            "REPO \"https://x/y/z.git\" BRANCH \"dev\" PATH \"./z\"\n"
        );
    }

    #[test]
    fn test_render_preserves_registration_order() {
        let jobs = vec![
            job("https://host/b.git", None, "./b"),
            job("https://host/a.git", Some("main"), "./a"),
        ];
        let text = render(&jobs);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("./b"));
        assert!(lines[1].contains("./a"));
    }

    #[test]
    fn test_render_empty_registry_is_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        let jobs = vec![job("https://x/y/z.git", None, "./z")];

        write(&jobs, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, render(&jobs));
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        std::fs::write(&path, "stale").unwrap();

        write(&[], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
