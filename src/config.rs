//! # Configuration Parsing
//!
//! This module implements the `KEY "value"` line grammar used by
//! `workspace.cfg` and by the nested `dependencies.cfg` files discovered
//! inside cloned repositories.
//!
//! ## Grammar
//!
//! One declaration per line. A line may carry up to three fields — `REPO`,
//! `BRANCH`, and `PATH` — each written as `KEY "value"`. Extraction is
//! substring-based: the first occurrence of the key token is located, then
//! the first `"` after it, then the next `"`; the text between the quotes is
//! the value. Key order within a line is irrelevant and the first occurrence
//! of each key wins. Lines that are blank, or whose first non-whitespace
//! character is `#`, are comments.
//!
//! `REPO` is required; a line without it produces a [`Diagnostic`] and no
//! entry. `BRANCH` is optional and its absence means "use the repository's
//! default branch" — distinct from an explicit empty string. `PATH` is
//! optional; when absent the destination is derived from the repository
//! locator by [`derive_path`].
//!
//! Parsing is lazy: [`parse`] returns an iterator that walks the input line
//! by line, yielding `Ok(Entry)` for well-formed declarations and
//! `Err(Diagnostic)` for lines that must be skipped. Skipping is the
//! caller's recovery; nothing in this module aborts a run.

use std::fmt;
use std::str::Lines;

/// The file name probed for inside each materialized destination.
pub const NESTED_CONFIG_NAME: &str = "dependencies.cfg";

/// A raw declaration extracted from one configuration line, prior to
/// validation and path derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Repository locator (URL-like). Always present.
    pub repo: String,
    /// Branch, tag, or ref. `None` means the repository's default branch.
    pub branch: Option<String>,
    /// Declared destination path, if any. `None` triggers derivation.
    pub path: Option<String>,
    /// 1-based line number in the source file.
    pub line: usize,
}

/// A non-fatal problem with a single configuration line.
///
/// Diagnostics are reported and the offending line is skipped; they never
/// abort the resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path of the configuration file the line came from.
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

/// What went wrong with a skipped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line carried no `REPO "value"` field.
    MissingRepo,
    /// A field value failed the safety whitelist (see [`crate::safety`]).
    UnsafeValue {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingRepo => {
                write!(f, "{} line {}: REPO not found", self.source, self.line)
            }
            DiagnosticKind::UnsafeValue { field, value } => write!(
                f,
                "{} line {}: unsafe {} value '{}'",
                self.source, self.line, field, value
            ),
        }
    }
}

/// Lazy iterator over the declarations in one configuration file.
///
/// Created by [`parse`]. Comment and blank lines are silently skipped;
/// every other line yields either an [`Entry`] or a [`Diagnostic`].
pub struct Entries<'a> {
    lines: Lines<'a>,
    source: String,
    line: usize,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.lines.by_ref() {
            self.line += 1;

            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(repo) = extract_value(raw, "REPO") else {
                return Some(Err(Diagnostic {
                    source: self.source.clone(),
                    line: self.line,
                    kind: DiagnosticKind::MissingRepo,
                }));
            };

            return Some(Ok(Entry {
                repo: repo.to_string(),
                branch: extract_value(raw, "BRANCH").map(str::to_string),
                path: extract_value(raw, "PATH").map(str::to_string),
                line: self.line,
            }));
        }
        None
    }
}

/// Parse configuration file content into a lazy sequence of declarations.
///
/// `source` is the file path the content was read from; it is carried into
/// entries and diagnostics so problems can be attributed to a file and line.
pub fn parse<'a>(content: &'a str, source: &str) -> Entries<'a> {
    Entries {
        lines: content.lines(),
        source: source.to_string(),
        line: 0,
    }
}

/// Extract the value of `KEY "value"` from a line.
///
/// Finds the first occurrence of `key`, then the first `"` after it, then
/// the next `"`. Returns `None` when the key or either quote is missing.
fn extract_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let key_end = line.find(key)? + key.len();
    let rest = &line[key_end..];
    let open = rest.find('"')?;
    let rest = &rest[open + 1..];
    let close = rest.find('"')?;
    Some(&rest[..close])
}

/// Derive a destination path from a repository locator.
///
/// Takes the final `/`-separated segment of the locator (or the whole
/// locator if it contains no `/`), truncates at the first `.git`
/// occurrence, and prefixes `./`. Deterministic and idempotent: the same
/// locator always derives the same path.
pub fn derive_path(repo: &str) -> String {
    let base = repo.rsplit('/').next().unwrap_or(repo);
    let base = match base.find(".git") {
        Some(idx) => &base[..idx],
        None => base,
    };
    format!("./{base}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(content: &str) -> Vec<Result<Entry, Diagnostic>> {
        parse(content, "test.cfg").collect()
    }

    #[test]
    fn test_parse_full_line() {
        let parsed = entries(r#"REPO "https://host/a.git" BRANCH "main" PATH "./a""#);
        assert_eq!(parsed.len(), 1);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.repo, "https://host/a.git");
        assert_eq!(entry.branch.as_deref(), Some("main"));
        assert_eq!(entry.path.as_deref(), Some("./a"));
        assert_eq!(entry.line, 1);
    }

    #[test]
    fn test_parse_repo_only() {
        let parsed = entries(r#"REPO "https://host/a.git""#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.branch, None);
        assert_eq!(entry.path, None);
    }

    #[test]
    fn test_parse_key_order_irrelevant() {
        let parsed = entries(r#"PATH "./b" REPO "https://host/b.git""#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.repo, "https://host/b.git");
        assert_eq!(entry.path.as_deref(), Some("./b"));
    }

    #[test]
    fn test_parse_first_key_occurrence_wins() {
        let parsed = entries(r#"REPO "first" REPO "second""#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.repo, "first");
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = r#"
# a comment
   # indented comment

REPO "https://host/a.git"
"#;
        let parsed = entries(content);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].as_ref().unwrap().line, 5);
    }

    #[test]
    fn test_parse_missing_repo_is_diagnostic() {
        let parsed = entries(r#"BRANCH "main" PATH "./a""#);
        assert_eq!(parsed.len(), 1);
        let diag = parsed[0].as_ref().unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::MissingRepo);
        assert_eq!(diag.line, 1);
        assert_eq!(diag.source, "test.cfg");
    }

    #[test]
    fn test_parse_continues_past_bad_line() {
        let content = "BRANCH \"main\"\nREPO \"https://host/a.git\"\n";
        let parsed = entries(content);
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_err());
        assert_eq!(parsed[1].as_ref().unwrap().repo, "https://host/a.git");
    }

    #[test]
    fn test_parse_explicit_empty_branch_is_not_absent() {
        let parsed = entries(r#"REPO "https://host/a.git" BRANCH """#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.branch.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_unclosed_quote_yields_no_value() {
        // A key whose value never closes its quote is treated as absent.
        let parsed = entries(r#"REPO "https://host/a.git" BRANCH "main"#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.branch, None);
    }

    #[test]
    fn test_parse_surrounding_text_ignored() {
        let parsed = entries(r#"pin REPO "https://host/a.git" for later"#);
        let entry = parsed[0].as_ref().unwrap();
        assert_eq!(entry.repo, "https://host/a.git");
    }

    #[test]
    fn test_derive_path_strips_git_suffix() {
        assert_eq!(derive_path("https://host/group/name.git"), "./name");
    }

    #[test]
    fn test_derive_path_without_git_suffix() {
        assert_eq!(derive_path("https://host/group/name"), "./name");
    }

    #[test]
    fn test_derive_path_no_slash() {
        assert_eq!(derive_path("name.git"), "./name");
        assert_eq!(derive_path("name"), "./name");
    }

    #[test]
    fn test_derive_path_truncates_at_first_git_occurrence() {
        assert_eq!(derive_path("https://host/name.github.git"), "./name");
    }

    #[test]
    fn test_derive_path_idempotent() {
        let first = derive_path("https://host/group/name.git");
        let second = derive_path("https://host/group/name.git");
        assert_eq!(first, second);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            source: "workspace.cfg".to_string(),
            line: 3,
            kind: DiagnosticKind::MissingRepo,
        };
        let display = format!("{}", diag);
        assert!(display.contains("workspace.cfg"));
        assert!(display.contains("line 3"));
        assert!(display.contains("REPO not found"));
    }
}
