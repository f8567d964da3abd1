//! # Safety Validation
//!
//! Whitelist check for values that end up as arguments to the external
//! `git` process. A value is safe iff every character is alphanumeric or
//! one of `. / _ : - @`.
//!
//! The check runs after path derivation (derived paths are built from the
//! same untrusted `REPO` string) and before any job reaches the fetcher.
//! The fetcher passes arguments as a structured vector rather than a shell
//! string, so this whitelist is defense in depth rather than the sole
//! barrier, but its contract is honored regardless: a record containing an
//! unsafe value is skipped with a diagnostic and never becomes a job.

/// Returns `true` iff every character of `value` is alphanumeric or one of
/// `. / _ : - @`.
///
/// The empty string is vacuously safe.
pub fn is_safe(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | ':' | '-' | '@'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_urls_and_paths() {
        assert!(is_safe("https://github.com/group/name.git"));
        assert!(is_safe("git@github.com:group/name.git"));
        assert!(is_safe("./vendor/name"));
        assert!(is_safe("feature-123_x"));
    }

    #[test]
    fn test_accepts_every_whitelisted_punctuation() {
        assert!(is_safe("./_:-@"));
    }

    #[test]
    fn test_empty_string_is_safe() {
        assert!(is_safe(""));
    }

    #[test]
    fn test_rejects_shell_metacharacters() {
        assert!(!is_safe("evil; rm -rf /"));
        assert!(!is_safe("a|b"));
        assert!(!is_safe("a`b`"));
        assert!(!is_safe("$HOME"));
        assert!(!is_safe("a b"));
        assert!(!is_safe("a&b"));
        assert!(!is_safe("a>b"));
        assert!(!is_safe("a'b"));
        assert!(!is_safe("a\"b"));
    }

    #[test]
    fn test_rejects_non_ascii_alphanumerics() {
        // The whitelist is ASCII; anything outside it is rejected.
        assert!(!is_safe("répo"));
    }
}
