// ============================
// authd-backend-lib/src/auth/policy.rs
// ============================
//! Path-exclusion policy: decides whether a request must authenticate.
//! Shared by every strategy; matching is exact-string only.

/// Normalize a path to end with a trailing slash.
pub fn normalize_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Whether authentication is required for `path`.
///
/// Returns `false` only when the normalized path exactly matches a
/// normalized entry of `excluded_paths`. An empty exclusion list means
/// everything requires auth.
pub fn require_auth(path: &str, excluded_paths: &[String]) -> bool {
    if excluded_paths.is_empty() {
        return true;
    }

    let path = normalize_path(path);
    !excluded_paths.iter().any(|e| normalize_path(e) == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_empty_exclusions_require_auth() {
        assert!(require_auth("/api/v1/status", &[]));
        assert!(require_auth("/", &[]));
    }

    #[test]
    fn test_exact_match_excludes() {
        let excluded = paths(&["/api/v1/status/"]);
        assert!(!require_auth("/api/v1/status", &excluded));
        assert!(!require_auth("/api/v1/status/", &excluded));
        assert!(require_auth("/api/v1/stat", &excluded));
        assert!(require_auth("/api/v1/status/x", &excluded));
    }

    #[test]
    fn test_exclusions_are_normalized_too() {
        // Entries without a trailing slash still match.
        let excluded = paths(&["/users"]);
        assert!(!require_auth("/users", &excluded));
        assert!(!require_auth("/users/", &excluded));
    }

    #[test]
    fn test_no_glob_matching() {
        let excluded = paths(&["/api/*"]);
        assert!(require_auth("/api/v1/users", &excluded));
    }

    #[test]
    fn test_empty_path_only_matches_root() {
        let excluded = paths(&["/other/"]);
        assert!(require_auth("", &excluded));

        let excluded = paths(&["/"]);
        assert!(!require_auth("", &excluded));
    }
}
