//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/diary/posts/     ← cwd
/// /home/user/diary/diary.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Upward search starting at `start`.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Normalize a path to absolute form.
///
/// Canonicalizes when the path exists, otherwise joins it onto cwd.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a possibly site-relative URL against the base URL.
///
/// Absolute URLs pass through unchanged:
/// ```ignore
/// absolute_url("https://d.dev", "/logo.png")          -> "https://d.dev/logo.png"
/// absolute_url("https://d.dev", "https://cdn/x.png")  -> "https://cdn/x.png"
/// ```
pub fn absolute_url(base_url: &str, target: &str) -> String {
    if url::Url::parse(target).is_ok() {
        return target.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("posts/2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("diary.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("diary.toml")).unwrap();
        assert_eq!(found, dir.path().join("diary.toml"));
    }

    #[test]
    fn test_find_config_ignores_directories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(sub.join("diary.toml")).unwrap();
        fs::write(dir.path().join("diary.toml"), "").unwrap();

        let found = find_config_from(&sub, Path::new("diary.toml")).unwrap();
        assert_eq!(found, dir.path().join("diary.toml"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://diary.dev/", "/favicon.ico"),
            "https://diary.dev/favicon.ico"
        );
        assert_eq!(
            absolute_url("https://diary.dev", "logo.png"),
            "https://diary.dev/logo.png"
        );
        assert_eq!(
            absolute_url("https://diary.dev", "https://cdn.example.com/logo.png"),
            "https://cdn.example.com/logo.png"
        );
    }

    #[test]
    fn test_normalize_relative_path_is_absolute() {
        assert!(normalize_path(Path::new("does/not/exist")).is_absolute());
    }
}
