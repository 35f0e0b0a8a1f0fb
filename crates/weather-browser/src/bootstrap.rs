//! Environment preparation before any browser is launched.
//!
//! Every launch gets its own Chrome profile directory named
//! `weather-smoke-profile-<uuid>`. A run that crashes or is killed leaves
//! those behind, so a run can optionally sweep them up first. Local page
//! locations are also resolved here.

use crate::error::{BrowserError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Prefix shared by all profile directories this crate creates.
pub const PROFILE_PREFIX: &str = "weather-smoke-profile-";

/// Returns a fresh, unique profile directory path under `root`.
///
/// The directory is not created; Chrome creates it on launch.
#[must_use]
pub fn profile_dir(root: &Path) -> PathBuf {
    root.join(format!("{PROFILE_PREFIX}{}", uuid::Uuid::new_v4()))
}

/// Removes leftover profile directories under `root`.
///
/// Only directories whose name starts with [`PROFILE_PREFIX`] are touched.
/// Directories that cannot be removed (still in use, permissions) are logged
/// and skipped. Returns the number removed.
///
/// # Errors
///
/// Returns an error if `root` itself cannot be read.
pub fn clean_stale_profiles(root: &Path) -> Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let is_profile = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(PROFILE_PREFIX));

        if !is_profile || !entry.file_type()?.is_dir() {
            continue;
        }

        match fs::remove_dir_all(entry.path()) {
            Ok(()) => {
                debug!("Removed stale profile {}", entry.path().display());
                removed += 1;
            }
            Err(e) => warn!("Could not remove {}: {}", entry.path().display(), e),
        }
    }

    if removed > 0 {
        info!("Cleaned {} stale browser profile(s) from {}", removed, root.display());
    } else {
        debug!("No stale browser profiles under {}", root.display());
    }

    Ok(removed)
}

/// Checks that an explicitly configured Chrome executable exists.
///
/// # Errors
///
/// Returns `LaunchFailed` if the path is not a file.
pub fn check_chrome_path(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BrowserError::LaunchFailed {
            reason: format!("Chrome executable not found at {}", path.display()),
            source: None,
        })
    }
}

/// Turns a page location into a URL the browser can load.
///
/// `http(s)://`, `file://` and `data:` locations pass through unchanged.
/// Anything else is a filesystem path. It is resolved to an absolute path,
/// which must exist.
///
/// # Errors
///
/// Returns `Io` if the local file does not exist, or `InvalidUrl` if the
/// resolved path cannot be expressed as a `file://` URL.
pub fn page_url(location: &str) -> Result<String> {
    const PASSTHROUGH: [&str; 4] = ["http://", "https://", "file://", "data:"];
    if PASSTHROUGH.iter().any(|scheme| location.starts_with(scheme)) {
        return Ok(location.to_string());
    }

    let absolute = fs::canonicalize(location)?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| BrowserError::InvalidUrl(absolute.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn profile_dirs_are_unique_and_prefixed() {
        let root = Path::new("/tmp");
        let a = profile_dir(root);
        let b = profile_dir(root);

        assert_ne!(a, b);
        let name = a.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with(PROFILE_PREFIX));
    }

    #[test]
    fn clean_removes_only_profile_dirs() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join(format!("{PROFILE_PREFIX}old-1"))).unwrap();
        fs::create_dir_all(root.path().join(format!("{PROFILE_PREFIX}old-2/Default"))).unwrap();
        fs::create_dir(root.path().join("unrelated")).unwrap();
        fs::write(root.path().join(format!("{PROFILE_PREFIX}file")), "x").unwrap();

        let removed = clean_stale_profiles(root.path()).unwrap();

        assert_eq!(removed, 2);
        assert!(root.path().join("unrelated").exists());
        assert!(root.path().join(format!("{PROFILE_PREFIX}file")).exists());
    }

    #[test]
    fn clean_on_empty_root() {
        let root = TempDir::new().unwrap();
        assert_eq!(clean_stale_profiles(root.path()).unwrap(), 0);
    }

    #[test]
    fn missing_chrome_path_is_launch_failure() {
        let err = check_chrome_path(Path::new("/definitely/not/chrome")).unwrap_err();
        assert!(matches!(err, BrowserError::LaunchFailed { .. }));
    }

    #[test]
    fn urls_pass_through() {
        for url in [
            "http://localhost:8080/",
            "https://example.com/app",
            "file:///srv/app/index.html",
            "data:text/html,<p>hi</p>",
        ] {
            assert_eq!(page_url(url).unwrap(), url);
        }
    }

    #[test]
    fn local_paths_become_file_urls() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("index page.html");
        fs::write(&page, "<html></html>").unwrap();

        let url = page_url(page.to_str().unwrap()).unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("index%20page.html"));
    }

    #[test]
    fn reserved_characters_in_paths_are_escaped() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("weather#2").join("feature%2Fx");
        fs::create_dir_all(&nested).unwrap();
        let page = nested.join("index.html");
        fs::write(&page, "<html></html>").unwrap();

        let url = page_url(page.to_str().unwrap()).unwrap();

        assert!(!url.contains('#'));
        assert!(url.contains("weather%232/feature%252Fx/index.html"));
        let back = Url::parse(&url).unwrap().to_file_path().unwrap();
        assert_eq!(back, fs::canonicalize(&page).unwrap());
    }

    #[test]
    fn missing_local_page_is_io_error() {
        let err = page_url("no/such/app/index.html").unwrap_err();
        assert!(matches!(err, BrowserError::Io(_)));
    }
}
