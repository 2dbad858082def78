//! Expansion of user-typed file paths into absolute, normalized paths
//! suitable for `file://` navigation.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::platform;

/// Returns true if `text` looks like an absolute or home-relative path.
pub fn looks_like_path(text: &str) -> bool {
    text.starts_with('/') || text.starts_with("~/")
}

/// Returns true if a command-line argument should be opened as a local file.
///
/// Accepts everything [`looks_like_path`] does plus `./`-relative paths.
pub fn is_path_argument(arg: &str) -> bool {
    looks_like_path(arg) || arg.starts_with("./")
}

/// Expands `path` against the user's home directory and the current
/// working directory.
pub fn expand(path: &str) -> String {
    let cwd = std::env::current_dir().unwrap_or_else(|e| {
        warn!(error = %e, "current directory unavailable, expanding from /");
        PathBuf::from("/")
    });
    expand_with(path, &platform::home_dir(), &cwd)
}

/// Expands `path` against explicit home and working directories.
///
/// A leading `~/` is replaced with `home`; any other relative path is taken
/// relative to `cwd`. `.` and `..` segments are resolved lexically, so the
/// target does not need to exist.
pub fn expand_with(path: &str, home: &Path, cwd: &Path) -> String {
    let joined = match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => cwd.join(path),
    };
    normalize(&joined).to_string_lossy().into_owned()
}

/// Returns `file://` followed by the expanded path.
pub fn file_url(path: &str) -> String {
    format!("file://{}", expand(path))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
