//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the directory holding the plugin's own files (trace output).
///
/// Resolves to `/host/.local/share/zellij/notepane`. `/host` is the cwd of the
/// last focused terminal, or the folder Zellij was started in, which is
/// usually the user's home.
///
/// # Examples
///
/// ```
/// use notepane::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/notepane");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("notepane")
}

/// Maps `~`-prefixed paths onto the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use notepane::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
