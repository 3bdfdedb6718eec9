use std::path::{Component, Path, PathBuf};

use dirs_next::home_dir;

/// Replace a leading `~` component with the user's home directory.
///
/// Only a first component that is exactly `~` is expanded; every other path,
/// including ones that are not valid UTF-8, is returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();
    let starts_with_tilde = matches!(components.next(), Some(Component::Normal(first)) if first == "~");
    if !starts_with_tilde {
        return path.to_path_buf();
    }

    let Some(home) = home_dir() else {
        return path.to_path_buf();
    };
    let rest = components.as_path();
    if rest.as_os_str().is_empty() { home } else { home.join(rest) }
}
