use std::path::{Path, PathBuf};

/// Resolves a path against the process working directory.
///
/// Absolute paths are returned unchanged; relative paths are joined onto the
/// current directory. Called once per directory at startup.
pub fn workspace<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let current_dir = std::env::current_dir().expect("Failed to get current directory");
    current_dir.join(path)
}
