//! Path utilities for storytime data files.
//!
//! - Returns `PathBuf` and `PathError`; no terminal I/O here
//! - OS-specific lookup is kept in `platform`

mod error;
mod platform;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};

/// File name of the profile list, named after the storage key it replaces.
pub const PROFILES_FILE_NAME: &str = "cuentos-profiles.json";

/// Full path of the profile list under [`data_root`].
pub fn profiles_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(PROFILES_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::test_utils::{ENV_LOCK, EnvVarGuard};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_override_wins_and_is_created() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("custom-root");
        let _env = EnvVarGuard::set(DATA_DIR_ENV, root.to_str().unwrap());

        assert_eq!(data_root().unwrap(), root);
        assert!(root.is_dir());
        assert_eq!(profiles_path().unwrap(), root.join("cuentos-profiles.json"));
    }

    #[test]
    fn override_pointing_at_a_file_is_rejected() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, file.to_str().unwrap());

        assert!(matches!(data_root(), Err(PathError::NotADirectory(_))));
    }
}
