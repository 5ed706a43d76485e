//! Environment isolation for tests that touch `STORYTIME_DATA_DIR`.

use std::env;
use std::sync::Mutex;

/// Serializes tests that read or write process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets an environment variable and restores the previous value on drop.
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        // SAFETY: callers hold ENV_LOCK, so no other test thread touches the environment.
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: see `set`.
        unsafe {
            match self.previous {
                Some(ref value) => env::set_var(&self.key, value),
                None => env::remove_var(&self.key),
            }
        }
    }
}
