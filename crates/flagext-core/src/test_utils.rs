//! Shared helpers for unit tests.

use std::env;
use std::ffi::{OsStr, OsString};

/// RAII guard for env var manipulation in tests.
///
/// Restores the previous value (or absence) on drop. Each test picks its own
/// variable name.
pub(crate) struct EnvGuard {
    key: String,
    prev: Option<OsString>,
}

#[allow(unsafe_code)]
impl EnvGuard {
    pub(crate) fn new(key: &str, value: &str) -> Self {
        Self::new_os(key, OsStr::new(value))
    }

    /// Like [`EnvGuard::new`], for values that are not valid Unicode.
    pub(crate) fn new_os(key: &str, value: &OsStr) -> Self {
        let prev = env::var_os(key);
        // SAFETY: test-only.
        unsafe { env::set_var(key, value) };
        Self {
            key: key.to_string(),
            prev,
        }
    }

    pub(crate) fn remove(key: &str) -> Self {
        let prev = env::var_os(key);
        // SAFETY: test-only.
        unsafe { env::remove_var(key) };
        Self {
            key: key.to_string(),
            prev,
        }
    }
}

#[allow(unsafe_code)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: test-only.
        unsafe {
            match &self.prev {
                Some(val) => env::set_var(&self.key, val),
                None => env::remove_var(&self.key),
            }
        }
    }
}
