//! Tilde expansion for flag values that name paths.
//!
//! Shells normally expand `~` before a program sees its arguments, but not
//! inside `--flag=~/x`, defaults, or values read from config files. The
//! helpers here perform the same expansion, best-effort: anything that cannot
//! be resolved is handed back unchanged so a later open reports the real
//! problem ("file not found") instead of an expansion error.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use log::trace;

use crate::users;

/// Expands a leading `~` or `~username` segment to a home directory.
///
/// - `~` and `~/...` use the home directory of the user running the process.
/// - `~name/...` uses the home directory of `name` from the user database.
/// - Anything else, including the empty string, is returned unchanged.
///
/// If the user cannot be resolved the input comes back untouched. The
/// remaining segments are rejoined with platform joining rules, so empty
/// segments collapse and a trailing separator survives.
///
/// # Example
///
/// ```
/// use flagext_core::paths::expand_user;
///
/// assert_eq!(expand_user("/etc/hosts"), "/etc/hosts");
/// assert_eq!(expand_user("~nobody_by_that_name/x"), "~nobody_by_that_name/x");
/// ```
pub fn expand_user(path: &str) -> String {
    if !path.starts_with('~') {
        return path.to_string();
    }

    let mut segments = path.split(MAIN_SEPARATOR);
    let token = segments.next().unwrap_or(path);

    let entry = match &token[1..] {
        "" => users::current_user(),
        name => users::lookup_user(name),
    };
    let Some(entry) = entry else {
        trace!("no home directory for {token:?}, leaving {path:?} unexpanded");
        return path.to_string();
    };

    let mut expanded = entry.home;
    for segment in segments {
        expanded.push(segment);
    }

    match expanded.into_os_string().into_string() {
        Ok(s) => s,
        Err(_) => {
            trace!("home directory for {token:?} is not UTF-8, leaving {path:?} unexpanded");
            path.to_string()
        }
    }
}

/// [`expand_user`] for values already held as paths.
///
/// Non-UTF-8 paths cannot carry a tilde token we know how to read and are
/// returned as-is.
pub fn expand_user_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.to_str() {
        Some(s) => PathBuf::from(expand_user(s)),
        None => path.to_path_buf(),
    }
}
