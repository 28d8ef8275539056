//! System user database lookups.
//!
//! Only the two queries tilde expansion needs: a user by name and the user
//! owning the current process. On Unix these go through the reentrant
//! `getpw*_r` calls; elsewhere named lookups are unsupported and the current
//! user falls back to the platform home directory.

use std::path::PathBuf;

/// A user database entry, reduced to the fields tilde expansion cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    /// Login name.
    pub name: String,
    /// Home directory.
    pub home: PathBuf,
}

/// Look up a user by login name.
///
/// Returns `None` for unknown users, names containing NUL bytes, and on
/// platforms without a user database.
pub fn lookup_user(name: &str) -> Option<UserEntry> {
    if name.is_empty() {
        return None;
    }
    imp::by_name(name)
}

/// The user owning the current process.
pub fn current_user() -> Option<UserEntry> {
    imp::current()
}

#[cfg(unix)]
#[allow(unsafe_code)]
mod imp {
    use super::UserEntry;
    use std::ffi::{CStr, CString, OsStr};
    use std::os::unix::ffi::OsStrExt;
    use std::path::PathBuf;
    use std::ptr;

    /// Initial scratch buffer for `getpw*_r`; grown on `ERANGE`.
    const INITIAL_BUF: usize = 1024;
    const MAX_BUF: usize = 1 << 20;

    pub(super) fn by_name(name: &str) -> Option<UserEntry> {
        let c_name = CString::new(name).ok()?;
        query(|pwd, buf, result| {
            // SAFETY: every pointer is valid for the duration of the call and
            // `buf.len()` is the true capacity of `buf`.
            unsafe { libc::getpwnam_r(c_name.as_ptr(), pwd, buf.as_mut_ptr(), buf.len(), result) }
        })
    }

    pub(super) fn current() -> Option<UserEntry> {
        // SAFETY: getuid has no preconditions and cannot fail.
        let uid = unsafe { libc::getuid() };
        query(|pwd, buf, result| {
            // SAFETY: as in `by_name`.
            unsafe { libc::getpwuid_r(uid, pwd, buf.as_mut_ptr(), buf.len(), result) }
        })
        .or_else(super::fallback_current)
    }

    fn query<F>(mut call: F) -> Option<UserEntry>
    where
        F: FnMut(*mut libc::passwd, &mut Vec<libc::c_char>, *mut *mut libc::passwd) -> libc::c_int,
    {
        let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUF];
        loop {
            // SAFETY: passwd is a plain C struct; all-zero is a valid value.
            let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = ptr::null_mut();

            let rc = call(&raw mut pwd, &mut buf, &raw mut result);
            if rc == libc::ERANGE && buf.len() < MAX_BUF {
                let grown = buf.len() * 2;
                buf.resize(grown, 0);
                continue;
            }
            if rc != 0 || result.is_null() || pwd.pw_dir.is_null() || pwd.pw_name.is_null() {
                return None;
            }

            // SAFETY: on success both fields point at NUL-terminated strings
            // inside `buf`, which is still alive here.
            let (name, home) = unsafe { (CStr::from_ptr(pwd.pw_name), CStr::from_ptr(pwd.pw_dir)) };
            return Some(UserEntry {
                name: name.to_string_lossy().into_owned(),
                home: PathBuf::from(OsStr::from_bytes(home.to_bytes())),
            });
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use super::UserEntry;

    pub(super) fn by_name(_name: &str) -> Option<UserEntry> {
        None
    }

    pub(super) fn current() -> Option<UserEntry> {
        super::fallback_current()
    }
}

/// Current user from the environment when the user database has no answer.
fn fallback_current() -> Option<UserEntry> {
    let home = dirs::home_dir()?;
    let name = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default();
    Some(UserEntry { name, home })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_empty_name() {
        assert!(lookup_user("").is_none());
    }

    #[test]
    fn test_lookup_name_with_nul() {
        assert!(lookup_user("ro\0ot").is_none());
    }

    #[test]
    fn test_lookup_unknown_user() {
        assert!(lookup_user("flagext_no_such_user_4242").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_current_user_round_trips_by_name() {
        let Some(me) = current_user() else {
            return;
        };
        if me.name.is_empty() {
            return;
        }
        // A uid without a passwd entry falls back to $USER, which need not
        // resolve by name.
        if let Some(found) = lookup_user(&me.name) {
            assert_eq!(found.home, me.home);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_current_user_home_is_absolute() {
        if let Some(me) = current_user() {
            assert!(me.home.is_absolute(), "home was {:?}", me.home);
        }
    }
}
