//! Completion suggestions for multi-source values.
//!
//! Interactive shells call into this with the partially typed word. Only the
//! two prefixed forms have anything to suggest; a literal has no candidates.

use std::env;

use glob::Pattern;

use crate::paths::expand_user;
use crate::source::Prefix;

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completion {
    /// Replacement for the whole word, prefix included.
    pub item: String,
    /// Optional short description shown next to the item.
    pub description: Option<String>,
}

impl Completion {
    fn new(item: String) -> Self {
        Self {
            item,
            description: None,
        }
    }
}

/// Suggest completions for a partially typed multi-source value.
///
/// - `file:<partial>`: paths matching `<partial>*` after tilde expansion.
///   Directories are described as such.
/// - `env:<partial>`: set environment variables whose name starts with
///   `<partial>`.
/// - anything else: nothing.
///
/// Results are sorted and keep their prefix.
pub fn complete(partial: &str) -> Vec<Completion> {
    match Prefix::split(partial) {
        Some((Prefix::File, path)) => complete_files(path),
        Some((Prefix::Env, name)) => complete_env(name),
        None => Vec::new(),
    }
}

fn complete_files(partial: &str) -> Vec<Completion> {
    let expanded = expand_user(partial);
    let pattern = format!("{}*", Pattern::escape(&expanded));

    let Ok(paths) = glob::glob(&pattern) else {
        return Vec::new();
    };

    let mut out: Vec<Completion> = paths
        .filter_map(|entry| entry.ok())
        .filter_map(|path| {
            let text = path.to_str()?.to_string();
            let mut completion = Completion::new(format!("{}{text}", Prefix::File));
            if path.is_dir() {
                completion.description = Some("directory".to_string());
            }
            Some(completion)
        })
        .collect();
    out.sort();
    out
}

fn complete_env(partial: &str) -> Vec<Completion> {
    let mut names: Vec<String> = env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.starts_with(partial))
        .collect();
    names.sort();
    names.dedup();
    names
        .into_iter()
        .map(|name| Completion::new(format!("{}{name}", Prefix::Env)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::EnvGuard;
    use std::fs;
    use tempfile::TempDir;

    fn items(completions: &[Completion]) -> Vec<&str> {
        completions.iter().map(|c| c.item.as_str()).collect()
    }

    #[test]
    fn test_complete_literal_is_empty() {
        assert!(complete("plain").is_empty());
        assert!(complete("").is_empty());
    }

    #[test]
    fn test_complete_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("alpha.txt"), "").unwrap();
        fs::write(temp.path().join("alpine.txt"), "").unwrap();
        fs::write(temp.path().join("beta.txt"), "").unwrap();

        let partial = format!("file:{}", temp.path().join("al").display());
        let got = complete(&partial);

        let expected_a = format!("file:{}", temp.path().join("alpha.txt").display());
        let expected_b = format!("file:{}", temp.path().join("alpine.txt").display());
        assert_eq!(items(&got), vec![expected_a.as_str(), expected_b.as_str()]);
    }

    #[test]
    fn test_complete_files_marks_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();

        let partial = format!("file:{}", temp.path().join("sub").display());
        let got = complete(&partial);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].description.as_deref(), Some("directory"));
    }

    #[test]
    fn test_complete_files_escapes_glob_metacharacters() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("[x]file"), "").unwrap();
        fs::write(temp.path().join("xfile"), "").unwrap();

        let partial = format!("file:{}", temp.path().join("[x]").display());
        let got = complete(&partial);
        assert_eq!(got.len(), 1);
        assert!(got[0].item.ends_with("[x]file"));
    }

    #[test]
    fn test_complete_files_no_match() {
        let temp = TempDir::new().unwrap();
        let partial = format!("file:{}", temp.path().join("zzz").display());
        assert!(complete(&partial).is_empty());
    }

    #[test]
    fn test_complete_env() {
        let _a = EnvGuard::new("FLAGEXT_COMPLETE_ONE", "1");
        let _b = EnvGuard::new("FLAGEXT_COMPLETE_TWO", "2");

        let got = complete("env:FLAGEXT_COMPLETE_");
        assert_eq!(
            items(&got),
            vec!["env:FLAGEXT_COMPLETE_ONE", "env:FLAGEXT_COMPLETE_TWO"]
        );
    }

    #[test]
    fn test_complete_env_includes_empty_values() {
        let _a = EnvGuard::new("FLAGEXT_BLANK_COMPLETION", "");
        let got = complete("env:FLAGEXT_BLANK_COMPLETION");
        assert_eq!(items(&got), vec!["env:FLAGEXT_BLANK_COMPLETION"]);
    }

    #[test]
    fn test_complete_env_no_match() {
        assert!(complete("env:FLAGEXT_NOTHING_STARTS_LIKE_THIS_").is_empty());
    }
}
