//! Build environment snapshot.
//!
//! The assembler never reads process-wide state. Instead, callers capture the
//! environment once at startup into an [`Environment`] and pass it down. Tests
//! construct one directly from key/value pairs.
//!
//! ## Layering
//!
//! [`Environment::load`] mirrors the usual dotenv convention:
//!
//! ```text
//! .env.<NODE_ENV>     ← file values (optional)
//! process environment ← wins on conflict
//! ```
//!
//! A missing env file is not an error; a malformed one is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Search hook title that triggers an indexing build.
pub const INCOMING_HOOK_TITLE: &str = "INCOMING_HOOK_TITLE";
/// Flag enabling search indexing regardless of the hook title.
pub const ALGOLIA: &str = "ALGOLIA";
/// Search admin credential.
pub const ALGOLIA_ADMIN_KEY: &str = "ALGOLIA_ADMIN_KEY";
/// `"true"` removes the service worker instead of installing it.
pub const SERVICE_WORKER_KILL_SWITCH: &str = "SERVICE_WORKER_KILL_SWITCH";
/// Overrides the configured canonical site URL.
pub const SITE_URL: &str = "SITE_URL";
/// Selects which `.env.<NODE_ENV>` file is layered in.
pub const NODE_ENV: &str = "NODE_ENV";

const DEFAULT_NODE_ENV: &str = "development";

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Immutable key/value view of the build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Snapshot the process environment layered over the matching dotenv file.
    ///
    /// With `env_file = None`, looks for `.env.<NODE_ENV>` in `dir`
    /// (`NODE_ENV` defaults to `development`). An explicit path must exist.
    pub fn load(dir: &Path, env_file: Option<&Path>) -> Result<Self, EnvError> {
        let process = Self::from_process();
        let path = match env_file {
            Some(p) => p.to_path_buf(),
            None => {
                let node_env = process.get(NODE_ENV).unwrap_or(DEFAULT_NODE_ENV);
                let candidate = dir.join(format!(".env.{node_env}"));
                if !candidate.exists() {
                    tracing::debug!(path = %candidate.display(), "no env file");
                    return Ok(process);
                }
                candidate
            }
        };
        let file = Self::from_env_file(&path)?;
        tracing::debug!(path = %path.display(), vars = file.len(), "loaded env file");
        Ok(file.overlay(process))
    }

    /// Parse a dotenv file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self, EnvError> {
        let wrap = |source: dotenvy::Error| EnvError::File {
            path: path.to_path_buf(),
            source,
        };
        dotenvy::from_path_iter(path)
            .map_err(wrap)?
            .map(|item| item.map_err(wrap))
            .collect()
    }

    /// Returns a new environment where `top` wins over `self` on conflicts.
    pub fn overlay(mut self, top: Environment) -> Self {
        self.vars.extend(top.vars);
        self
    }

    /// Value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key` if set and non-empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// String truthiness: set and non-empty. `"0"` and `"false"` count as truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.non_empty(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn get_returns_none_for_missing_key() {
        let env = Environment::empty();
        assert_eq!(env.get(ALGOLIA), None);
        assert!(!env.is_truthy(ALGOLIA));
    }

    #[test]
    fn empty_value_is_not_truthy() {
        let env: Environment = [(ALGOLIA, "")].into_iter().collect();
        assert_eq!(env.get(ALGOLIA), Some(""));
        assert_eq!(env.non_empty(ALGOLIA), None);
        assert!(!env.is_truthy(ALGOLIA));
    }

    #[test]
    fn any_non_empty_string_is_truthy() {
        for value in ["1", "true", "false", "0", "yes"] {
            let env: Environment = [(ALGOLIA, value)].into_iter().collect();
            assert!(env.is_truthy(ALGOLIA), "{value:?} should be truthy");
        }
    }

    #[test]
    fn overlay_prefers_top_layer() {
        let base: Environment = [("A", "base"), ("B", "base")].into_iter().collect();
        let top: Environment = [("B", "top"), ("C", "top")].into_iter().collect();
        let merged = base.overlay(top);
        assert_eq!(merged.get("A"), Some("base"));
        assert_eq!(merged.get("B"), Some("top"));
        assert_eq!(merged.get("C"), Some("top"));
    }

    #[test]
    fn from_env_file_parses_pairs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env.production");
        fs::write(
            &path,
            "# search\nALGOLIA=1\nALGOLIA_ADMIN_KEY=\"abc123\"\nSITE_URL=https://docs.example.com\n",
        )
        .unwrap();

        let env = Environment::from_env_file(&path).unwrap();
        assert_eq!(env.get(ALGOLIA), Some("1"));
        assert_eq!(env.get(ALGOLIA_ADMIN_KEY), Some("abc123"));
        assert_eq!(env.get(SITE_URL), Some("https://docs.example.com"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn from_env_file_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = Environment::from_env_file(&tmp.path().join(".env.nope"));
        assert!(matches!(result, Err(EnvError::File { .. })));
    }

    #[test]
    fn load_with_explicit_file_keeps_file_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.env");
        fs::write(&path, "DOCSITE_TEST_ONLY_KEY=from-file\n").unwrap();

        let env = Environment::load(tmp.path(), Some(&path)).unwrap();
        assert_eq!(env.get("DOCSITE_TEST_ONLY_KEY"), Some("from-file"));
    }

    #[test]
    fn load_without_file_is_process_env() {
        let tmp = TempDir::new().unwrap();
        let env = Environment::load(tmp.path(), None).unwrap();
        assert_eq!(env, Environment::from_process());
    }
}
