//! Merged configuration storage with memoized dotted-path lookups.
//!
//! Responsibilities:
//! - Merge a decoded tree over an environment snapshot (file values win).
//! - Resolve dotted keys (`db.host`) against the merged storage, with caching.
//! - Validate that required keys are present.
//! - Publish merged entries to the process environment.
//!
//! Does NOT handle:
//! - Locating or decoding files (see `loader` and `readers`).
//!
//! Invariants / Assumptions:
//! - Storage is always a `ConfigValue::Map` and never changes after construction.
//! - The cache records the resolution of a key (found or absent); defaults are
//!   applied per call and never cached.
//! - Required-key validation checks top-level members only. Dotted paths are
//!   not walked, so `require("db.host")` only passes for a literal top-level
//!   key named `db.host`.
//! - The store is not `Sync`; share it across threads behind a lock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::constants::PATH_SEPARATOR;
use crate::env::{EnvSnapshot, export_var};
use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue};

/// Loaded configuration plus its lookup cache.
#[derive(Debug)]
pub struct ConfigStore {
    storage: ConfigValue,
    cache: RefCell<HashMap<String, Option<ConfigValue>>>,
    walks: Cell<u64>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigStore {
    /// Wrap an already merged tree. Non-map values are replaced by an empty map.
    pub fn new(storage: ConfigValue) -> Self {
        let storage = match storage {
            ConfigValue::Map(_) => storage,
            _ => ConfigValue::empty_map(),
        };
        Self {
            storage,
            cache: RefCell::new(HashMap::new()),
            walks: Cell::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(ConfigValue::empty_map())
    }

    /// Build a store from a decoded tree layered over `env`.
    pub fn from_merged(tree: ConfigValue, env: &EnvSnapshot) -> Self {
        Self::new(Self::merge(tree, env))
    }

    /// Look up `key`, falling back to `default` when it is absent.
    ///
    /// `None` returns the whole storage tree.
    pub fn get(&self, key: Option<&str>, default: ConfigValue) -> ConfigValue {
        match key {
            None => self.storage.clone(),
            Some(key) => self.lookup(key).unwrap_or(default),
        }
    }

    /// Resolve `key`, memoizing the result.
    ///
    /// The unsplit key is tried as a direct top-level member first, since
    /// keys may legitimately contain dots. Otherwise the key is split on `.`
    /// and walked; any segment that is missing, or that would index into a
    /// non-map value, resolves to `None`.
    pub fn lookup(&self, key: &str) -> Option<ConfigValue> {
        if let Some(hit) = self.cache.borrow().get(key) {
            tracing::trace!(key, "Lookup cache hit");
            return hit.clone();
        }

        let resolved = self.walk(key).cloned();
        self.walks.set(self.walks.get() + 1);
        tracing::trace!(key, found = resolved.is_some(), "Lookup resolved");
        self.cache
            .borrow_mut()
            .insert(key.to_string(), resolved.clone());
        resolved
    }

    fn walk(&self, key: &str) -> Option<&ConfigValue> {
        if let Some(direct) = self.storage.member(key) {
            return Some(direct);
        }
        key.split(PATH_SEPARATOR)
            .try_fold(&self.storage, |node, segment| node.member(segment))
    }

    /// The full, live storage tree.
    pub fn all(&self) -> &ConfigValue {
        &self.storage
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.storage.as_map().into_iter().flatten()
    }

    /// Whether `key` is a top-level member.
    pub fn contains(&self, key: &str) -> bool {
        self.storage.member(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.storage.as_map().map_or(0, ConfigMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups that had to walk the storage (cache misses).
    pub fn resolved_lookups(&self) -> u64 {
        self.walks.get()
    }

    /// Layer `tree` over `env`.
    ///
    /// Environment entries are inserted first as strings; every top-level
    /// entry of `tree` then overwrites a same-named key. Nested tree values
    /// are kept as-is.
    pub fn merge(tree: ConfigValue, env: &EnvSnapshot) -> ConfigValue {
        let mut merged: ConfigMap = env
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(v)))
            .collect();
        if let ConfigValue::Map(entries) = tree {
            for (key, value) in entries {
                merged.insert(key, value);
            }
        }
        ConfigValue::Map(merged)
    }

    /// Write every top-level entry into the process environment.
    ///
    /// Entries the platform cannot represent are skipped with a warning.
    /// Returns the number of variables written.
    pub fn publish(&self) -> usize {
        let mut written = 0;
        for (key, value) in self.entries() {
            match export_var(key, &value.to_env_string()) {
                Ok(()) => written += 1,
                Err(reason) => {
                    tracing::warn!(key = %key.escape_debug(), reason = reason.as_str(), "Skipping environment entry");
                }
            }
        }
        written
    }

    /// Fail on the first key in `keys` that is not a top-level member.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequiredKey` naming the first missing key.
    pub fn validate_required<'a, I>(&self, keys: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match keys.into_iter().find(|key| !self.contains(key)) {
            Some(missing) => Err(ConfigError::MissingRequiredKey(missing.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn tree(json: &str) -> ConfigValue {
        ConfigValue::from(serde_json::from_str::<serde_json::Value>(json).unwrap())
    }

    fn store(json: &str) -> ConfigStore {
        ConfigStore::new(tree(json))
    }

    #[test]
    fn test_get_dotted_path() {
        let store = store(r#"{"db":{"host":"localhost","port":5432,"opts":{"ssl":true}}}"#);
        assert_eq!(
            store.get(Some("db.host"), ConfigValue::Null),
            ConfigValue::from("localhost")
        );
        assert_eq!(
            store.get(Some("db.port"), ConfigValue::Null),
            ConfigValue::Integer(5432)
        );
        assert_eq!(
            store.get(Some("db.opts.ssl"), ConfigValue::Null),
            ConfigValue::Bool(true)
        );
        assert!(store.get(Some("db"), ConfigValue::Null).as_map().is_some());
    }

    #[test]
    fn test_missing_keys_return_default() {
        let store = store(r#"{"db":{"host":"localhost"},"name":"x","list":[1,2]}"#);
        let fallback = ConfigValue::from("fallback");
        assert_eq!(store.get(Some("nope"), fallback.clone()), fallback);
        assert_eq!(store.get(Some("db.nope"), fallback.clone()), fallback);
        // Indexing through a scalar or a list is "absent", not an error.
        assert_eq!(store.get(Some("name.first"), fallback.clone()), fallback);
        assert_eq!(store.get(Some("list.0"), fallback.clone()), fallback);
        assert_eq!(store.get(Some(""), ConfigValue::Null), ConfigValue::Null);
    }

    #[test]
    fn test_direct_hit_on_dotted_key_wins() {
        let store = store(r#"{"a.b":"direct","a":{"b":"nested"}}"#);
        assert_eq!(
            store.get(Some("a.b"), ConfigValue::Null),
            ConfigValue::from("direct")
        );
    }

    #[test]
    fn test_lookups_are_memoized() {
        let store = store(r#"{"a":{"b":"1"}}"#);
        assert_eq!(store.resolved_lookups(), 0);

        let first = store.get(Some("a.b"), ConfigValue::Null);
        let second = store.get(Some("a.b"), ConfigValue::Null);
        assert_eq!(first, second);
        assert_eq!(store.resolved_lookups(), 1);

        // Absent keys are memoized too, but each call keeps its own default.
        assert_eq!(store.get(Some("x"), ConfigValue::Integer(1)), ConfigValue::Integer(1));
        assert_eq!(store.get(Some("x"), ConfigValue::Integer(2)), ConfigValue::Integer(2));
        assert_eq!(store.resolved_lookups(), 2);

        // The full tree is never cached.
        store.get(None, ConfigValue::Null);
        store.get(None, ConfigValue::Null);
        assert_eq!(store.resolved_lookups(), 2);
    }

    #[test]
    fn test_get_none_returns_full_tree() {
        let store = store(r#"{"A":"1"}"#);
        assert_eq!(store.get(None, ConfigValue::Null), *store.all());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_merge_tree_wins_over_environment() {
        let env: EnvSnapshot = [("A", "env"), ("B", "old"), ("PATHLIKE", "/bin")]
            .into_iter()
            .collect();
        let merged = ConfigStore::merge(tree(r#"{"A":"1","B":{"C":"2"}}"#), &env);
        assert_eq!(merged.member("A"), Some(&ConfigValue::from("1")));
        assert_eq!(merged.member("B"), Some(&tree(r#"{"C":"2"}"#)));
        assert_eq!(merged.member("PATHLIKE"), Some(&ConfigValue::from("/bin")));
    }

    #[test]
    fn test_merge_with_empty_tree_keeps_environment() {
        let env: EnvSnapshot = [("ONLY_ENV", "x")].into_iter().collect();
        let store = ConfigStore::from_merged(ConfigValue::empty_map(), &env);
        assert_eq!(store.len(), 1);
        assert!(store.contains("ONLY_ENV"));
    }

    #[test]
    fn test_validate_required_reports_first_missing() {
        let store = store(r#"{"A":"1","db":{"host":"h"}}"#);
        assert!(store.validate_required(["A"]).is_ok());
        assert!(store.validate_required(std::iter::empty()).is_ok());

        let err = store.validate_required(["A", "Z", "Y"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredKey(ref k) if k == "Z"));

        // Nested paths are not walked during validation.
        let err = store.validate_required(["db.host"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredKey(ref k) if k == "db.host"));
    }

    #[test]
    #[serial]
    fn test_publish_exports_text_values() {
        temp_env::with_vars_unset(
            ["_ENVLOAD_PUB_STR", "_ENVLOAD_PUB_NUM", "_ENVLOAD_PUB_MAP"],
            || {
                let store = store(
                    r#"{"_ENVLOAD_PUB_STR":"1","_ENVLOAD_PUB_NUM":42,"_ENVLOAD_PUB_MAP":{"C":"2"},"bad=key":"x"}"#,
                );
                assert_eq!(store.publish(), 3);
                assert_eq!(std::env::var("_ENVLOAD_PUB_STR").unwrap(), "1");
                assert_eq!(std::env::var("_ENVLOAD_PUB_NUM").unwrap(), "42");
                assert_eq!(std::env::var("_ENVLOAD_PUB_MAP").unwrap(), r#"{"C":"2"}"#);
            },
        );
    }
}
