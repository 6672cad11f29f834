//! Case-insensitive string maps for headers and query parameters.

use std::collections::BTreeMap;

/// Map whose keys compare ASCII-case-insensitively but keep the spelling of
/// the most recent insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseInsensitiveMap<V> {
    entries: BTreeMap<String, (String, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`, returning the value previously stored under any casing of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        self.entries
            .insert(key.to_ascii_lowercase(), (key, value))
            .map(|(_, old)| old)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&key.to_ascii_lowercase()).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(&key.to_ascii_lowercase()).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by lower-cased key, with their stored spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for CaseInsensitiveMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
