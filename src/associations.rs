use std::collections::HashMap;
use std::collections::hash_map;

use crate::path::PROTOCOL_SEPARATOR;

/// Protocol association table: `"res://"` → `"/opt/game/assets"`.
///
/// Keys are stored in canonical form (always ending with `://`) and compared
/// case-sensitively. Lookups take `&str`, so no key is allocated to find an entry.
///
/// ### Invariants
///
/// 1. At most one prefix per protocol: [`Associations::associate`] inserts or overwrites.
/// 2. An empty protocol is never stored.
///
/// Not synchronized. Callers sharing a table between threads must wrap it themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Associations {
    map: HashMap<String, String>,
}

impl Associations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `protocol` to `prefix`, replacing any previous prefix of that protocol.
    ///
    /// `protocol` may be given with or without the trailing `://`. An empty `protocol`
    /// is ignored.
    pub fn associate(&mut self, protocol: &str, prefix: impl Into<String>) {
        if protocol.is_empty() {
            return;
        }

        let mut key = String::with_capacity(protocol.len() + PROTOCOL_SEPARATOR.len());
        key.push_str(protocol);
        if !protocol.ends_with(PROTOCOL_SEPARATOR) {
            key.push_str(PROTOCOL_SEPARATOR);
        }

        let prefix = prefix.into();
        log::debug!("associate '{}' -> '{}'", key, prefix);
        self.map.insert(key, prefix);
    }

    /// Returns the prefix associated with `protocol`, if any.
    /// `protocol` must be in canonical form (`"user://"`).
    pub fn get(&self, protocol: &str) -> Option<&str> {
        self.map.get(protocol).map(String::as_str)
    }

    pub fn contains(&self, protocol: &str) -> bool {
        self.map.contains_key(protocol)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(protocol, prefix)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

/// Iterator returned by [`Associations::iter`].
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(protocol, prefix)| (protocol.as_str(), prefix.as_str()))
    }
}

impl<'a> IntoIterator for &'a Associations {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_associate_and_get() {
        let mut table = Associations::new();
        table.associate("res://", "/opt/assets");
        assert_eq!(table.get("res://"), Some("/opt/assets"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_associate_overwrites() {
        let mut table = Associations::new();
        table.associate("res://", "/first");
        table.associate("res://", String::from("/second"));
        assert_eq!(table.get("res://"), Some("/second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_associate_appends_protocol_separator() {
        let mut table = Associations::new();
        table.associate("mods", "/var/mods");
        assert_eq!(table.get("mods://"), Some("/var/mods"));
        assert_eq!(table.get("mods"), None);
    }

    #[test]
    fn test_associate_ignores_empty_protocol() {
        let mut table = Associations::new();
        table.associate("", "/nowhere");
        assert!(table.is_empty());
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut table = Associations::new();
        table.associate("res://", "/lower");
        assert_eq!(table.get("RES://"), None);
        assert!(table.contains("res://"));
    }

    #[test]
    fn test_lookup_with_borrowed_slice() {
        let mut table = Associations::new();
        table.associate("user://", "/home/me/.config/app");

        let virtual_path = "user://saves/slot1.bin";
        let protocol = &virtual_path[..7];
        assert_eq!(table.get(protocol), Some("/home/me/.config/app"));
    }

    #[test]
    fn test_iter() {
        let mut table = Associations::new();
        table.associate("res://", "/a");
        table.associate("user://", "/b");

        let mut pairs: Vec<_> = table.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("res://", "/a"), ("user://", "/b")]);
        assert_eq!((&table).into_iter().count(), 2);
    }
}
