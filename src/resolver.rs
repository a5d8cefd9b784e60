use crate::associations::Associations;
use crate::path::{self, PROTOCOL_SEPARATOR};

/// Maps virtual paths (`res://textures/wall.png`) to native ones through an owned
/// [`Associations`] table.
///
/// Several resolvers can coexist, each with its own table.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    associations: Associations,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_associations(associations: Associations) -> Self {
        Self { associations }
    }

    pub fn associations(&self) -> &Associations {
        &self.associations
    }

    /// See [`Associations::associate`].
    pub fn associate(&mut self, protocol: &str, prefix: impl Into<String>) {
        self.associations.associate(protocol, prefix);
    }

    /// Returns the prefix registered for `protocol`, or an empty string.
    pub fn get_association(&self, protocol: &str) -> &str {
        if protocol.is_empty() {
            return "";
        }
        self.associations.get(protocol).unwrap_or("")
    }

    /// Returns the protocol part of `path` including its `://`, e.g. `"res://"`.
    pub fn protocol_of(path: &str) -> Option<&str> {
        path.find(PROTOCOL_SEPARATOR)
            .map(|found| &path[..found + PROTOCOL_SEPARATOR.len()])
    }

    /// Resolves `path` to a native path.
    ///
    /// * no protocol: the path is only normalized;
    /// * a bare protocol (`"res://"`): the association is returned as stored, without
    ///   normalization (empty when the protocol is unknown);
    /// * a known protocol: its prefix replaces the protocol, then the result is normalized;
    /// * an unknown protocol: the whole input, protocol included, is normalized.
    pub fn resolve(&self, path: &str) -> String {
        let Some(protocol) = Self::protocol_of(path) else {
            return path::normalize(path);
        };

        if protocol.len() == path.len() {
            return self.get_association(protocol).to_owned();
        }

        let prefix = self.get_association(protocol);
        if prefix.is_empty() {
            log::debug!("no association for '{}', normalizing '{}' as is", protocol, path);
            return path::normalize(path);
        }

        path::normalize(&path::join(prefix, &path[protocol.len()..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        let mut resolver = Resolver::new();
        resolver.associate("res://", "/abs/assets");
        resolver.associate("user://", "/home/tester/.config/app/");
        resolver.associate("win", "C:\\Games\\App");
        resolver
    }

    #[test]
    fn test_protocol_of() {
        assert_eq!(Resolver::protocol_of("res://a/b"), Some("res://"));
        assert_eq!(Resolver::protocol_of("res://"), Some("res://"));
        assert_eq!(Resolver::protocol_of("/plain/path"), None);
        assert_eq!(Resolver::protocol_of(""), None);
    }

    #[test]
    fn test_resolve_known_protocol() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("res://a/b"), "/abs/assets/a/b");
        assert_eq!(resolver.resolve("res://a\\..\\b\\.\\c"), "/abs/assets/b/c");
        assert_eq!(resolver.resolve("user://saves/"), "/home/tester/.config/app/saves");
        assert_eq!(resolver.resolve("win://maps\\one.map"), "C:/Games/App/maps/one.map");
    }

    #[test]
    fn test_resolve_can_climb_out_of_prefix() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("res://../other"), "/abs/other");
        assert_eq!(resolver.resolve("res://../../../.."), "/");
    }

    #[test]
    fn test_resolve_bare_protocol_is_not_normalized() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("res://"), "/abs/assets");
        assert_eq!(resolver.resolve("user://"), "/home/tester/.config/app/");
        assert_eq!(resolver.resolve("win://"), "C:\\Games\\App");
        assert_eq!(resolver.resolve("nope://"), "");
    }

    #[test]
    fn test_resolve_unknown_protocol_falls_back() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("unknown://x"), path::normalize("unknown://x"));
        assert_eq!(resolver.resolve("unknown://x"), "/unknown:/x");
    }

    #[test]
    fn test_resolve_plain_path() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("/tmp/./x/../y"), "/tmp/y");
        assert_eq!(resolver.resolve("G:\\data"), "G:/data");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_overwritten_reserved_protocol() {
        let mut resolver = resolver();
        resolver.associate("res://", "/elsewhere");
        assert_eq!(resolver.resolve("res://a"), "/elsewhere/a");
    }

    #[test]
    fn test_independent_resolvers() {
        let first = resolver();
        let mut second = Resolver::new();
        second.associate("res://", "/second");

        assert_eq!(first.resolve("res://x"), "/abs/assets/x");
        assert_eq!(second.resolve("res://x"), "/second/x");
        assert_eq!(second.get_association("user://"), "");
    }
}
