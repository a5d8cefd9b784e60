//! Lexical path manipulation: normalization, joining and parent extraction.
//!
//! Everything here is pure string work. Nothing touches the filesystem and nothing reads
//! shared state, so results depend on the input alone.
//!
//! ### Canonical form
//!
//! [`normalize`] always produces an absolute-looking path:
//! - a drive prefix (`G:/`) when the second character of the input is `:`, otherwise `/`;
//! - components separated by a single `/`, regardless of the slash style of the input;
//! - no `.` components, `..` resolved against the preceding component;
//! - **no trailing separator**, except for the bare root (`/`) or drive root (`G:/`).
//!
//! A `..` that would climb above the root does not fail: normalization stops right there
//! and returns the root (or drive root) alone, ignoring whatever components follow.

/// Canonical path separator.
pub const SEPARATOR: char = '/';

/// Token separating a protocol from the rest of a virtual path (`res://a/b`).
pub const PROTOCOL_SEPARATOR: &str = "://";

/// Application name used when none (or an empty one) is configured.
pub const DEFAULT_APPLICATION_NAME: &str = "unknown_application";

/// Assets directory name used by initialization when the caller has no preference.
pub const DEFAULT_ASSETS_DIRECTORY_NAME: &str = "assets";

const VOLUME_SEPARATOR: char = ':';
const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// Returns true for both slash styles.
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_separator_only(s: &str) -> bool {
    s.len() == 1 && s.starts_with(is_separator)
}

/// Returns true if `path` starts with a root separator or carries a drive marker.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR) || volume_len(path).is_some()
}

/// Returns true for a bare drive marker such as `G:`.
pub fn is_volume(path: &str) -> bool {
    volume_len(path) == Some(path.len())
}

/// Returns true for the canonical roots `/` and `G:/`.
pub fn is_root(path: &str) -> bool {
    path == "/"
        || volume_len(path)
            .is_some_and(|len| path.len() == len + 1 && path.ends_with(SEPARATOR))
}

/// Byte length of the drive marker at the start of `path`.
///
/// A drive marker is any non-separator character followed by `:`. Characters are
/// compared, not bytes, so `Ä:` is a drive too. An anchored `/:` is never one.
fn volume_len(path: &str) -> Option<usize> {
    let mut chars = path.chars();
    let first = chars.next().filter(|&c| !is_separator(c))?;
    (chars.next() == Some(VOLUME_SEPARATOR)).then(|| first.len_utf8() + 1)
}

/// Turns `path` into its canonical form (see the module documentation).
///
/// Leading and trailing spaces are trimmed first; an input that is empty after trimming
/// yields an empty string. Relative input is anchored at the root.
///
/// ```
/// use resfs_kit::path::normalize;
///
/// assert_eq!(normalize("G:\\a\\..\\b"), "G:/b");
/// assert_eq!(normalize("G:\\a\\..\\.."), "G:/");
/// assert_eq!(normalize(" /one//two/./three/ "), "/one/two/three");
/// ```
pub fn normalize(path: &str) -> String {
    let mut normalized = normalize_once(path);
    // trailing spaces of the last component are only trimmed once they end the path
    while normalized.ends_with(' ') {
        normalized = normalize_once(&normalized);
    }
    normalized
}

fn normalize_once(path: &str) -> String {
    let path = path.trim_matches(' ');
    if path.is_empty() {
        return String::new();
    }

    let (prefix, rest) = split_prefix(path);

    let mut parts: Vec<&str> = Vec::with_capacity(rest.matches(is_separator).count() + 1);
    for part in rest.split(is_separator) {
        if part.trim().is_empty() || part == CURRENT_DIR {
            continue;
        }
        if part == PARENT_DIR {
            match parts.last() {
                Some(last) if !last.contains(VOLUME_SEPARATOR) => {
                    parts.pop();
                }
                // climbing past the root: stop and keep the root only
                _ => return prefix,
            }
            continue;
        }
        parts.push(part);
    }

    let mut result = prefix;
    result.reserve(parts.iter().map(|part| part.len() + 1).sum());
    for part in parts {
        join_in_place(&mut result, part);
    }
    result
}

/// Splits the canonical prefix (`X:/` or `/`) off a trimmed, non-empty path.
fn split_prefix(path: &str) -> (String, &str) {
    match volume_len(path) {
        Some(len) => {
            let mut prefix = String::with_capacity(len + 1);
            prefix.push_str(&path[..len]);
            prefix.push(SEPARATOR);
            (prefix, &path[len..])
        }
        None => (SEPARATOR.to_string(), path),
    }
}

/// Joins two path fragments with exactly one `/` between them.
///
/// * an empty or separator-only `right` returns `left` unchanged;
/// * an empty or separator-only `left` returns `right` unchanged;
/// * otherwise one trailing separator of `left` and one leading separator of `right`
///   (either slash style) are dropped before concatenation.
///
/// No `.`/`..` processing happens here; pass the result through [`normalize`] if needed.
pub fn join(left: &str, right: &str) -> String {
    if right.is_empty() || is_separator_only(right) {
        return left.to_owned();
    }
    if left.is_empty() || is_separator_only(left) {
        return right.to_owned();
    }

    let left = left.strip_suffix(is_separator).unwrap_or(left);
    let right = right.strip_prefix(is_separator).unwrap_or(right);

    let mut joined = String::with_capacity(left.len() + right.len() + 1);
    joined.push_str(left);
    joined.push(SEPARATOR);
    joined.push_str(right);
    joined
}

/// In-place flavour of [`join`], appending `right` to `left`.
///
/// Unlike [`join`], a separator-only `left` is kept as an anchor, so joining `"a"` onto
/// `"/"` gives `"/a"` rather than `"a"`. This is what lets root-anchored paths be built
/// one component at a time.
pub fn join_in_place(left: &mut String, right: &str) {
    if right.is_empty() || is_separator_only(right) {
        return;
    }
    if left.is_empty() {
        left.push_str(right);
        return;
    }
    if left.ends_with(is_separator) {
        left.pop();
    }
    left.push(SEPARATOR);
    left.push_str(right.strip_prefix(is_separator).unwrap_or(right));
}

/// Returns everything before the last separator (either slash style), separator excluded.
/// A path without any separator has no parent and yields an empty string.
pub fn parent_directory(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(index) => &path[..index],
        None => "",
    }
}

/// In-place flavour of [`parent_directory`].
pub fn parent_directory_in_place(path: &mut String) {
    let length = path.rfind(is_separator).unwrap_or(0);
    path.truncate(length);
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalize {
        use super::*;

        #[test]
        fn test_normalize_table() {
            let cases = [
                ("G:/", "G:/"),
                ("", ""),
                ("    G:\\Hello world/how\\..\\lol\\..\\./.\\.\\.     ", "G:/Hello world"),
                ("G:\\Hello world/./how\\..\\lol\\..\\..", "G:/"),
                ("G:\\Hello world/how\\..\\lol\\..\\..\\", "G:/"),
                ("G:\\Hello world/./how\\..\\lol\\..\\.\\../", "G:/"),
                ("G:/././././\\Hello world/how\\..\\lol\\.\\kek/", "G:/Hello world/lol/kek"),
                ("/./", "/"),
                ("/./Hello world/./how\\..\\lol\\..\\..\\../", "/"),
                ("/Hello world/how\\..\\lol\\.\\kek/", "/Hello world/lol/kek"),
                ("////how\\..\\lol\\.\\kek/", "/lol/kek"),
            ];
            for (from, to) in cases {
                assert_eq!(normalize(from), to, "normalizing '{}'", from);
            }
        }

        #[test]
        fn test_normalize_drive_detection() {
            assert_eq!(normalize("G:\\a\\..\\b"), "G:/b");
            assert_eq!(normalize("G:\\a\\..\\.."), "G:/");
            assert_eq!(normalize("c:"), "c:/");
            assert_eq!(normalize("C:relative\\dir"), "C:/relative/dir");
            assert_eq!(normalize("Ä:\\a"), "Ä:/a");
            // a colon right after the root is a plain name
            assert_eq!(normalize(":x"), "/:x");
            assert_eq!(normalize("/:x"), "/:x");
            assert_eq!(normalize("\\:x\\y"), "/:x/y");
        }

        #[test]
        fn test_normalize_relative_input_is_anchored() {
            assert_eq!(normalize("a/b"), "/a/b");
            assert_eq!(normalize("./a"), "/a");
            assert_eq!(normalize("a"), "/a");
        }

        #[test]
        fn test_normalize_whitespace() {
            assert_eq!(normalize("   "), "");
            assert_eq!(normalize("/a/ /b"), "/a/b");
            assert_eq!(normalize("/a/\t/b"), "/a/b");
            assert_eq!(normalize("/with space/x"), "/with space/x");
            assert_eq!(normalize("/a /"), "/a");
            assert_eq!(normalize("/a /. /"), "/a");
            assert_eq!(normalize("/a /b /"), "/a /b");
        }

        #[test]
        fn test_root_clamp_stops_processing() {
            assert_eq!(normalize(".."), "/");
            assert_eq!(normalize("/../../.."), "/");
            assert_eq!(normalize("G:/../.."), "G:/");
            // components after the clamp are discarded, not appended to the root
            assert_eq!(normalize("/../a/b"), "/");
            assert_eq!(normalize("/x/../../a"), "/");
            assert_eq!(normalize("G:\\..\\kept\\not"), "G:/");
        }

        #[test]
        fn test_parent_of_volume_marker_clamps() {
            // an embedded `name:` component behaves like a drive root for `..`
            assert_eq!(normalize("/res:/.."), "/");
            assert_eq!(normalize("unknown://x/.."), "/unknown:");
            assert_eq!(normalize("unknown://x/../.."), "/");
        }

        #[test]
        fn test_normalize_is_idempotent() {
            let samples = [
                "",
                "/",
                "G:/",
                "a",
                "a\\b\\..\\c",
                "  /x/./y//z/  ",
                "../../a",
                "G:\\a\\..\\b",
                "unknown://x",
                "/res:/../a",
                "/\\/\\",
                "Ä/ö/../ü",
                "/a/ /b/.../c",
                "/a /",
                "/a /. /",
                "/a/b  \\ /",
                ":x",
                "\\:x",
                "Ä:\\a",
            ];
            for sample in samples {
                let once = normalize(sample);
                assert_eq!(normalize(&once), once, "normalizing '{}' twice", sample);
            }
        }

        #[test]
        fn test_normalize_is_slash_agnostic() {
            let forward = "G:/one/two/../three/./four/";
            let backward = forward.replace('/', "\\");
            assert_eq!(normalize(forward), normalize(&backward));

            let forward = "/a//b/../c";
            assert_eq!(normalize(forward), normalize(&forward.replace('/', "\\")));
        }
    }

    mod join {
        use super::*;

        #[test]
        fn test_join_table() {
            assert_eq!(join("a", "/"), "a");
            assert_eq!(join("/", "a"), "a");
            assert_eq!(join("a", ""), "a");
            assert_eq!(join("", "b"), "b");
            assert_eq!(join("a", "b"), "a/b");
            assert_eq!(join("a/", "b"), "a/b");
            assert_eq!(join("a\\", "b"), "a/b");
            assert_eq!(join("a", "/b"), "a/b");
            assert_eq!(join("a", "\\b"), "a/b");
            assert_eq!(join("a/", "/b"), "a/b");
        }

        #[test]
        fn test_join_identity() {
            for x in ["a", "/abs/dir", "res://", "G:/", "a\\b"] {
                assert_eq!(join(x, ""), x);
                assert_eq!(join("", x), x);
            }
        }

        #[test]
        fn test_join_strips_one_separator_only() {
            assert_eq!(join("a//", "b"), "a//b");
            assert_eq!(join("res://", "file.txt"), "res://file.txt");
        }

        #[test]
        fn test_join_is_slash_agnostic_at_the_seam() {
            assert_eq!(join("a/", "/b"), join("a\\", "\\b"));
            assert_eq!(join("a", "/b"), join("a", "\\b"));
        }

        #[test]
        fn test_join_in_place() {
            let mut path = String::from("/");
            join_in_place(&mut path, "a");
            assert_eq!(path, "/a");
            join_in_place(&mut path, "\\b");
            assert_eq!(path, "/a/b");
            join_in_place(&mut path, "");
            join_in_place(&mut path, "/");
            assert_eq!(path, "/a/b");

            let mut drive = String::from("C:/");
            join_in_place(&mut drive, "dir");
            assert_eq!(drive, "C:/dir");

            let mut empty = String::new();
            join_in_place(&mut empty, "x");
            assert_eq!(empty, "x");

            let mut left = String::from("a\\");
            join_in_place(&mut left, "b");
            assert_eq!(left, join("a\\", "b"));
        }
    }

    mod parent_directory {
        use super::*;

        #[test]
        fn test_parent_directory_table() {
            assert_eq!(parent_directory("a"), "");
            assert_eq!(parent_directory("a/b"), "a");
            assert_eq!(parent_directory("a/b/c"), "a/b");
            assert_eq!(parent_directory("a\\b"), "a");
            assert_eq!(parent_directory("a\\b\\c"), "a\\b");
            assert_eq!(parent_directory("/a"), "");
            assert_eq!(parent_directory(""), "");
        }

        #[test]
        fn test_parent_directory_in_place() {
            let mut path = String::from("/x/y/z");
            parent_directory_in_place(&mut path);
            assert_eq!(path, "/x/y");
            parent_directory_in_place(&mut path);
            assert_eq!(path, "/x");
            parent_directory_in_place(&mut path);
            assert_eq!(path, "");

            let mut bare = String::from("name");
            parent_directory_in_place(&mut bare);
            assert!(bare.is_empty());
        }
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("/resources"));
        assert!(is_absolute("G:/resources"));
        assert!(is_absolute("G:resources"));
        assert!(!is_absolute("assets"));
        assert!(!is_absolute("../../res"));
        assert!(!is_absolute("\\windows\\style"));
        assert!(is_absolute("Ä:/x"));
        assert!(!is_absolute(":x"));
    }

    #[test]
    fn test_roots_and_volumes() {
        assert!(is_root("/"));
        assert!(is_root("G:/"));
        assert!(is_root("Ä:/"));
        assert!(!is_root("G:"));
        assert!(!is_root("/a"));
        assert!(!is_root("/:/"));

        assert!(is_volume("G:"));
        assert!(is_volume("Ä:"));
        assert!(!is_volume("G:/"));
        assert!(!is_volume("/:"));
        assert!(!is_volume("unknown:"));
    }
}
