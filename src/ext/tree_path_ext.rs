/// Strips every leading and trailing `/` from a slash-delimited tree path.
///
/// Total: the empty string (or a string made only of slashes) maps to `""`.
pub fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Drops empty segments, so `"/a//b/"` and `"a/b"` address the same node.
pub fn canonicalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the final segment of a path, or the whole path if it has no `/`.
pub fn extract_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Returns everything up to and including the last `/`, or `""` for a
/// top-level path.
pub fn extract_prefix(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    }
}

/// Path of the owning directory, `None` when the path is top-level.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rfind('/').map(|index| &path[..index])
}

/// Joins a directory path and a child name, treating an empty directory as
/// the synthetic root.
pub fn join_path(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{directory}/{name}")
    }
}

/// True when `path` is `ancestor` itself or lies somewhere below it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    path == ancestor
        || (path.len() > ancestor.len()
            && path.starts_with(ancestor)
            && path.as_bytes()[ancestor.len()] == b'/')
}

pub trait TreePathExt {
    fn trim_slashes(&self) -> &str;
    fn extract_name(&self) -> &str;
    fn extract_prefix(&self) -> &str;
    fn parent_path(&self) -> Option<&str>;
    fn is_within(&self, ancestor: &str) -> bool;
}

impl TreePathExt for str {
    fn trim_slashes(&self) -> &str {
        trim_slashes(self)
    }

    fn extract_name(&self) -> &str {
        extract_name(self)
    }

    fn extract_prefix(&self) -> &str {
        extract_prefix(self)
    }

    fn parent_path(&self) -> Option<&str> {
        parent_path(self)
    }

    fn is_within(&self, ancestor: &str) -> bool {
        is_within(self, ancestor)
    }
}

impl TreePathExt for String {
    fn trim_slashes(&self) -> &str {
        trim_slashes(self)
    }

    fn extract_name(&self) -> &str {
        extract_name(self)
    }

    fn extract_prefix(&self) -> &str {
        extract_prefix(self)
    }

    fn parent_path(&self) -> Option<&str> {
        parent_path(self)
    }

    fn is_within(&self, ancestor: &str) -> bool {
        is_within(self, ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", "")]
    #[case("/", "")]
    #[case("///", "")]
    #[case("a", "a")]
    #[case("/a/b/", "a/b")]
    #[case("//a/b//", "a/b")]
    #[case("a//b", "a//b")]
    fn test_trim_slashes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(trim_slashes(input), expected);
    }

    #[rstest]
    #[case("", "", "")]
    #[case("file.txt", "file.txt", "")]
    #[case("a/b/c", "c", "a/b/")]
    #[case("a/", "", "a/")]
    fn test_name_and_prefix(#[case] path: &str, #[case] name: &str, #[case] prefix: &str) {
        assert_eq!(extract_name(path), name);
        assert_eq!(extract_prefix(path), prefix);
        assert_eq!(format!("{}{}", extract_prefix(path), extract_name(path)), path);
    }

    #[rstest]
    #[case("/a//b/", "a/b")]
    #[case("", "")]
    #[case("a", "a")]
    fn test_canonicalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonicalize(input), expected);
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c"), Some("a/b"));
        assert_eq!(parent_path("a"), None);
    }

    #[test]
    fn test_join_path_with_root() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
    }

    #[rstest]
    #[case("a/b", "a", true)]
    #[case("a", "a", true)]
    #[case("ab/c", "a", false)]
    #[case("a", "a/b", false)]
    fn test_is_within(#[case] path: &str, #[case] ancestor: &str, #[case] expected: bool) {
        assert_eq!(path.is_within(ancestor), expected);
    }

    #[test]
    fn test_extension_trait_on_string() {
        let path = String::from("/docs/readme.md/");
        assert_eq!(path.trim_slashes(), "docs/readme.md");
        assert_eq!(path.trim_slashes().extract_name(), "readme.md");
    }
}
