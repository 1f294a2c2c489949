use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::config::{ReselectBehavior, SortOrder, TreeOptions};
use crate::engine::TreeEngine;
use crate::ext::{canonicalize, join_path};

pub const MANIFEST_FILE_NAME: &str = "tree.yaml";

/// A path to add to the tree and whether it is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: String,
    pub is_leaf: bool,
}

/// Describes a tree and the options of the engine holding it:
///
/// ```yaml
/// options:
///   childrenField: children
///   directoriesSelectable: true
///   reselect: clear          # or context-menu
///   uniqueSiblingNames: false
///   order: insertion         # or name, name-desc
/// paths:
///   - src/main.rs
///   - target/                # trailing slash marks a directory
/// tree:
///   - name: docs
///     children:
///       - name: guide.md
/// ```
#[derive(Debug, Clone)]
pub struct TreeManifest {
    pub options: TreeOptions,
    pub entries: Vec<ManifestEntry>,
}

fn key(name: &str) -> Yaml<'static> {
    Yaml::Value(Scalar::String(Cow::Owned(name.to_string())))
}

impl TreeManifest {
    pub async fn read(root: &Path) -> Result<Self, ManifestError> {
        Self::from_path(root.join(MANIFEST_FILE_NAME)).await
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, ManifestError> {
        debug!("Reading manifest: {}", path.display());
        let bytes = fs::read(&path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read manifest: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    /// Builds an engine with these options and every entry added in order.
    pub fn into_engine(self) -> TreeEngine {
        let mut engine = TreeEngine::new(self.options);
        for entry in &self.entries {
            engine.add_node(&entry.path, entry.is_leaf);
        }
        engine
    }

    fn parse_options(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<TreeOptions, ManifestError> {
        let mut options = TreeOptions::default();
        let Some(section) = top_level.get(&key("options")) else {
            return Ok(options);
        };
        let section = section.as_mapping().ok_or(ManifestError::OptionsNotMap)?;

        if let Some(value) = section.get(&key("childrenField")) {
            options.children_field = value
                .as_str()
                .filter(|field| !field.is_empty())
                .ok_or_else(|| invalid("childrenField", "a non-empty string"))?
                .to_string();
        }
        if let Some(value) = section.get(&key("directoriesSelectable")) {
            options.directories_selectable = as_bool(value, "directoriesSelectable")?;
        }
        if let Some(value) = section.get(&key("uniqueSiblingNames")) {
            options.unique_sibling_names = as_bool(value, "uniqueSiblingNames")?;
        }
        if let Some(value) = section.get(&key("reselect")) {
            options.reselect = match value.as_str() {
                Some("clear") => ReselectBehavior::Clear,
                Some("context-menu") => ReselectBehavior::ContextMenu,
                _ => return Err(invalid("reselect", "'clear' or 'context-menu'")),
            };
        }
        if let Some(value) = section.get(&key("order")) {
            options.order = match value.as_str() {
                Some("insertion") => SortOrder::Insertion,
                Some("name") => SortOrder::NameAscending,
                Some("name-desc") => SortOrder::NameDescending,
                _ => return Err(invalid("order", "'insertion', 'name' or 'name-desc'")),
            };
        }

        Ok(options)
    }

    fn parse_paths(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<ManifestEntry>, ManifestError> {
        let Some(section) = top_level.get(&key("paths")) else {
            return Ok(Vec::new());
        };

        let entries = section
            .as_sequence()
            .ok_or(ManifestError::PathsNotList)?
            .iter()
            .filter_map(|item| {
                let entry = item.as_str().map(|raw| ManifestEntry {
                    path: canonicalize(raw),
                    is_leaf: !raw.ends_with('/'),
                });
                if entry.is_none() {
                    debug!("Skipping invalid path entry: {:?}", item);
                }
                entry
            })
            .filter(|entry| !entry.path.is_empty())
            .collect();

        Ok(entries)
    }

    fn parse_tree(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        children_field: &str,
    ) -> Result<Vec<ManifestEntry>, ManifestError> {
        let Some(section) = top_level.get(&key("tree")) else {
            return Ok(Vec::new());
        };
        let nodes = section.as_sequence().ok_or(ManifestError::TreeNotList)?;

        let mut entries = Vec::new();
        Self::collect_tree_nodes(nodes, "", &key(children_field), &mut entries);
        Ok(entries)
    }

    fn collect_tree_nodes(
        nodes: &[Yaml],
        parent_path: &str,
        children_key: &Yaml<'static>,
        entries: &mut Vec<ManifestEntry>,
    ) {
        for node in nodes {
            let Some(mapping) = node.as_mapping() else {
                debug!("Skipping invalid tree node: {:?}", node);
                continue;
            };
            let Some(name) = mapping
                .get(&key("name"))
                .and_then(|name| name.as_str())
                .map(canonicalize)
                .filter(|name| !name.is_empty())
            else {
                debug!("Skipping tree node without a name under '{}'", parent_path);
                continue;
            };

            let path = join_path(parent_path, &name);
            let children = mapping.get(children_key).and_then(|c| c.as_sequence());
            entries.push(ManifestEntry {
                path: path.clone(),
                is_leaf: children.is_none(),
            });
            if let Some(children) = children {
                Self::collect_tree_nodes(children, &path, children_key, entries);
            }
        }
    }
}

fn as_bool(value: &Yaml, option: &'static str) -> Result<bool, ManifestError> {
    match value {
        Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
        _ => Err(invalid(option, "true or false")),
    }
}

fn invalid(option: &'static str, expected: &'static str) -> ManifestError {
    ManifestError::InvalidOption { option, expected }
}

impl TryFrom<&str> for TreeManifest {
    type Error = ManifestError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| ManifestError::ParseError { source: e })?;
        let document = documents.first().ok_or(ManifestError::MalformedManifest)?;
        let top_level = document
            .as_mapping()
            .ok_or(ManifestError::TopLevelNotMap)?;

        let options = Self::parse_options(top_level)?;
        let mut entries = Self::parse_paths(top_level)?;
        entries.extend(Self::parse_tree(top_level, &options.children_field)?);

        Ok(TreeManifest { options, entries })
    }
}

#[derive(Debug, Snafu)]
pub enum ManifestError {
    #[snafu(display("Failed to read the manifest: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The manifest {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the manifest"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted manifest"))]
    MalformedManifest,
    #[snafu(display("Top level of the manifest should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Options section should be a map"))]
    OptionsNotMap,
    #[snafu(display("Paths section should be a list"))]
    PathsNotList,
    #[snafu(display("Tree section should be a list"))]
    TreeNotList,
    #[snafu(display("Option '{}' should be {}", option, expected))]
    InvalidOption {
        option: &'static str,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(contents: &str) -> Result<TreeManifest, ManifestError> {
        contents.try_into()
    }

    fn paths(manifest: &TreeManifest) -> Vec<(&str, bool)> {
        manifest
            .entries
            .iter()
            .map(|entry| (entry.path.as_str(), entry.is_leaf))
            .collect()
    }

    #[compio::test]
    async fn manifest_returns_error_on_nonexistent_file() {
        let result = TreeManifest::from_path(PathBuf::from("nonexistent.yaml")).await;
        assert!(matches!(result, Err(ManifestError::ReadError { .. })));
    }

    #[compio::test]
    async fn manifest_reads_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "paths:\n  - a/b.txt").expect("Failed to write to temp file");

        let manifest = TreeManifest::from_path(file.path().to_path_buf())
            .await
            .expect("Failed to read manifest");
        assert_eq!(paths(&manifest), vec![("a/b.txt", true)]);
    }

    #[test]
    fn manifest_returns_error_on_invalid_yaml() {
        let result = parse("invalid: yaml: content: [unclosed");
        assert!(matches!(result, Err(ManifestError::ParseError { .. })));
    }

    #[test]
    fn manifest_returns_error_on_empty_file() {
        assert!(matches!(parse(""), Err(ManifestError::MalformedManifest)));
    }

    #[test]
    fn manifest_returns_error_when_top_level_is_not_map() {
        assert!(matches!(
            parse("- item1\n- item2"),
            Err(ManifestError::TopLevelNotMap)
        ));
    }

    #[test]
    fn manifest_returns_error_when_sections_have_wrong_shape() {
        assert!(matches!(
            parse("options: [1, 2]"),
            Err(ManifestError::OptionsNotMap)
        ));
        assert!(matches!(
            parse("paths: {a: b}"),
            Err(ManifestError::PathsNotList)
        ));
        assert!(matches!(parse("tree: x"), Err(ManifestError::TreeNotList)));
    }

    #[test]
    fn manifest_defaults_without_options() {
        let manifest = parse("paths: []").unwrap();
        assert_eq!(manifest.options.children_field, "children");
        assert!(manifest.options.directories_selectable);
        assert_eq!(manifest.options.reselect, ReselectBehavior::Clear);
        assert_eq!(manifest.options.order, SortOrder::Insertion);
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn manifest_reads_options() {
        let manifest = parse(
            r#"
options:
  childrenField: nodes
  directoriesSelectable: false
  reselect: context-menu
  uniqueSiblingNames: true
  order: name-desc
"#,
        )
        .unwrap();
        let options = manifest.options;
        assert_eq!(options.children_field, "nodes");
        assert!(!options.directories_selectable);
        assert_eq!(options.reselect, ReselectBehavior::ContextMenu);
        assert!(options.unique_sibling_names);
        assert_eq!(options.order, SortOrder::NameDescending);
    }

    #[test]
    fn manifest_rejects_invalid_option_values() {
        let result = parse("options:\n  directoriesSelectable: maybe");
        assert!(matches!(
            result,
            Err(ManifestError::InvalidOption {
                option: "directoriesSelectable",
                ..
            })
        ));
        let result = parse("options:\n  order: random");
        assert!(matches!(
            result,
            Err(ManifestError::InvalidOption { option: "order", .. })
        ));
    }

    #[test]
    fn manifest_paths_mark_directories_with_trailing_slash() {
        let manifest = parse(
            r#"
paths:
  - /src/main.rs
  - target/
  - 42
  - "/"
"#,
        )
        .unwrap();
        assert_eq!(
            paths(&manifest),
            vec![("src/main.rs", true), ("target", false)]
        );
    }

    #[test]
    fn manifest_tree_uses_children_field() {
        let manifest = parse(
            r#"
options:
  childrenField: nodes
tree:
  - name: docs
    nodes:
      - name: guide.md
      - name: empty
        nodes: []
  - name: readme.md
  - nameless: true
"#,
        )
        .unwrap();
        assert_eq!(
            paths(&manifest),
            vec![
                ("docs", false),
                ("docs/guide.md", true),
                ("docs/empty", false),
                ("readme.md", true),
            ]
        );
    }

    #[test]
    fn manifest_builds_engine() {
        let manifest = parse(
            r#"
paths:
  - a/b.txt
tree:
  - name: c
    children:
      - name: d.txt
"#,
        )
        .unwrap();
        let engine = manifest.into_engine();
        assert_eq!(engine.tree().paths(), vec!["a", "a/b.txt", "c", "c/d.txt"]);
        assert!(engine.is_expanded("a"));
        assert!(!engine.get("c").unwrap().is_leaf());
    }

    #[test]
    fn manifest_handles_unicode_names() {
        let manifest = parse("paths:\n  - \"тест/🚀.txt\"").unwrap();
        assert_eq!(paths(&manifest), vec![("тест/🚀.txt", true)]);
    }
}
