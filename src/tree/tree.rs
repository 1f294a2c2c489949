use tracing::{debug, warn};

use crate::ext::{TreePathExt, canonicalize, join_path};
use crate::tree::TreeNode;
use crate::tree::filter::filter_tree;

/// The node store. Owns the synthetic root and is the only writer of the
/// tree's structure; callers address nodes by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: TreeNode,
}

/// What a rename request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed {
        previous_path: String,
        new_path: String,
    },
    /// The edit was cancelled or rejected and the previous name restored.
    Reverted { path: String },
    Missing,
}

/// Where [`Tree::insert`] put a node and which directories it created on
/// the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Insertion {
    pub location: Vec<usize>,
    pub created_directories: Vec<String>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            root: TreeNode::root(),
        }
    }

    /// The top-level node sequence.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.root.children
    }

    pub(crate) fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Walks the directory components of `path` from the root, creating any
    /// missing intermediate directory, and returns the container that owns
    /// (or will own) the final segment.
    pub fn find_parent(&mut self, path: &str) -> &mut TreeNode {
        let (location, _) = self.make_parents(&canonicalize(path));
        let mut current = &mut self.root;
        for index in location {
            current = &mut current.children[index];
        }
        current
    }

    /// Resolves or creates every directory above `path`. Returns the
    /// location of the owning container and the paths of the directories it
    /// had to create. Among siblings sharing a name, a directory is preferred.
    fn make_parents(&mut self, path: &str) -> (Vec<usize>, Vec<String>) {
        let directories = match path.parent_path() {
            Some(parent) => parent.split('/').collect::<Vec<_>>(),
            None => Vec::new(),
        };

        let mut location = Vec::with_capacity(directories.len());
        let mut created = Vec::new();
        let mut current = &mut self.root;
        for segment in directories {
            let existing = current
                .children
                .iter()
                .position(|c| c.name == segment && !c.is_leaf)
                .or_else(|| current.children.iter().position(|c| c.name == segment));
            let index = match existing {
                Some(index) => index,
                None => {
                    let child_path = join_path(&current.path, segment);
                    debug!("Next parent does not exist, adding: {}", child_path);
                    created.push(child_path.clone());
                    current
                        .children
                        .push(TreeNode::new(segment, child_path, false));
                    current.children.len() - 1
                }
            };
            location.push(index);
            current = &mut current.children[index];
            if current.is_leaf {
                warn!("Turning leaf '{}' into a directory", current.path);
                current.is_leaf = false;
            }
        }
        (location, created)
    }

    /// Inserts a node at `path`, creating intermediate directories.
    ///
    /// With `unique_names` set, an existing sibling of the same name is
    /// returned instead of adding a duplicate. An empty path adds nothing.
    pub fn add_node(
        &mut self,
        path: &str,
        is_leaf: bool,
        unique_names: bool,
    ) -> Option<&TreeNode> {
        let insertion = self.insert(path, is_leaf, unique_names)?;
        self.node_at(&insertion.location)
    }

    pub(crate) fn insert(
        &mut self,
        path: &str,
        is_leaf: bool,
        unique_names: bool,
    ) -> Option<Insertion> {
        let path = canonicalize(path);
        if path.is_empty() {
            warn!("Ignoring request to add a node with an empty path");
            return None;
        }
        let name = path.extract_name().to_string();
        let (mut location, created_directories) = self.make_parents(&path);
        let parent = self.node_at_mut(&location)?;

        let existing = unique_names
            .then(|| parent.children.iter().position(|c| c.name == name))
            .flatten();
        let index = match existing {
            Some(index) => {
                debug!("Node '{}' already exists, not adding a duplicate", path);
                index
            }
            None => {
                debug!("Adding node '{}' (leaf: {})", path, is_leaf);
                parent.children.push(TreeNode::new(name, path, is_leaf));
                parent.children.len() - 1
            }
        };
        location.push(index);
        Some(Insertion {
            location,
            created_directories,
        })
    }

    /// Removes the node at `path` from its owning parent. Missing paths are
    /// ignored.
    pub fn delete_node(&mut self, path: &str) -> Option<TreeNode> {
        let Some(mut location) = self.locate(path) else {
            debug!("Nothing to delete at '{}'", path);
            return None;
        };
        let index = location.pop()?;
        let parent = self.node_at_mut(&location)?;
        let removed = parent.children.remove(index);
        debug!("Deleting node '{}'", removed.path);
        Some(removed)
    }

    /// Resolves `path` to the child indices leading to it from the root.
    ///
    /// Siblings sharing a name are tried in order until one of them holds the
    /// rest of the path, so a node stays reachable through its path even
    /// when an earlier sibling has the same name.
    pub(crate) fn locate(&self, path: &str) -> Option<Vec<usize>> {
        fn search(node: &TreeNode, segments: &[&str], location: &mut Vec<usize>) -> bool {
            let Some((segment, rest)) = segments.split_first() else {
                return true;
            };
            for (index, child) in node.children.iter().enumerate() {
                if child.name != *segment {
                    continue;
                }
                location.push(index);
                if search(child, rest, location) {
                    return true;
                }
                location.pop();
            }
            false
        }

        let path = canonicalize(path);
        if path.is_empty() {
            return None;
        }
        let segments = path.split('/').collect::<Vec<_>>();
        let mut location = Vec::with_capacity(segments.len());
        search(&self.root, &segments, &mut location).then_some(location)
    }

    pub(crate) fn node_at(&self, location: &[usize]) -> Option<&TreeNode> {
        location
            .iter()
            .try_fold(&self.root, |node, &index| node.children.get(index))
    }

    fn node_at_mut(&mut self, location: &[usize]) -> Option<&mut TreeNode> {
        let mut current = &mut self.root;
        for &index in location {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }

    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        self.node_at(&self.locate(path)?)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.locate(path).is_some()
    }

    /// The chain of nodes from the top-level ancestor down to the node at
    /// `path` itself.
    pub fn ancestor_chain(&self, path: &str) -> Option<Vec<&TreeNode>> {
        let location = self.locate(path)?;
        (1..=location.len())
            .map(|depth| self.node_at(&location[..depth]))
            .collect()
    }

    /// Puts the node into edit mode, remembering its name for a later cancel.
    pub fn begin_edit(&mut self, path: &str) -> bool {
        let Some(node) = self.locate(path).and_then(|l| self.node_at_mut(&l)) else {
            return false;
        };
        node.previous_name = node.name.clone();
        node.is_editable = true;
        true
    }

    /// Finishes an edit. An empty or absent name, a name containing `/` or,
    /// with `unique_names`, a name already used by a sibling restores the
    /// previous name. Descendant paths follow the renamed node.
    pub fn rename_node(
        &mut self,
        path: &str,
        new_name: Option<&str>,
        unique_names: bool,
    ) -> RenameOutcome {
        match self.locate(path) {
            Some(location) => self.rename_at(&location, new_name, unique_names),
            None => {
                debug!("Cannot rename missing node '{}'", path);
                RenameOutcome::Missing
            }
        }
    }

    /// Renames the node at `location`, which stays the same across the rename.
    pub(crate) fn rename_at(
        &mut self,
        location: &[usize],
        new_name: Option<&str>,
        unique_names: bool,
    ) -> RenameOutcome {
        let new_name = new_name.unwrap_or_default();
        let Some((&index, parent_location)) = location.split_last() else {
            return RenameOutcome::Missing;
        };
        let Some(parent) = self.node_at_mut(parent_location) else {
            return RenameOutcome::Missing;
        };

        let taken = unique_names
            && parent
                .children
                .iter()
                .enumerate()
                .any(|(i, sibling)| i != index && sibling.name == new_name);
        let Some(node) = parent.children.get_mut(index) else {
            return RenameOutcome::Missing;
        };

        let outcome = if new_name.is_empty() || new_name.contains('/') || taken {
            if taken {
                warn!("Name '{}' is already used next to '{}'", new_name, node.path);
            } else if !new_name.is_empty() {
                warn!("Rejecting name '{}' containing a separator", new_name);
            }
            if !node.previous_name.is_empty() {
                node.name = node.previous_name.clone();
            }
            RenameOutcome::Reverted {
                path: node.path.clone(),
            }
        } else {
            let previous_path = node.path.clone();
            node.name = new_name.to_string();
            node.path = match previous_path.parent_path() {
                Some(parent) => join_path(parent, new_name),
                None => new_name.to_string(),
            };
            node.rebase_children();
            debug!("Renamed '{}' to '{}'", previous_path, node.path);
            RenameOutcome::Renamed {
                previous_path,
                new_path: node.path.clone(),
            }
        };
        node.is_editable = false;
        outcome
    }

    /// Recomputes `is_hidden` on every node for `query`. Returns whether any
    /// top-level node stayed visible.
    pub fn apply_filter(&mut self, query: &str) -> bool {
        let mut any_visible = false;
        for child in &mut self.root.children {
            any_visible |= filter_tree(Some(child), query);
        }
        any_visible
    }

    /// Every node path in depth-first order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.root.walk(&mut |node| paths.push(node.path.as_str()));
        paths
    }
}
