use derive_more::Display;

/// A single entry of the tree: a leaf (file-like) or a directory.
///
/// `path` is always the `/`-joined names of the node's ancestors followed by
/// its own name. Only [`crate::tree::Tree`] rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{path}")]
pub struct TreeNode {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) children: Vec<TreeNode>,
    pub(crate) is_leaf: bool,
    pub(crate) is_hidden: bool,
    pub(crate) is_editable: bool,
    pub(crate) previous_name: String,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>, is_leaf: bool) -> Self {
        TreeNode {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
            is_leaf,
            is_hidden: false,
            is_editable: false,
            previous_name: String::new(),
        }
    }

    /// The synthetic container owning the top-level nodes. It has no path.
    pub(crate) fn root() -> Self {
        TreeNode::new("", "", false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable
    }

    pub fn previous_name(&self) -> &str {
        &self.previous_name
    }

    /// A copy of this node without its children, for notifications and
    /// comparisons that must not walk the subtree.
    pub fn detached(&self) -> TreeNode {
        TreeNode {
            name: self.name.clone(),
            path: self.path.clone(),
            children: Vec::new(),
            is_leaf: self.is_leaf,
            is_hidden: self.is_hidden,
            is_editable: self.is_editable,
            previous_name: self.previous_name.clone(),
        }
    }

    pub(crate) fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Visits every node below this one, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        for child in &self.children {
            visit(child);
            child.walk(visit);
        }
    }

    /// Rewrites the paths of every descendant after this node's own path
    /// changed.
    pub(crate) fn rebase_children(&mut self) {
        let base = self.path.clone();
        for child in &mut self.children {
            child.path = crate::ext::join_path(&base, &child.name);
            child.rebase_children();
        }
    }
}

/// Node comparison used wherever the engine has to match nodes coming from
/// the host against its own.
pub type EqualityFn = fn(&TreeNode, &TreeNode) -> bool;

/// Decides whether a node renders as a leaf.
pub type LeafPredicate = fn(&TreeNode) -> bool;

/// Structural equality ignoring `children`, so subtrees are neither walked
/// nor required to be loaded.
pub fn default_equality(a: &TreeNode, b: &TreeNode) -> bool {
    a.name == b.name
        && a.path == b.path
        && a.is_leaf == b.is_leaf
        && a.is_hidden == b.is_hidden
        && a.is_editable == b.is_editable
        && a.previous_name == b.previous_name
}

pub fn default_is_leaf(node: &TreeNode) -> bool {
    node.is_leaf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with_child() -> TreeNode {
        let mut dir = TreeNode::new("a", "a", false);
        dir.children.push(TreeNode::new("b", "a/b", true));
        dir
    }

    #[test]
    fn test_default_equality_ignores_children() {
        let full = directory_with_child();
        let empty = TreeNode::new("a", "a", false);
        assert!(default_equality(&full, &empty));
        assert_ne!(full, empty);
    }

    #[test]
    fn test_default_equality_compares_flags() {
        let mut hidden = TreeNode::new("a", "a", false);
        hidden.is_hidden = true;
        assert!(!default_equality(&hidden, &TreeNode::new("a", "a", false)));
    }

    #[test]
    fn test_detached_drops_children() {
        let dir = directory_with_child();
        let detached = dir.detached();
        assert!(detached.children().is_empty());
        assert_eq!(detached.path(), "a");
    }

    #[test]
    fn test_rebase_children_rewrites_descendants() {
        let mut dir = directory_with_child();
        dir.children[0]
            .children
            .push(TreeNode::new("c", "a/b/c", true));
        dir.path = "x".to_string();
        dir.rebase_children();
        assert_eq!(dir.children[0].path(), "x/b");
        assert_eq!(dir.children[0].children[0].path(), "x/b/c");
    }

    #[test]
    fn test_display_is_path() {
        assert_eq!(TreeNode::new("c", "a/b/c", true).to_string(), "a/b/c");
    }
}
