use hashlink::LinkedHashSet;
use tracing::debug;

use crate::ext::{TreePathExt, canonicalize, join_path};
use crate::tree::{EqualityFn, Tree, TreeNode};

/// The set of expanded nodes, keyed by canonical path and kept in the order
/// the nodes were expanded.
///
/// A key does not need a live node behind it: paths expanded before their
/// node exists take effect once it is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: LinkedHashSet<String>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the set from a node sequence supplied by the host.
    ///
    /// Each node is matched against the live tree with `equality`; a match
    /// is keyed by the live node's path, anything else by its own path.
    pub fn reconcile<'a>(
        nodes: impl IntoIterator<Item = &'a TreeNode>,
        tree: &Tree,
        equality: EqualityFn,
    ) -> Self {
        let mut live = Vec::new();
        tree.root().walk(&mut |node| live.push(node));

        let mut pending = 0;
        let expanded = nodes
            .into_iter()
            .map(|wanted| match live.iter().find(|node| equality(wanted, node)) {
                Some(node) => node.path.clone(),
                None => {
                    pending += 1;
                    canonicalize(&wanted.path)
                }
            })
            .filter(|path| !path.is_empty())
            .collect::<LinkedHashSet<_>>();
        debug!(
            "Reconciled {} expanded nodes, {} not in the tree yet",
            expanded.len(),
            pending
        );

        ExpansionTracker { expanded }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path) || self.expanded.contains(&canonicalize(path))
    }

    /// Returns true when the path was collapsed before.
    pub fn expand(&mut self, path: &str) -> bool {
        let path = canonicalize(path);
        !path.is_empty() && self.expanded.insert(path)
    }

    /// Returns true when the path was expanded before.
    pub fn collapse(&mut self, path: &str) -> bool {
        self.expanded.remove(&canonicalize(path))
    }

    /// Flips the state of `path` and returns whether it is now expanded.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.collapse(path) {
            false
        } else {
            self.expand(path)
        }
    }

    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Forgets `path` and everything below it.
    pub fn remove_subtree(&mut self, path: &str) {
        self.expanded = std::mem::take(&mut self.expanded)
            .into_iter()
            .filter(|expanded| !expanded.is_within(path))
            .collect();
    }

    /// Moves the keys of `old_path` and its descendants under `new_path`,
    /// keeping their order.
    pub fn rename_subtree(&mut self, old_path: &str, new_path: &str) {
        self.expanded = std::mem::take(&mut self.expanded)
            .into_iter()
            .map(|expanded| {
                if expanded == old_path {
                    new_path.to_string()
                } else if expanded.is_within(old_path) {
                    join_path(new_path, &expanded[old_path.len() + 1..])
                } else {
                    expanded
                }
            })
            .collect();
    }
}
