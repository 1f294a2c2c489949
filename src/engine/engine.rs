use std::fmt;

use tracing::{debug, info, warn};

use crate::config::{ReselectBehavior, TreeOptions};
use crate::expansion::ExpansionTracker;
use crate::ext::{TreePathExt, canonicalize};
use crate::listener::{ContextMenu, TreeListener};
use crate::selection::Selection;
use crate::tree::{RenameOutcome, Tree, TreeNode, VisibleRow, visible_rows};
use crate::view_state::ViewState;

/// Owns a tree together with its expansion set, selection and filter, and
/// keeps them consistent across every mutation.
///
/// All operations run to completion synchronously. None of them fail: a
/// path that does not resolve turns the call into a no-op.
pub struct TreeEngine {
    tree: Tree,
    expansion: ExpansionTracker,
    selection: Selection,
    options: TreeOptions,
    query: String,
    context_menu_node: Option<String>,
    listeners: Vec<Box<dyn TreeListener>>,
    context_menu: Option<Box<dyn ContextMenu>>,
}

impl fmt::Debug for TreeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeEngine")
            .field("tree", &self.tree)
            .field("expansion", &self.expansion)
            .field("selection", &self.selection)
            .field("options", &self.options)
            .field("query", &self.query)
            .field("context_menu_node", &self.context_menu_node)
            .field("listeners", &self.listeners.len())
            .field("has_context_menu", &self.context_menu.is_some())
            .finish()
    }
}

impl Default for TreeEngine {
    fn default() -> Self {
        Self::new(TreeOptions::default())
    }
}

fn notify(
    listeners: &mut [Box<dyn TreeListener>],
    mut event: impl FnMut(&mut dyn TreeListener),
) {
    for listener in listeners {
        event(listener.as_mut());
    }
}

impl TreeEngine {
    pub fn new(options: TreeOptions) -> Self {
        TreeEngine {
            tree: Tree::new(),
            expansion: ExpansionTracker::new(),
            selection: Selection::new(),
            options,
            query: String::new(),
            context_menu_node: None,
            listeners: Vec::new(),
            context_menu: None,
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn TreeListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn with_context_menu(mut self, context_menu: Box<dyn ContextMenu>) -> Self {
        self.context_menu = Some(context_menu);
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        self.tree.get(path)
    }

    // Mutations

    /// Adds a node, creating missing directories, and expands its parent so
    /// the new node shows up right away. Directories created on the way are
    /// expanded too; existing ones other than the parent keep their state.
    pub fn add_node(&mut self, path: &str, is_leaf: bool) -> Option<&TreeNode> {
        let insertion = self
            .tree
            .insert(path, is_leaf, self.options.unique_sibling_names)?;
        for directory in &insertion.created_directories {
            self.expansion.expand(directory);
        }
        let parent = insertion
            .location
            .split_last()
            .and_then(|(_, parent)| self.tree.node_at(parent))
            .map(|parent| parent.path.clone())
            .filter(|path| !path.is_empty());
        if let Some(parent) = parent {
            self.expansion.expand(&parent);
        }
        self.refilter();
        self.tree.node_at(&insertion.location)
    }

    /// Deletes the node at `path` and forgets its expansion, selection and
    /// context-menu state. Returns false when nothing was there.
    pub fn delete_node(&mut self, path: &str) -> bool {
        let Some(removed) = self.tree.delete_node(path) else {
            return false;
        };

        self.expansion.remove_subtree(&removed.path);
        if self
            .context_menu_node
            .as_ref()
            .is_some_and(|node| node.is_within(&removed.path))
        {
            self.context_menu_node = None;
        }
        if self.selection.invalidate_subtree(&removed.path) {
            debug!("Selected node went away with '{}'", removed.path);
            notify(&mut self.listeners, |l| l.on_selection(None));
        }
        true
    }

    /// Enters edit mode on the node. Returns false when it does not exist.
    pub fn begin_rename(&mut self, path: &str) -> bool {
        self.tree.begin_edit(path)
    }

    /// Leaves edit mode, applying `new_name` or, when it is empty or absent,
    /// restoring the name the node had when the edit began.
    pub fn rename_node(&mut self, path: &str, new_name: Option<&str>) -> RenameOutcome {
        let Some(location) = self.tree.locate(path) else {
            debug!("Cannot rename missing node '{}'", path);
            return RenameOutcome::Missing;
        };
        let outcome =
            self.tree
                .rename_at(&location, new_name, self.options.unique_sibling_names);

        if let RenameOutcome::Renamed {
            previous_path,
            new_path,
        } = &outcome
        {
            self.expansion.rename_subtree(previous_path, new_path);
            self.selection.rename_subtree(previous_path, new_path);
            if let Some(node) = self.context_menu_node.as_mut() {
                if node.is_within(previous_path) {
                    *node = format!("{new_path}{}", &node[previous_path.len()..]);
                }
            }
            self.refilter();

            if let Some(node) = self.tree.node_at(&location) {
                notify(&mut self.listeners, |l| l.on_rename(node, previous_path));
            }
        }
        outcome
    }

    // Expansion

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expansion.is_expanded(path)
    }

    /// Expands a collapsed node or collapses an expanded one. Returns the new
    /// state, or `None` when the node does not exist.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        let Some(node) = self.tree.get(path) else {
            debug!("Cannot toggle missing node '{}'", path);
            return None;
        };
        let expanded = self.expansion.toggle(&node.path);
        notify(&mut self.listeners, |l| l.on_toggle(node, expanded));
        Some(expanded)
    }

    /// Expands the node if it is collapsed. Returns whether anything changed.
    pub fn expand(&mut self, path: &str) -> bool {
        match self.tree.get(path) {
            Some(node) if !self.expansion.is_expanded(&node.path) => {
                self.expansion.expand(&node.path);
                notify(&mut self.listeners, |l| l.on_toggle(node, true));
                true
            }
            _ => false,
        }
    }

    /// Collapses the node if it is expanded. Returns whether anything changed.
    pub fn collapse(&mut self, path: &str) -> bool {
        match self.tree.get(path) {
            Some(node) if self.expansion.is_expanded(&node.path) => {
                self.expansion.collapse(&node.path);
                notify(&mut self.listeners, |l| l.on_toggle(node, false));
                true
            }
            _ => false,
        }
    }

    /// Expanded paths in expansion order, including ones without a node yet.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.expansion.expanded_paths()
    }

    /// The live nodes behind the expanded paths, in expansion order.
    pub fn expanded_nodes(&self) -> Vec<&TreeNode> {
        self.expansion
            .expanded_paths()
            .filter_map(|path| self.tree.get(path))
            .collect()
    }

    /// Replaces the expansion set wholesale with nodes supplied by the host,
    /// matching each against the tree with the configured equality.
    pub fn set_expanded_nodes(&mut self, nodes: &[TreeNode]) {
        self.expansion = ExpansionTracker::reconcile(nodes, &self.tree, self.options.equality);
    }

    // Filtering

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filters the tree by `query`. Returns whether anything stayed visible.
    pub fn set_filter(&mut self, query: &str) -> bool {
        self.query = query.to_string();
        let any_visible = self.tree.apply_filter(query);
        debug!("Filter '{}' leaves nodes visible: {}", query, any_visible);
        any_visible
    }

    fn refilter(&mut self) {
        if !self.query.is_empty() {
            self.tree.apply_filter(&self.query);
        }
    }

    // Selection

    pub fn selected(&self) -> Option<&TreeNode> {
        self.selection.path().and_then(|path| self.tree.get(path))
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selection.path()
    }

    /// Handles a click on a node's label.
    ///
    /// A node with children toggles instead when directories are not
    /// selectable. Otherwise the node becomes selected, or, if it already
    /// was, the selection is cleared (or the context menu opened, depending
    /// on [`ReselectBehavior`]). Nodes being edited ignore the click.
    pub fn select_leaf(&mut self, path: &str) {
        let Some(node) = self.tree.get(path) else {
            debug!("Cannot select missing node '{}'", path);
            return;
        };
        if node.is_editable {
            debug!("Ignoring selection of '{}' while it is edited", node.path);
            return;
        }
        if node.has_children() && !self.options.directories_selectable {
            let path = node.path.clone();
            self.toggle(&path);
            return;
        }

        if !self.selection.is_selected(&node.path) {
            self.selection.select(&node.path);
            notify(&mut self.listeners, |l| l.on_selection(Some(node)));
            return;
        }

        match self.options.reselect {
            ReselectBehavior::Clear => {
                self.selection.clear();
                notify(&mut self.listeners, |l| l.on_selection(None));
            }
            ReselectBehavior::ContextMenu => {
                let path = node.path.clone();
                self.show_context_menu(&path);
            }
        }
    }

    pub fn clear_selected(&mut self) {
        if self.selection.clear().is_some() {
            notify(&mut self.listeners, |l| l.on_selection(None));
        }
    }

    /// Reveals and selects the node at `target`: every ancestor is expanded
    /// top-down, then the node itself is selected. Returns whether the node
    /// was found.
    pub fn select_by_path(&mut self, target: &str) -> bool {
        let target = canonicalize(target);
        let Some(chain) = self.tree.ancestor_chain(&target) else {
            debug!("No node at '{}' to select", target);
            return false;
        };
        let chain = chain
            .iter()
            .map(|node| node.path.clone())
            .collect::<Vec<_>>();

        let Some((found, ancestors)) = chain.split_last() else {
            return false;
        };
        for ancestor in ancestors {
            self.expand(ancestor);
        }
        if !self.selection.is_selected(found) {
            self.selection.select(found);
            if let Some(node) = self.tree.get(found) {
                notify(&mut self.listeners, |l| l.on_selection(Some(node)));
            }
        }
        info!("Revealed and selected '{}'", found);
        true
    }

    // Context menu

    /// The node the context menu was last opened on.
    pub fn context_menu_node(&self) -> Option<&TreeNode> {
        self.context_menu_node
            .as_deref()
            .and_then(|path| self.tree.get(path))
    }

    /// Opens the host's context menu on the node. Without a registered menu
    /// this only logs. Returns whether the menu was opened.
    pub fn show_context_menu(&mut self, path: &str) -> bool {
        let Some(node) = self.tree.get(path) else {
            debug!("No node at '{}' for the context menu", path);
            return false;
        };
        let Some(context_menu) = self.context_menu.as_mut() else {
            warn!("No context menu registered, skipping '{}'", node.path);
            return false;
        };
        context_menu.open(node);
        self.context_menu_node = Some(node.path.clone());
        true
    }

    // View

    /// The rows a view would currently render, honouring filter, expansion,
    /// selection and the configured sibling order.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        visible_rows(
            &self.tree,
            &|path: &str| self.expansion.is_expanded(path),
            self.selection.path(),
            self.options.is_leaf,
            self.options.order,
        )
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            expanded: self.expansion.expanded_paths().map(String::from).collect(),
            selected: self.selection.path().map(String::from),
            query: self.query.clone(),
        }
    }

    /// Applies a saved state. A selection whose node no longer exists is
    /// dropped; expanded paths are kept either way.
    pub fn restore_view_state(&mut self, state: ViewState) {
        let mut expansion = ExpansionTracker::new();
        for path in &state.expanded {
            expansion.expand(path);
        }
        self.expansion = expansion;

        self.selection.clear();
        if let Some(selected) = state.selected.filter(|path| self.tree.contains(path)) {
            self.selection.select(&selected);
        }
        self.set_filter(&state.query);
    }
}
