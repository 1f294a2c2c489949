use crate::tree::TreeNode;

/// Receives the engine's notifications. Every method defaults to doing
/// nothing so hosts only implement what they need.
pub trait TreeListener {
    /// A rename went through. `previous_path` is the node's full path before
    /// the rename, not just its old name.
    fn on_rename(&mut self, _node: &TreeNode, _previous_path: &str) {}

    fn on_selection(&mut self, _node: Option<&TreeNode>) {}

    fn on_toggle(&mut self, _node: &TreeNode, _expanded: bool) {}
}

/// The host's context menu widget.
pub trait ContextMenu {
    fn open(&mut self, node: &TreeNode);
}
