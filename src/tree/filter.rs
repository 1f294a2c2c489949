use crate::tree::TreeNode;

/// Marks `node` and its whole subtree hidden or shown for `query` and
/// returns whether `node` itself stays visible.
///
/// A node is visible when the query is empty, when its name contains the
/// query (case-sensitive substring), or when any descendant is visible.
/// Every child is visited, so each pass recomputes the whole subtree.
/// An absent node is never visible and nothing is touched.
pub fn filter_tree(node: Option<&mut TreeNode>, query: &str) -> bool {
    let Some(node) = node else {
        return false;
    };

    let mut visible = false;
    for child in &mut node.children {
        visible |= filter_tree(Some(child), query);
    }

    let visible = visible || query.is_empty() || node.name.contains(query);
    node.is_hidden = !visible;
    visible
}
