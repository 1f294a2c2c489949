use crate::config::SortOrder;
use crate::tree::{LeafPredicate, Tree, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Leaf,
    Expanded,
    Collapsed,
}

/// One line of the flattened tree as a view would render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub depth: usize,
    pub path: String,
    pub name: String,
    pub state: RowState,
    pub selected: bool,
    pub editable: bool,
}

/// Flattens the tree into rows, skipping hidden nodes and the children of
/// collapsed ones.
pub(crate) fn visible_rows(
    tree: &Tree,
    is_expanded: &dyn Fn(&str) -> bool,
    selected: Option<&str>,
    is_leaf: LeafPredicate,
    order: SortOrder,
) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    push_rows(
        tree.nodes(),
        0,
        &mut rows,
        is_expanded,
        selected,
        is_leaf,
        order,
    );
    rows
}

fn push_rows(
    nodes: &[TreeNode],
    depth: usize,
    rows: &mut Vec<VisibleRow>,
    is_expanded: &dyn Fn(&str) -> bool,
    selected: Option<&str>,
    is_leaf: LeafPredicate,
    order: SortOrder,
) {
    let mut shown = nodes.iter().filter(|n| !n.is_hidden).collect::<Vec<_>>();
    match order {
        SortOrder::Insertion => {}
        SortOrder::NameAscending => shown.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::NameDescending => shown.sort_by(|a, b| b.name.cmp(&a.name)),
    }

    for node in shown {
        let state = if is_leaf(node) {
            RowState::Leaf
        } else if is_expanded(&node.path) {
            RowState::Expanded
        } else {
            RowState::Collapsed
        };
        rows.push(VisibleRow {
            depth,
            path: node.path.clone(),
            name: node.name.clone(),
            state,
            selected: selected == Some(node.path.as_str()),
            editable: node.is_editable,
        });
        if state == RowState::Expanded {
            push_rows(
                &node.children,
                depth + 1,
                rows,
                is_expanded,
                selected,
                is_leaf,
                order,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::default_is_leaf;

    fn sample() -> Tree {
        let mut tree = Tree::new();
        tree.add_node("src/b.rs", true, false);
        tree.add_node("src/a.rs", true, false);
        tree.add_node("docs/guide.md", true, false);
        tree
    }

    fn paths(rows: &[VisibleRow]) -> Vec<&str> {
        rows.iter().map(|row| row.path.as_str()).collect()
    }

    #[test]
    fn test_collapsed_children_are_skipped() {
        let rows = visible_rows(
            &sample(),
            &|_: &str| false,
            None,
            default_is_leaf,
            SortOrder::Insertion,
        );
        assert_eq!(paths(&rows), vec!["src", "docs"]);
        assert!(rows.iter().all(|row| row.state == RowState::Collapsed));
    }

    #[test]
    fn test_expanded_children_follow_parent() {
        let rows = visible_rows(
            &sample(),
            &|path: &str| path == "src",
            Some("src/a.rs"),
            default_is_leaf,
            SortOrder::Insertion,
        );
        assert_eq!(paths(&rows), vec!["src", "src/b.rs", "src/a.rs", "docs"]);
        assert_eq!(rows[0].state, RowState::Expanded);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[1].state, RowState::Leaf);
        assert!(rows[2].selected);
        assert!(!rows[1].selected);
    }

    #[test]
    fn test_sort_orders() {
        let tree = sample();
        let ascending = visible_rows(
            &tree,
            &|_: &str| true,
            None,
            default_is_leaf,
            SortOrder::NameAscending,
        );
        assert_eq!(
            paths(&ascending),
            vec!["docs", "docs/guide.md", "src", "src/a.rs", "src/b.rs"]
        );

        let descending = visible_rows(
            &tree,
            &|_: &str| true,
            None,
            default_is_leaf,
            SortOrder::NameDescending,
        );
        assert_eq!(
            paths(&descending),
            vec!["src", "src/b.rs", "src/a.rs", "docs", "docs/guide.md"]
        );
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut tree = sample();
        tree.apply_filter("guide");
        let rows = visible_rows(
            &tree,
            &|_: &str| true,
            None,
            default_is_leaf,
            SortOrder::Insertion,
        );
        assert_eq!(paths(&rows), vec!["docs", "docs/guide.md"]);
    }
}
