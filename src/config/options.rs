use crate::tree::{EqualityFn, LeafPredicate, default_equality, default_is_leaf};

pub const DEFAULT_CHILDREN_FIELD: &str = "children";

/// What selecting the already selected node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReselectBehavior {
    /// Clears the selection.
    #[default]
    Clear,
    /// Opens the context menu on the node and keeps the selection.
    ContextMenu,
}

/// Order in which siblings are listed by [`crate::engine::TreeEngine::visible_rows`].
/// The tree itself always keeps insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Insertion,
    NameAscending,
    NameDescending,
}

/// Engine configuration. Resolved once when the engine is built and never
/// changed afterwards.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Key holding the child list in manifest tree models.
    pub children_field: String,
    /// When false, selecting a node with children toggles it instead.
    pub directories_selectable: bool,
    pub reselect: ReselectBehavior,
    /// Rejects adds and renames that would give two siblings the same name.
    pub unique_sibling_names: bool,
    pub order: SortOrder,
    pub equality: EqualityFn,
    pub is_leaf: LeafPredicate,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            children_field: DEFAULT_CHILDREN_FIELD.to_string(),
            directories_selectable: true,
            reselect: ReselectBehavior::default(),
            unique_sibling_names: false,
            order: SortOrder::default(),
            equality: default_equality,
            is_leaf: default_is_leaf,
        }
    }
}
