//! The node store: an ordered, path-addressed tree of [`TreeNode`]s with
//! the mutations, search filter and flattening the engine builds on.

mod filter;
mod node;
mod rows;
mod tree;

pub use filter::filter_tree;
pub use node::{EqualityFn, LeafPredicate, TreeNode, default_equality, default_is_leaf};
pub use rows::{RowState, VisibleRow};
pub(crate) use rows::visible_rows;
pub use tree::{RenameOutcome, Tree};
