//! A UI-agnostic tree view state engine.
//!
//! [`engine::TreeEngine`] keeps a path-addressed tree, the set of expanded
//! nodes, the selection and a search filter consistent with each other
//! while the host adds, deletes and renames nodes. Rendering is left to the
//! host, which reads [`engine::TreeEngine::visible_rows`] and receives
//! notifications through [`listener::TreeListener`].

pub mod config;
pub mod engine;
pub mod expansion;
pub mod ext;
pub mod listener;
pub mod selection;
pub mod tree;
pub mod view_state;

pub use config::TreeOptions;
pub use engine::TreeEngine;
pub use tree::{Tree, TreeNode};
