//! The tree state engine: one object owning the tree, its expansion set,
//! selection and filter, notifying the host through [`crate::listener`].

mod engine;

pub use engine::TreeEngine;
