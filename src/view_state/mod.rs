//! Persisting expansion, selection and filter between sessions.

mod view_state;

pub use view_state::{ViewState, ViewStateError};
