mod channel_listener;
mod listener;

pub use channel_listener::{ChannelListener, TreeEvent};
pub use listener::{ContextMenu, TreeListener};
