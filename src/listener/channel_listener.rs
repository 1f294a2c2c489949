use derive_more::Display;
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::listener::{ContextMenu, TreeListener};
use crate::tree::TreeNode;

/// An owned copy of a notification, suitable for sending across a channel.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TreeEvent {
    #[display("renamed '{previous_path}' to '{}'", node.path())]
    Renamed {
        node: TreeNode,
        previous_path: String,
    },
    #[display("selected {}", node.as_ref().map_or("nothing", |n| n.path()))]
    SelectionChanged { node: Option<TreeNode> },
    #[display("{} '{}'", if *expanded { "expanded" } else { "collapsed" }, node.path())]
    Toggled { node: TreeNode, expanded: bool },
    #[display("context menu on '{}'", node.path())]
    ContextMenuOpened { node: TreeNode },
}

/// Forwards every notification as a [`TreeEvent`] into an unbounded channel.
/// Nodes are sent without their children.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: UnboundedSender<TreeEvent>,
}

impl ChannelListener {
    pub fn channel() -> (Self, UnboundedReceiver<TreeEvent>) {
        let (sender, receiver) = mpsc::unbounded();
        (ChannelListener { sender }, receiver)
    }

    fn send(&self, event: TreeEvent) {
        if let Err(send_err) = self.sender.unbounded_send(event) {
            debug!("Dropping tree event, receiver is gone: {}", send_err);
        }
    }
}

impl TreeListener for ChannelListener {
    fn on_rename(&mut self, node: &TreeNode, previous_path: &str) {
        self.send(TreeEvent::Renamed {
            node: node.detached(),
            previous_path: previous_path.to_string(),
        });
    }

    fn on_selection(&mut self, node: Option<&TreeNode>) {
        self.send(TreeEvent::SelectionChanged {
            node: node.map(TreeNode::detached),
        });
    }

    fn on_toggle(&mut self, node: &TreeNode, expanded: bool) {
        self.send(TreeEvent::Toggled {
            node: node.detached(),
            expanded,
        });
    }
}

impl ContextMenu for ChannelListener {
    fn open(&mut self, node: &TreeNode) {
        self.send(TreeEvent::ContextMenuOpened {
            node: node.detached(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[compio::test]
    async fn test_events_arrive_in_order() {
        let (mut listener, receiver) = ChannelListener::channel();
        let node = TreeNode::new("b", "a/b", true);

        listener.on_toggle(&node, true);
        listener.on_selection(Some(&node));
        listener.on_rename(&node, "a/old");
        listener.on_selection(None);
        drop(listener);

        let events = receiver.collect::<Vec<_>>().await;
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            TreeEvent::Toggled {
                node: node.clone(),
                expanded: true
            }
        );
        assert_eq!(events[2].to_string(), "renamed 'a/old' to 'a/b'");
        assert_eq!(events[3].to_string(), "selected nothing");
    }

    #[test]
    fn test_send_after_receiver_dropped_is_ignored() {
        let (mut listener, receiver) = ChannelListener::channel();
        drop(receiver);
        listener.open(&TreeNode::new("a", "a", true));
    }

    #[test]
    fn test_children_are_not_sent() {
        let (mut listener, mut receiver) = ChannelListener::channel();
        let mut dir = TreeNode::new("a", "a", false);
        dir.children.push(TreeNode::new("b", "a/b", true));

        listener.on_toggle(&dir, false);
        match receiver.try_recv() {
            Ok(TreeEvent::Toggled { node, expanded }) => {
                assert!(node.children().is_empty());
                assert!(!expanded);
            }
            other => panic!("Expected a toggle event, got {:?}", other),
        }
    }
}
