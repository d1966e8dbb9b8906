//! Editor state and the observer registry for editor notifications.

use crate::geo::LatLng;
use crate::node::NodeId;
use crate::options::NodeOptions;
use serde::{Deserialize, Serialize};

/// The editor's drawing/editing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorState {
    /// A complete shape exists or none has been started. Clicks on a
    /// completed line/polygon may insert vertices on an edge.
    #[default]
    Idle,
    /// Actively placing vertices; clicks append, pointer movement previews
    /// the next edge.
    Drawing,
}

/// Notification emitted by the editor. Delivery is synchronous and in
/// subscription order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// The state machine transitioned; carries the new state.
    StateChanged(EditorState),
    /// A vertex was placed or inserted.
    NodeAdded { id: NodeId, latlng: LatLng },
    /// A vertex was removed via the secondary action.
    NodeRemoved { id: NodeId, latlng: LatLng },
    /// A drag gesture started on a vertex.
    DragStart { id: NodeId },
    /// A drag gesture ended.
    DragEnd { id: NodeId },
}

/// Callback invoked on every editor event.
pub type EventListener = Box<dyn FnMut(&EditorEvent)>;

/// Hook invoked before each node is created, with exclusive access to the
/// option bag the node will be built from. The sole customization point:
/// mutations feed directly into the constructed node.
pub type NodeCreateHook = Box<dyn FnMut(LatLng, &mut NodeOptions)>;

/// Subscriber registry for one editor instance.
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<EventListener>,
    create_hooks: Vec<NodeCreateHook>,
}

impl Subscribers {
    /// Register an event listener.
    pub fn on_event(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Register a before-node-create hook.
    pub fn on_node_create(&mut self, hook: NodeCreateHook) {
        self.create_hooks.push(hook);
    }

    /// Deliver an event to all listeners, in order.
    pub fn emit(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Run the creation hooks over an option bag for a node about to be
    /// created at `latlng`.
    pub fn resolve_node_options(&mut self, latlng: LatLng, options: &mut NodeOptions) {
        for hook in &mut self.create_hooks {
            hook(latlng, options);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .field("create_hooks", &self.create_hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_fire_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            subs.on_event(Box::new(move |event| {
                if matches!(event, EditorEvent::StateChanged(_)) {
                    seen.borrow_mut().push(tag);
                }
            }));
        }
        subs.emit(EditorEvent::StateChanged(EditorState::Drawing));
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_create_hook_mutates_options() {
        let mut subs = Subscribers::default();
        subs.on_node_create(Box::new(|_latlng, options| {
            options.radius = 9.0;
            options.interactive = false;
        }));
        let mut options = NodeOptions::default();
        subs.resolve_node_options(LatLng::new(1.0, 2.0), &mut options);
        assert!((options.radius - 9.0).abs() < f64::EPSILON);
        assert!(!options.interactive);
    }
}
