//! Listener registration and event broadcast
//!
//! Listeners implement [`PlatformListener`] and override only the handlers
//! they care about; every handler defaults to a no-op. Broadcast is
//! synchronous, on the caller's thread, in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::event::{DisplayRefreshEvent, KeyboardEvent, MouseEvent, WindowEvent};

/// An event sink for platform events.
///
/// Handlers must not assume anything about whether other listeners have run
/// for the same event; ordering between listeners is registration order, not
/// priority.
pub trait PlatformListener {
    /// A key was pressed or released.
    fn keyboard_event(&mut self, _event: KeyboardEvent) {}

    /// The mouse moved, scrolled, or a button changed state.
    fn mouse_event(&mut self, _event: MouseEvent) {}

    /// The window changed.
    fn window_event(&mut self, _event: WindowEvent) {}

    /// A frame was submitted for presentation.
    fn display_refresh_event(&mut self, _event: DisplayRefreshEvent) {}
}

/// Shared handle to a listener.
///
/// The registry and the registering caller both hold a reference; the model
/// is single-threaded, so `Rc<RefCell<_>>` rather than `Arc<Mutex<_>>`.
pub type ListenerHandle = Rc<RefCell<dyn PlatformListener>>;

/// Insertion-ordered collection of listeners with per-class broadcast.
///
/// There is no removal or duplicate detection: a listener registered twice is
/// invoked twice.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<ListenerHandle>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. It will be invoked after every listener added
    /// before it.
    pub fn add(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Broadcast a keyboard event to every listener, in registration order.
    pub fn emit_keyboard(&self, event: KeyboardEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().keyboard_event(event);
        }
    }

    /// Broadcast a mouse event to every listener, in registration order.
    pub fn emit_mouse(&self, event: MouseEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().mouse_event(event);
        }
    }

    /// Broadcast a window event to every listener, in registration order.
    pub fn emit_window(&self, event: WindowEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().window_event(event);
        }
    }

    /// Broadcast a display-refresh event to every listener, in registration
    /// order.
    pub fn emit_display_refresh(&self, event: DisplayRefreshEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().display_refresh_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::event::{CursorState, FramebufferSize, Key, KeyAction, MouseAction};

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, log: Rc<RefCell<Vec<String>>>) -> ListenerHandle {
            Rc::new(RefCell::new(Self { name, log }))
        }
    }

    impl PlatformListener for Recorder {
        fn keyboard_event(&mut self, event: KeyboardEvent) {
            self.log
                .borrow_mut()
                .push(format!("{}:key:{:?}", self.name, event.key));
        }

        fn mouse_event(&mut self, event: MouseEvent) {
            self.log
                .borrow_mut()
                .push(format!("{}:mouse:{:?}", self.name, event.action));
        }

        fn window_event(&mut self, _event: WindowEvent) {
            self.log.borrow_mut().push(format!("{}:window", self.name));
        }

        fn display_refresh_event(&mut self, event: DisplayRefreshEvent) {
            self.log
                .borrow_mut()
                .push(format!("{}:refresh:{}", self.name, event.delta_time));
        }
    }

    // A listener that overrides nothing must still be registrable.
    struct Silent;
    impl PlatformListener for Silent {}

    fn key_event() -> KeyboardEvent {
        KeyboardEvent {
            key: Key::W,
            action: KeyAction::Press,
        }
    }

    #[test]
    fn broadcast_follows_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add(Recorder::new("first", log.clone()));
        registry.add(Recorder::new("second", log.clone()));

        registry.emit_keyboard(key_event());

        assert_eq!(*log.borrow(), vec!["first:key:W", "second:key:W"]);
    }

    #[test]
    fn every_listener_observes_every_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add(Recorder::new("a", log.clone()));
        registry.add(Recorder::new("b", log.clone()));

        registry.emit_mouse(MouseEvent {
            action: MouseAction::Move,
            cursor: CursorState::default(),
        });

        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn default_handlers_are_no_ops() {
        let mut registry = ListenerRegistry::new();
        registry.add(Rc::new(RefCell::new(Silent)));

        registry.emit_keyboard(key_event());
        registry.emit_window(WindowEvent::FramebufferResized(FramebufferSize {
            width: 800,
            height: 600,
        }));
        registry.emit_display_refresh(DisplayRefreshEvent {
            delta_time: 0.016,
            time: 1.0,
            framebuffer: FramebufferSize {
                width: 800,
                height: 600,
            },
        });
    }

    #[test]
    fn caller_keeps_access_to_registered_listener() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = Recorder::new("shared", log.clone());
        let mut registry = ListenerRegistry::new();
        registry.add(listener.clone());

        registry.emit_keyboard(key_event());

        // The caller's handle observes state mutated during broadcast.
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(registry.len(), 1);
        drop(listener);
    }
}
