//! Windowing platform: typed events, listener broadcast, and the GLFW
//! window wrapper with raw-event translation.

/// Typed event payloads.
pub mod event;
/// Listener trait and registry.
pub mod listener;
/// GLFW window wrapper and event translation.
pub mod window;

pub use event::{
    CursorState, DisplayRefreshEvent, FramebufferSize, Key, KeyAction, KeyboardEvent, MouseAction,
    MouseButton, MouseEvent, WindowEvent,
};
pub use listener::{ListenerHandle, ListenerRegistry, PlatformListener};
pub use window::{CursorTracker, TranslatedEvent, Window, WindowError, WindowResult};
