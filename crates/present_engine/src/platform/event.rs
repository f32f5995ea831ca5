//! Typed platform event payloads
//!
//! Immutable value structs delivered to [`PlatformListener`] implementations.
//! Raw windowing-backend events are translated into these payloads before
//! broadcast; anything the backend reports that has no counterpart here is
//! dropped during translation.
//!
//! [`PlatformListener`]: crate::platform::listener::PlatformListener

/// Keys the platform reports to listeners.
///
/// Backend key codes outside this set are ignored during translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    LeftShift,
    RightShift,
    Space,
    PageUp,
    PageDown,
}

/// Key transition reported by the windowing backend. Repeats are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key went down.
    Press,
    /// The key came back up.
    Release,
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that changed state.
    pub key: Key,
    /// Whether it was pressed or released.
    pub action: KeyAction,
}

/// Mouse buttons the platform reports to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Cursor position and per-event motion delta.
///
/// Coordinates are normalized to the window: `(0, 0)` is the bottom-left
/// corner and `(1, 1)` the top-right. Deltas are the change since the
/// previous cursor event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position, bottom-up.
    pub y: f64,
    /// Horizontal motion since the previous cursor event.
    pub dx: f64,
    /// Vertical motion since the previous cursor event.
    pub dy: f64,
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseAction {
    /// A button went down.
    ButtonPress(MouseButton),
    /// A button came back up.
    ButtonRelease(MouseButton),
    /// The cursor moved.
    Move,
    /// The scroll wheel turned.
    Scroll {
        /// Vertical scroll offset reported by the backend.
        delta_y: f64,
    },
}

/// A mouse event. The cursor snapshot is filled for every action, not just
/// cursor moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub action: MouseAction,
    /// Cursor state at the time of the event.
    pub cursor: CursorState,
}

/// Framebuffer dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Window-level events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The framebuffer changed size.
    FramebufferResized(FramebufferSize),
    /// The user asked the window to close. The frame loop observes the
    /// backend's close flag itself; this event only informs listeners.
    CloseRequested,
}

/// Emitted once per frame, after the frame's commands have been submitted and
/// before the image is presented. This is the hook through which a renderer
/// observes frame timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRefreshEvent {
    /// Seconds since the previous frame. Never zero; see
    /// [`STALLED_CLOCK_DELTA`](crate::render::vulkan::scheduler::STALLED_CLOCK_DELTA).
    pub delta_time: f64,
    /// Absolute time of this frame, in seconds since backend initialization.
    pub time: f64,
    /// Current framebuffer size in pixels.
    pub framebuffer: FramebufferSize,
}
