//! Window management using GLFW
//!
//! Wraps GLFW window creation and event polling for Vulkan, and translates
//! raw GLFW events into the typed payloads in [`crate::platform::event`].

use thiserror::Error;

use crate::platform::event::{
    CursorState, FramebufferSize, Key, KeyAction, KeyboardEvent, MouseAction, MouseButton,
    MouseEvent, WindowEvent,
};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized.
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// GLFW reports no usable Vulkan loader.
    #[error("Vulkan is not supported (is the loader installed correctly?)")]
    VulkanUnsupported,

    /// The window could not be created.
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other GLFW-reported failure.
    #[error("GLFW error: {0}")]
    Glfw(String),
}

/// Result alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management.
///
/// Owns the GLFW context; dropping the window tears down GLFW. Only one
/// window is supported.
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create a window configured for Vulkan rendering, with polling enabled
    /// for every event class the platform translates.
    pub fn new(title: &str, width: u32, height: u32) -> WindowResult<Self> {
        let mut glfw =
            glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        if !glfw.vulkan_supported() {
            return Err(WindowError::VulkanUnsupported);
        }

        // No OpenGL context; the surface comes from Vulkan.
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    /// Whether a close has been requested.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request (or cancel) a close.
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Pump the backend's event queue. Non-blocking.
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain events gathered by the last [`poll_events`](Self::poll_events).
    pub fn flush_events(&self) -> glfw::FlushedMessages<'_, (f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Window size in screen coordinates.
    pub fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width as u32, height as u32)
    }

    /// Framebuffer size in pixels. May differ from the window size on
    /// high-DPI displays.
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width as u32, height as u32)
    }

    /// Monotonic clock, in seconds since GLFW initialization.
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Instance extensions GLFW needs for surface creation.
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| WindowError::Glfw("failed to get required instance extensions".into()))
    }

    /// Create a Vulkan surface for this window.
    ///
    /// The raw `vk::Result` is returned on failure so callers can feed it
    /// into their own error taxonomy.
    pub fn create_surface(
        &self,
        instance: ash::vk::Instance,
    ) -> Result<ash::vk::SurfaceKHR, ash::vk::Result> {
        let mut surface = ash::vk::SurfaceKHR::null();
        let result = self
            .window
            .create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == ash::vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(result)
        }
    }
}

/// Cursor position tracking across events.
///
/// Owned by the frame scheduler and mutated only during event translation,
/// once per polled cursor event. The first observed position initializes the
/// state so the first move reports a zero delta.
#[derive(Debug, Default)]
pub struct CursorTracker {
    state: CursorState,
    initialized: bool,
}

impl CursorTracker {
    /// Fold a raw cursor position (window coordinates, top-left origin) into
    /// the tracked state and return the updated snapshot.
    pub fn update(&mut self, window_x: f64, window_y: f64, window_size: (u32, u32)) -> CursorState {
        let (width, height) = window_size;
        // (0,0) bottom-left of window, (1,1) top-right.
        let x = window_x / f64::from(width.max(1));
        let y = 1.0 - window_y / f64::from(height.max(1));

        if !self.initialized {
            self.state.x = x;
            self.state.y = y;
            self.initialized = true;
        }
        self.state.dx = x - self.state.x;
        self.state.dy = y - self.state.y;
        self.state.x = x;
        self.state.y = y;
        self.state
    }

    /// Latest snapshot without folding in a new position.
    pub fn state(&self) -> CursorState {
        self.state
    }
}

/// A raw backend event translated into a typed payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranslatedEvent {
    /// Keyboard payload.
    Keyboard(KeyboardEvent),
    /// Mouse payload.
    Mouse(MouseEvent),
    /// Window payload.
    Window(WindowEvent),
}

/// Translate one raw GLFW event into a typed payload.
///
/// Returns `None` for events the platform does not report: unmapped keys,
/// key repeats, extra mouse buttons, and window events other than
/// framebuffer resizes and close requests.
pub fn translate_event(
    event: &glfw::WindowEvent,
    window_size: (u32, u32),
    cursor: &mut CursorTracker,
) -> Option<TranslatedEvent> {
    match *event {
        glfw::WindowEvent::Key(key, _scancode, action, _mods) => {
            let key = translate_key(key)?;
            let action = match action {
                glfw::Action::Press => KeyAction::Press,
                glfw::Action::Release => KeyAction::Release,
                glfw::Action::Repeat => return None,
            };
            Some(TranslatedEvent::Keyboard(KeyboardEvent { key, action }))
        }
        glfw::WindowEvent::CursorPos(x, y) => {
            let cursor = cursor.update(x, y, window_size);
            Some(TranslatedEvent::Mouse(MouseEvent {
                action: MouseAction::Move,
                cursor,
            }))
        }
        glfw::WindowEvent::MouseButton(button, action, _mods) => {
            let button = translate_mouse_button(button)?;
            let action = match action {
                glfw::Action::Press => MouseAction::ButtonPress(button),
                glfw::Action::Release => MouseAction::ButtonRelease(button),
                glfw::Action::Repeat => return None,
            };
            Some(TranslatedEvent::Mouse(MouseEvent {
                action,
                cursor: cursor.state(),
            }))
        }
        glfw::WindowEvent::Scroll(_x_offset, y_offset) => Some(TranslatedEvent::Mouse(MouseEvent {
            action: MouseAction::Scroll {
                delta_y: y_offset,
            },
            cursor: cursor.state(),
        })),
        glfw::WindowEvent::FramebufferSize(width, height) => Some(TranslatedEvent::Window(
            WindowEvent::FramebufferResized(FramebufferSize {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            }),
        )),
        glfw::WindowEvent::Close => Some(TranslatedEvent::Window(WindowEvent::CloseRequested)),
        _ => None,
    }
}

fn translate_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Option<Key> {
    match key {
        glfw::Key::Num0 => Some(Key::Num0),
        glfw::Key::Num1 => Some(Key::Num1),
        glfw::Key::Num2 => Some(Key::Num2),
        glfw::Key::Num3 => Some(Key::Num3),
        glfw::Key::Num4 => Some(Key::Num4),
        glfw::Key::Num5 => Some(Key::Num5),
        glfw::Key::Num6 => Some(Key::Num6),
        glfw::Key::Num7 => Some(Key::Num7),
        glfw::Key::Num8 => Some(Key::Num8),
        glfw::Key::Num9 => Some(Key::Num9),
        glfw::Key::A => Some(Key::A),
        glfw::Key::B => Some(Key::B),
        glfw::Key::C => Some(Key::C),
        glfw::Key::D => Some(Key::D),
        glfw::Key::E => Some(Key::E),
        glfw::Key::F => Some(Key::F),
        glfw::Key::G => Some(Key::G),
        glfw::Key::H => Some(Key::H),
        glfw::Key::I => Some(Key::I),
        glfw::Key::J => Some(Key::J),
        glfw::Key::K => Some(Key::K),
        glfw::Key::L => Some(Key::L),
        glfw::Key::M => Some(Key::M),
        glfw::Key::N => Some(Key::N),
        glfw::Key::O => Some(Key::O),
        glfw::Key::P => Some(Key::P),
        glfw::Key::Q => Some(Key::Q),
        glfw::Key::R => Some(Key::R),
        glfw::Key::S => Some(Key::S),
        glfw::Key::T => Some(Key::T),
        glfw::Key::U => Some(Key::U),
        glfw::Key::V => Some(Key::V),
        glfw::Key::W => Some(Key::W),
        glfw::Key::X => Some(Key::X),
        glfw::Key::Y => Some(Key::Y),
        glfw::Key::Z => Some(Key::Z),
        glfw::Key::Up => Some(Key::UpArrow),
        glfw::Key::Down => Some(Key::DownArrow),
        glfw::Key::Left => Some(Key::LeftArrow),
        glfw::Key::Right => Some(Key::RightArrow),
        glfw::Key::LeftShift => Some(Key::LeftShift),
        glfw::Key::RightShift => Some(Key::RightShift),
        glfw::Key::Space => Some(Key::Space),
        glfw::Key::PageUp => Some(Key::PageUp),
        glfw::Key::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: (u32, u32) = (800, 600);

    #[test]
    fn key_press_translates() {
        let mut cursor = CursorTracker::default();
        let event = glfw::WindowEvent::Key(
            glfw::Key::W,
            0,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );

        assert_eq!(
            translate_event(&event, SIZE, &mut cursor),
            Some(TranslatedEvent::Keyboard(KeyboardEvent {
                key: Key::W,
                action: KeyAction::Press,
            }))
        );
    }

    #[test]
    fn unmapped_key_and_repeat_are_dropped() {
        let mut cursor = CursorTracker::default();

        let unmapped = glfw::WindowEvent::Key(
            glfw::Key::Escape,
            0,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );
        assert_eq!(translate_event(&unmapped, SIZE, &mut cursor), None);

        let repeat = glfw::WindowEvent::Key(
            glfw::Key::W,
            0,
            glfw::Action::Repeat,
            glfw::Modifiers::empty(),
        );
        assert_eq!(translate_event(&repeat, SIZE, &mut cursor), None);
    }

    #[test]
    fn first_cursor_move_has_zero_delta() {
        let mut tracker = CursorTracker::default();
        let state = tracker.update(400.0, 300.0, SIZE);

        assert_eq!(state.x, 0.5);
        assert_eq!(state.y, 0.5);
        assert_eq!(state.dx, 0.0);
        assert_eq!(state.dy, 0.0);
    }

    #[test]
    fn cursor_deltas_accumulate_bottom_up() {
        let mut tracker = CursorTracker::default();
        tracker.update(400.0, 300.0, SIZE);
        // Move right and down in window coordinates.
        let state = tracker.update(480.0, 360.0, SIZE);

        assert!((state.dx - 0.1).abs() < 1e-9);
        // Down in window coordinates is negative in the bottom-up frame.
        assert!((state.dy + 0.1).abs() < 1e-9);
        assert!((state.x - 0.6).abs() < 1e-9);
        assert!((state.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn mouse_button_carries_cursor_snapshot() {
        let mut cursor = CursorTracker::default();
        let move_event = glfw::WindowEvent::CursorPos(400.0, 300.0);
        translate_event(&move_event, SIZE, &mut cursor);

        let press = glfw::WindowEvent::MouseButton(
            glfw::MouseButton::Button1,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );
        let Some(TranslatedEvent::Mouse(event)) = translate_event(&press, SIZE, &mut cursor)
        else {
            panic!("expected a mouse event");
        };

        assert_eq!(event.action, MouseAction::ButtonPress(MouseButton::Left));
        assert_eq!(event.cursor.x, 0.5);
        assert_eq!(event.cursor.y, 0.5);
    }

    #[test]
    fn extra_mouse_buttons_are_dropped() {
        let mut cursor = CursorTracker::default();
        let press = glfw::WindowEvent::MouseButton(
            glfw::MouseButton::Button4,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );
        assert_eq!(translate_event(&press, SIZE, &mut cursor), None);
    }

    #[test]
    fn scroll_translates_vertical_offset() {
        let mut cursor = CursorTracker::default();
        let scroll = glfw::WindowEvent::Scroll(1.0, -2.0);

        let Some(TranslatedEvent::Mouse(event)) = translate_event(&scroll, SIZE, &mut cursor)
        else {
            panic!("expected a mouse event");
        };
        assert_eq!(event.action, MouseAction::Scroll { delta_y: -2.0 });
    }

    #[test]
    fn framebuffer_resize_translates() {
        let mut cursor = CursorTracker::default();
        let resize = glfw::WindowEvent::FramebufferSize(1024, 768);

        assert_eq!(
            translate_event(&resize, SIZE, &mut cursor),
            Some(TranslatedEvent::Window(WindowEvent::FramebufferResized(
                FramebufferSize {
                    width: 1024,
                    height: 768,
                }
            )))
        );
    }

    #[test]
    fn close_request_translates() {
        let mut cursor = CursorTracker::default();

        assert_eq!(
            translate_event(&glfw::WindowEvent::Close, SIZE, &mut cursor),
            Some(TranslatedEvent::Window(WindowEvent::CloseRequested))
        );
    }
}
