//! Clear-screen demo
//!
//! Negotiates a full presentation stack, then runs the frame loop with the
//! default clear recorder. Key presses are logged through a listener to show
//! the event plumbing end to end.

use std::cell::RefCell;
use std::rc::Rc;

use present_engine::render::vulkan::{ClearRecorder, CreatedSurface, FrameScheduler, GraphicsSystem};
use present_engine::{AppConfig, Config, KeyAction, KeyboardEvent, PlatformListener, Window};

/// Logs every key transition it observes.
struct KeyLogger;

impl PlatformListener for KeyLogger {
    fn keyboard_event(&mut self, event: KeyboardEvent) {
        let verb = match event.action {
            KeyAction::Press => "pressed",
            KeyAction::Release => "released",
        };
        log::info!("{:?} {verb}", event.key);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    present_engine::foundation::logging::init();

    let config = AppConfig::load_or_default("clear_app.toml");
    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;

    let layers = config.renderer.validation_layers();
    let instance_extensions = window.required_instance_extensions()?;

    let system = GraphicsSystem::negotiate(
        |instance, _physical_device| {
            let surface = window.create_surface(instance.handle())?;
            let (width, height) = window.get_framebuffer_size();
            Ok(CreatedSurface {
                surface,
                initial_extent: ash::vk::Extent2D { width, height },
            })
        },
        &layers,
        &instance_extensions,
        &[],
    )?;

    let mut scheduler = FrameScheduler::new(system)?;
    scheduler.set_recorder(Box::new(ClearRecorder {
        color: config.renderer.clear_color,
    }));
    scheduler.add_listener(Rc::new(RefCell::new(KeyLogger)));

    scheduler.run(&mut window)?;
    Ok(())
}
