//! # Present Engine
//!
//! Vulkan presentation bootstrap: capability negotiation, swap-chain setup,
//! and a frame loop with typed platform events.
//!
//! The crate does three things:
//!
//! - **Negotiation**: [`GraphicsSystem::negotiate`] builds the full stack
//!   from instance to swap-chain image views, failing fast with a specific
//!   error the moment a requirement cannot be met.
//! - **Frame scheduling**: [`FrameScheduler`] runs the per-frame cycle
//!   (poll, acquire, record, submit, present) against a negotiated system,
//!   with a pluggable [`FrameRecorder`] for the frame's content.
//! - **Platform events**: raw windowing-backend events are translated into
//!   typed payloads and broadcast to registered [`PlatformListener`]s in
//!   registration order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use present_engine::platform::Window;
//! use present_engine::render::vulkan::{CreatedSurface, FrameScheduler, GraphicsSystem};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut window = Window::new("demo", 800, 600)?;
//!     let extensions = window.required_instance_extensions()?;
//!
//!     let system = GraphicsSystem::negotiate(
//!         |instance, _physical_device| {
//!             let surface = window.create_surface(instance.handle())?;
//!             let (width, height) = window.get_framebuffer_size();
//!             Ok(CreatedSurface {
//!                 surface,
//!                 initial_extent: ash::vk::Extent2D { width, height },
//!             })
//!         },
//!         &[],
//!         &extensions,
//!         &[],
//!     )?;
//!
//!     let mut scheduler = FrameScheduler::new(system)?;
//!     scheduler.run(&mut window)?;
//!     Ok(())
//! }
//! ```
//!
//! [`GraphicsSystem::negotiate`]: render::vulkan::GraphicsSystem::negotiate
//! [`FrameScheduler`]: render::vulkan::FrameScheduler
//! [`FrameRecorder`]: render::vulkan::FrameRecorder
//! [`PlatformListener`]: platform::PlatformListener

#![warn(missing_docs)]

pub mod config;
pub mod foundation;
pub mod platform;
pub mod render;

pub use config::{AppConfig, Config, ConfigError, RendererConfig, WindowConfig};
pub use platform::{
    CursorState, DisplayRefreshEvent, FramebufferSize, Key, KeyAction, KeyboardEvent,
    ListenerHandle, ListenerRegistry, MouseAction, MouseButton, MouseEvent, PlatformListener,
    Window, WindowError, WindowEvent,
};
pub use render::vulkan::{
    ClearRecorder, CreatedSurface, FrameRecorder, FrameScheduler, GraphicsSystem, SwapImage,
    VulkanError, VulkanResult, MAX_SWAPCHAIN_IMAGES,
};
