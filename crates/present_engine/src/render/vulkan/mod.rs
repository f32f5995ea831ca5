//! Vulkan backend: negotiation, swap chain, synchronization, commands, and
//! the frame scheduler.

/// Command pool and buffer management.
pub mod commands;
/// Capability negotiation and the negotiated system.
pub mod context;
/// Frame scheduling and recorders.
pub mod scheduler;
/// Swap-chain rules and construction.
pub mod swapchain;
/// Synchronization primitives.
pub mod sync;

pub use commands::CommandPool;
pub use context::{CreatedSurface, GraphicsSystem, VulkanError, VulkanResult};
pub use scheduler::{ClearRecorder, FrameRecorder, FrameScheduler, STALLED_CLOCK_DELTA};
pub use swapchain::{SwapImage, MAX_SWAPCHAIN_IMAGES};
pub use sync::{FrameSync, Semaphore};
