//! Rendering backends. Vulkan is the only backend.

pub mod vulkan;
