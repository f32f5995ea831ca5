//! Synchronization primitives with RAII cleanup

use ash::{vk, Device};

use crate::render::vulkan::context::{VulkanError, VulkanResult};

/// A binary semaphore, destroyed on drop.
pub struct Semaphore {
    device: Device,
    semaphore: vk::Semaphore,
}

impl Semaphore {
    /// Create an unsignaled semaphore.
    pub fn new(device: &Device) -> VulkanResult<Self> {
        let create_info = vk::SemaphoreCreateInfo::builder();
        let semaphore = unsafe { device.create_semaphore(&create_info, None) }
            .map_err(VulkanError::Api)?;
        Ok(Self {
            device: device.clone(),
            semaphore,
        })
    }

    /// The raw handle.
    pub fn handle(&self) -> vk::Semaphore {
        self.semaphore
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.semaphore, None);
        }
    }
}

/// The semaphore pair for one frame: `acquire` signals that the swap-chain
/// image is ready to render into, `release` that rendering has finished and
/// the image may be presented.
///
/// A fresh pair is created per frame and dropped once the frame's work has
/// drained, so no cross-frame semaphore state exists.
pub struct FrameSync {
    /// Signaled by image acquisition, waited on by the submit.
    pub acquire: Semaphore,
    /// Signaled by the submit, waited on by presentation.
    pub release: Semaphore,
}

impl FrameSync {
    /// Create both semaphores for one frame.
    pub fn new(device: &Device) -> VulkanResult<Self> {
        Ok(Self {
            acquire: Semaphore::new(device)?,
            release: Semaphore::new(device)?,
        })
    }
}
