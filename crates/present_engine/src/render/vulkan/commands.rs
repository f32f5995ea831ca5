//! Command pool and buffer management

use ash::{vk, Device};

use crate::render::vulkan::context::{VulkanError, VulkanResult};

/// A command pool with a single primary command buffer, recycled every frame.
pub struct CommandPool {
    device: Device,
    pool: vk::CommandPool,
    buffer: vk::CommandBuffer,
}

impl CommandPool {
    /// Create the pool on the given queue family and allocate its buffer.
    pub fn new(device: &Device, queue_family: u32) -> VulkanResult<Self> {
        let pool_info = vk::CommandPoolCreateInfo::builder()
            .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER)
            .queue_family_index(queue_family);
        let pool = unsafe { device.create_command_pool(&pool_info, None) }
            .map_err(VulkanError::Api)?;

        let alloc_info = vk::CommandBufferAllocateInfo::builder()
            .command_pool(pool)
            .level(vk::CommandBufferLevel::PRIMARY)
            .command_buffer_count(1);
        let buffer = match unsafe { device.allocate_command_buffers(&alloc_info) } {
            Ok(buffers) => buffers[0],
            Err(err) => {
                unsafe { device.destroy_command_pool(pool, None) };
                return Err(VulkanError::Api(err));
            }
        };

        Ok(Self {
            device: device.clone(),
            pool,
            buffer,
        })
    }

    /// The primary command buffer.
    pub fn buffer(&self) -> vk::CommandBuffer {
        self.buffer
    }

    /// Reset the pool, releasing its resources back to the driver. The
    /// buffer must not be pending execution.
    pub fn reset(&self) -> VulkanResult<()> {
        unsafe {
            self.device
                .reset_command_pool(self.pool, vk::CommandPoolResetFlags::RELEASE_RESOURCES)
        }
        .map_err(VulkanError::Api)
    }
}

impl Drop for CommandPool {
    fn drop(&mut self) {
        unsafe {
            // Frees the allocated buffer as well.
            self.device.destroy_command_pool(self.pool, None);
        }
    }
}
