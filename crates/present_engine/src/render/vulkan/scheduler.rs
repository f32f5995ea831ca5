//! Frame scheduling
//!
//! [`FrameScheduler`] owns the per-frame cycle: poll and broadcast input,
//! advance the frame clock, acquire a swap-chain image, record and submit
//! the frame's commands, broadcast the display refresh, present, and drain
//! the device. One frame is in flight at a time; each frame gets a fresh
//! semaphore pair that is destroyed once the frame's work has drained.

use ash::{vk, Device};

use crate::platform::event::{DisplayRefreshEvent, FramebufferSize};
use crate::platform::listener::{ListenerHandle, ListenerRegistry};
use crate::platform::window::{translate_event, CursorTracker, TranslatedEvent, Window};
use crate::render::vulkan::commands::CommandPool;
use crate::render::vulkan::context::{GraphicsSystem, VulkanError, VulkanResult};
use crate::render::vulkan::swapchain::SwapImage;
use crate::render::vulkan::sync::FrameSync;

/// Delta time substituted when the frame clock reports no forward progress.
pub const STALLED_CLOCK_DELTA: f64 = 0.01;

/// Records one frame's commands into an already-begun command buffer.
///
/// The scheduler begins and ends the buffer; implementations only record
/// the work that produces the frame's content.
pub trait FrameRecorder {
    /// Record commands targeting the acquired swap-chain image.
    fn record(&mut self, device: &Device, cmd: vk::CommandBuffer, target: &SwapImage, extent: vk::Extent2D);
}

/// The default recorder: clears the whole image to a solid color.
pub struct ClearRecorder {
    /// RGBA clear color.
    pub color: [f32; 4],
}

impl Default for ClearRecorder {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl FrameRecorder for ClearRecorder {
    fn record(
        &mut self,
        device: &Device,
        cmd: vk::CommandBuffer,
        target: &SwapImage,
        _extent: vk::Extent2D,
    ) {
        let clear = vk::ClearColorValue {
            float32: self.color,
        };
        let range = vk::ImageSubresourceRange {
            aspect_mask: vk::ImageAspectFlags::COLOR,
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: 1,
        };
        unsafe {
            device.cmd_clear_color_image(
                cmd,
                target.image,
                vk::ImageLayout::GENERAL,
                &clear,
                &[range],
            );
        }
    }
}

/// Runs the frame loop against a negotiated [`GraphicsSystem`].
///
/// Teardown is field drop order: the command pool is declared before the
/// system so it is destroyed before the device it was allocated from.
pub struct FrameScheduler {
    command_pool: CommandPool,
    system: GraphicsSystem,
    recorder: Box<dyn FrameRecorder>,
    listeners: ListenerRegistry,
    cursor: CursorTracker,
    last_time: f64,
}

impl FrameScheduler {
    /// Wrap a negotiated system. Commands are recorded on the graphics
    /// queue family; the default recorder clears to black.
    pub fn new(system: GraphicsSystem) -> VulkanResult<Self> {
        let command_pool = CommandPool::new(system.device(), system.graphics_family())?;
        Ok(Self {
            command_pool,
            system,
            recorder: Box::new(ClearRecorder::default()),
            listeners: ListenerRegistry::new(),
            cursor: CursorTracker::default(),
            last_time: 0.0,
        })
    }

    /// Replace the frame recorder.
    pub fn set_recorder(&mut self, recorder: Box<dyn FrameRecorder>) {
        self.recorder = recorder;
    }

    /// Register a listener for input and display-refresh events.
    pub fn add_listener(&mut self, listener: ListenerHandle) {
        self.listeners.add(listener);
    }

    /// The negotiated system the scheduler drives.
    pub fn system(&self) -> &GraphicsSystem {
        &self.system
    }

    /// Run the frame loop until the window is asked to close.
    pub fn run(&mut self, window: &mut Window) -> VulkanResult<()> {
        self.last_time = window.time();
        log::info!("entering frame loop");

        while !window.should_close() {
            self.dispatch_window_events(window);

            let now = window.time();
            let delta_time = frame_delta(self.last_time, now);
            self.last_time = now;

            self.render_frame(window, delta_time, now)?;
        }

        log::info!("frame loop exited");
        Ok(())
    }

    /// Poll the backend, translate each raw event, and broadcast the typed
    /// payloads in arrival order.
    fn dispatch_window_events(&mut self, window: &mut Window) {
        window.poll_events();
        let window_size = window.get_size();
        for (_time, event) in window.flush_events() {
            match translate_event(&event, window_size, &mut self.cursor) {
                Some(TranslatedEvent::Keyboard(payload)) => self.listeners.emit_keyboard(payload),
                Some(TranslatedEvent::Mouse(payload)) => self.listeners.emit_mouse(payload),
                Some(TranslatedEvent::Window(payload)) => self.listeners.emit_window(payload),
                None => {}
            }
        }
    }

    /// One full frame: acquire, record, submit, broadcast refresh, present,
    /// drain.
    fn render_frame(&mut self, window: &Window, delta_time: f64, time: f64) -> VulkanResult<()> {
        let device = self.system.device().clone();
        let sync = FrameSync::new(&device)?;

        let (image_index, _suboptimal) = unsafe {
            self.system.swapchain_loader().acquire_next_image(
                self.system.swapchain(),
                u64::MAX,
                sync.acquire.handle(),
                vk::Fence::null(),
            )
        }
        .map_err(VulkanError::Api)?;
        assert!(
            (image_index as usize) < self.system.images().len(),
            "acquired image index {image_index} out of range"
        );
        let target = self.system.images()[image_index as usize];

        self.command_pool.reset()?;
        let cmd = self.command_pool.buffer();
        let begin_info = vk::CommandBufferBeginInfo::builder()
            .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
        unsafe { device.begin_command_buffer(cmd, &begin_info) }.map_err(VulkanError::Api)?;

        self.recorder
            .record(&device, cmd, &target, self.system.extent());

        unsafe { device.end_command_buffer(cmd) }.map_err(VulkanError::Api)?;

        let wait_semaphores = [sync.acquire.handle()];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = [cmd];
        let signal_semaphores = [sync.release.handle()];
        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);

        unsafe {
            device.queue_submit(
                self.system.graphics_queue(),
                &[submit_info.build()],
                vk::Fence::null(),
            )
        }
        .map_err(VulkanError::Api)?;

        // Submitted but not yet presented: listeners observe frame timing
        // here.
        let (width, height) = window.get_framebuffer_size();
        self.listeners.emit_display_refresh(DisplayRefreshEvent {
            delta_time,
            time,
            framebuffer: FramebufferSize { width, height },
        });

        let swapchains = [self.system.swapchain()];
        let image_indices = [image_index];
        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(&signal_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        unsafe {
            self.system
                .swapchain_loader()
                .queue_present(self.system.present_queue(), &present_info)
        }
        .map_err(VulkanError::Api)?;

        // Drain before the frame's semaphores drop; one frame in flight.
        unsafe { device.device_wait_idle() }.map_err(VulkanError::Api)?;
        Ok(())
    }
}

/// Seconds advanced since the previous frame, with a fixed fallback when the
/// clock did not move forward.
pub(crate) fn frame_delta(last: f64, now: f64) -> f64 {
    let delta = now - last;
    if delta > 0.0 {
        delta
    } else {
        STALLED_CLOCK_DELTA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_delta_tracks_clock_advance() {
        let delta = frame_delta(1.0, 1.25);
        assert!((delta - 0.25).abs() < 1e-12);
    }

    #[test]
    fn stalled_clock_falls_back_to_fixed_delta() {
        assert_eq!(frame_delta(2.0, 2.0), STALLED_CLOCK_DELTA);
    }

    #[test]
    fn backwards_clock_falls_back_to_fixed_delta() {
        assert_eq!(frame_delta(5.0, 4.0), STALLED_CLOCK_DELTA);
    }
}
