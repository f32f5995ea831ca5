//! Vulkan capability negotiation
//!
//! Builds a [`GraphicsSystem`]: one instance, one logical device (discrete
//! GPU preferred), one graphics/compute/presentation queue each (possibly
//! coinciding), a presentation surface supplied by the caller, and a swap
//! chain with color-target views for every image.
//!
//! Negotiation is one-shot and fail-fast: each requirement is checked in
//! order and the first unmet one aborts with a specific [`VulkanError`]. No
//! partially built system is ever returned; callers that want to retry with
//! different extensions or layers restart negotiation from scratch.

use std::collections::BTreeSet;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use ash::extensions::khr::{Surface as SurfaceLoader, Swapchain as SwapchainLoader};
use ash::{vk, Device, Entry, Instance};
use thiserror::Error;

use crate::render::vulkan::swapchain::{self, SwapImage, MAX_SWAPCHAIN_IMAGES};

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum VulkanError {
    /// A backend call that was expected to succeed failed.
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),

    /// The Vulkan loader itself could not be initialized.
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// A requested instance extension or explicit layer is not available.
    #[error("requested instance capability \"{name}\" is not available")]
    MissingInstanceCapability {
        /// The extension or layer name that was not enumerated.
        name: String,
    },

    /// A requested device extension is not available on the selected device.
    #[error("requested device extension \"{name}\" is not available")]
    MissingDeviceCapability {
        /// The extension name that was not enumerated.
        name: String,
    },

    /// The instance enumerated no physical devices at all.
    #[error("no Vulkan physical device found")]
    NoPhysicalDevice,

    /// The caller-supplied surface factory reported failure.
    #[error("surface creation failed: {0:?}")]
    SurfaceCreationFailed(vk::Result),

    /// The created surface does not meet a baseline requirement.
    #[error("surface does not meet requirements: {0}")]
    UnsupportedSurface(String),

    /// The surface does not expose the required format/color-space pair.
    #[error("surface does not support the required image format and color space")]
    UnsupportedSurfaceFormat,

    /// The selected device has no graphics-capable queue family.
    #[error("selected device has no graphics-capable queue family")]
    NoGraphicsQueue,

    /// The selected device has no compute-capable queue family.
    #[error("selected device has no compute-capable queue family")]
    NoComputeQueue,

    /// No queue family on the selected device can present to the surface.
    #[error("selected device has no presentation-capable queue family")]
    NoPresentationQueue,

    /// The swap chain handed back more images than the negotiated cap. This
    /// is a driver contract breach, not a caller error.
    #[error("swap chain returned {count} images, more than the supported maximum")]
    SwapchainImageOverflow {
        /// Number of images the swap chain reported.
        count: u32,
    },
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;

/// Output of a caller-supplied surface factory: the surface itself plus the
/// window's framebuffer size at creation time, which becomes the swap-chain
/// extent.
pub struct CreatedSurface {
    /// The presentation surface.
    pub surface: vk::SurfaceKHR,
    /// Framebuffer size in pixels at surface creation.
    pub initial_extent: vk::Extent2D,
}

/// Everything negotiation produces, owned as one unit.
///
/// Created once, handed to the frame scheduler for its lifetime, torn down
/// in reverse creation order on drop (after a device-idle wait).
pub struct GraphicsSystem {
    // Field order matters only for readers; Drop tears down explicitly.
    #[allow(dead_code)] // keeps the loader library alive for `instance`
    entry: Entry,
    instance: Instance,
    physical_device: vk::PhysicalDevice,
    device: Device,
    surface_loader: SurfaceLoader,
    swapchain_loader: SwapchainLoader,
    surface: vk::SurfaceKHR,
    swapchain: vk::SwapchainKHR,
    surface_format: vk::SurfaceFormatKHR,
    extent: vk::Extent2D,
    graphics_family: u32,
    compute_family: u32,
    present_family: u32,
    graphics_queue: vk::Queue,
    compute_queue: vk::Queue,
    present_queue: vk::Queue,
    images: Vec<SwapImage>,
}

/// Device-level negotiation products, separated so instance cleanup on
/// failure stays in one place.
struct NegotiatedParts {
    physical_device: vk::PhysicalDevice,
    device: Device,
    surface_loader: SurfaceLoader,
    swapchain_loader: SwapchainLoader,
    surface: vk::SurfaceKHR,
    swapchain: vk::SwapchainKHR,
    surface_format: vk::SurfaceFormatKHR,
    extent: vk::Extent2D,
    graphics_family: u32,
    compute_family: u32,
    present_family: u32,
    graphics_queue: vk::Queue,
    compute_queue: vk::Queue,
    present_queue: vk::Queue,
    images: Vec<SwapImage>,
}

impl GraphicsSystem {
    /// Negotiate a full presentation stack.
    ///
    /// `create_surface` is the seam to the windowing backend: given the
    /// instance and the selected physical device it must produce a surface
    /// and the window's current framebuffer pixel size. The extra layer and
    /// extension lists are merged (set union) with the fixed required set:
    /// `VK_KHR_surface` at the instance level and `VK_KHR_swapchain` at the
    /// device level.
    pub fn negotiate<F>(
        create_surface: F,
        extra_layers: &[String],
        extra_instance_extensions: &[String],
        extra_device_extensions: &[String],
    ) -> VulkanResult<Self>
    where
        F: FnOnce(&Instance, vk::PhysicalDevice) -> Result<CreatedSurface, vk::Result>,
    {
        let layers = merge_names(&[], extra_layers);
        let instance_extensions = merge_names(&[SurfaceLoader::name()], extra_instance_extensions);
        let device_extensions = merge_names(&[SwapchainLoader::name()], extra_device_extensions);

        let entry = unsafe { Entry::load() }
            .map_err(|e| VulkanError::InitializationFailed(format!("failed to load Vulkan: {e}")))?;

        let instance = Self::create_instance(&entry, &layers, &instance_extensions)?;

        match Self::negotiate_devices(&entry, &instance, create_surface, &device_extensions) {
            Ok(parts) => Ok(Self {
                entry,
                instance,
                physical_device: parts.physical_device,
                device: parts.device,
                surface_loader: parts.surface_loader,
                swapchain_loader: parts.swapchain_loader,
                surface: parts.surface,
                swapchain: parts.swapchain,
                surface_format: parts.surface_format,
                extent: parts.extent,
                graphics_family: parts.graphics_family,
                compute_family: parts.compute_family,
                present_family: parts.present_family,
                graphics_queue: parts.graphics_queue,
                compute_queue: parts.compute_queue,
                present_queue: parts.present_queue,
                images: parts.images,
            }),
            Err(err) => {
                unsafe { instance.destroy_instance(None) };
                Err(err)
            }
        }
    }

    /// Validate instance-level capabilities and create the instance.
    fn create_instance(
        entry: &Entry,
        layers: &[String],
        instance_extensions: &[String],
    ) -> VulkanResult<Instance> {
        let extension_props = entry
            .enumerate_instance_extension_properties(None)
            .map_err(VulkanError::Api)?;
        let available_extensions: Vec<String> = extension_props
            .iter()
            .map(|p| vk_name_to_string(&p.extension_name))
            .collect();

        if let Some(name) = first_missing(instance_extensions, &available_extensions) {
            return Err(VulkanError::MissingInstanceCapability { name: name.into() });
        }

        let layer_props = entry
            .enumerate_instance_layer_properties()
            .map_err(VulkanError::Api)?;
        let available_layers: Vec<String> = layer_props
            .iter()
            .map(|p| vk_name_to_string(&p.layer_name))
            .collect();

        if let Some(name) = first_missing(layers, &available_layers) {
            return Err(VulkanError::MissingInstanceCapability { name: name.into() });
        }

        log::info!(
            "{} instance extensions and {} layers available",
            available_extensions.len(),
            available_layers.len()
        );
        for name in &available_layers {
            log::debug!("available layer: {name}");
        }
        log::info!("using explicit layers: {layers:?}");
        log::info!("using instance extensions: {instance_extensions:?}");

        let app_info = vk::ApplicationInfo::builder().api_version(vk::API_VERSION_1_2);

        let layer_cstrs = to_cstrings(layers);
        let layer_ptrs: Vec<*const c_char> = layer_cstrs.iter().map(|n| n.as_ptr()).collect();
        let extension_cstrs = to_cstrings(instance_extensions);
        let extension_ptrs: Vec<*const c_char> =
            extension_cstrs.iter().map(|n| n.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_layer_names(&layer_ptrs)
            .enabled_extension_names(&extension_ptrs);

        unsafe { entry.create_instance(&create_info, None) }.map_err(VulkanError::Api)
    }

    /// Everything past instance creation: device selection, surface, queue
    /// families, logical device, swap chain, images and views.
    fn negotiate_devices<F>(
        entry: &Entry,
        instance: &Instance,
        create_surface: F,
        device_extensions: &[String],
    ) -> VulkanResult<NegotiatedParts>
    where
        F: FnOnce(&Instance, vk::PhysicalDevice) -> Result<CreatedSurface, vk::Result>,
    {
        let mut cleanup = PartialCleanup::armed();

        // Physical device: prefer the first discrete GPU, else the first
        // device enumerated.
        let physical_devices =
            unsafe { instance.enumerate_physical_devices() }.map_err(VulkanError::Api)?;
        let device_types: Vec<vk::PhysicalDeviceType> = physical_devices
            .iter()
            .map(|&pd| unsafe { instance.get_physical_device_properties(pd) }.device_type)
            .collect();
        let selected_index =
            pick_physical_device(&device_types).ok_or(VulkanError::NoPhysicalDevice)?;
        let physical_device = physical_devices[selected_index];

        log::info!("{} physical devices:", physical_devices.len());
        for (i, &pd) in physical_devices.iter().enumerate() {
            let properties = unsafe { instance.get_physical_device_properties(pd) };
            log::info!(
                "    {}{} ({:?})",
                if i == selected_index { "(selected) " } else { "" },
                vk_name_to_string(&properties.device_name),
                properties.device_type,
            );
        }

        // Surface from the caller-supplied factory, then baseline checks.
        let surface_loader = SurfaceLoader::new(entry, instance);
        let created = create_surface(instance, physical_device)
            .map_err(VulkanError::SurfaceCreationFailed)?;
        let surface = created.surface;
        let initial_extent = created.initial_extent;
        cleanup.surface_loader = Some(surface_loader.clone());
        cleanup.surface = surface;

        let capabilities = unsafe {
            surface_loader.get_physical_device_surface_capabilities(physical_device, surface)
        }
        .map_err(VulkanError::Api)?;

        if !swapchain::extent_supported(initial_extent, &capabilities) {
            return Err(VulkanError::UnsupportedSurface(format!(
                "initial framebuffer size {}x{} is outside the supported extent range",
                initial_extent.width, initial_extent.height
            )));
        }

        let formats = unsafe {
            surface_loader.get_physical_device_surface_formats(physical_device, surface)
        }
        .map_err(VulkanError::Api)?;
        if formats.is_empty() {
            return Err(VulkanError::UnsupportedSurface(
                "surface exposes no image formats".into(),
            ));
        }

        let present_modes = unsafe {
            surface_loader.get_physical_device_surface_present_modes(physical_device, surface)
        }
        .map_err(VulkanError::Api)?;
        if present_modes.is_empty() {
            return Err(VulkanError::UnsupportedSurface(
                "surface exposes no present modes".into(),
            ));
        }

        // Device extensions.
        let device_extension_props = unsafe {
            instance.enumerate_device_extension_properties(physical_device)
        }
        .map_err(VulkanError::Api)?;
        let available_device_extensions: Vec<String> = device_extension_props
            .iter()
            .map(|p| vk_name_to_string(&p.extension_name))
            .collect();
        log::info!(
            "{} device extensions available",
            available_device_extensions.len()
        );

        if let Some(name) = first_missing(device_extensions, &available_device_extensions) {
            return Err(VulkanError::MissingDeviceCapability { name: name.into() });
        }

        // Queue families: first graphics-capable, first compute-capable,
        // and any presentation-capable family (last match wins).
        let family_props =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) };
        let mut present_support = Vec::with_capacity(family_props.len());
        for i in 0..family_props.len() as u32 {
            let supported = unsafe {
                surface_loader.get_physical_device_surface_support(physical_device, i, surface)
            }
            .map_err(VulkanError::Api)?;
            present_support.push(supported);
        }
        for (i, family) in family_props.iter().enumerate() {
            log::debug!(
                "queue family {i}: {:?} x{} (present: {})",
                family.queue_flags,
                family.queue_count,
                present_support[i],
            );
        }

        let flags: Vec<vk::QueueFlags> = family_props.iter().map(|f| f.queue_flags).collect();
        let selection = pick_queue_families(&flags, &present_support);
        let graphics_family = selection.graphics.ok_or(VulkanError::NoGraphicsQueue)?;
        let compute_family = selection.compute.ok_or(VulkanError::NoComputeQueue)?;
        let present_family = selection.present.ok_or(VulkanError::NoPresentationQueue)?;

        // Logical device: one queue per distinct family, priority 1.0.
        let unique_families: BTreeSet<u32> = [graphics_family, compute_family, present_family]
            .into_iter()
            .collect();
        let priorities = [1.0_f32];
        let queue_infos: Vec<vk::DeviceQueueCreateInfo> = unique_families
            .iter()
            .map(|&family| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(family)
                    .queue_priorities(&priorities)
                    .build()
            })
            .collect();

        let device_extension_cstrs = to_cstrings(device_extensions);
        let device_extension_ptrs: Vec<*const c_char> =
            device_extension_cstrs.iter().map(|n| n.as_ptr()).collect();

        let device_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&device_extension_ptrs);

        let device = unsafe { instance.create_device(physical_device, &device_info, None) }
            .map_err(VulkanError::Api)?;
        cleanup.device = Some(device.clone());

        // Required format and color space; FIFO is guaranteed to exist by
        // the Vulkan specification, checked non-empty above.
        if !swapchain::supports_required_format(&formats) {
            return Err(VulkanError::UnsupportedSurfaceFormat);
        }
        let surface_format = vk::SurfaceFormatKHR {
            format: swapchain::REQUIRED_FORMAT,
            color_space: swapchain::REQUIRED_COLOR_SPACE,
        };

        let swapchain_loader = SwapchainLoader::new(instance, &device);
        let image_count = swapchain::negotiated_image_count(
            capabilities.min_image_count,
            capabilities.max_image_count,
        );
        log::info!(
            "swap chain: {image_count} images, {}x{}, {:?}/{:?}",
            initial_extent.width,
            initial_extent.height,
            surface_format.format,
            surface_format.color_space,
        );

        let swapchain = swapchain::create_swapchain(
            &swapchain_loader,
            surface,
            &capabilities,
            initial_extent,
            image_count,
        )?;
        cleanup.swapchain_loader = Some(swapchain_loader.clone());
        cleanup.swapchain = swapchain;

        let raw_images = unsafe { swapchain_loader.get_swapchain_images(swapchain) }
            .map_err(VulkanError::Api)?;
        if raw_images.len() as u32 > MAX_SWAPCHAIN_IMAGES {
            return Err(VulkanError::SwapchainImageOverflow {
                count: raw_images.len() as u32,
            });
        }

        let views = swapchain::create_color_target_views(&device, &raw_images)?;
        let images: Vec<SwapImage> = raw_images
            .into_iter()
            .zip(views)
            .map(|(image, color_view)| SwapImage { image, color_view })
            .collect();

        let graphics_queue = unsafe { device.get_device_queue(graphics_family, 0) };
        let compute_queue = unsafe { device.get_device_queue(compute_family, 0) };
        let present_queue = unsafe { device.get_device_queue(present_family, 0) };

        log::info!(
            "queue families: graphics {graphics_family}, compute {compute_family}, presentation {present_family}"
        );

        cleanup.disarm();
        Ok(NegotiatedParts {
            physical_device,
            device,
            surface_loader,
            swapchain_loader,
            surface,
            swapchain,
            surface_format,
            extent: initial_extent,
            graphics_family,
            compute_family,
            present_family,
            graphics_queue,
            compute_queue,
            present_queue,
            images,
        })
    }

    /// The logical device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The selected physical device.
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// Swap-chain extension loader.
    pub fn swapchain_loader(&self) -> &SwapchainLoader {
        &self.swapchain_loader
    }

    /// The swap chain handle.
    pub fn swapchain(&self) -> vk::SwapchainKHR {
        self.swapchain
    }

    /// Negotiated surface format and color space.
    pub fn surface_format(&self) -> vk::SurfaceFormatKHR {
        self.surface_format
    }

    /// Swap-chain extent in pixels.
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// Graphics-capable queue family index.
    pub fn graphics_family(&self) -> u32 {
        self.graphics_family
    }

    /// Compute-capable queue family index.
    pub fn compute_family(&self) -> u32 {
        self.compute_family
    }

    /// Presentation-capable queue family index.
    pub fn present_family(&self) -> u32 {
        self.present_family
    }

    /// The graphics queue.
    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }

    /// The compute queue.
    pub fn compute_queue(&self) -> vk::Queue {
        self.compute_queue
    }

    /// The presentation queue.
    pub fn present_queue(&self) -> vk::Queue {
        self.present_queue
    }

    /// Swap-chain images with their color-target views, index-aligned with
    /// the indices returned by image acquisition.
    pub fn images(&self) -> &[SwapImage] {
        &self.images
    }
}

impl Drop for GraphicsSystem {
    fn drop(&mut self) {
        unsafe {
            let _ = self.device.device_wait_idle();
            for target in &self.images {
                self.device.destroy_image_view(target.color_view, None);
            }
            self.swapchain_loader.destroy_swapchain(self.swapchain, None);
            self.device.destroy_device(None);
            self.surface_loader.destroy_surface(self.surface, None);
            self.instance.destroy_instance(None);
        }
    }
}

/// Cleans up device-level handles if negotiation aborts partway. Disarmed
/// once ownership transfers to the `GraphicsSystem`.
#[derive(Default)]
struct PartialCleanup {
    armed: bool,
    surface_loader: Option<SurfaceLoader>,
    surface: vk::SurfaceKHR,
    device: Option<Device>,
    swapchain_loader: Option<SwapchainLoader>,
    swapchain: vk::SwapchainKHR,
}

impl PartialCleanup {
    fn armed() -> Self {
        let mut cleanup = Self::default();
        cleanup.armed = true;
        cleanup
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialCleanup {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        unsafe {
            if let Some(device) = self.device.take() {
                let _ = device.device_wait_idle();
                if let Some(loader) = self.swapchain_loader.take() {
                    if self.swapchain != vk::SwapchainKHR::null() {
                        loader.destroy_swapchain(self.swapchain, None);
                    }
                }
                device.destroy_device(None);
            }
            if let Some(loader) = self.surface_loader.take() {
                if self.surface != vk::SurfaceKHR::null() {
                    loader.destroy_surface(self.surface, None);
                }
            }
        }
    }
}

/// Set union of a fixed required name list and caller extras, deduplicated
/// and in deterministic order.
fn merge_names(required: &[&CStr], extra: &[String]) -> Vec<String> {
    let mut names: BTreeSet<String> = required
        .iter()
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.extend(extra.iter().cloned());
    names.into_iter().collect()
}

/// First requested name that does not appear in the available set.
fn first_missing<'a>(requested: &'a [String], available: &[String]) -> Option<&'a str> {
    requested
        .iter()
        .map(String::as_str)
        .find(|name| !available.iter().any(|a| a == name))
}

/// Convert validated names for FFI. Names with interior NULs were already
/// rejected by the availability check (no enumerated name contains one).
fn to_cstrings(names: &[String]) -> Vec<CString> {
    names
        .iter()
        .filter_map(|n| CString::new(n.as_str()).ok())
        .collect()
}

/// Read a NUL-terminated Vulkan name field.
fn vk_name_to_string(raw: &[c_char]) -> String {
    unsafe { CStr::from_ptr(raw.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

/// Index of the device to use: the first discrete GPU, else index 0.
/// `None` only when no devices were enumerated.
fn pick_physical_device(device_types: &[vk::PhysicalDeviceType]) -> Option<usize> {
    if device_types.is_empty() {
        return None;
    }
    device_types
        .iter()
        .position(|&t| t == vk::PhysicalDeviceType::DISCRETE_GPU)
        .or(Some(0))
}

/// Chosen queue family per capability. The selections are independent and
/// may name the same family.
struct QueueFamilySelection {
    graphics: Option<u32>,
    compute: Option<u32>,
    present: Option<u32>,
}

/// Select queue families: first graphics-capable, first compute-capable,
/// and the last presentation-capable family found.
fn pick_queue_families(flags: &[vk::QueueFlags], present_support: &[bool]) -> QueueFamilySelection {
    let mut selection = QueueFamilySelection {
        graphics: None,
        compute: None,
        present: None,
    };
    for (i, &family_flags) in flags.iter().enumerate() {
        let index = i as u32;
        if selection.graphics.is_none() && family_flags.contains(vk::QueueFlags::GRAPHICS) {
            selection.graphics = Some(index);
        }
        if selection.compute.is_none() && family_flags.contains(vk::QueueFlags::COMPUTE) {
            selection.compute = Some(index);
        }
        if present_support.get(i).copied().unwrap_or(false) {
            selection.present = Some(index);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_device_preferred() {
        let types = vec![
            vk::PhysicalDeviceType::INTEGRATED_GPU,
            vk::PhysicalDeviceType::DISCRETE_GPU,
            vk::PhysicalDeviceType::DISCRETE_GPU,
        ];
        // First discrete device wins; a later discrete device does not
        // displace it.
        assert_eq!(pick_physical_device(&types), Some(1));
    }

    #[test]
    fn first_device_when_nothing_discrete() {
        let types = vec![
            vk::PhysicalDeviceType::INTEGRATED_GPU,
            vk::PhysicalDeviceType::VIRTUAL_GPU,
            vk::PhysicalDeviceType::CPU,
        ];
        assert_eq!(pick_physical_device(&types), Some(0));
    }

    #[test]
    fn no_devices_is_a_failure() {
        assert_eq!(pick_physical_device(&[]), None);
    }

    #[test]
    fn queue_selection_takes_first_graphics_and_compute() {
        let flags = vec![
            vk::QueueFlags::TRANSFER,
            vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
            vk::QueueFlags::GRAPHICS,
            vk::QueueFlags::COMPUTE,
        ];
        let present = vec![false, false, false, false];
        let selection = pick_queue_families(&flags, &present);

        assert_eq!(selection.graphics, Some(1));
        assert_eq!(selection.compute, Some(1));
        assert_eq!(selection.present, None);
    }

    #[test]
    fn queue_selection_presentation_last_match_wins() {
        let flags = vec![
            vk::QueueFlags::GRAPHICS,
            vk::QueueFlags::COMPUTE,
            vk::QueueFlags::TRANSFER,
        ];
        let present = vec![true, false, true];
        let selection = pick_queue_families(&flags, &present);

        assert_eq!(selection.present, Some(2));
    }

    #[test]
    fn queue_selections_may_coincide() {
        let flags = vec![vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE];
        let present = vec![true];
        let selection = pick_queue_families(&flags, &present);

        assert_eq!(selection.graphics, Some(0));
        assert_eq!(selection.compute, Some(0));
        assert_eq!(selection.present, Some(0));
    }

    #[test]
    fn missing_capability_is_reported_by_name() {
        let requested = vec!["VK_KHR_surface".to_string(), "VK_KHR_display".to_string()];
        let available = vec!["VK_KHR_surface".to_string()];

        assert_eq!(first_missing(&requested, &available), Some("VK_KHR_display"));
        assert_eq!(first_missing(&requested[..1], &available), None);
    }

    #[test]
    fn merge_deduplicates_and_keeps_required() {
        let required = [SurfaceLoader::name()];
        let extra = vec![
            "VK_KHR_surface".to_string(),
            "VK_KHR_xcb_surface".to_string(),
            "VK_KHR_xcb_surface".to_string(),
        ];
        let merged = merge_names(&required, &extra);

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().any(|n| n == "VK_KHR_surface"));
        assert!(merged.iter().any(|n| n == "VK_KHR_xcb_surface"));
    }
}
