//! Swap-chain negotiation rules and construction
//!
//! The decision rules (image count, extent validation, format support) are
//! pure functions over backend-reported data so they can be exercised without
//! a device. Construction itself lives in [`create_swapchain`] and
//! [`create_color_target_views`].

use ash::extensions::khr::Swapchain as SwapchainLoader;
use ash::{vk, Device};

use crate::render::vulkan::context::{VulkanError, VulkanResult};

/// Hard cap on swap-chain images, regardless of what the backend offers.
pub const MAX_SWAPCHAIN_IMAGES: u32 = 4;

/// The only image format negotiated for presentation.
pub const REQUIRED_FORMAT: vk::Format = vk::Format::B8G8R8A8_SRGB;

/// The only color space negotiated for presentation.
pub const REQUIRED_COLOR_SPACE: vk::ColorSpaceKHR = vk::ColorSpaceKHR::SRGB_NONLINEAR;

/// One swap-chain image with its color-target view. Records are index-aligned
/// with the indices returned by image acquisition.
#[derive(Debug, Clone, Copy)]
pub struct SwapImage {
    /// The backend-owned image.
    pub image: vk::Image,
    /// A 2D color view onto the full image.
    pub color_view: vk::ImageView,
}

/// Number of swap-chain images to request.
///
/// Starts from the backend minimum, asks for one extra image when the
/// backend allows it (so acquisition does not serialize on a single image),
/// and clamps to both [`MAX_SWAPCHAIN_IMAGES`] and the backend maximum.
/// `max = 0` means the backend imposes no upper bound.
pub fn negotiated_image_count(min: u32, max: u32) -> u32 {
    let upper = if max == 0 { u32::MAX } else { max };
    let mut count = min.max(1);
    if count < upper {
        count += 1;
    }
    count.min(MAX_SWAPCHAIN_IMAGES).min(upper)
}

/// Whether the requested extent fits the surface's supported range, both
/// axes, both bounds.
pub fn extent_supported(requested: vk::Extent2D, caps: &vk::SurfaceCapabilitiesKHR) -> bool {
    requested.width >= caps.min_image_extent.width
        && requested.width <= caps.max_image_extent.width
        && requested.height >= caps.min_image_extent.height
        && requested.height <= caps.max_image_extent.height
}

/// Whether the surface offers the required format/color-space pair.
pub fn supports_required_format(formats: &[vk::SurfaceFormatKHR]) -> bool {
    formats
        .iter()
        .any(|f| f.format == REQUIRED_FORMAT && f.color_space == REQUIRED_COLOR_SPACE)
}

/// Create the swap chain: FIFO presentation, exclusive sharing, color
/// attachment plus transfer-destination usage, current transform, opaque
/// composite, clipped.
pub fn create_swapchain(
    loader: &SwapchainLoader,
    surface: vk::SurfaceKHR,
    caps: &vk::SurfaceCapabilitiesKHR,
    extent: vk::Extent2D,
    image_count: u32,
) -> VulkanResult<vk::SwapchainKHR> {
    let create_info = vk::SwapchainCreateInfoKHR::builder()
        .surface(surface)
        .min_image_count(image_count)
        .image_format(REQUIRED_FORMAT)
        .image_color_space(REQUIRED_COLOR_SPACE)
        .image_extent(extent)
        .image_array_layers(1)
        .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST)
        .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
        .pre_transform(caps.current_transform)
        .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
        .present_mode(vk::PresentModeKHR::FIFO)
        .clipped(true)
        .old_swapchain(vk::SwapchainKHR::null());

    unsafe { loader.create_swapchain(&create_info, None) }.map_err(VulkanError::Api)
}

/// Create a full-image 2D color view for every swap-chain image.
///
/// Views already created are destroyed before an error is returned, so the
/// caller never receives a partial set.
pub fn create_color_target_views(
    device: &Device,
    images: &[vk::Image],
) -> VulkanResult<Vec<vk::ImageView>> {
    let mut views = Vec::with_capacity(images.len());
    for &image in images {
        let create_info = vk::ImageViewCreateInfo::builder()
            .image(image)
            .view_type(vk::ImageViewType::TYPE_2D)
            .format(REQUIRED_FORMAT)
            .components(vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            })
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            });

        match unsafe { device.create_image_view(&create_info, None) } {
            Ok(view) => views.push(view),
            Err(err) => {
                for view in views {
                    unsafe { device.destroy_image_view(view, None) };
                }
                return Err(VulkanError::Api(err));
            }
        }
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(min_extent: (u32, u32), max_extent: (u32, u32)) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_extent: vk::Extent2D {
                width: min_extent.0,
                height: min_extent.1,
            },
            max_image_extent: vk::Extent2D {
                width: max_extent.0,
                height: max_extent.1,
            },
            ..Default::default()
        }
    }

    #[test]
    fn image_count_takes_one_above_minimum() {
        // Unbounded backend (max = 0): minimum two becomes three.
        assert_eq!(negotiated_image_count(2, 0), 3);
    }

    #[test]
    fn image_count_respects_backend_maximum() {
        assert_eq!(negotiated_image_count(1, 1), 1);
        assert_eq!(negotiated_image_count(1, 2), 2);
        assert_eq!(negotiated_image_count(2, 3), 3);
    }

    #[test]
    fn image_count_never_exceeds_the_cap() {
        assert_eq!(negotiated_image_count(4, 0), MAX_SWAPCHAIN_IMAGES);
        assert_eq!(negotiated_image_count(4, 8), MAX_SWAPCHAIN_IMAGES);
        assert_eq!(negotiated_image_count(6, 8), MAX_SWAPCHAIN_IMAGES);
    }

    #[test]
    fn image_count_handles_degenerate_minimum() {
        // A zero minimum still yields at least one image.
        assert!(negotiated_image_count(0, 0) >= 1);
    }

    #[test]
    fn extent_inside_range_is_supported() {
        let caps = caps((100, 100), (1920, 1080));
        let ok = vk::Extent2D {
            width: 800,
            height: 600,
        };
        assert!(extent_supported(ok, &caps));
    }

    #[test]
    fn extent_bounds_are_inclusive() {
        let caps = caps((100, 100), (1920, 1080));
        assert!(extent_supported(
            vk::Extent2D {
                width: 100,
                height: 100
            },
            &caps
        ));
        assert!(extent_supported(
            vk::Extent2D {
                width: 1920,
                height: 1080
            },
            &caps
        ));
    }

    #[test]
    fn extent_violations_on_either_axis_are_rejected() {
        let caps = caps((100, 100), (1920, 1080));
        let too_narrow = vk::Extent2D {
            width: 50,
            height: 600,
        };
        let too_short = vk::Extent2D {
            width: 800,
            height: 50,
        };
        let too_wide = vk::Extent2D {
            width: 2000,
            height: 600,
        };
        let too_tall = vk::Extent2D {
            width: 800,
            height: 2000,
        };
        assert!(!extent_supported(too_narrow, &caps));
        assert!(!extent_supported(too_short, &caps));
        assert!(!extent_supported(too_wide, &caps));
        assert!(!extent_supported(too_tall, &caps));
    }

    #[test]
    fn required_format_must_match_both_fields() {
        let exact = vk::SurfaceFormatKHR {
            format: REQUIRED_FORMAT,
            color_space: REQUIRED_COLOR_SPACE,
        };
        let wrong_format = vk::SurfaceFormatKHR {
            format: vk::Format::R8G8B8A8_SRGB,
            color_space: REQUIRED_COLOR_SPACE,
        };
        let wrong_space = vk::SurfaceFormatKHR {
            format: REQUIRED_FORMAT,
            color_space: vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
        };

        assert!(supports_required_format(&[wrong_format, exact]));
        assert!(!supports_required_format(&[wrong_format, wrong_space]));
        assert!(!supports_required_format(&[]));
    }
}
