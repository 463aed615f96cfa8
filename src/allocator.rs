use ash::vk::{
    DeviceMemory, Format, Image, ImageAspectFlags, ImageTiling, ImageType, ImageUsageFlags,
    ImageView, MemoryPropertyFlags,
};

use crate::error::Result;

/// Everything needed to create an image and bind memory to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAllocation {
    pub image_type: ImageType,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_layers: u32,
    pub format: Format,
    pub tiling: ImageTiling,
    pub usage: ImageUsageFlags,
    pub property_flags: MemoryPropertyFlags,
}

impl ImageAllocation {
    /// Single mip, single layer, optimally tiled, device local depth attachment.
    pub fn depth_attachment(width: u32, height: u32, format: Format) -> Self {
        Self {
            image_type: ImageType::TYPE_2D,
            width,
            height,
            mip_levels: 1,
            array_layers: 1,
            format,
            tiling: ImageTiling::OPTIMAL,
            usage: ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT,
            property_flags: MemoryPropertyFlags::DEVICE_LOCAL,
        }
    }
}

/// Creates and releases the GPU objects backing an image resource.
///
/// The release functions are only called with handles previously returned by
/// the same allocator.
pub trait ImageAllocator {
    /// Creates the image and binds freshly allocated memory to it.
    fn allocate_image(&self, allocation: &ImageAllocation) -> Result<(Image, DeviceMemory)>;

    fn create_view(&self, image: Image, format: Format, aspect: ImageAspectFlags)
        -> Result<ImageView>;

    fn destroy_view(&self, view: ImageView);

    fn destroy_image(&self, image: Image);

    fn free_memory(&self, memory: DeviceMemory);
}
