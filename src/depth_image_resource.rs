use std::rc::Rc;

use ash::vk::{
    CommandBuffer, DeviceMemory, Format, Image, ImageAspectFlags, ImageLayout, ImageMemoryBarrier,
    ImageSubresourceRange, ImageView, QUEUE_FAMILY_IGNORED,
};

use crate::allocator::{ImageAllocation, ImageAllocator};
use crate::command_recorder::CommandRecorder;
use crate::debug_name::{name_object, ObjectNamer};
use crate::device_context::DeviceContext;
use crate::error::{DepthImageError, Result};
use crate::image_resource::ImageResource;
use crate::layout_transition::{
    barrier_aspect_mask, is_depth_format, is_supported_target, lookup_transition,
};

/// A depth (or depth/stencil) attachment together with its memory and view.
///
/// The resource starts out empty, [`DepthImageResource::create`] allocates
/// the GPU objects and [`DepthImageResource::transition`] records the
/// barriers that move the image between layouts. Everything that was
/// allocated is released on drop, view first and memory last.
pub struct DepthImageResource<D: ImageAllocator + CommandRecorder = DeviceContext> {
    device: Rc<D>,
    namer: Option<Rc<dyn ObjectNamer>>,
    label: String,
    image: Image,
    memory: DeviceMemory,
    view: ImageView,
    width: u32,
    height: u32,
    format: Format,
    layout: ImageLayout,
}

impl<D: ImageAllocator + CommandRecorder> DepthImageResource<D> {
    pub fn new(device: Rc<D>) -> Self {
        Self {
            device,
            namer: None,
            label: String::new(),
            image: Image::null(),
            memory: DeviceMemory::null(),
            view: ImageView::null(),
            width: 0,
            height: 0,
            format: Format::UNDEFINED,
            layout: ImageLayout::UNDEFINED,
        }
    }

    /// Labels the image, memory and view through `namer` once they are created.
    pub fn with_namer(mut self, namer: Rc<dyn ObjectNamer>) -> Self {
        self.namer = Some(namer);
        self
    }

    pub fn create(&mut self, label: &str, width: u32, height: u32, format: Format) -> Result<()> {
        if self.is_created() {
            return Err(DepthImageError::AlreadyCreated);
        }
        if width == 0 || height == 0 {
            return Err(DepthImageError::InvalidExtent { width, height });
        }
        if !is_depth_format(format) {
            return Err(DepthImageError::UnsupportedFormat(format));
        }

        let allocation = ImageAllocation::depth_attachment(width, height, format);
        let (image, memory) = self.device.allocate_image(&allocation)?;
        self.image = image;
        self.memory = memory;
        self.label = label.to_owned();
        self.width = width;
        self.height = height;
        self.format = format;
        self.layout = ImageLayout::UNDEFINED;

        // On failure the image and memory stay owned so drop releases them.
        self.view = self
            .device
            .create_view(image, format, ImageAspectFlags::DEPTH)?;

        let namer = self.namer.as_deref();
        name_object(namer, self.image, &self.label);
        name_object(namer, self.memory, &self.label);
        name_object(namer, self.view, &self.label);

        log::debug!(
            "Created depth image '{}' {}x{} {:?}",
            self.label,
            width,
            height,
            format
        );
        Ok(())
    }

    /// Records the barrier moving the image into `target`.
    ///
    /// Transitioning into the current layout records nothing.
    pub fn transition(&mut self, command_buffer: CommandBuffer, target: ImageLayout) -> Result<()> {
        // A failed create leaves the image without a view, treat it like no image at all.
        if !self.is_created() || self.view == ImageView::null() {
            return Err(DepthImageError::NotCreated);
        }
        if !is_supported_target(target) {
            log::error!(
                "Depth image '{}' cannot be transitioned to {:?}",
                self.label,
                target
            );
            return Err(DepthImageError::InvalidTargetLayout(target));
        }

        if self.layout == target {
            log::trace!("Depth image '{}' already in {:?}", self.label, target);
            return Ok(());
        }

        let from = self.layout;
        let masks = lookup_transition(from, target).ok_or_else(|| {
            log::error!(
                "Unsupported transition {:?} -> {:?} for depth image '{}'",
                from,
                target,
                self.label
            );
            DepthImageError::UnsupportedTransition { from, to: target }
        })?;

        let subresource_range = ImageSubresourceRange {
            aspect_mask: barrier_aspect_mask(self.format, target),
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: 1,
        };
        let barrier = ImageMemoryBarrier::default()
            .old_layout(from)
            .new_layout(target)
            .src_queue_family_index(QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(QUEUE_FAMILY_IGNORED)
            .image(self.image)
            .subresource_range(subresource_range)
            .src_access_mask(masks.src_access)
            .dst_access_mask(masks.dst_access);

        self.device
            .pipeline_barrier(command_buffer, masks.src_stage, masks.dst_stage, &barrier);
        log::trace!(
            "Depth image '{}' {:?} -> {:?} ({:?} -> {:?})",
            self.label,
            from,
            target,
            masks.src_stage,
            masks.dst_stage
        );

        self.layout = target;
        Ok(())
    }

    pub fn is_created(&self) -> bool {
        self.image != Image::null()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn image(&self) -> Image {
        self.image
    }

    pub fn memory(&self) -> DeviceMemory {
        self.memory
    }

    pub fn view(&self) -> ImageView {
        self.view
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn layout(&self) -> ImageLayout {
        self.layout
    }
}

impl<D: ImageAllocator + CommandRecorder> ImageResource for DepthImageResource<D> {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn depth(&self) -> u32 {
        1
    }
    fn format(&self) -> Format {
        self.format
    }
    fn layout(&self) -> ImageLayout {
        self.layout
    }
    fn handle(&self) -> Image {
        self.image
    }
    fn view(&self) -> ImageView {
        self.view
    }
}

impl<D: ImageAllocator + CommandRecorder> Drop for DepthImageResource<D> {
    fn drop(&mut self) {
        // The view references the image and the image must go before its memory.
        if self.view != ImageView::null() {
            self.device.destroy_view(self.view);
        }
        if self.image != Image::null() {
            self.device.destroy_image(self.image);
        }
        if self.memory != DeviceMemory::null() {
            self.device.free_memory(self.memory);
        }

        if self.is_created() {
            log::debug!("Released depth image '{}'", self.label);
        }
    }
}
