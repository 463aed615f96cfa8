//! Fake collaborators for exercising depth images without a GPU.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use ash::vk::{
    self, AccessFlags, CommandBuffer, DeviceMemory, Format, Handle, Image, ImageAspectFlags,
    ImageLayout, ImageMemoryBarrier, ImageView, ObjectType,
    PipelineStageFlags,
};
use vk_depth::{CommandRecorder, DepthImageError, ImageAllocation, ImageAllocator, ObjectNamer};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Copy of the parts of an `ImageMemoryBarrier` the tests look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedBarrier {
    pub command_buffer: CommandBuffer,
    pub src_stage: PipelineStageFlags,
    pub dst_stage: PipelineStageFlags,
    pub old_layout: ImageLayout,
    pub new_layout: ImageLayout,
    pub src_access: AccessFlags,
    pub dst_access: AccessFlags,
    pub src_queue_family: u32,
    pub dst_queue_family: u32,
    pub image: Image,
    pub aspect_mask: ImageAspectFlags,
    pub base_mip_level: u32,
    pub level_count: u32,
    pub base_array_layer: u32,
    pub layer_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    View(ImageView),
    Image(Image),
    Memory(DeviceMemory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    pub image: Image,
    pub format: Format,
    pub aspect: ImageAspectFlags,
}

/// Hands out increasing fake handles and records every call.
#[derive(Default)]
pub struct FakeDevice {
    next_handle: Cell<u64>,
    pub fail_allocation: Cell<Option<vk::Result>>,
    pub fail_view: Cell<Option<vk::Result>>,
    pub allocations: RefCell<Vec<ImageAllocation>>,
    pub views: RefCell<Vec<ViewRequest>>,
    pub barriers: RefCell<Vec<RecordedBarrier>>,
    pub releases: RefCell<Vec<Release>>,
}

impl FakeDevice {
    fn next_raw(&self) -> u64 {
        let raw = self.next_handle.get() + 1;
        self.next_handle.set(raw);
        raw
    }

    pub fn barrier_count(&self) -> usize {
        self.barriers.borrow().len()
    }

    pub fn last_barrier(&self) -> RecordedBarrier {
        *self.barriers.borrow().last().expect("no barrier recorded")
    }
}

impl ImageAllocator for FakeDevice {
    fn allocate_image(
        &self,
        allocation: &ImageAllocation,
    ) -> vk_depth::Result<(Image, DeviceMemory)> {
        if let Some(err) = self.fail_allocation.get() {
            return Err(DepthImageError::Allocation(err));
        }
        self.allocations.borrow_mut().push(*allocation);
        Ok((
            Image::from_raw(self.next_raw()),
            DeviceMemory::from_raw(self.next_raw()),
        ))
    }

    fn create_view(
        &self,
        image: Image,
        format: Format,
        aspect: ImageAspectFlags,
    ) -> vk_depth::Result<ImageView> {
        if let Some(err) = self.fail_view.get() {
            return Err(DepthImageError::Allocation(err));
        }
        self.views.borrow_mut().push(ViewRequest {
            image,
            format,
            aspect,
        });
        Ok(ImageView::from_raw(self.next_raw()))
    }

    fn destroy_view(&self, view: ImageView) {
        self.releases.borrow_mut().push(Release::View(view));
    }

    fn destroy_image(&self, image: Image) {
        self.releases.borrow_mut().push(Release::Image(image));
    }

    fn free_memory(&self, memory: DeviceMemory) {
        self.releases.borrow_mut().push(Release::Memory(memory));
    }
}

impl CommandRecorder for FakeDevice {
    fn pipeline_barrier(
        &self,
        command_buffer: CommandBuffer,
        src_stage: PipelineStageFlags,
        dst_stage: PipelineStageFlags,
        barrier: &ImageMemoryBarrier<'_>,
    ) {
        self.barriers.borrow_mut().push(RecordedBarrier {
            command_buffer,
            src_stage,
            dst_stage,
            old_layout: barrier.old_layout,
            new_layout: barrier.new_layout,
            src_access: barrier.src_access_mask,
            dst_access: barrier.dst_access_mask,
            src_queue_family: barrier.src_queue_family_index,
            dst_queue_family: barrier.dst_queue_family_index,
            image: barrier.image,
            aspect_mask: barrier.subresource_range.aspect_mask,
            base_mip_level: barrier.subresource_range.base_mip_level,
            level_count: barrier.subresource_range.level_count,
            base_array_layer: barrier.subresource_range.base_array_layer,
            layer_count: barrier.subresource_range.layer_count,
        });
    }
}

#[derive(Default)]
pub struct FakeNamer {
    pub fail: Cell<bool>,
    pub names: RefCell<Vec<(ObjectType, u64, String)>>,
}

impl ObjectNamer for FakeNamer {
    fn set_object_name(
        &self,
        object_type: ObjectType,
        handle: u64,
        name: &str,
    ) -> vk_depth::Result<()> {
        if self.fail.get() {
            return Err(DepthImageError::Naming(vk::Result::ERROR_EXTENSION_NOT_PRESENT));
        }
        self.names
            .borrow_mut()
            .push((object_type, handle, name.to_owned()));
        Ok(())
    }
}

pub fn command_buffer() -> CommandBuffer {
    CommandBuffer::from_raw(0xCB)
}
