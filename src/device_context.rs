use ash::vk::{
    CommandBuffer, DependencyFlags, DeviceMemory, Extent3D, Format, Image, ImageAspectFlags,
    ImageCreateInfo, ImageLayout, ImageMemoryBarrier, ImageSubresourceRange, ImageView,
    ImageViewCreateInfo, ImageViewType, MemoryAllocateInfo, PhysicalDevice,
    PhysicalDeviceMemoryProperties, PipelineStageFlags, SampleCountFlags, SharingMode,
};
use ash::{Device, Instance};

use crate::allocator::{ImageAllocation, ImageAllocator};
use crate::command_recorder::CommandRecorder;
use crate::error::Result;
use crate::memory::require_memory_type_index;

/// Logical device handle plus the memory properties of its physical device.
///
/// The device itself is created and destroyed by the engine, this only
/// borrows its function table.
pub struct DeviceContext {
    handle: Device,
    memory_properties: PhysicalDeviceMemoryProperties,
}

impl DeviceContext {
    pub fn new(instance: &Instance, physical_device: PhysicalDevice, device: Device) -> Self {
        let memory_properties =
            unsafe { instance.get_physical_device_memory_properties(physical_device) };
        Self::with_memory_properties(device, memory_properties)
    }

    pub fn with_memory_properties(
        device: Device,
        memory_properties: PhysicalDeviceMemoryProperties,
    ) -> Self {
        Self {
            handle: device,
            memory_properties,
        }
    }

    pub fn handle(&self) -> &Device {
        &self.handle
    }

    pub fn memory_properties(&self) -> &PhysicalDeviceMemoryProperties {
        &self.memory_properties
    }
}

impl ImageAllocator for DeviceContext {
    fn allocate_image(&self, allocation: &ImageAllocation) -> Result<(Image, DeviceMemory)> {
        let image_info = ImageCreateInfo::default()
            .image_type(allocation.image_type)
            .samples(SampleCountFlags::TYPE_1)
            .sharing_mode(SharingMode::EXCLUSIVE)
            .format(allocation.format)
            .extent(Extent3D {
                width: allocation.width,
                height: allocation.height,
                depth: 1,
            })
            .array_layers(allocation.array_layers)
            .mip_levels(allocation.mip_levels)
            .tiling(allocation.tiling)
            .usage(allocation.usage)
            .initial_layout(ImageLayout::UNDEFINED);

        unsafe {
            let image = self.handle.create_image(&image_info, None)?;
            let memory_requirements = self.handle.get_image_memory_requirements(image);

            let memory = require_memory_type_index(
                memory_requirements.memory_type_bits,
                &self.memory_properties,
                allocation.property_flags,
            )
            .and_then(|type_index| {
                let allocation_info = MemoryAllocateInfo::default()
                    .memory_type_index(type_index)
                    .allocation_size(memory_requirements.size);
                self.handle
                    .allocate_memory(&allocation_info, None)
                    .map_err(Into::into)
            })
            .and_then(|memory| match self.handle.bind_image_memory(image, memory, 0) {
                Ok(()) => Ok(memory),
                Err(err) => {
                    self.handle.free_memory(memory, None);
                    Err(err.into())
                }
            });

            match memory {
                Ok(memory) => Ok((image, memory)),
                Err(err) => {
                    self.handle.destroy_image(image, None);
                    Err(err)
                }
            }
        }
    }

    fn create_view(
        &self,
        image: Image,
        format: Format,
        aspect: ImageAspectFlags,
    ) -> Result<ImageView> {
        let subresource_range = ImageSubresourceRange::default()
            .aspect_mask(aspect)
            .base_mip_level(0)
            .level_count(1)
            .base_array_layer(0)
            .layer_count(1);
        let view_info = ImageViewCreateInfo::default()
            .format(format)
            .image(image)
            .view_type(ImageViewType::TYPE_2D)
            .subresource_range(subresource_range);

        Ok(unsafe { self.handle.create_image_view(&view_info, None)? })
    }

    fn destroy_view(&self, view: ImageView) {
        unsafe { self.handle.destroy_image_view(view, None) }
    }

    fn destroy_image(&self, image: Image) {
        unsafe { self.handle.destroy_image(image, None) }
    }

    fn free_memory(&self, memory: DeviceMemory) {
        unsafe { self.handle.free_memory(memory, None) }
    }
}

impl CommandRecorder for DeviceContext {
    fn pipeline_barrier(
        &self,
        command_buffer: CommandBuffer,
        src_stage: PipelineStageFlags,
        dst_stage: PipelineStageFlags,
        barrier: &ImageMemoryBarrier<'_>,
    ) {
        unsafe {
            self.handle.cmd_pipeline_barrier(
                command_buffer,
                src_stage,
                dst_stage,
                DependencyFlags::empty(),
                &[],
                &[],
                std::slice::from_ref(barrier),
            );
        }
    }
}
