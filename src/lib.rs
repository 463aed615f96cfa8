pub mod allocator;
pub mod command_recorder;
pub mod debug_name;
pub mod depth_image_resource;
pub mod device_context;
pub mod error;
pub mod image_resource;
pub mod layout_transition;
pub mod memory;

pub use allocator::{ImageAllocation, ImageAllocator};
pub use command_recorder::CommandRecorder;
pub use debug_name::{DebugUtilsNamer, ObjectNamer};
pub use depth_image_resource::DepthImageResource;
pub use device_context::DeviceContext;
pub use error::{DepthImageError, Result};
pub use image_resource::ImageResource;

pub use ash::vk::{CommandBuffer, Format, ImageLayout};
