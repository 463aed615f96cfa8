use ash::vk::{Format, ImageLayout, MemoryPropertyFlags};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepthImageError {
    #[error("Vulkan allocation failed: {0}")]
    Allocation(ash::vk::Result),
    #[error("No memory type in {type_bits:#b} supports {flags:?}")]
    NoCompatibleMemoryType {
        type_bits: u32,
        flags: MemoryPropertyFlags,
    },
    #[error("Invalid depth image extent {width}x{height}")]
    InvalidExtent { width: u32, height: u32 },
    #[error("{0:?} is not a depth format")]
    UnsupportedFormat(Format),
    #[error("Depth image has already been created")]
    AlreadyCreated,
    #[error("Depth image has not been created")]
    NotCreated,
    #[error("{0:?} is not a valid target layout for a depth image")]
    InvalidTargetLayout(ImageLayout),
    #[error("Unsupported layout transition {from:?} -> {to:?}")]
    UnsupportedTransition { from: ImageLayout, to: ImageLayout },
    #[error("Setting debug object name failed: {0}")]
    Naming(ash::vk::Result),
}

impl From<ash::vk::Result> for DepthImageError {
    fn from(result: ash::vk::Result) -> Self {
        Self::Allocation(result)
    }
}

pub type Result<T> = std::result::Result<T, DepthImageError>;
