use ash::vk::{MemoryPropertyFlags, PhysicalDeviceMemoryProperties};

use crate::error::{DepthImageError, Result};

/// Returns the first memory type allowed by `filter` whose flags contain `property_flags`.
pub fn memory_type_index(
    filter: u32,
    properties: &PhysicalDeviceMemoryProperties,
    property_flags: MemoryPropertyFlags,
) -> Option<u32> {
    (0..properties.memory_type_count).find(|&i| {
        (filter & (1 << i)) != 0
            && properties.memory_types[i as usize]
                .property_flags
                .contains(property_flags)
    })
}

pub(crate) fn require_memory_type_index(
    filter: u32,
    properties: &PhysicalDeviceMemoryProperties,
    property_flags: MemoryPropertyFlags,
) -> Result<u32> {
    memory_type_index(filter, properties, property_flags).ok_or(
        DepthImageError::NoCompatibleMemoryType {
            type_bits: filter,
            flags: property_flags,
        },
    )
}
