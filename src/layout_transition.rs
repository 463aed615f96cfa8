//! Layout transition table for depth images.
//!
//! Every transition a depth image may take is listed in [`DEPTH_TRANSITIONS`]
//! together with the access and stage masks its barrier needs. Supporting a
//! new transition means adding a row, not a branch.

use ash::vk::{AccessFlags, Format, ImageAspectFlags, ImageLayout, PipelineStageFlags};

/// Access and stage masks of a single image memory barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierMasks {
    pub src_access: AccessFlags,
    pub dst_access: AccessFlags,
    pub src_stage: PipelineStageFlags,
    pub dst_stage: PipelineStageFlags,
}

/// One legal edge of the depth image layout state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTransition {
    pub from: ImageLayout,
    pub to: ImageLayout,
    pub masks: BarrierMasks,
}

pub const DEPTH_TRANSITIONS: [LayoutTransition; 3] = [
    LayoutTransition {
        from: ImageLayout::UNDEFINED,
        to: ImageLayout::TRANSFER_DST_OPTIMAL,
        masks: BarrierMasks {
            src_access: AccessFlags::empty(),
            dst_access: AccessFlags::TRANSFER_WRITE,
            src_stage: PipelineStageFlags::TOP_OF_PIPE,
            dst_stage: PipelineStageFlags::TRANSFER,
        },
    },
    LayoutTransition {
        from: ImageLayout::TRANSFER_DST_OPTIMAL,
        to: ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        masks: BarrierMasks {
            src_access: AccessFlags::TRANSFER_WRITE,
            dst_access: AccessFlags::SHADER_READ,
            src_stage: PipelineStageFlags::TRANSFER,
            dst_stage: PipelineStageFlags::FRAGMENT_SHADER,
        },
    },
    LayoutTransition {
        from: ImageLayout::UNDEFINED,
        to: ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
        masks: BarrierMasks {
            src_access: AccessFlags::empty(),
            // Depth testing reads the attachment as well as writing it.
            dst_access: AccessFlags::from_raw(
                AccessFlags::DEPTH_STENCIL_ATTACHMENT_READ.as_raw()
                    | AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE.as_raw(),
            ),
            src_stage: PipelineStageFlags::TOP_OF_PIPE,
            dst_stage: PipelineStageFlags::EARLY_FRAGMENT_TESTS,
        },
    },
];

/// Layouts a depth image can be transitioned into.
pub const SUPPORTED_TARGETS: [ImageLayout; 3] = [
    ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
    ImageLayout::TRANSFER_DST_OPTIMAL,
    ImageLayout::SHADER_READ_ONLY_OPTIMAL,
];

pub fn is_supported_target(layout: ImageLayout) -> bool {
    SUPPORTED_TARGETS.contains(&layout)
}

pub fn lookup_transition(from: ImageLayout, to: ImageLayout) -> Option<BarrierMasks> {
    DEPTH_TRANSITIONS
        .iter()
        .find(|transition| transition.from == from && transition.to == to)
        .map(|transition| transition.masks)
}

pub fn is_depth_format(format: Format) -> bool {
    matches!(
        format,
        Format::D16_UNORM
            | Format::X8_D24_UNORM_PACK32
            | Format::D32_SFLOAT
            | Format::D16_UNORM_S8_UINT
            | Format::D24_UNORM_S8_UINT
            | Format::D32_SFLOAT_S8_UINT
    )
}

pub fn has_stencil_component(format: Format) -> bool {
    matches!(
        format,
        Format::D16_UNORM_S8_UINT | Format::D24_UNORM_S8_UINT | Format::D32_SFLOAT_S8_UINT
    )
}

/// Aspect mask for a barrier moving an image of `format` into `target`.
///
/// Only the attachment layout addresses the depth (and stencil) planes, other
/// targets use the color aspect.
pub fn barrier_aspect_mask(format: Format, target: ImageLayout) -> ImageAspectFlags {
    if target != ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL {
        return ImageAspectFlags::COLOR;
    }

    if has_stencil_component(format) {
        ImageAspectFlags::DEPTH | ImageAspectFlags::STENCIL
    } else {
        ImageAspectFlags::DEPTH
    }
}
