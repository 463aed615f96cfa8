use ash::vk::{CommandBuffer, ImageMemoryBarrier, PipelineStageFlags};

/// Records commands into a command buffer owned by the caller.
///
/// `command_buffer` must be in the recording state.
pub trait CommandRecorder {
    /// Inserts a pipeline barrier carrying a single image memory barrier.
    fn pipeline_barrier(
        &self,
        command_buffer: CommandBuffer,
        src_stage: PipelineStageFlags,
        dst_stage: PipelineStageFlags,
        barrier: &ImageMemoryBarrier<'_>,
    );
}
