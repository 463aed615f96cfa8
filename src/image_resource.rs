use ash::vk::{Format, Image, ImageLayout, ImageView};

/// Read-only view of an image owned by some resource.
///
/// Layout changes go through the owning resource so there is no setter here.
pub trait ImageResource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn depth(&self) -> u32;
    fn format(&self) -> Format;
    fn layout(&self) -> ImageLayout;
    fn handle(&self) -> Image;
    fn view(&self) -> ImageView;
}
