use std::ffi::CString;

use ash::vk::{DebugUtilsObjectNameInfoEXT, Handle, ObjectType};

use crate::error::{DepthImageError, Result};

/// Sink for human readable object names picked up by debuggers and capture tools.
pub trait ObjectNamer {
    fn set_object_name(&self, object_type: ObjectType, handle: u64, name: &str) -> Result<()>;
}

/// Names objects through `VK_EXT_debug_utils`.
pub struct DebugUtilsNamer {
    loader: ash::ext::debug_utils::Device,
}

impl DebugUtilsNamer {
    pub fn new(instance: &ash::Instance, device: &ash::Device) -> Self {
        Self {
            loader: ash::ext::debug_utils::Device::new(instance, device),
        }
    }
}

impl ObjectNamer for DebugUtilsNamer {
    fn set_object_name(&self, object_type: ObjectType, handle: u64, name: &str) -> Result<()> {
        let name = object_name(name);
        let mut info = DebugUtilsObjectNameInfoEXT::default().object_name(&name);
        info.object_type = object_type;
        info.object_handle = handle;

        unsafe { self.loader.set_debug_utils_object_name(&info) }
            .map_err(DepthImageError::Naming)
    }
}

/// CString rejects interior nul bytes, so they are stripped first.
fn object_name(name: &str) -> CString {
    let bytes: Vec<u8> = name.bytes().filter(|&byte| byte != 0).collect();
    CString::new(bytes).expect("nul bytes were filtered out")
}

/// Attaches `name` to `object` when a namer is present.
///
/// Failures are logged, naming never affects rendering.
pub(crate) fn name_object<H: Handle + Copy>(
    namer: Option<&dyn ObjectNamer>,
    object: H,
    name: &str,
) {
    let Some(namer) = namer else {
        return;
    };
    if object.as_raw() == 0 {
        return;
    }

    if let Err(err) = namer.set_object_name(H::TYPE, object.as_raw(), name) {
        log::warn!("Could not name {:?} '{}': {}", H::TYPE, name, err);
    }
}
