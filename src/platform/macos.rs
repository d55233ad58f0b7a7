//! Image lookup through dyld's image table.

use std::ffi::{CStr, CString};

use crate::error::Result;
use crate::platform::{Access, Platform, MAX_PATH_LEN};
use crate::strings;

/// Walks the dyld image table by ascending index
#[derive(Debug, Default, Clone, Copy)]
pub struct DyldPlatform;

impl Platform for DyldPlatform {
    fn loaded_images(&self) -> Result<Vec<String>> {
        let count = unsafe { libc::_dyld_image_count() };
        let mut images = Vec::with_capacity(count as usize);
        for index in 0..count {
            // dyld owns the name and may drop it once the image is unloaded
            let name = unsafe { libc::_dyld_get_image_name(index) };
            let image = if name.is_null() {
                String::new()
            } else {
                match unsafe { CStr::from_ptr(name) }.to_str() {
                    Ok(name) => strings::dup_bounded(name, MAX_PATH_LEN)?,
                    Err(_) => String::new(),
                }
            };
            images.push(image);
        }
        Ok(images)
    }

    fn is_accessible(&self, candidate: &str, access: Access) -> bool {
        let Ok(path) = CString::new(candidate) else {
            return false;
        };
        let mode = match access {
            Access::Exists => libc::F_OK,
            Access::Execute => libc::X_OK,
        };
        unsafe { libc::access(path.as_ptr(), mode) == 0 }
    }
}
