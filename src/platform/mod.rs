//! The OS capability behind image lookup and file access checks.
//!
//! Each supported OS contributes one implementation, chosen at build time as
//! [`Native`]. Whatever a loader hands out is copied before it leaves the
//! implementation, so callers only ever see owned strings.

use crate::error::{Error, Result};
use crate::strings;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
mod unsupported;
#[cfg(windows)]
mod win32;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(target_os = "linux")]
pub use linux::LinkMapPlatform as Native;
#[cfg(target_os = "macos")]
pub use macos::DyldPlatform as Native;
#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub use unsupported::UnsupportedPlatform as Native;
#[cfg(windows)]
pub use win32::ModuleHandlePlatform as Native;

/// Separator between directory components
#[cfg(windows)]
pub const DIR_SEPARATOR: char = '\\';
/// Separator between directory components
#[cfg(not(windows))]
pub const DIR_SEPARATOR: char = '/';

/// Separator between entries of a path list such as `PATH`
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
/// Separator between entries of a path list such as `PATH`
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Longest path copied out of loader-owned memory
#[cfg(unix)]
pub const MAX_PATH_LEN: usize = libc::PATH_MAX as usize;
/// Longest path copied out of loader-owned memory
#[cfg(not(unix))]
pub const MAX_PATH_LEN: usize = 32_768;

/// What a candidate file must allow to count as found
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Exists,
    Execute,
}

pub trait Platform {
    /// Paths of every image loaded into the process, in loader walk order
    ///
    /// The main executable comes first.
    fn loaded_images(&self) -> Result<Vec<String>>;

    /// Path of the first loaded image whose file name equals `base_name`,
    /// or of the main executable when `base_name` is `None`
    fn locate_image(&self, base_name: Option<&str>) -> Result<String> {
        first_match(self.loaded_images()?, base_name)
    }

    /// Whether `candidate` exists and, for [`Access::Execute`], may be executed
    fn is_accessible(&self, candidate: &str, access: Access) -> bool;
}

/// The part of `path` after its last directory separator
pub fn base_name(path: &str) -> &str {
    path.rsplit(DIR_SEPARATOR).next().unwrap_or(path)
}

/// Pick the first image in walk order whose file name matches, or the main
/// image (the head of the walk) when no name is given
///
/// Entries without a name never match.
pub fn first_match(images: Vec<String>, base: Option<&str>) -> Result<String> {
    let Some(main) = images.first() else {
        return Err(Error::NoImages);
    };
    let found = match base {
        None => Some(main).filter(|image| !image.is_empty()),
        Some(base) => images.iter().find(|image| !image.is_empty() && base_name(image) == base),
    };
    match found {
        Some(image) => strings::dup_bounded(image, MAX_PATH_LEN),
        None => Err(Error::ImageNotFound(base.unwrap_or("<main>").to_string())),
    }
}
