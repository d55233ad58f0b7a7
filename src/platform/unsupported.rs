use crate::error::{Error, Result};
use crate::platform::{Access, Platform};

/// Stand-in for targets without a known loader introspection API
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPlatform;

impl Platform for UnsupportedPlatform {
    fn loaded_images(&self) -> Result<Vec<String>> {
        Err(Error::Unsupported)
    }

    #[cfg(unix)]
    fn is_accessible(&self, candidate: &str, access: Access) -> bool {
        let Ok(path) = std::ffi::CString::new(candidate) else {
            return false;
        };
        let mode = match access {
            Access::Exists => libc::F_OK,
            Access::Execute => libc::X_OK,
        };
        unsafe { libc::access(path.as_ptr(), mode) == 0 }
    }

    /// Without an execute bit to consult, any existing file counts
    #[cfg(not(unix))]
    fn is_accessible(&self, candidate: &str, _access: Access) -> bool {
        std::path::Path::new(candidate).exists()
    }
}
