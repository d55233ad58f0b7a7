//! Image lookup through module handles.

use std::fs;
use std::io;
use std::mem;

use windows::core::PCWSTR;
use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{
    GetModuleFileNameW, GetModuleHandleExW, GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
};
use windows::Win32::System::ProcessStatus::EnumProcessModules;
use windows::Win32::System::Threading::GetCurrentProcess;

use crate::encoding::WideEncoding;
use crate::error::{Error, Result};
use crate::platform::{Access, Platform, MAX_PATH_LEN};
use crate::strings;

fn last_os_error() -> Error {
    Error::Loader(io::Error::last_os_error().to_string())
}

/// The file backing `module`, copied out of the loader's buffer
fn module_path(module: HMODULE) -> Result<String> {
    let mut buffer = vec![0u16; MAX_PATH_LEN];
    let len = unsafe { GetModuleFileNameW(module, &mut buffer) } as usize;
    if len == 0 {
        return Err(last_os_error());
    }
    let wide = strings::dup_bounded_wide(&buffer[..len], 0)?;
    WideEncoding::native().to_narrow(wide.as_units())
}

/// Looks modules up by name, without taking a reference on them
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleHandlePlatform;

impl Platform for ModuleHandlePlatform {
    fn loaded_images(&self) -> Result<Vec<String>> {
        let process = unsafe { GetCurrentProcess() };
        let mut modules: Vec<HMODULE> = Vec::new();
        let mut needed = 0u32;
        loop {
            let bytes = (modules.len() * mem::size_of::<HMODULE>()) as u32;
            unsafe { EnumProcessModules(process, modules.as_mut_ptr(), bytes, &mut needed) }
                .map_err(|e| Error::Loader(e.to_string()))?;
            if needed <= bytes {
                modules.truncate(needed as usize / mem::size_of::<HMODULE>());
                break;
            }
            modules.resize(needed as usize / mem::size_of::<HMODULE>(), HMODULE::default());
        }
        modules.into_iter().map(module_path).collect()
    }

    fn locate_image(&self, base_name: Option<&str>) -> Result<String> {
        let wide = match base_name {
            Some(name) => Some(WideEncoding::native().to_wide(name)?.to_nul_terminated()),
            None => None,
        };
        let name = wide.as_ref().map_or(PCWSTR::null(), |w| PCWSTR(w.as_ptr()));

        let mut module = HMODULE::default();
        let flags = GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT;
        let found = unsafe { GetModuleHandleExW(flags, name, &mut module) };
        if found.is_err() || module.is_invalid() {
            return Err(Error::ImageNotFound(base_name.unwrap_or("<main>").to_string()));
        }
        module_path(module)
    }

    fn is_accessible(&self, candidate: &str, _access: Access) -> bool {
        fs::metadata(candidate).is_ok()
    }
}
