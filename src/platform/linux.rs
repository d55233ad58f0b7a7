//! Image lookup through the dynamic linker's link map.

use std::ffi::{CStr, CString};
use std::fs;
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use crate::error::{Error, Result};
use crate::platform::{Access, Platform, DIR_SEPARATOR, MAX_PATH_LEN};
use crate::strings;

const RTLD_DI_LINKMAP: c_int = 2;

/// Mirror of the public prefix of glibc's `struct link_map`
#[repr(C)]
#[allow(dead_code)]
struct LinkMap {
    l_addr: usize,
    l_name: *const c_char,
    l_ld: *mut c_void,
    l_next: *mut LinkMap,
    l_prev: *mut LinkMap,
}

extern "C" {
    fn dlinfo(handle: *mut c_void, request: c_int, info: *mut c_void) -> c_int;
}

/// A `dlopen(NULL)` handle, closed on drop
struct MainHandle(*mut c_void);

impl MainHandle {
    fn open() -> Result<Self> {
        let handle = unsafe { libc::dlopen(ptr::null(), libc::RTLD_LAZY) };
        if handle.is_null() {
            Err(Error::Loader(last_dl_error()))
        } else {
            Ok(MainHandle(handle))
        }
    }

    fn link_map(&self) -> Result<*mut LinkMap> {
        let mut map: *mut LinkMap = ptr::null_mut();
        let out = &mut map as *mut *mut LinkMap as *mut c_void;
        let rc = unsafe { dlinfo(self.0, RTLD_DI_LINKMAP, out) };
        if rc != 0 || map.is_null() {
            return Err(Error::Loader(last_dl_error()));
        }
        Ok(map)
    }
}

impl Drop for MainHandle {
    fn drop(&mut self) {
        unsafe {
            libc::dlclose(self.0);
        }
    }
}

fn last_dl_error() -> String {
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        String::from("unknown dynamic linker error")
    } else {
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }
}

/// The real path of the running executable
///
/// `/proc/self/exe` can come back empty for some spawned processes; the first
/// argument from `/proc/self/cmdline` stands in then.
fn main_executable() -> Option<String> {
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| fs::canonicalize(exe).ok())
        .and_then(|exe| exe.to_str().map(String::from))
        .filter(|exe| !exe.is_empty());
    from_exe.or_else(|| {
        let cmdline = fs::read("/proc/self/cmdline").ok()?;
        let argv0 = argv0_from_cmdline(&cmdline)?;
        match fs::canonicalize(&argv0) {
            Ok(real) => real.to_str().map(String::from),
            Err(_) => Some(argv0),
        }
    })
}

/// The first argument of a NUL-separated command line, if it is non-empty UTF-8
fn argv0_from_cmdline(cmdline: &[u8]) -> Option<String> {
    let argv0 = cmdline.split(|&b| b == 0).next()?;
    std::str::from_utf8(argv0).ok().filter(|s| !s.is_empty()).map(String::from)
}

/// The path recorded for link-map entry `index`
///
/// The head entry has no name of its own and stands for the executable.
/// Entries named without a directory (the vDSO) have no file behind them and
/// are left unnamed.
fn entry_path(index: usize, name: Option<&str>, main: Option<&str>) -> Result<String> {
    let has_file = |name: &&str| name.contains(DIR_SEPARATOR) || (index == 0 && !name.is_empty());
    match name.filter(has_file) {
        Some(name) => strings::dup_bounded(name, MAX_PATH_LEN),
        None if index == 0 => Ok(main.map(String::from).unwrap_or_default()),
        None => Ok(String::new()),
    }
}

/// Walks the link map of the main program, head to tail
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkMapPlatform;

impl Platform for LinkMapPlatform {
    fn loaded_images(&self) -> Result<Vec<String>> {
        let handle = MainHandle::open()?;
        let mut entry = handle.link_map()?;
        let main = main_executable();

        let mut images = Vec::new();
        unsafe {
            while !(*entry).l_prev.is_null() {
                entry = (*entry).l_prev;
            }
            let mut index = 0usize;
            while !entry.is_null() {
                let name = (*entry).l_name;
                let named = if name.is_null() {
                    None
                } else {
                    CStr::from_ptr(name).to_str().ok()
                };
                images.push(entry_path(index, named, main.as_deref())?);
                entry = (*entry).l_next;
                index += 1;
            }
        }
        // The handle is released only after every name has been copied
        drop(handle);
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn head_of_link_map_is_the_executable() {
        let images = LinkMapPlatform.loaded_images().unwrap();
        let exe = fs::canonicalize(std::env::current_exe().unwrap()).unwrap();
        assert_eq!(Path::new(&images[0]), exe);
    }

    #[test]
    fn finds_the_c_library() {
        let images = LinkMapPlatform.loaded_images().unwrap();
        let libc_image = images.iter().find(|i| i.contains("libc.so") || i.contains("ld-musl"));
        assert!(libc_image.is_some(), "no C library in {:?}", images);
    }

    #[test]
    fn vdso_is_not_reported_as_a_path() {
        let images = LinkMapPlatform.loaded_images().unwrap();
        assert!(images.iter().all(|i| i.is_empty() || i.starts_with('/')), "{:?}", images);
    }

    #[test]
    fn entry_paths() {
        let main = Some("/opt/app/bin/app");
        assert_eq!(entry_path(0, None, main).unwrap(), "/opt/app/bin/app");
        assert_eq!(entry_path(0, Some(""), main).unwrap(), "/opt/app/bin/app");
        assert_eq!(entry_path(0, None, None).unwrap(), "");
        assert_eq!(entry_path(1, Some("/lib/libc.so.6"), main).unwrap(), "/lib/libc.so.6");
        assert_eq!(entry_path(1, Some("linux-vdso.so.1"), main).unwrap(), "");
        assert_eq!(entry_path(2, None, main).unwrap(), "");
    }

    #[test]
    fn first_command_line_argument() {
        assert_eq!(argv0_from_cmdline(b"/bin/app\0-x\0").as_deref(), Some("/bin/app"));
        assert_eq!(argv0_from_cmdline(b"app").as_deref(), Some("app"));
        assert_eq!(argv0_from_cmdline(b"\0x\0"), None);
        assert_eq!(argv0_from_cmdline(b""), None);
        assert_eq!(argv0_from_cmdline(b"\xff\xfe\0x\0"), None);
    }

    #[test]
    fn access_checks_existence_and_execution() {
        let exe = std::env::current_exe().unwrap();
        let exe = exe.to_str().unwrap();
        assert!(LinkMapPlatform.is_accessible(exe, Access::Exists));
        assert!(LinkMapPlatform.is_accessible(exe, Access::Execute));
        assert!(!LinkMapPlatform.is_accessible("/definitely/not/here", Access::Exists));
        assert!(!LinkMapPlatform.is_accessible("bad\0path", Access::Exists));
    }
}
