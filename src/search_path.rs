use crate::config::Config;
use crate::error::Result;
use crate::platform::{Access, DIR_SEPARATOR, PATH_LIST_SEPARATOR};
use crate::strings;

/// The directories listed in `path_list`, in order
///
/// Empty entries are kept (they turn into candidates rooted at the
/// separator); an empty list or a trailing separator adds no entry.
pub fn directories(path_list: &str) -> impl Iterator<Item = &str> {
    path_list.split_terminator(PATH_LIST_SEPARATOR)
}

fn candidate(directory: &str, name: &str) -> Result<String> {
    let mut cand = String::new();
    cand.try_reserve_exact(directory.len() + DIR_SEPARATOR.len_utf8() + name.len())?;
    cand.push_str(directory);
    cand.push(DIR_SEPARATOR);
    cand.push_str(name);
    Ok(cand)
}

impl Config {
    /// The first `directory/name` from `path_list` that passes the access check
    ///
    /// When no directory has a match, `name` comes back unchanged, so callers
    /// spawning a program can hand it to the OS as-is; that fallback is not a
    /// successful resolution.
    pub fn find_in_path(&self, path_list: &str, name: &str, access: Access) -> Result<String> {
        let platform = self.platform()?;
        for directory in directories(path_list) {
            let cand = candidate(directory, name)?;
            if platform.is_accessible(&cand, access) {
                return Ok(cand);
            }
        }
        strings::dup_bounded(name, 0)
    }

    /// The `PATH` of this process; empty when unset
    pub fn default_path_list(&self) -> Result<String> {
        self.read_env("PATH")
    }
}

/* Note [Search Path]

Resolution follows the order of the list, the way a shell looks up a
command: the first directory holding an acceptable file wins, even if a
later directory holds a "better" one. Directories are not checked for
existence on their own; the candidate file is.

*/

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::platform::fake::FakePlatform;

    fn config(platform: FakePlatform) -> Config {
        Config::process().with_platform(platform)
    }

    #[test]
    fn returns_first_executable_candidate() {
        let fake = FakePlatform::default()
            .with_file("/a/tool", false)
            .with_file("/b/tool", true)
            .with_file("/c/tool", true);
        let config = config(fake);
        assert_eq!(config.find_in_path("/a:/b:/c", "tool", Access::Execute).unwrap(), "/b/tool");
        assert_eq!(config.find_in_path("/a:/b:/c", "tool", Access::Exists).unwrap(), "/a/tool");
    }

    #[test]
    fn unresolved_name_comes_back_unchanged() {
        let config = config(FakePlatform::default().with_file("/etc/hosts", false));
        assert_eq!(config.find_in_path("/a:/b:/c", "tool", Access::Execute).unwrap(), "tool");
        assert_eq!(config.find_in_path("/opt:/etc", "hosts", Access::Execute).unwrap(), "hosts");
        let found = config.find_in_path("/opt:/etc", "hosts", Access::Exists).unwrap();
        assert_eq!(found, "/etc/hosts");
        assert_eq!(config.find_in_path("::::", "hosts", Access::Exists).unwrap(), "hosts");
        assert_eq!(config.find_in_path("", "hosts", Access::Exists).unwrap(), "hosts");
    }

    #[test]
    fn empty_entries_are_rooted_candidates() {
        let config = config(FakePlatform::default().with_file("/tool", true));
        assert_eq!(config.find_in_path("/a::/b", "tool", Access::Execute).unwrap(), "/tool");
    }

    #[test]
    fn list_splitting() {
        assert_eq!(directories("/a:/b").collect::<Vec<_>>(), ["/a", "/b"]);
        assert_eq!(directories("/a:").collect::<Vec<_>>(), ["/a"]);
        assert_eq!(directories("::").collect::<Vec<_>>(), ["", ""]);
        assert_eq!(directories("").count(), 0);
    }

    #[test]
    fn disabled_record_has_no_fallback() {
        let fake = FakePlatform::default().with_file("/b/tool", true);
        let config = Config::new().with_platform(fake);
        let found = config.find_in_path("/a:/b", "tool", Access::Execute);
        assert!(matches!(found, Err(Error::Disabled)));
    }
}
