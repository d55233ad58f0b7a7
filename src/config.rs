//! The configuration record every operation runs against.

use std::fmt;
use std::sync::OnceLock;

use crate::encoding::{self, WideChar, WideEncoding, WideString};
use crate::error::{Error, Result};
use crate::platform::{self, Native, Platform};

/// Settings and platform capability for one set of callers
///
/// A record built with [`Config::new`] belongs to its caller and starts
/// disabled; [`Config::process`] is the default for a whole program and
/// starts enabled. A disabled record answers every resolution operation
/// with [`Error::Disabled`].
pub struct Config {
    enabled: bool,
    wide_encoding: WideEncoding,
    platform: Box<dyn Platform + Send + Sync>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            enabled: false,
            wide_encoding: WideEncoding::native(),
            platform: Box::new(Native::default()),
        }
    }

    pub fn process() -> Self {
        Config::new().with_enabled(true)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_wide_encoding(mut self, encoding: WideEncoding) -> Self {
        self.wide_encoding = encoding;
        self
    }

    pub fn with_platform<P: Platform + Send + Sync + 'static>(mut self, platform: P) -> Self {
        self.platform = Box::new(platform);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn wide_encoding(&self) -> WideEncoding {
        self.wide_encoding
    }

    pub(crate) fn platform(&self) -> Result<&dyn Platform> {
        if self.enabled {
            Ok(self.platform.as_ref())
        } else {
            Err(Error::Disabled)
        }
    }

    /// Path of the loaded image whose file name matches the last segment of
    /// `name`, or of the main executable when `name` is `None`
    pub fn locate_image(&self, name: Option<&str>) -> Result<String> {
        let platform = self.platform()?;
        let base = match name {
            Some(name) => {
                let base = platform::base_name(name);
                if base.is_empty() {
                    return Err(Error::MissingBaseName(name.to_string()));
                }
                Some(base)
            }
            None => None,
        };
        platform.locate_image(base)
    }

    /// Every image loaded into the process, main executable first
    pub fn loaded_images(&self) -> Result<Vec<String>> {
        self.platform()?.loaded_images()
    }

    pub fn to_narrow(&self, wide: &[WideChar]) -> Result<String> {
        self.wide_encoding.to_narrow(wide)
    }

    pub fn to_wide(&self, narrow: &str) -> Result<WideString> {
        self.wide_encoding.to_wide(narrow)
    }

    pub fn read_env(&self, name: &str) -> Result<String> {
        encoding::read_env(name)
    }

    pub fn read_env_wide(&self, name: &[WideChar]) -> Result<String> {
        encoding::read_env_wide(self.wide_encoding, name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("enabled", &self.enabled)
            .field("wide_encoding", &self.wide_encoding)
            .finish_non_exhaustive()
    }
}

/// A record filled in with defaults on first access
///
/// Once filled, the record never changes. Concurrent first accesses are
/// safe; exactly one of them builds the record.
pub struct LazyConfig {
    enabled: bool,
    cell: OnceLock<Config>,
}

impl LazyConfig {
    /// A holder for the program-wide default record, enabled
    pub const fn process() -> Self {
        LazyConfig { enabled: true, cell: OnceLock::new() }
    }

    /// A holder for a caller-owned record, disabled unless `enabled` is set
    pub const fn new(enabled: bool) -> Self {
        LazyConfig { enabled, cell: OnceLock::new() }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> &Config {
        self.cell.get_or_init(|| Config::new().with_enabled(self.enabled))
    }

    /// Fill the record with `config` unless it was already filled, and return
    /// whichever record is now active
    pub fn get_or_init_with(&self, config: impl FnOnce() -> Config) -> &Config {
        self.cell.get_or_init(config)
    }
}

impl Default for LazyConfig {
    fn default() -> Self {
        LazyConfig::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakePlatform;

    #[test]
    fn explicit_records_start_disabled() {
        assert!(!Config::new().is_enabled());
        assert!(!Config::default().is_enabled());
        assert!(Config::process().is_enabled());
        assert!(!LazyConfig::default().get().is_enabled());
        assert!(LazyConfig::process().get().is_enabled());
    }

    #[test]
    fn default_encoding_is_native() {
        assert_eq!(Config::new().wide_encoding(), WideEncoding::native());
    }

    #[test]
    fn lazy_record_is_filled_once() {
        let lazy = LazyConfig::new(true);
        assert!(!lazy.is_initialized());
        let first = lazy.get() as *const Config;
        assert!(lazy.is_initialized());
        let second = lazy.get_or_init_with(Config::new) as *const Config;
        assert_eq!(first, second);
        assert!(lazy.get().is_enabled());
    }

    #[test]
    fn disabled_record_refuses_image_lookups() {
        let config = Config::new().with_platform(FakePlatform::with_images(&["/bin/app"]));
        assert!(matches!(config.locate_image(None), Err(Error::Disabled)));
        assert!(matches!(config.loaded_images(), Err(Error::Disabled)));
    }

    #[test]
    fn utilities_work_while_disabled() {
        let config = Config::new();
        let wide = config.to_wide("äβ").unwrap();
        assert_eq!(config.to_narrow(wide.as_units()).unwrap(), "äβ");
        assert_eq!(config.read_env("SELFPATH_SURELY_NOT_SET_4711").unwrap(), "");
    }

    #[cfg(not(windows))]
    #[test]
    fn lookup_uses_only_the_final_segment() {
        let config = Config::process().with_platform(FakePlatform::with_images(&[
            "/opt/app/bin/app",
            "/usr/lib/libfoo.so.2",
        ]));
        let libfoo = "/usr/lib/libfoo.so.2";
        assert_eq!(config.locate_image(Some("/elsewhere/libfoo.so.2")).unwrap(), libfoo);
        assert_eq!(config.locate_image(Some("libfoo.so.2")).unwrap(), libfoo);
        assert_eq!(config.locate_image(None).unwrap(), "/opt/app/bin/app");
        assert!(matches!(config.locate_image(Some("/usr/lib/")), Err(Error::MissingBaseName(_))));
        assert!(matches!(
            config.locate_image(Some("nonexistent-name-xyz")),
            Err(Error::ImageNotFound(_))
        ));
    }

    #[test]
    fn empty_loader_yields_no_images_error() {
        let config = Config::process().with_platform(FakePlatform::default());
        assert!(matches!(config.locate_image(None), Err(Error::NoImages)));
    }
}
