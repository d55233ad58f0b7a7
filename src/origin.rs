//! Expansion of `$ORIGIN`-relative path templates.

use crate::config::Config;
use crate::error::Result;
use crate::platform::DIR_SEPARATOR;
use crate::strings;

/// The marker that stands for the directory of the reference image
pub const ORIGIN: &str = "$ORIGIN";

impl Config {
    /// Replace a leading `$ORIGIN` in `template` with the directory holding
    /// `reference`
    ///
    /// Templates without the marker come back unchanged. The directory keeps
    /// its trailing separator, and separators right after the marker are
    /// dropped so the result never doubles one. A reference without any
    /// directory component expands against the current directory.
    pub fn expand(&self, template: &str, reference: &str) -> Result<String> {
        self.platform()?;

        let Some(rest) = template.strip_prefix(ORIGIN) else {
            return strings::dup_bounded(template, 0);
        };

        let current_dir;
        let directory = match reference.rfind(DIR_SEPARATOR) {
            Some(idx) => &reference[..idx + DIR_SEPARATOR.len_utf8()],
            None => {
                current_dir = format!(".{}", DIR_SEPARATOR);
                current_dir.as_str()
            }
        };
        let rest = if directory.ends_with(DIR_SEPARATOR) {
            rest.trim_start_matches(DIR_SEPARATOR)
        } else {
            rest
        };

        // At most template.len() + directory.len() - ORIGIN.len(); less when
        // separators were dropped
        let mut expanded = String::new();
        expanded.try_reserve_exact(directory.len() + rest.len())?;
        expanded.push_str(directory);
        expanded.push_str(rest);
        Ok(expanded)
    }
}
