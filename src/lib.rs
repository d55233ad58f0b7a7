//! Self-location for relocatable programs.
//!
//! Finds the file behind the running executable or any library loaded into
//! it, expands `$ORIGIN` templates against that location, searches
//! `PATH`-style lists, and converts between UTF-8 and the platform's wide
//! strings. All operations go through a [`Config`] record.
//!
//! ```no_run
//! use selfpath::{Access, Config};
//!
//! let config = Config::process();
//! let exe = config.locate_image(None)?;
//! let data = config.expand("$ORIGIN/../share/app", &exe)?;
//! let tool = config.find_in_path(&config.default_path_list()?, "git", Access::Execute)?;
//! # Ok::<(), selfpath::Error>(())
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod inspect;
pub mod origin;
pub mod platform;
pub mod search_path;
pub mod selftest;
pub mod strings;

pub use config::{Config, LazyConfig};
pub use encoding::{WideChar, WideEncoding, WideString};
pub use error::{Error, Result};
pub use platform::{Access, Platform};
pub use strings::{dup_bounded, dup_bounded_wide};
