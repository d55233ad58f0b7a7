//! Conversion between UTF-8 and the platform wide character representation,
//! and environment lookups that go through it.

use std::env;
use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::strings;

/// One code unit of a platform wide string (the width of `wchar_t`).
#[cfg(windows)]
pub type WideChar = u16;
/// One code unit of a platform wide string (the width of `wchar_t`).
#[cfg(not(windows))]
pub type WideChar = u32;

/// An owned wide string holding exactly its units, without a terminator
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WideString(Vec<WideChar>);

impl WideString {
    pub fn from_units(units: Vec<WideChar>) -> Self {
        WideString(units)
    }

    pub fn as_units(&self) -> &[WideChar] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with a trailing NUL unit, for handing to OS calls
    pub fn to_nul_terminated(&self) -> Vec<WideChar> {
        let mut units = Vec::with_capacity(self.0.len() + 1);
        units.extend_from_slice(&self.0);
        units.push(0);
        units
    }
}

/// The in-memory encoding of wide strings: unit width and byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WideEncoding {
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl WideEncoding {
    /// The encoding matching this platform's `wchar_t` width and byte order
    pub fn native() -> Self {
        let little = cfg!(target_endian = "little");
        match (mem::size_of::<WideChar>(), little) {
            (2, true) => WideEncoding::Utf16Le,
            (2, false) => WideEncoding::Utf16Be,
            (_, true) => WideEncoding::Utf32Le,
            (_, false) => WideEncoding::Utf32Be,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WideEncoding::Utf16Le => "UTF-16LE",
            WideEncoding::Utf16Be => "UTF-16BE",
            WideEncoding::Utf32Le => "UTF-32LE",
            WideEncoding::Utf32Be => "UTF-32BE",
        }
    }

    fn unit_size(self) -> usize {
        match self {
            WideEncoding::Utf16Le | WideEncoding::Utf16Be => 2,
            WideEncoding::Utf32Le | WideEncoding::Utf32Be => 4,
        }
    }

    /// Most UTF-8 bytes `units` code units can decode to: a UTF-16 unit
    /// yields up to 3 (a surrogate pair 4), a UTF-32 unit up to 4
    fn utf8_upper_bound(self, units: usize) -> usize {
        match self.unit_size() {
            2 => units * 3,
            _ => units * 4,
        }
    }

    fn is_little_endian(self) -> bool {
        matches!(self, WideEncoding::Utf16Le | WideEncoding::Utf32Le)
    }

    /// Units are stored in native integers; a foreign byte order means each
    /// unit's bytes must be swapped on the way in and out.
    fn swaps(self) -> bool {
        self.is_little_endian() != cfg!(target_endian = "little")
    }

    /// A converter only exists for encodings whose unit fills a `WideChar` exactly.
    fn converter(self) -> Result<Self> {
        if self.unit_size() == mem::size_of::<WideChar>() {
            Ok(self)
        } else {
            Err(Error::UnsupportedEncoding(self.name()))
        }
    }

    fn order(self, unit: WideChar) -> WideChar {
        if self.swaps() {
            unit.swap_bytes()
        } else {
            unit
        }
    }

    /// Convert a wide string in this encoding to UTF-8
    pub fn to_narrow(self, wide: &[WideChar]) -> Result<String> {
        let enc = self.converter()?;
        let wide = &wide[..wide.iter().position(|&u| u == 0).unwrap_or(wide.len())];

        let mut out = String::new();
        out.try_reserve_exact(enc.utf8_upper_bound(wide.len()))?;

        let units = wide.iter().map(|&u| enc.order(u));
        if enc.unit_size() == 2 {
            for decoded in char::decode_utf16(units.map(|u| u as u16)) {
                out.push(decoded.map_err(|_| Error::Encoding(enc.name()))?);
            }
        } else {
            for unit in units {
                let c = char::from_u32(unit as u32).ok_or(Error::Encoding(enc.name()))?;
                out.push(c);
            }
        }
        out.shrink_to_fit();
        Ok(out)
    }

    /// Convert UTF-8 to a wide string in this encoding
    pub fn to_wide(self, s: &str) -> Result<WideString> {
        let enc = self.converter()?;
        let mut buffer: Vec<WideChar> = Vec::new();
        buffer.try_reserve_exact(s.len())?;
        if enc.unit_size() == 2 {
            buffer.extend(s.encode_utf16().map(|u| enc.order(WideChar::from(u))));
        } else {
            buffer.extend(s.chars().map(|c| enc.order(u32::from(c) as WideChar)));
        }
        strings::dup_bounded_wide(&buffer, 0)
    }
}

impl Default for WideEncoding {
    fn default() -> Self {
        WideEncoding::native()
    }
}

impl fmt::Display for WideEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WideEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        match normalized.as_str() {
            "UTF-16LE" => Ok(WideEncoding::Utf16Le),
            "UTF-16BE" => Ok(WideEncoding::Utf16Be),
            "UTF-32LE" => Ok(WideEncoding::Utf32Le),
            "UTF-32BE" => Ok(WideEncoding::Utf32Be),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

/// Look up an environment variable; unset variables read as the empty string
///
/// Names the OS cannot represent (empty, or containing `=` or NUL) can never
/// be set, so they read as unset too.
pub fn read_env(name: &str) -> Result<String> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Ok(String::new());
    }
    match env::var_os(name) {
        None => Ok(String::new()),
        Some(value) => {
            let value = value.into_string().map_err(|_| Error::Encoding("UTF-8"))?;
            strings::dup_bounded(&value, 0)
        }
    }
}

/// Look up an environment variable named by a wide string
pub fn read_env_wide(encoding: WideEncoding, name: &[WideChar]) -> Result<String> {
    read_env(&encoding.to_narrow(name)?)
}
