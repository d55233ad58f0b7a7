//! Bounded copies of narrow and wide strings.
//!
//! Every result is a fresh, exactly sized buffer, so nothing handed back to
//! a caller aliases memory owned by the loader or the OS.

use crate::encoding::{WideChar, WideString};
use crate::error::Result;

/// Copy at most `max_chars` characters of `s`, or all of it when `max_chars` is 0
///
/// The bound counts Unicode scalar values, so a copy never ends in the middle
/// of a multi-byte sequence.
pub fn dup_bounded(s: &str, max_chars: usize) -> Result<String> {
    let end = if max_chars == 0 {
        s.len()
    } else {
        s.char_indices().nth(max_chars).map_or(s.len(), |(idx, _)| idx)
    };
    let mut out = String::new();
    out.try_reserve_exact(end)?;
    out.push_str(&s[..end]);
    Ok(out)
}

/// Copy at most `max_units` code units of `s`, or all of it when `max_units` is 0
///
/// A NUL unit ends the source, as it would for a buffer filled in by an OS call.
pub fn dup_bounded_wide(s: &[WideChar], max_units: usize) -> Result<WideString> {
    let len = s.iter().position(|&u| u == 0).unwrap_or(s.len());
    let len = if max_units == 0 { len } else { len.min(max_units) };
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.extend_from_slice(&s[..len]);
    Ok(WideString::from_units(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII: &str = "abcde";
    const NON_ASCII: &str = "äβ©☃☂";

    #[test]
    fn zero_bound_copies_everything() {
        for s in [ASCII, NON_ASCII, ""] {
            assert_eq!(dup_bounded(s, 0).unwrap(), s);
        }
    }

    #[test]
    fn bound_counts_characters() {
        for s in [ASCII, NON_ASCII] {
            let chars: Vec<char> = s.chars().collect();
            for n in 1..chars.len() {
                let copy = dup_bounded(s, n).unwrap();
                assert_eq!(copy.chars().count(), n);
                assert_eq!(copy, chars[..n].iter().collect::<String>());
            }
        }
    }

    #[test]
    fn bound_past_the_end_copies_everything() {
        assert_eq!(dup_bounded(NON_ASCII, 64).unwrap(), NON_ASCII);
    }

    #[test]
    fn copy_is_exactly_sized() {
        let copy = dup_bounded(NON_ASCII, 2).unwrap();
        assert_eq!(copy, "äβ");
        assert_eq!(copy.capacity(), copy.len());
    }

    #[test]
    fn wide_copy_respects_bound_and_terminator() {
        let units: Vec<WideChar> = "tool".chars().map(|c| c as WideChar).collect();
        assert_eq!(dup_bounded_wide(&units, 0).unwrap().as_units(), &units[..]);
        assert_eq!(dup_bounded_wide(&units, 2).unwrap().as_units(), &units[..2]);

        let mut padded = units.clone();
        padded.extend([0, 0, 0]);
        let copy = dup_bounded_wide(&padded, 0).unwrap();
        assert_eq!(copy.as_units(), &units[..]);
        assert_eq!(copy.len(), 4);
    }
}
