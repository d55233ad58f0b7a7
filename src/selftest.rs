//! A diagnostic pass over the operations of a [`Config`].

use crate::config::Config;
use crate::strings;

/// Text samples covering ASCII, two- and three-byte sequences, and a
/// character outside the basic multilingual plane
pub const SAMPLES: [&str; 4] = ["abcde", "äβ©☃☂", "äβ❤©☃☂", "𝄞♩"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl Check {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Check { name: name.into(), passed, detail: detail.into() }
    }
}

fn round_trip(config: &Config, sample: &str) -> Check {
    let name = format!("round trip {:?}", sample);
    match config.to_wide(sample).and_then(|wide| config.to_narrow(wide.as_units())) {
        Ok(back) if back == sample => {
            Check::new(name, true, format!("{} units", sample.chars().count()))
        }
        Ok(back) => Check::new(name, false, format!("came back as {:?}", back)),
        Err(e) => Check::new(name, false, e.to_string()),
    }
}

fn bounded_copies(sample: &str) -> Check {
    let name = format!("bounded copies of {:?}", sample);
    let chars: Vec<char> = sample.chars().collect();
    for n in 0..=chars.len() {
        let expected: String = if n == 0 {
            sample.to_string()
        } else {
            chars[..n].iter().collect()
        };
        match strings::dup_bounded(sample, n) {
            Ok(copy) if copy == expected => {}
            Ok(copy) => return Check::new(name, false, format!("bound {} gave {:?}", n, copy)),
            Err(e) => return Check::new(name, false, e.to_string()),
        }
    }
    Check::new(name, true, format!("{} bounds", chars.len() + 1))
}

fn main_image(config: &Config) -> Check {
    match config.locate_image(None) {
        Ok(path) if !path.is_empty() => Check::new("main image", true, path),
        Ok(_) => Check::new("main image", false, "empty path"),
        Err(e) => Check::new("main image", false, e.to_string()),
    }
}

/// Run every check; none of them stops the others
pub fn run(config: &Config) -> Vec<Check> {
    let mut checks = Vec::new();
    for sample in SAMPLES {
        checks.push(round_trip(config, sample));
        checks.push(bounded_copies(sample));
    }
    checks.push(main_image(config));
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakePlatform;

    #[test]
    fn all_checks_pass_on_a_working_record() {
        let config = Config::process().with_platform(FakePlatform::with_images(&["/bin/app"]));
        let checks = run(&config);
        assert_eq!(checks.len(), 2 * SAMPLES.len() + 1);
        assert!(checks.iter().all(|c| c.passed), "{:?}", checks);
    }

    #[test]
    fn disabled_record_fails_only_the_image_check() {
        let checks = run(&Config::new());
        let failed: Vec<_> = checks.iter().filter(|c| !c.passed).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "main image");
    }
}
