use std::collections::HashSet;

use crate::error::Result;
use crate::platform::{Access, Platform};

/// A scripted loader and file system
#[derive(Debug, Default, Clone)]
pub struct FakePlatform {
    pub images: Vec<String>,
    pub existing: HashSet<String>,
    pub executable: HashSet<String>,
}

impl FakePlatform {
    pub fn with_images(images: &[&str]) -> Self {
        FakePlatform {
            images: images.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: &str, executable: bool) -> Self {
        self.existing.insert(path.to_string());
        if executable {
            self.executable.insert(path.to_string());
        }
        self
    }
}

impl Platform for FakePlatform {
    fn loaded_images(&self) -> Result<Vec<String>> {
        Ok(self.images.clone())
    }

    fn is_accessible(&self, candidate: &str, access: Access) -> bool {
        match access {
            Access::Exists => self.existing.contains(candidate),
            Access::Execute => self.executable.contains(candidate),
        }
    }
}
