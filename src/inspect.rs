use object::{Architecture, BinaryFormat, Endianness, Object};
use std::fs;
use std::path::{Path, PathBuf};

/// What the file behind a loaded image says about itself
#[derive(Debug)]
pub struct ImageSummary {
    pub filename: PathBuf,
    pub format: BinaryFormat,
    pub architecture: Architecture,
    pub endianness: Endianness,
    pub bit_size: usize,
}

pub fn endian_as_str(end: Endianness) -> &'static str {
    match end {
        Endianness::Little => "little",
        Endianness::Big => "big",
    }
}

/// Parse the image at `path` from disk
///
/// The loaded copy is never read; a file replaced on disk after loading
/// describes the new file.
pub fn summarize_image(path: &Path) -> anyhow::Result<ImageSummary> {
    let bytes = fs::read(path)?;
    let obj = object::File::parse(bytes.as_slice())?;
    Ok(ImageSummary {
        filename: path.to_path_buf(),
        format: obj.format(),
        architecture: obj.architecture(),
        endianness: if obj.is_little_endian() { Endianness::Little } else { Endianness::Big },
        bit_size: if obj.is_64() { 64 } else { 32 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_the_running_executable() {
        let exe = std::env::current_exe().unwrap();
        let summ = summarize_image(&exe).unwrap();
        assert_eq!(summ.bit_size, 8 * std::mem::size_of::<usize>());
        assert_eq!(summ.endianness == Endianness::Little, cfg!(target_endian = "little"));
        #[cfg(target_os = "linux")]
        assert_eq!(summ.format, BinaryFormat::Elf);
    }

    #[test]
    fn rejects_files_that_are_not_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain text").unwrap();
        assert!(summarize_image(&path).is_err());
    }
}
