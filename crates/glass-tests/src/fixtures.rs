//! Hand-assembled metadata and scratch files

use std::path::PathBuf;

const ORIENTATION_TAG: u16 = 0x0112;
const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;

/// A single-entry TIFF IFD holding the orientation tag
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationExif {
    pub big_endian: bool,
    /// Prefix with the `Exif\0\0` marker found in JPEG APP1 segments
    pub app1_header: bool,
}

impl OrientationExif {
    /// Block with a SHORT orientation value
    pub fn flag(&self, flag: u16) -> Vec<u8> {
        let mut value = self.u16_bytes(flag).to_vec();
        value.extend_from_slice(&[0, 0]);
        self.block(TYPE_SHORT, 1, &value)
    }

    /// Block with a 4-byte ASCII orientation value, e.g. `b"6\0\0\0"`
    pub fn ascii(&self, text: &[u8; 4]) -> Vec<u8> {
        self.block(TYPE_ASCII, 4, text)
    }

    fn block(&self, value_type: u16, count: u32, inline: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        if self.app1_header {
            buf.extend_from_slice(b"Exif\0\0");
        }
        buf.extend_from_slice(if self.big_endian { b"MM" } else { b"II" });
        buf.extend_from_slice(&self.u16_bytes(42));
        buf.extend_from_slice(&self.u32_bytes(8));
        buf.extend_from_slice(&self.u16_bytes(1));
        buf.extend_from_slice(&self.u16_bytes(ORIENTATION_TAG));
        buf.extend_from_slice(&self.u16_bytes(value_type));
        buf.extend_from_slice(&self.u32_bytes(count));
        buf.extend_from_slice(inline);
        buf.extend_from_slice(&self.u32_bytes(0));
        buf
    }

    fn u16_bytes(&self, v: u16) -> [u8; 2] {
        if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() }
    }

    fn u32_bytes(&self, v: u32) -> [u8; 4] {
        if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() }
    }
}

/// Little-endian orientation block without an APP1 header
pub fn orientation_exif(flag: u16) -> Vec<u8> {
    OrientationExif::default().flag(flag)
}

/// Per-test scratch directory under the system temp dir
pub fn scratch_dir(test: &str) -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir()
        .join(format!("glass-tests-{}", std::process::id()))
        .join(test);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write ICC bytes into the test's scratch directory
pub fn write_icc(test: &str, name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
    let path = scratch_dir(test)?.join(name);
    std::fs::write(&path, data)?;
    Ok(path)
}
