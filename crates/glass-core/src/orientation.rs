//! EXIF orientation
//!
//! Cameras record how the sensor was held in the EXIF `Orientation` tag
//! (values 1-8) instead of rotating pixels. Each value maps to a clockwise
//! rotation followed by an optional horizontal mirror.
//!
//! | flag | signed degrees | rotation | mirror |
//! |------|----------------|----------|--------|
//! | 1    | 0              | 0        | no     |
//! | 2    | -360           | 0        | yes    |
//! | 3    | 180            | 180      | no     |
//! | 4    | -180           | 180      | yes    |
//! | 5    | -90            | 90       | yes    |
//! | 6    | 90             | 90       | no     |
//! | 7    | -270           | 270      | yes    |
//! | 8    | 270            | 270      | no     |
//!
//! The signed form packs mirror intent into the sign and is kept for
//! compatibility with stored values; everything else works on
//! [`ExifOrientation`].

use tracing::warn;

use crate::types::Rotation;
use crate::{Error, Result};

/// Rotation and mirroring needed to display an image upright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExifOrientation {
    /// Clockwise rotation, applied first
    pub rotation: Rotation,
    /// Mirror about the vertical axis, applied after rotating
    pub mirror_horizontal: bool,
}

impl ExifOrientation {
    /// No change
    pub const IDENTITY: Self = Self {
        rotation: Rotation::None,
        mirror_horizontal: false,
    };

    /// Orientation for an EXIF flag. Values outside 1-8 are identity.
    pub fn from_flag(flag: u32) -> Self {
        let (rotation, mirror_horizontal) = match flag {
            2 => (Rotation::None, true),
            3 => (Rotation::Cw180, false),
            4 => (Rotation::Cw180, true),
            5 => (Rotation::Cw90, true),
            6 => (Rotation::Cw90, false),
            7 => (Rotation::Cw270, true),
            8 => (Rotation::Cw270, false),
            _ => (Rotation::None, false),
        };
        Self {
            rotation,
            mirror_horizontal,
        }
    }

    /// Decode the signed-degree form: magnitude is rotation, a negative sign means mirror.
    ///
    /// Returns `None` for magnitudes that are not a multiple of 90, and for
    /// `i32::MIN`, which has no magnitude in `i32`.
    pub fn from_signed_degrees(degrees: i32) -> Option<Self> {
        let rotation = Rotation::from_degrees(degrees.checked_abs()?)?;
        Some(Self {
            rotation,
            mirror_horizontal: degrees < 0,
        })
    }

    /// Encode to the signed-degree form; a mirror with no rotation is `-360`.
    pub fn to_signed_degrees(&self) -> i32 {
        match (self.rotation, self.mirror_horizontal) {
            (rotation, false) => rotation.degrees(),
            (Rotation::None, true) => -360,
            (rotation, true) => -rotation.degrees(),
        }
    }

    /// Check whether applying this orientation would leave pixels untouched
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether width and height trade places once applied
    pub fn swaps_dimensions(&self) -> bool {
        self.rotation.swaps_dimensions()
    }
}

/// Signed rotation in degrees for an orientation flag; absent or unknown flags give 0
pub fn orientation_degrees(flag: Option<u32>) -> i32 {
    flag.map(|f| ExifOrientation::from_flag(f).to_signed_degrees())
        .unwrap_or(0)
}

/// Read the orientation flag from a raw EXIF block.
///
/// The block is TIFF-structured, optionally preceded by the `Exif\0\0`
/// APP1 marker. A block that cannot be parsed at all is treated like a
/// missing one. A present tag whose value is not an integer is
/// [`Error::MalformedMetadata`].
pub fn read_orientation_flag(exif_block: &[u8]) -> Result<Option<u32>> {
    let raw = exif_block.strip_prefix(b"Exif\0\0").unwrap_or(exif_block);
    let exif = match exif::Reader::new().read_raw(raw.to_vec()) {
        Ok(exif) => exif,
        Err(err) => {
            warn!(%err, "ignoring unreadable EXIF block");
            return Ok(None);
        }
    };

    match exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY) {
        Some(field) => parse_orientation_value(&field.value).map(Some),
        None => Ok(None),
    }
}

fn parse_orientation_value(value: &exif::Value) -> Result<u32> {
    match value {
        exif::Value::Byte(_) | exif::Value::Short(_) | exif::Value::Long(_) => value
            .get_uint(0)
            .ok_or_else(|| Error::MalformedMetadata("orientation tag has no value".into())),
        exif::Value::Ascii(parts) => {
            let text = parts
                .first()
                .map(|p| String::from_utf8_lossy(p).trim().to_string())
                .unwrap_or_default();
            text.parse::<u32>().map_err(|_| {
                Error::MalformedMetadata(format!("orientation tag is not a number: {:?}", text))
            })
        }
        other => Err(Error::MalformedMetadata(format!(
            "unexpected orientation value: {:?}",
            other
        ))),
    }
}

/// Hand-built EXIF blocks shared by the unit tests
#[cfg(test)]
pub(crate) mod test_blocks {
    const ORIENTATION_TAG: u16 = 0x0112;

    /// Little-endian TIFF block with a single IFD0 entry
    pub(crate) fn tiff_with_entry(tag: u16, type_id: u16, count: u32, value: [u8; 4]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"II");
        buf.extend_from_slice(&42u16.to_le_bytes());
        buf.extend_from_slice(&8u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&tag.to_le_bytes());
        buf.extend_from_slice(&type_id.to_le_bytes());
        buf.extend_from_slice(&count.to_le_bytes());
        buf.extend_from_slice(&value);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf
    }

    /// SHORT orientation value
    pub(crate) fn orientation_block(flag: u16) -> Vec<u8> {
        let v = flag.to_le_bytes();
        tiff_with_entry(ORIENTATION_TAG, 3, 1, [v[0], v[1], 0, 0])
    }

    /// 4-byte inline ASCII orientation value
    pub(crate) fn text_orientation_block(text: &[u8; 4]) -> Vec<u8> {
        tiff_with_entry(ORIENTATION_TAG, 2, 4, *text)
    }
}
