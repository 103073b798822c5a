//! Image preprocessing before display
//!
//! Two steps run on every decoded image:
//!
//! 1. EXIF orientation is baked into the pixels.
//! 2. The color profile is normalized: an embedded profile has its color
//!    space trusted, untagged images optionally get sRGB, and a
//!    user-selected target profile can override both.

use tracing::debug;

use crate::builtin::BuiltinProfile;
use crate::orientation::{ExifOrientation, read_orientation_flag};
use crate::raster::{Image, MAX_QUALITY};
use crate::resolve::load_profile;
use crate::Result;

/// User preferences that drive preprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Target profile: a built-in name or a path to an ICC file
    pub color_profile: String,
    /// Normalize images without an embedded profile too
    pub apply_to_all: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            color_profile: BuiltinProfile::Srgb.name().to_string(),
            apply_to_all: false,
        }
    }
}

/// Run the full preprocessing chain in place
pub fn preprocess<'a>(image: &'a mut Image, options: &PreprocessOptions) -> Result<&'a mut Image> {
    image.set_quality(MAX_QUALITY);
    apply_exif_orientation(image)?;
    normalize_color_profile(image, &options.color_profile, options.apply_to_all)
}

/// Rotate and mirror according to the EXIF orientation flag.
///
/// Runs at most once per image: later calls return identity without
/// touching the pixels. Missing EXIF data means no change.
pub fn apply_exif_orientation(image: &mut Image) -> Result<ExifOrientation> {
    if image.orientation_applied() {
        return Ok(ExifOrientation::IDENTITY);
    }

    let flag = match image.exif() {
        Some(block) => read_orientation_flag(block)?,
        None => None,
    };
    let orientation = flag.map(ExifOrientation::from_flag).unwrap_or_default();

    if !orientation.is_identity() {
        debug!(?flag, ?orientation, "applying EXIF orientation");
    }
    image.apply_orientation(orientation);
    Ok(orientation)
}

/// Normalize the image's color profile and working color space.
///
/// Without `apply_to_all`, images lacking an embedded profile are left
/// alone. Otherwise the embedded profile (or sRGB when there is none)
/// sets the color space, then `target` is attached on top if it resolves.
/// An unresolvable `target` is not an error.
pub fn normalize_color_profile<'a>(
    image: &'a mut Image,
    target: &str,
    apply_to_all: bool,
) -> Result<&'a mut Image> {
    let embedded_space = image.color_profile().map(|p| p.color_space());

    if !apply_to_all && embedded_space.is_none() {
        debug!("no embedded color profile, skipping normalization");
        return Ok(image);
    }

    match embedded_space {
        Some(space) => image.set_color_space(space),
        None => {
            let srgb = BuiltinProfile::Srgb.load();
            let space = srgb.color_space();
            image.add_profile(srgb)?;
            image.set_color_space(space);
        }
    }

    if let Some(profile) = load_profile(target) {
        let space = profile.color_space();
        debug!(target, %space, "attaching target color profile");
        image.add_profile(profile)?;
        image.set_color_space(space);
    }

    Ok(image)
}
