//! ICC Color Profile handling
//!
//! Wraps `moxcms::ColorProfile` and remembers where each profile came from,
//! so the normalizer can tell a built-in profile from an embedded one.

use std::path::{Path, PathBuf};

use moxcms::{
    Chromaticity, ColorPrimaries, DataColorSpace, ProfileText, RenderingIntent, WHITE_POINT_D50,
    WHITE_POINT_D65, XyY, curve_from_gamma,
};

use crate::builtin::BuiltinProfile;
use crate::types::{ColorSpace, ProfileClass};
use crate::{Error, Result};

/// Where a profile was obtained from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOrigin {
    /// One of the fixed built-in profiles
    Builtin(BuiltinProfile),
    /// Read from an ICC file on disk
    File(PathBuf),
    /// Embedded in decoded image data
    Embedded,
}

/// ICC Color Profile
#[derive(Debug, Clone)]
pub struct ColorProfile {
    inner: moxcms::ColorProfile,
    origin: ProfileOrigin,
    /// Bytes the profile was parsed from, written back out unchanged
    icc: Option<Vec<u8>>,
}

impl ColorProfile {
    /// Create a profile from raw ICC data, e.g. a block embedded in an image
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let inner = moxcms::ColorProfile::new_from_slice(data)
            .map_err(|e| Error::ProfileParse(format!("{:?}", e)))?;
        Ok(Self {
            inner,
            origin: ProfileOrigin::Embedded,
            icc: Some(data.to_vec()),
        })
    }

    /// Read an ICC profile from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut profile = Self::from_bytes(&data)?;
        profile.origin = ProfileOrigin::File(path.to_path_buf());
        Ok(profile)
    }

    /// sRGB IEC61966-2.1
    pub fn new_srgb() -> Self {
        Self::builtin(moxcms::ColorProfile::new_srgb(), BuiltinProfile::Srgb)
    }

    /// Adobe RGB (1998)
    pub fn new_adobe_rgb_1998() -> Self {
        Self::builtin(
            moxcms::ColorProfile::new_adobe_rgb(),
            BuiltinProfile::AdobeRgb1998,
        )
    }

    /// Apple RGB: D65 white, gamma 1.8
    pub fn new_apple_rgb() -> Self {
        let primaries = ColorPrimaries {
            red: Chromaticity::new(0.625, 0.340),
            green: Chromaticity::new(0.280, 0.595),
            blue: Chromaticity::new(0.155, 0.070),
        };
        Self::builtin(
            matrix_shaper(WHITE_POINT_D65, primaries, 1.8, "Apple RGB"),
            BuiltinProfile::AppleRgb,
        )
    }

    /// ColorMatch RGB: D50 white, gamma 1.8
    pub fn new_color_match_rgb() -> Self {
        let primaries = ColorPrimaries {
            red: Chromaticity::new(0.630, 0.340),
            green: Chromaticity::new(0.295, 0.605),
            blue: Chromaticity::new(0.150, 0.075),
        };
        Self::builtin(
            matrix_shaper(WHITE_POINT_D50, primaries, 1.8, "ColorMatch RGB"),
            BuiltinProfile::ColorMatchRgb,
        )
    }

    /// Coated FOGRA39 (ISO 12647-2:2004) press characterization
    ///
    /// Only the header-level characterization is carried. There are no
    /// A2B/B2A tables, so no pixel transform can target this profile.
    pub fn new_coated_fogra39() -> Self {
        Self::builtin(
            cmyk_characterization("Coated FOGRA39 (ISO 12647-2:2004)"),
            BuiltinProfile::CoatedFogra39,
        )
    }

    /// U.S. Web Coated (SWOP) v2 press characterization
    ///
    /// Same limitation as [`ColorProfile::new_coated_fogra39`].
    pub fn new_us_web_coated_swop() -> Self {
        Self::builtin(
            cmyk_characterization("U.S. Web Coated (SWOP) v2"),
            BuiltinProfile::UsWebCoatedSwop,
        )
    }

    fn builtin(inner: moxcms::ColorProfile, which: BuiltinProfile) -> Self {
        Self {
            inner,
            origin: ProfileOrigin::Builtin(which),
            icc: None,
        }
    }

    /// Get the profile's color space
    pub fn color_space(&self) -> ColorSpace {
        self.inner.color_space.into()
    }

    /// Get the profile connection space (PCS)
    pub fn pcs(&self) -> ColorSpace {
        self.inner.pcs.into()
    }

    /// Get the profile class
    pub fn profile_class(&self) -> ProfileClass {
        self.inner.profile_class.into()
    }

    /// Check if this is a matrix-shaper profile
    pub fn is_matrix_shaper(&self) -> bool {
        self.inner.is_matrix_shaper()
    }

    /// Where this profile came from
    pub fn origin(&self) -> &ProfileOrigin {
        &self.origin
    }

    /// The built-in this profile was created from, if any
    pub fn builtin_kind(&self) -> Option<BuiltinProfile> {
        match self.origin {
            ProfileOrigin::Builtin(which) => Some(which),
            _ => None,
        }
    }

    /// Get description text if available
    pub fn description(&self) -> Option<String> {
        self.inner.description.as_ref().map(|text| match text {
            ProfileText::PlainString(s) => s.clone(),
            ProfileText::Localizable(locs) => {
                locs.first().map(|l| l.value.clone()).unwrap_or_default()
            }
            ProfileText::Description(desc) => desc.ascii_string.clone(),
        })
    }

    /// Check if converting pixels from `self` to `other` would be a no-op
    pub fn is_equivalent(&self, other: &ColorProfile) -> bool {
        if let (Some(a), Some(b)) = (self.builtin_kind(), other.builtin_kind()) {
            return a == b;
        }
        if self.inner.color_space != other.inner.color_space || self.inner.pcs != other.inner.pcs {
            return false;
        }

        // For matrix-shaper profiles, check colorants and TRCs
        if self.is_matrix_shaper() && other.is_matrix_shaper() {
            let eps = 1e-6;
            let a_mat = self.inner.colorant_matrix();
            let b_mat = other.inner.colorant_matrix();
            for i in 0..3 {
                for j in 0..3 {
                    if (a_mat.v[i][j] - b_mat.v[i][j]).abs() > eps {
                        return false;
                    }
                }
            }
            return self.inner.red_trc == other.inner.red_trc
                && self.inner.green_trc == other.inner.green_trc
                && self.inner.blue_trc == other.inner.blue_trc;
        }

        false
    }

    /// Serialized ICC data for embedding in an encoded image.
    ///
    /// Parsed profiles return their original bytes; constructed ones are
    /// encoded by moxcms.
    pub fn to_icc_bytes(&self) -> Result<Vec<u8>> {
        match &self.icc {
            Some(data) => Ok(data.clone()),
            None => self
                .inner
                .encode()
                .map_err(|e| Error::ProfileParse(format!("cannot encode profile: {:?}", e))),
        }
    }

    /// Access the inner moxcms profile
    pub fn inner(&self) -> &moxcms::ColorProfile {
        &self.inner
    }
}

impl From<moxcms::ColorProfile> for ColorProfile {
    fn from(inner: moxcms::ColorProfile) -> Self {
        Self {
            inner,
            origin: ProfileOrigin::Embedded,
            icc: None,
        }
    }
}

fn matrix_shaper(
    white_point: XyY,
    primaries: ColorPrimaries,
    gamma: f32,
    name: &str,
) -> moxcms::ColorProfile {
    let mut profile = moxcms::ColorProfile::default();
    profile.update_rgb_colorimetry(white_point, primaries);
    let curve = curve_from_gamma(gamma);
    profile.red_trc = Some(curve.clone());
    profile.green_trc = Some(curve.clone());
    profile.blue_trc = Some(curve);
    profile.profile_class = moxcms::ProfileClass::DisplayDevice;
    profile.rendering_intent = RenderingIntent::Perceptual;
    profile.color_space = DataColorSpace::Rgb;
    profile.pcs = DataColorSpace::Xyz;
    profile.media_white_point = Some(white_point.to_xyzd());
    profile.white_point = WHITE_POINT_D50.to_xyzd();
    profile.description = Some(ProfileText::PlainString(name.to_string()));
    profile
}

fn cmyk_characterization(name: &str) -> moxcms::ColorProfile {
    let mut profile = moxcms::ColorProfile::default();
    profile.profile_class = moxcms::ProfileClass::OutputDevice;
    profile.rendering_intent = RenderingIntent::Perceptual;
    profile.color_space = DataColorSpace::Cmyk;
    profile.pcs = DataColorSpace::Lab;
    profile.white_point = WHITE_POINT_D50.to_xyzd();
    profile.description = Some(ProfileText::PlainString(name.to_string()));
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_profile() {
        let profile = ColorProfile::new_srgb();
        assert_eq!(profile.color_space(), ColorSpace::Rgb);
        assert!(profile.is_matrix_shaper());
        assert_eq!(profile.builtin_kind(), Some(BuiltinProfile::Srgb));
    }

    #[test]
    fn test_apple_and_color_match_are_matrix_shapers() {
        for profile in [ColorProfile::new_apple_rgb(), ColorProfile::new_color_match_rgb()] {
            assert_eq!(profile.color_space(), ColorSpace::Rgb);
            assert_eq!(profile.pcs(), ColorSpace::Xyz);
            assert!(profile.is_matrix_shaper());
        }
    }

    #[test]
    fn test_cmyk_builtins() {
        let fogra = ColorProfile::new_coated_fogra39();
        assert_eq!(fogra.color_space(), ColorSpace::Cmyk);
        assert_eq!(fogra.pcs(), ColorSpace::Lab);
        assert_eq!(fogra.profile_class(), ProfileClass::Output);

        let swop = ColorProfile::new_us_web_coated_swop();
        assert_eq!(swop.color_space(), ColorSpace::Cmyk);
        assert_eq!(
            swop.description().as_deref(),
            Some("U.S. Web Coated (SWOP) v2")
        );
    }

    #[test]
    fn test_reject_small_profile() {
        let small_data = [0u8; 64];
        assert!(matches!(
            ColorProfile::from_bytes(&small_data),
            Err(Error::ProfileParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ColorProfile::from_file("/definitely/not/here.icc").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_equivalence() {
        let srgb = ColorProfile::new_srgb();
        assert!(srgb.is_equivalent(&ColorProfile::new_srgb()));
        assert!(!srgb.is_equivalent(&ColorProfile::new_adobe_rgb_1998()));
        assert!(!srgb.is_equivalent(&ColorProfile::new_coated_fogra39()));

        // An embedded copy of sRGB is recognized by its colorimetry
        let embedded = ColorProfile::from(moxcms::ColorProfile::new_srgb());
        assert!(embedded.is_equivalent(&srgb));
        assert!(!embedded.is_equivalent(&ColorProfile::new_apple_rgb()));
    }

    #[test]
    fn test_embedded_origin() {
        let profile = ColorProfile::from(moxcms::ColorProfile::new_srgb());
        assert_eq!(profile.origin(), &ProfileOrigin::Embedded);
        assert_eq!(profile.builtin_kind(), None);
    }

    #[test]
    fn test_icc_bytes_reparse() {
        let bytes = ColorProfile::new_apple_rgb().to_icc_bytes().unwrap();
        let reparsed = ColorProfile::from_bytes(&bytes).unwrap();
        assert_eq!(reparsed.color_space(), ColorSpace::Rgb);
        assert!(reparsed.is_equivalent(&ColorProfile::new_apple_rgb()) || reparsed.is_matrix_shaper());

        // Parsed profiles hand back exactly what they were read from
        assert_eq!(reparsed.to_icc_bytes().unwrap(), bytes);
    }
}
