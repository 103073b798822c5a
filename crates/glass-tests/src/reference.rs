//! lcms2 reference profiles and transforms
//!
//! The RGB built-ins are rebuilt here from their published primaries,
//! white points and gammas, independently of glass.

use glass_core::BuiltinProfile;
use lcms2::{CIExyY, CIExyYTRIPLE, Intent, PixelFormat, Profile, ToneCurve, Transform};

const D65: (f64, f64) = (0.3127, 0.3290);
const D50: (f64, f64) = (0.3457, 0.3585);

fn xy_y(x: f64, y: f64) -> CIExyY {
    CIExyY { x, y, Y: 1.0 }
}

fn matrix_shaper(
    white: (f64, f64),
    primaries: [(f64, f64); 3],
    gamma: f64,
) -> Result<Profile, String> {
    let white = xy_y(white.0, white.1);
    let [r, g, b] = primaries;
    let primaries = CIExyYTRIPLE {
        Red: xy_y(r.0, r.1),
        Green: xy_y(g.0, g.1),
        Blue: xy_y(b.0, b.1),
    };
    let curve = ToneCurve::new(gamma);
    Profile::new_rgb(&white, &primaries, &[&curve, &curve, &curve])
        .map_err(|e| format!("lcms2 rgb profile: {}", e))
}

/// lcms2 build of an RGB built-in; `None` for the CMYK ones
pub fn lcms2_builtin(which: BuiltinProfile) -> Option<Profile> {
    let profile = match which {
        BuiltinProfile::Srgb => Ok(Profile::new_srgb()),
        BuiltinProfile::AdobeRgb1998 => matrix_shaper(
            D65,
            [(0.64, 0.33), (0.21, 0.71), (0.15, 0.06)],
            563.0 / 256.0,
        ),
        BuiltinProfile::AppleRgb => matrix_shaper(
            D65,
            [(0.625, 0.340), (0.280, 0.595), (0.155, 0.070)],
            1.8,
        ),
        BuiltinProfile::ColorMatchRgb => matrix_shaper(
            D50,
            [(0.630, 0.340), (0.295, 0.605), (0.150, 0.075)],
            1.8,
        ),
        BuiltinProfile::CoatedFogra39 | BuiltinProfile::UsWebCoatedSwop => return None,
    };
    profile.ok()
}

/// ICC bytes of an lcms2 profile
pub fn icc_bytes(profile: &Profile) -> Result<Vec<u8>, String> {
    profile.icc().map_err(|e| format!("lcms2 icc: {}", e))
}

/// Transform RGB8 pixels with lcms2
pub fn transform_lcms2(
    src_profile: &Profile,
    dst_profile: &Profile,
    src_pixels: &[u8],
) -> Result<Vec<u8>, String> {
    let transform = Transform::new(
        src_profile,
        PixelFormat::RGB_8,
        dst_profile,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .map_err(|e| format!("lcms2 transform: {}", e))?;

    let mut dst_pixels = vec![0u8; src_pixels.len()];
    transform.transform_pixels(src_pixels, &mut dst_pixels);

    Ok(dst_pixels)
}

/// Transform RGB8 pixels from ICC bytes, as lcms2 would for an embedded profile
pub fn transform_lcms2_icc(
    src_profile_data: &[u8],
    dst_profile_data: &[u8],
    src_pixels: &[u8],
) -> Result<Vec<u8>, String> {
    let src_profile =
        Profile::new_icc(src_profile_data).map_err(|e| format!("lcms2 src profile: {}", e))?;
    let dst_profile =
        Profile::new_icc(dst_profile_data).map_err(|e| format!("lcms2 dst profile: {}", e))?;
    transform_lcms2(&src_profile, &dst_profile, src_pixels)
}
