//! Decoded image with the metadata preprocessing needs
//!
//! Pixels live in an `image::DynamicImage`. Next to them the container keeps
//! the raw EXIF block, the attached ICC profile and a working color-space
//! tag, all of which preprocessing reads and rewrites in place.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageEncoder, ImageFormat, ImageReader};
use tracing::{debug, warn};

use crate::orientation::ExifOrientation;
use crate::profile::ColorProfile;
use crate::transform::{Layout, RenderingIntent, Transform, TransformOptions};
use crate::types::{ColorSpace, Rotation};
use crate::Result;

/// Highest encoder quality
pub const MAX_QUALITY: u8 = 100;

const DEFAULT_QUALITY: u8 = 90;

/// An in-memory image
#[derive(Debug, Clone)]
pub struct Image {
    pixels: DynamicImage,
    exif: Option<Vec<u8>>,
    color_profile: Option<ColorProfile>,
    color_space: ColorSpace,
    quality: u8,
    rendering_intent: RenderingIntent,
    orientation_applied: bool,
}

impl Image {
    /// Wrap decoded pixels with no metadata.
    ///
    /// The working color space is guessed from the pixel layout.
    pub fn new(pixels: DynamicImage) -> Self {
        let color_space = layout_color_space(pixels.color());
        Self {
            pixels,
            exif: None,
            color_profile: None,
            color_space,
            quality: DEFAULT_QUALITY,
            rendering_intent: RenderingIntent::default(),
            orientation_applied: false,
        }
    }

    /// Attach a raw EXIF block
    pub fn with_exif(mut self, exif: Vec<u8>) -> Self {
        self.exif = Some(exif);
        self
    }

    /// Attach an embedded color profile without touching pixels
    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = Some(profile);
        self
    }

    /// Decode a file, keeping its ICC and EXIF blocks
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;

        let icc = decoder.icc_profile()?;
        let exif = decoder.exif_metadata()?;
        let pixels = DynamicImage::from_decoder(decoder)?;

        let mut image = Self::new(pixels);
        image.exif = exif;
        if let Some(data) = icc {
            match ColorProfile::from_bytes(&data) {
                Ok(profile) => image.color_profile = Some(profile),
                Err(err) => {
                    warn!(path = %path.display(), %err, "dropping unparseable embedded color profile")
                }
            }
        }

        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            has_exif = image.exif.is_some(),
            has_profile = image.color_profile.is_some(),
            "decoded image"
        );
        Ok(image)
    }

    /// Encode to `path`; the format follows the file extension.
    ///
    /// PNG and JPEG output carries the attached color profile when it
    /// matches the written pixel layout. Other formats are written untagged.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            ImageFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgb8(self.pixels.to_rgb8());
                let mut encoder = JpegEncoder::new_with_quality(writer, self.quality);
                self.embed_profile(&mut encoder, ColorSpace::Rgb, path);
                rgb.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                // PNG has no float samples
                let pixels = match &self.pixels {
                    DynamicImage::ImageRgb32F(_) => {
                        Cow::Owned(DynamicImage::ImageRgb16(self.pixels.to_rgb16()))
                    }
                    DynamicImage::ImageRgba32F(_) => {
                        Cow::Owned(DynamicImage::ImageRgba16(self.pixels.to_rgba16()))
                    }
                    other => Cow::Borrowed(other),
                };
                let mut encoder = PngEncoder::new(writer);
                self.embed_profile(&mut encoder, layout_color_space(pixels.color()), path);
                pixels.write_with_encoder(encoder)?;
            }
            _ => {
                if self.color_profile.is_some() {
                    warn!(
                        path = %path.display(),
                        ?format,
                        "format cannot carry a color profile, writing untagged"
                    );
                }
                self.pixels.write_to(&mut writer, format)?;
            }
        }
        Ok(())
    }

    fn embed_profile<E: ImageEncoder>(
        &self,
        encoder: &mut E,
        pixel_space: ColorSpace,
        path: &Path,
    ) {
        let Some(profile) = &self.color_profile else {
            return;
        };
        if profile.color_space() != pixel_space {
            warn!(
                path = %path.display(),
                profile = %profile.color_space(),
                pixels = %pixel_space,
                "color profile does not match pixel layout, not embedding"
            );
            return;
        }
        let data = match profile.to_icc_bytes() {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), %err, "not embedding color profile");
                return;
            }
        };
        if let Err(err) = encoder.set_icc_profile(data) {
            warn!(path = %path.display(), %err, "encoder cannot embed color profile");
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> DynamicImage {
        self.pixels
    }

    /// Raw EXIF block, if the source had one
    pub fn exif(&self) -> Option<&[u8]> {
        self.exif.as_deref()
    }

    /// The attached color profile
    pub fn color_profile(&self) -> Option<&ColorProfile> {
        self.color_profile.as_ref()
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Retag the working color space; pixels are not changed
    pub fn set_color_space(&mut self, color_space: ColorSpace) {
        self.color_space = color_space;
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encoder quality, clamped to 100
    pub fn set_quality(&mut self, quality: u8) {
        self.quality = quality.min(MAX_QUALITY);
    }

    /// Intent used when [`Image::add_profile`] converts pixels
    pub fn rendering_intent(&self) -> RenderingIntent {
        self.rendering_intent
    }

    pub fn set_rendering_intent(&mut self, intent: RenderingIntent) {
        self.rendering_intent = intent;
    }

    /// Whether EXIF orientation has already been baked into the pixels
    pub fn orientation_applied(&self) -> bool {
        self.orientation_applied
    }

    /// Rotate clockwise in place
    pub fn rotate(&mut self, rotation: Rotation) {
        self.pixels = match rotation {
            Rotation::None => return,
            Rotation::Cw90 => self.pixels.rotate90(),
            Rotation::Cw180 => self.pixels.rotate180(),
            Rotation::Cw270 => self.pixels.rotate270(),
        };
    }

    /// Mirror about the vertical axis in place
    pub fn mirror_horizontal(&mut self) {
        self.pixels = self.pixels.fliph();
    }

    /// Rotate then mirror, and remember that orientation has been handled
    pub fn apply_orientation(&mut self, orientation: ExifOrientation) {
        self.rotate(orientation.rotation);
        if orientation.mirror_horizontal {
            self.mirror_horizontal();
        }
        self.orientation_applied = true;
    }

    /// Attach a color profile.
    ///
    /// When the image already carries a different RGB profile and the new
    /// one is RGB too, pixels are converted from the old profile to the
    /// new one. Otherwise only the tag changes. The working color space is
    /// left to the caller.
    pub fn add_profile(&mut self, profile: ColorProfile) -> Result<()> {
        let converted = match &self.color_profile {
            Some(current)
                if current.color_space().is_rgb()
                    && profile.color_space().is_rgb()
                    && !current.is_equivalent(&profile) =>
            {
                convert_pixels(&self.pixels, current, &profile, self.rendering_intent)?
            }
            _ => None,
        };

        if let Some(pixels) = converted {
            self.pixels = pixels;
        }
        self.color_profile = Some(profile);
        Ok(())
    }
}

fn layout_color_space(color: ColorType) -> ColorSpace {
    match color {
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => ColorSpace::Gray,
        _ => ColorSpace::Rgb,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    U8,
    U16,
    F32,
}

/// Convert pixels between two RGB profiles at the source bit depth.
///
/// Returns `None` when moxcms cannot build a transform for the pair.
fn convert_pixels(
    pixels: &DynamicImage,
    src: &ColorProfile,
    dst: &ColorProfile,
    intent: RenderingIntent,
) -> Result<Option<DynamicImage>> {
    let has_alpha = pixels.color().has_alpha();
    let layout = if has_alpha { Layout::Rgba } else { Layout::Rgb };
    let depth = match pixels {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => Depth::F32,
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => Depth::U16,
        _ => Depth::U8,
    };

    let options = TransformOptions { intent };
    let transform = match depth {
        Depth::U8 => Transform::new_8bit(src, layout, dst, layout, options),
        Depth::U16 => Transform::new_16bit(src, layout, dst, options),
        Depth::F32 => Transform::new_f32(src, layout, dst, options),
    };
    let transform = match transform {
        Ok(t) => t,
        Err(err) => {
            warn!(%err, "cannot convert between profiles, attaching without conversion");
            return Ok(None);
        }
    };

    let converted = match (depth, has_alpha) {
        (Depth::U8, false) => {
            let src_buf = pixels.to_rgb8();
            let mut dst_buf = src_buf.clone();
            transform.transform(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgb8(dst_buf)
        }
        (Depth::U8, true) => {
            let src_buf = pixels.to_rgba8();
            let mut dst_buf = src_buf.clone();
            transform.transform(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgba8(dst_buf)
        }
        (Depth::U16, false) => {
            let src_buf = pixels.to_rgb16();
            let mut dst_buf = src_buf.clone();
            transform.transform_u16(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgb16(dst_buf)
        }
        (Depth::U16, true) => {
            let src_buf = pixels.to_rgba16();
            let mut dst_buf = src_buf.clone();
            transform.transform_u16(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgba16(dst_buf)
        }
        (Depth::F32, false) => {
            let src_buf = pixels.to_rgb32f();
            let mut dst_buf = src_buf.clone();
            transform.transform_f32(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgb32F(dst_buf)
        }
        (Depth::F32, true) => {
            let src_buf = pixels.to_rgba32f();
            let mut dst_buf = src_buf.clone();
            transform.transform_f32(src_buf.as_raw(), &mut dst_buf)?;
            DynamicImage::ImageRgba32F(dst_buf)
        }
    };

    debug!(?depth, ?layout, "converted pixels between profiles");
    Ok(Some(converted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    /// 2x3 image with a unique red value per pixel (10 * x + y)
    fn marked() -> Image {
        let img = RgbImage::from_fn(2, 3, |x, y| Rgb([(10 * x + y) as u8, 0, 0]));
        Image::new(DynamicImage::ImageRgb8(img))
    }

    fn red_at(image: &Image, x: u32, y: u32) -> u8 {
        image.pixels().to_rgb8().get_pixel(x, y)[0]
    }

    #[test]
    fn test_new_infers_color_space() {
        assert_eq!(marked().color_space(), ColorSpace::Rgb);
        let gray = Image::new(DynamicImage::ImageLuma8(GrayImage::new(1, 1)));
        assert_eq!(gray.color_space(), ColorSpace::Gray);
        assert!(gray.color_profile().is_none());
        assert!(gray.exif().is_none());
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let mut image = marked();
        image.rotate(Rotation::Cw90);
        assert_eq!(image.dimensions(), (3, 2));
        // Bottom-left source pixel (0, 2) moves to the top-left
        assert_eq!(red_at(&image, 0, 0), 2);
    }

    #[test]
    fn test_rotate_none_is_noop() {
        let mut image = marked();
        image.rotate(Rotation::None);
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(red_at(&image, 1, 2), 12);
    }

    #[test]
    fn test_flag_5_transposes() {
        let mut image = marked();
        image.apply_orientation(ExifOrientation::from_flag(5));
        assert_eq!(image.dimensions(), (3, 2));
        for x in 0..3 {
            for y in 0..2 {
                // transposed: (x, y) holds source (y, x)
                assert_eq!(red_at(&image, x, y), (10 * y + x) as u8);
            }
        }
        assert!(image.orientation_applied());
    }

    #[test]
    fn test_flag_7_transverses() {
        let mut image = marked();
        image.apply_orientation(ExifOrientation::from_flag(7));
        assert_eq!(image.dimensions(), (3, 2));
        // (x, y) holds source (W-1-y, H-1-x) with W=2, H=3
        for x in 0..3 {
            for y in 0..2 {
                let sx = 1 - y;
                let sy = 2 - x;
                assert_eq!(red_at(&image, x, y), (10 * sx + sy) as u8);
            }
        }
    }

    #[test]
    fn test_flag_2_mirrors_only() {
        let mut image = marked();
        image.apply_orientation(ExifOrientation::from_flag(2));
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(red_at(&image, 0, 0), 10);
        assert_eq!(red_at(&image, 1, 0), 0);
    }

    #[test]
    fn test_quality_is_clamped() {
        let mut image = marked();
        image.set_quality(250);
        assert_eq!(image.quality(), MAX_QUALITY);
    }

    #[test]
    fn test_add_profile_without_existing_only_tags() {
        let mut image = marked();
        let before = image.pixels().clone();
        image.add_profile(ColorProfile::new_adobe_rgb_1998()).unwrap();
        assert_eq!(image.pixels(), &before);
        assert!(image.color_profile().is_some());
    }

    #[test]
    fn test_add_profile_converts_rgb_pixels() {
        let img = RgbImage::from_pixel(4, 4, Rgb([200, 100, 100]));
        let mut image = Image::new(DynamicImage::ImageRgb8(img))
            .with_color_profile(ColorProfile::new_adobe_rgb_1998());
        image.add_profile(ColorProfile::new_srgb()).unwrap();

        // The wider Adobe RGB red lands around 226 in sRGB; the neutral part stays put
        let px = *image.pixels().to_rgb8().get_pixel(0, 0);
        assert!(px[0] > 210, "converted {:?}", px);
        assert!((px[1] as i32 - 100).abs() <= 4, "converted {:?}", px);
        assert!((px[2] as i32 - 100).abs() <= 4, "converted {:?}", px);
    }

    #[test]
    fn test_add_profile_keeps_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([120, 60, 30, 77]));
        let mut image = Image::new(DynamicImage::ImageRgba8(img))
            .with_color_profile(ColorProfile::new_apple_rgb());
        image.add_profile(ColorProfile::new_srgb()).unwrap();

        let rgba = image.pixels().to_rgba8();
        assert_eq!(rgba.get_pixel(1, 1)[3], 77);
    }

    #[test]
    fn test_add_equivalent_profile_leaves_pixels() {
        let mut image = marked().with_color_profile(ColorProfile::new_srgb());
        let before = image.pixels().clone();
        image.add_profile(ColorProfile::new_srgb()).unwrap();
        assert_eq!(image.pixels(), &before);
    }

    #[test]
    fn test_add_cmyk_profile_only_tags() {
        let mut image = marked().with_color_profile(ColorProfile::new_srgb());
        let before = image.pixels().clone();
        image.add_profile(ColorProfile::new_us_web_coated_swop()).unwrap();
        assert_eq!(image.pixels(), &before);
        assert_eq!(
            image.color_profile().map(|p| p.color_space()),
            Some(ColorSpace::Cmyk)
        );
    }

    #[test]
    fn test_add_profile_16bit_stays_16bit() {
        let img = image::ImageBuffer::<Rgb<u16>, _>::from_pixel(2, 2, Rgb([30000, 20000, 10000]));
        let mut image = Image::new(DynamicImage::ImageRgb16(img))
            .with_color_profile(ColorProfile::new_color_match_rgb());
        image.add_profile(ColorProfile::new_srgb()).unwrap();
        assert!(matches!(image.pixels(), DynamicImage::ImageRgb16(_)));
    }

    #[test]
    fn test_gray_image_promoted_on_conversion() {
        let img = GrayImage::from_pixel(2, 2, Luma([100]));
        let mut image = Image::new(DynamicImage::ImageLuma8(img))
            .with_color_profile(ColorProfile::new_adobe_rgb_1998());
        image.add_profile(ColorProfile::new_srgb()).unwrap();
        assert!(matches!(image.pixels(), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_save_and_open_png() {
        let path = std::env::temp_dir().join(format!("glass-image-{}.png", std::process::id()));
        marked().save(&path).unwrap();

        let reopened = Image::open(&path).unwrap();
        assert_eq!(reopened.dimensions(), (2, 3));
        assert_eq!(red_at(&reopened, 1, 2), 12);
        assert!(reopened.exif().is_none());

        std::fs::remove_file(&path).unwrap();
    }

    fn temp_image(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("glass-image-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_converted_png_keeps_its_profile() {
        let img = RgbImage::from_pixel(4, 4, Rgb([200, 100, 100]));
        let mut image =
            Image::new(DynamicImage::ImageRgb8(img)).with_color_profile(ColorProfile::new_srgb());
        image.add_profile(ColorProfile::new_adobe_rgb_1998()).unwrap();
        let converted = *image.pixels().to_rgb8().get_pixel(0, 0);

        let path = temp_image("adobe.png");
        image.save(&path).unwrap();
        let reopened = Image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let profile = reopened.color_profile().expect("profile should be embedded");
        assert_eq!(profile.origin(), &crate::ProfileOrigin::Embedded);
        assert_eq!(profile.color_space(), ColorSpace::Rgb);
        assert!(!profile.is_equivalent(&ColorProfile::new_srgb()));
        assert_eq!(*reopened.pixels().to_rgb8().get_pixel(0, 0), converted);
    }

    #[test]
    fn test_jpeg_keeps_embedded_profile_bytes() {
        let original = ColorProfile::from_bytes(
            &ColorProfile::new_color_match_rgb().to_icc_bytes().unwrap(),
        )
        .unwrap();
        let image = marked().with_color_profile(original.clone());

        let path = temp_image("tagged.jpg");
        image.save(&path).unwrap();
        let reopened = Image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let profile = reopened.color_profile().expect("profile should be embedded");
        assert_eq!(
            profile.to_icc_bytes().unwrap(),
            original.to_icc_bytes().unwrap()
        );
    }

    #[test]
    fn test_cmyk_tag_not_embedded_in_rgb_output() {
        let image = marked().with_color_profile(ColorProfile::new_coated_fogra39());
        let path = temp_image("cmyk-tag.png");
        image.save(&path).unwrap();
        let reopened = Image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(reopened.color_profile().is_none());
    }

    #[test]
    fn test_rendering_intent_used_for_conversion() {
        let mut image = marked().with_color_profile(ColorProfile::new_adobe_rgb_1998());
        assert_eq!(image.rendering_intent(), RenderingIntent::Perceptual);
        image.set_rendering_intent(RenderingIntent::RelativeColorimetric);
        image.add_profile(ColorProfile::new_srgb()).unwrap();
        assert_eq!(image.rendering_intent(), RenderingIntent::RelativeColorimetric);
        assert_eq!(
            image.color_profile().and_then(|p| p.builtin_kind()),
            Some(crate::BuiltinProfile::Srgb)
        );
    }

    #[test]
    fn test_open_missing_file() {
        assert!(Image::open("/no/such/image.png").is_err());
    }
}
