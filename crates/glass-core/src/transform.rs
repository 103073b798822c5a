//! Pixel transforms between two ICC profiles
//!
//! Thin wrapper over moxcms executors, used when attaching a new profile to
//! an image that already carries one.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::profile::ColorProfile;
use crate::{Error, Result};

/// Rendering intent for color transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    /// Perceptual rendering intent - best for photographic images
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors, clips out-of-gamut
    RelativeColorimetric,
    /// Saturation - maintains saturation, may shift hue
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub const ALL: [RenderingIntent; 4] = [
        Self::Perceptual,
        Self::RelativeColorimetric,
        Self::Saturation,
        Self::AbsoluteColorimetric,
    ];

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perceptual => "perceptual",
            Self::RelativeColorimetric => "relative",
            Self::Saturation => "saturation",
            Self::AbsoluteColorimetric => "absolute",
        }
    }
}

impl fmt::Display for RenderingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderingIntent {
    type Err = Error;

    /// Accepts the short name, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown rendering intent: {:?}", s)))
    }
}

impl From<RenderingIntent> for moxcms::RenderingIntent {
    fn from(intent: RenderingIntent) -> Self {
        match intent {
            RenderingIntent::Perceptual => moxcms::RenderingIntent::Perceptual,
            RenderingIntent::RelativeColorimetric => moxcms::RenderingIntent::RelativeColorimetric,
            RenderingIntent::Saturation => moxcms::RenderingIntent::Saturation,
            RenderingIntent::AbsoluteColorimetric => moxcms::RenderingIntent::AbsoluteColorimetric,
        }
    }
}

/// Interleaved pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// RGB, 3 channels
    Rgb,
    /// RGBA, 4 channels (alpha preserved)
    Rgba,
}

impl From<Layout> for moxcms::Layout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Rgb => moxcms::Layout::Rgb,
            Layout::Rgba => moxcms::Layout::Rgba,
        }
    }
}

/// Options for transform creation
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Rendering intent
    pub intent: RenderingIntent,
}

impl From<TransformOptions> for moxcms::TransformOptions {
    fn from(opts: TransformOptions) -> Self {
        moxcms::TransformOptions {
            rendering_intent: opts.intent.into(),
            ..Default::default()
        }
    }
}

/// A color transform between two profiles
pub struct Transform {
    inner: TransformInner,
}

enum TransformInner {
    U8(Arc<moxcms::Transform8BitExecutor>),
    U16(Arc<moxcms::Transform16BitExecutor>),
    F32(Arc<moxcms::TransformF32BitExecutor>),
}

impl Transform {
    /// Create a new 8-bit transform
    pub fn new_8bit(
        src_profile: &ColorProfile,
        src_layout: Layout,
        dst_profile: &ColorProfile,
        dst_layout: Layout,
        options: TransformOptions,
    ) -> Result<Self> {
        check_layouts(src_layout, dst_layout)?;
        let inner = src_profile
            .inner()
            .create_transform_8bit(
                src_layout.into(),
                dst_profile.inner(),
                dst_layout.into(),
                options.into(),
            )
            .map_err(|e| Error::Transform(format!("{:?}", e)))?;

        Ok(Self {
            inner: TransformInner::U8(inner.into()),
        })
    }

    /// Create a new 16-bit transform
    pub fn new_16bit(
        src_profile: &ColorProfile,
        layout: Layout,
        dst_profile: &ColorProfile,
        options: TransformOptions,
    ) -> Result<Self> {
        let inner = src_profile
            .inner()
            .create_transform_16bit(
                layout.into(),
                dst_profile.inner(),
                layout.into(),
                options.into(),
            )
            .map_err(|e| Error::Transform(format!("{:?}", e)))?;

        Ok(Self {
            inner: TransformInner::U16(inner.into()),
        })
    }

    /// Create a new 32-bit floating point transform
    pub fn new_f32(
        src_profile: &ColorProfile,
        layout: Layout,
        dst_profile: &ColorProfile,
        options: TransformOptions,
    ) -> Result<Self> {
        let inner = src_profile
            .inner()
            .create_transform_f32(
                layout.into(),
                dst_profile.inner(),
                layout.into(),
                options.into(),
            )
            .map_err(|e| Error::Transform(format!("{:?}", e)))?;

        Ok(Self {
            inner: TransformInner::F32(inner.into()),
        })
    }

    /// Transform 8-bit pixel data
    pub fn transform(&self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        check_sizes(src.len(), dst.len())?;
        match &self.inner {
            TransformInner::U8(t) => t
                .transform(src, dst)
                .map_err(|e| Error::Transform(format!("{:?}", e))),
            _ => Err(Error::Transform("Wrong bit depth for transform".into())),
        }
    }

    /// Transform 16-bit pixel data
    pub fn transform_u16(&self, src: &[u16], dst: &mut [u16]) -> Result<()> {
        check_sizes(src.len(), dst.len())?;
        match &self.inner {
            TransformInner::U16(t) => t
                .transform(src, dst)
                .map_err(|e| Error::Transform(format!("{:?}", e))),
            _ => Err(Error::Transform("Wrong bit depth for transform".into())),
        }
    }

    /// Transform 32-bit floating point pixel data
    pub fn transform_f32(&self, src: &[f32], dst: &mut [f32]) -> Result<()> {
        check_sizes(src.len(), dst.len())?;
        match &self.inner {
            TransformInner::F32(t) => t
                .transform(src, dst)
                .map_err(|e| Error::Transform(format!("{:?}", e))),
            _ => Err(Error::Transform("Wrong bit depth for transform".into())),
        }
    }
}

fn check_layouts(src: Layout, dst: Layout) -> Result<()> {
    // Images are converted in place, so channel counts must agree
    if src != dst {
        return Err(Error::Transform(format!(
            "layout mismatch: {:?} -> {:?}",
            src, dst
        )));
    }
    Ok(())
}

fn check_sizes(src: usize, dst: usize) -> Result<()> {
    if src != dst {
        return Err(Error::BufferSize {
            expected: src,
            actual: dst,
        });
    }
    Ok(())
}
