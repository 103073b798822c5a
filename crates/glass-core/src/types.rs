//! Public API types for glass
//!
//! These types provide a stable public API that doesn't expose moxcms internals.

/// Working color space of an image, as tagged by its ICC profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// RGB color space
    Rgb,
    /// CMYK color space
    Cmyk,
    /// Grayscale
    Gray,
    /// CIELAB
    Lab,
    /// CIEXYZ
    Xyz,
    /// YCbCr (video)
    YCbCr,
    /// Luminance + Chroma
    Luv,
    /// HSV (hue, saturation, value)
    Hsv,
    /// HLS (hue, lightness, saturation)
    Hls,
    /// CMY (without K)
    Cmy,
    /// Not yet determined
    Unknown,
}

impl ColorSpace {
    /// Check if this is an RGB-like color space
    pub fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb)
    }

    /// Check if the space has been determined
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<moxcms::DataColorSpace> for ColorSpace {
    fn from(cs: moxcms::DataColorSpace) -> Self {
        match cs {
            moxcms::DataColorSpace::Rgb => Self::Rgb,
            moxcms::DataColorSpace::Cmyk => Self::Cmyk,
            moxcms::DataColorSpace::Gray => Self::Gray,
            moxcms::DataColorSpace::Lab => Self::Lab,
            moxcms::DataColorSpace::Xyz => Self::Xyz,
            moxcms::DataColorSpace::YCbr => Self::YCbCr,
            moxcms::DataColorSpace::Luv => Self::Luv,
            moxcms::DataColorSpace::Hsv => Self::Hsv,
            moxcms::DataColorSpace::Hls => Self::Hls,
            moxcms::DataColorSpace::Cmy => Self::Cmy,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rgb => "RGB",
            Self::Cmyk => "CMYK",
            Self::Gray => "Gray",
            Self::Lab => "Lab",
            Self::Xyz => "XYZ",
            Self::YCbCr => "YCbCr",
            Self::Luv => "Luv",
            Self::Hsv => "HSV",
            Self::Hls => "HLS",
            Self::Cmy => "CMY",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// ICC profile class (device type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link (direct device-to-device)
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
}

impl From<moxcms::ProfileClass> for ProfileClass {
    fn from(pc: moxcms::ProfileClass) -> Self {
        match pc {
            moxcms::ProfileClass::InputDevice => Self::Input,
            moxcms::ProfileClass::DisplayDevice => Self::Display,
            moxcms::ProfileClass::OutputDevice => Self::Output,
            moxcms::ProfileClass::DeviceLink => Self::DeviceLink,
            moxcms::ProfileClass::ColorSpace => Self::ColorSpace,
            moxcms::ProfileClass::Abstract => Self::Abstract,
            moxcms::ProfileClass::Named => Self::NamedColor,
        }
    }
}

/// Clockwise rotation by a multiple of 90 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Rotation from a degree value; anything that is not a multiple of 90 is `None`
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::None),
            90 => Some(Self::Cw90),
            180 => Some(Self::Cw180),
            270 => Some(Self::Cw270),
            _ => None,
        }
    }

    /// Clockwise degrees in `0..360`
    pub fn degrees(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    /// Whether width and height trade places
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }
}
