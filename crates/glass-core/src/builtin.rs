//! Built-in color profiles selectable by name

use std::fmt;

use crate::profile::ColorProfile;

/// The fixed set of profiles that can be selected by name instead of path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinProfile {
    AdobeRgb1998,
    AppleRgb,
    CoatedFogra39,
    ColorMatchRgb,
    Srgb,
    UsWebCoatedSwop,
}

impl BuiltinProfile {
    /// All built-ins, in display order
    pub const ALL: [BuiltinProfile; 6] = [
        Self::AdobeRgb1998,
        Self::AppleRgb,
        Self::CoatedFogra39,
        Self::ColorMatchRgb,
        Self::Srgb,
        Self::UsWebCoatedSwop,
    ];

    /// Canonical name as stored in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdobeRgb1998 => "AdobeRGB1998",
            Self::AppleRgb => "AppleRGB",
            Self::CoatedFogra39 => "CoatedFOGRA39",
            Self::ColorMatchRgb => "ColorMatchRGB",
            Self::Srgb => "sRGB",
            Self::UsWebCoatedSwop => "USWebCoatedSWOP",
        }
    }

    /// Case-insensitive lookup by canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Build the profile
    pub fn load(&self) -> ColorProfile {
        match self {
            Self::AdobeRgb1998 => ColorProfile::new_adobe_rgb_1998(),
            Self::AppleRgb => ColorProfile::new_apple_rgb(),
            Self::CoatedFogra39 => ColorProfile::new_coated_fogra39(),
            Self::ColorMatchRgb => ColorProfile::new_color_match_rgb(),
            Self::Srgb => ColorProfile::new_srgb(),
            Self::UsWebCoatedSwop => ColorProfile::new_us_web_coated_swop(),
        }
    }
}

impl fmt::Display for BuiltinProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of every built-in profile
pub fn builtin_profile_names() -> [&'static str; 6] {
    BuiltinProfile::ALL.map(|p| p.name())
}
