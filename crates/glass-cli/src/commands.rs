use std::path::Path;

use anyhow::{Context, Result, bail};
use glass_core::settings::{ConfigFile, Settings, default_config_path};
use glass_core::{BuiltinProfile, Image, orientation_degrees, preprocess, read_orientation_flag};
use serde::Serialize;
use tracing::{info, warn};

use crate::{ConfigAction, NormalizeArgs};

/// Open the config file named on the command line, or the platform default.
///
/// Without either, an in-memory store is used and nothing is persisted.
pub fn open_config(path: Option<&Path>) -> Result<ConfigFile> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => ConfigFile::open(&path)
            .with_context(|| format!("failed to read config {}", path.display())),
        None => {
            warn!("no config directory available, using defaults");
            Ok(ConfigFile::in_memory())
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageReport {
    path: String,
    width: u32,
    height: u32,
    color_type: String,
    color_space: String,
    profile: Option<String>,
    orientation_flag: Option<u32>,
    /// Set when the orientation tag is present but unreadable
    #[serde(skip_serializing_if = "Option::is_none")]
    orientation_error: Option<String>,
    orientation_degrees: i32,
    supported_format: bool,
}

impl ImageReport {
    fn new(settings: &Settings, file: &Path, image: &Image) -> Self {
        let (orientation_flag, orientation_error) =
            match image.exif().map(read_orientation_flag).transpose() {
                Ok(flag) => (flag.flatten(), None),
                Err(err) => {
                    warn!(%err, "unreadable orientation tag");
                    (None, Some(err.to_string()))
                }
            };

        Self {
            path: file.display().to_string(),
            width: image.width(),
            height: image.height(),
            color_type: format!("{:?}", image.pixels().color()),
            color_space: image.color_space().to_string(),
            profile: image
                .color_profile()
                .map(|p| p.description().unwrap_or_else(|| p.color_space().to_string())),
            orientation_flag,
            orientation_error,
            orientation_degrees: orientation_degrees(orientation_flag),
            supported_format: settings.image_formats().supports_path(file),
        }
    }

    fn orientation_line(&self) -> String {
        match (self.orientation_flag, &self.orientation_error) {
            (Some(flag), _) => format!("{} ({} degrees)", flag, self.orientation_degrees),
            (None, Some(err)) => format!("malformed ({})", err),
            (None, None) => "(none)".to_string(),
        }
    }
}

pub fn info(config: &ConfigFile, file: &Path, json: bool) -> Result<()> {
    let settings = Settings::load(config);
    let image = Image::open(file).with_context(|| format!("failed to open {}", file.display()))?;
    let report = ImageReport::new(&settings, file, &image);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.path);
    println!("  size:        {}x{}", report.width, report.height);
    println!("  pixels:      {}", report.color_type);
    println!("  color space: {}", report.color_space);
    println!("  profile:     {}", report.profile.as_deref().unwrap_or("(none)"));
    println!("  orientation: {}", report.orientation_line());
    if !report.supported_format {
        println!("  note: extension is not in the configured format list");
    }
    Ok(())
}

pub fn normalize(config: &ConfigFile, args: &NormalizeArgs) -> Result<()> {
    let settings = Settings::load(config);
    if !settings.image_formats().supports_path(&args.input) {
        bail!(
            "{} does not have a configured image extension",
            args.input.display()
        );
    }

    let mut options = settings.preprocess_options();
    if let Some(profile) = &args.profile {
        options.color_profile = profile.clone();
    }
    options.apply_to_all |= args.apply_to_all;

    let mut image = Image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    if let Some(intent) = args.intent {
        image.set_rendering_intent(intent);
    }
    let before = image.dimensions();
    preprocess(&mut image, &options)
        .with_context(|| format!("failed to preprocess {}", args.input.display()))?;
    if let Some(quality) = args.quality {
        image.set_quality(quality);
    }
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        profile = %options.color_profile,
        intent = %image.rendering_intent(),
        apply_to_all = options.apply_to_all,
        "normalized"
    );
    let (width, height) = image.dimensions();
    println!(
        "{} -> {} ({}x{} -> {}x{}, {})",
        args.input.display(),
        args.output.display(),
        before.0,
        before.1,
        width,
        height,
        image.color_space()
    );
    Ok(())
}

pub fn profiles(config: &ConfigFile) -> Result<()> {
    let selected = Settings::load(config).color_profile;
    for which in BuiltinProfile::ALL {
        let profile = which.load();
        let marker = if which.name() == selected { "*" } else { " " };
        println!(
            "{} {:<16} {:<5} {}",
            marker,
            which.name(),
            profile.color_space().to_string(),
            profile.description().unwrap_or_default()
        );
    }
    Ok(())
}

pub fn config(mut config: ConfigFile, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            for (key, value) in effective_values(&config).iter() {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Get { key } => {
            let effective = effective_values(&config);
            let value = effective
                .get_opt(&key)
                .or_else(|| config.get_opt(&key))
                .with_context(|| format!("unknown setting {:?}", key))?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let Some(path) = config.path().map(Path::to_path_buf) else {
                bail!("no config file location; pass --config");
            };
            config.set(key.as_str(), value.as_str());
            config.save()?;

            let stored = effective_values(&config);
            match stored.get_opt(&key) {
                Some(effective) if effective != value => {
                    warn!(key = %key, value = %value, effective, "value was not accepted as given")
                }
                _ => {}
            }
            info!(path = %path.display(), key = %key, "config updated");
        }
    }
    Ok(())
}

/// The file's contents overlaid with every typed setting after validation
fn effective_values(config: &ConfigFile) -> ConfigFile {
    let mut view = config.clone();
    Settings::load(config).store(&mut view);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_tests::fixtures::OrientationExif;
    use glass_tests::patterns::{TestPattern, pattern_image, sizes};

    fn tiny_image() -> Image {
        let (w, h) = sizes::TINY;
        Image::new(pattern_image(TestPattern::ColorCube, w, h))
    }

    #[test]
    fn test_report_shows_malformed_orientation() {
        let image = tiny_image().with_exif(OrientationExif::default().ascii(b"up\0\0"));
        let report = ImageReport::new(&Settings::default(), Path::new("a.jpg"), &image);

        assert_eq!(report.orientation_flag, None);
        assert!(report.orientation_error.is_some());
        assert!(report.orientation_line().starts_with("malformed ("));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["orientation_error"].is_string());
    }

    #[test]
    fn test_report_orientation_lines() {
        let rotated = tiny_image().with_exif(OrientationExif::default().flag(6));
        let report = ImageReport::new(&Settings::default(), Path::new("a.jpg"), &rotated);
        assert_eq!(report.orientation_line(), "6 (90 degrees)");

        let report = ImageReport::new(&Settings::default(), Path::new("a.png"), &tiny_image());
        assert_eq!(report.orientation_line(), "(none)");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("orientation_error").is_none());
    }

    #[test]
    fn test_effective_values_fill_defaults() {
        let view = effective_values(&ConfigFile::in_memory());
        assert_eq!(view.get_opt("ColorProfile"), Some("sRGB"));
        assert_eq!(view.get_opt("IsApplyColorProfileForAll"), Some("False"));
        assert_eq!(view.get_opt("KeyboardActions"), Some("0,0;1,2;2,0;3,4;"));
        assert_eq!(
            view.get_opt("ToolbarButtons"),
            Some(glass_core::settings::DEFAULT_TOOLBAR_BUTTONS)
        );
        assert_eq!(view.get_opt("ImageEditingAssociationList"), Some(""));
    }

    #[test]
    fn test_effective_values_keep_unknown_keys() {
        let mut config = ConfigFile::in_memory();
        config.set("ColorProfile", "adobergb1998");
        config.set("WindowWidth", "800");
        let view = effective_values(&config);
        assert_eq!(view.get_opt("ColorProfile"), Some("AdobeRGB1998"));
        assert_eq!(view.get_opt("WindowWidth"), Some("800"));
    }

    #[test]
    fn test_set_needs_a_file() {
        let action = ConfigAction::Set {
            key: "ColorProfile".into(),
            value: "AppleRGB".into(),
        };
        assert!(config(ConfigFile::in_memory(), action).is_err());
    }
}
