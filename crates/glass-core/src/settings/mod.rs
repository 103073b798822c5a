//! Viewer configuration
//!
//! [`Settings`] is a plain value: load it from a [`ConfigFile`], hand it to
//! whatever needs it, and store it back explicitly. Nothing here is global.

mod config_file;
mod editing;
mod formats;
mod keys;
mod toolbar;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use crate::preprocess::PreprocessOptions;
use crate::resolve::canonical_profile_name;

pub use config_file::ConfigFile;
pub use editing::{EditingAssociation, EditingAssociations, FILE_PLACEHOLDER};
pub use formats::{DEFAULT_IMAGE_FORMATS, ImageFormatSet, OPTIONAL_IMAGE_FORMATS};
pub use keys::{AssignableAction, DEFAULT_KEY_ASSIGNMENTS, KeyAssignments, KeyCombo};
pub use toolbar::{DEFAULT_TOOLBAR_BUTTONS, ToolbarButton, ToolbarButtons};

/// Config keys
pub mod config_keys {
    pub const DEFAULT_IMAGE_FORMATS: &str = "DefaultImageFormats";
    pub const OPTIONAL_IMAGE_FORMATS: &str = "OptionalImageFormats";
    pub const MOUSE_WHEEL_ACTION: &str = "MouseWheelAction";
    pub const MOUSE_WHEEL_CTRL_ACTION: &str = "MouseWheelCtrlAction";
    pub const MOUSE_WHEEL_SHIFT_ACTION: &str = "MouseWheelShiftAction";
    pub const MOUSE_WHEEL_ALT_ACTION: &str = "MouseWheelAltAction";
    pub const KEYBOARD_ACTIONS: &str = "KeyboardActions";
    pub const TOOLBAR_BUTTONS: &str = "ToolbarButtons";
    pub const IMAGE_EDITING_ASSOCIATION_LIST: &str = "ImageEditingAssociationList";
    pub const COLOR_PROFILE: &str = "ColorProfile";
    pub const APPLY_COLOR_PROFILE_FOR_ALL: &str = "IsApplyColorProfileForAll";
}

use config_keys as key;

/// What spinning the mouse wheel does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseWheelAction {
    DoNothing = 0,
    Zoom = 1,
    ScrollVertically = 2,
    ScrollHorizontally = 3,
    BrowseImages = 4,
}

impl MouseWheelAction {
    pub const ALL: [MouseWheelAction; 5] = [
        Self::DoNothing,
        Self::Zoom,
        Self::ScrollVertically,
        Self::ScrollHorizontally,
        Self::BrowseImages,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| *a as u32 == code)
    }
}

/// Mouse-wheel behavior per modifier key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWheelActions {
    pub plain: MouseWheelAction,
    pub ctrl: MouseWheelAction,
    pub shift: MouseWheelAction,
    pub alt: MouseWheelAction,
}

impl Default for MouseWheelActions {
    fn default() -> Self {
        Self {
            plain: MouseWheelAction::ScrollVertically,
            ctrl: MouseWheelAction::Zoom,
            shift: MouseWheelAction::ScrollHorizontally,
            alt: MouseWheelAction::DoNothing,
        }
    }
}

/// Viewer preferences kept in the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_image_formats: String,
    pub optional_image_formats: String,
    pub mouse_wheel: MouseWheelActions,
    pub key_assignments: KeyAssignments,
    pub toolbar_buttons: ToolbarButtons,
    pub editing_associations: EditingAssociations,
    /// Built-in profile name or ICC path; empty means none selected
    pub color_profile: String,
    pub apply_color_profile_for_all: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_image_formats: DEFAULT_IMAGE_FORMATS.to_string(),
            optional_image_formats: OPTIONAL_IMAGE_FORMATS.to_string(),
            mouse_wheel: MouseWheelActions::default(),
            key_assignments: KeyAssignments::default(),
            toolbar_buttons: ToolbarButtons::default(),
            editing_associations: EditingAssociations::default(),
            color_profile: PreprocessOptions::default().color_profile,
            apply_color_profile_for_all: false,
        }
    }
}

impl Settings {
    /// Read settings, using defaults for anything missing or unparseable
    pub fn load(config: &ConfigFile) -> Self {
        let defaults = Self::default();

        let mouse_wheel = MouseWheelActions {
            plain: read_wheel(config, key::MOUSE_WHEEL_ACTION, defaults.mouse_wheel.plain),
            ctrl: read_wheel(config, key::MOUSE_WHEEL_CTRL_ACTION, defaults.mouse_wheel.ctrl),
            shift: read_wheel(config, key::MOUSE_WHEEL_SHIFT_ACTION, defaults.mouse_wheel.shift),
            alt: read_wheel(config, key::MOUSE_WHEEL_ALT_ACTION, defaults.mouse_wheel.alt),
        };

        let key_assignments = match config.get_opt(key::KEYBOARD_ACTIONS) {
            Some(text) => KeyAssignments::parse_or_default(text),
            None => defaults.key_assignments,
        };

        let toolbar_buttons = match config.get_opt(key::TOOLBAR_BUTTONS) {
            Some(text) => ToolbarButtons::parse_or_default(text),
            None => defaults.toolbar_buttons,
        };

        let editing_associations = match config.get_opt(key::IMAGE_EDITING_ASSOCIATION_LIST) {
            Some(text) => EditingAssociations::parse_or_default(text),
            None => defaults.editing_associations,
        };

        let color_profile = canonical_profile_name(&config.get(
            key::COLOR_PROFILE,
            &defaults.color_profile,
        ));

        let apply_color_profile_for_all = read_bool(
            config,
            key::APPLY_COLOR_PROFILE_FOR_ALL,
            defaults.apply_color_profile_for_all,
        );

        Self {
            default_image_formats: config
                .get(key::DEFAULT_IMAGE_FORMATS, &defaults.default_image_formats),
            optional_image_formats: config
                .get(key::OPTIONAL_IMAGE_FORMATS, &defaults.optional_image_formats),
            mouse_wheel,
            key_assignments,
            toolbar_buttons,
            editing_associations,
            color_profile,
            apply_color_profile_for_all,
        }
    }

    /// Write every setting into `config`; the caller decides when to save
    pub fn store(&self, config: &mut ConfigFile) {
        config.set(key::DEFAULT_IMAGE_FORMATS, self.default_image_formats.as_str());
        config.set(key::OPTIONAL_IMAGE_FORMATS, self.optional_image_formats.as_str());
        config.set(key::MOUSE_WHEEL_ACTION, (self.mouse_wheel.plain as u32).to_string());
        config.set(key::MOUSE_WHEEL_CTRL_ACTION, (self.mouse_wheel.ctrl as u32).to_string());
        config.set(key::MOUSE_WHEEL_SHIFT_ACTION, (self.mouse_wheel.shift as u32).to_string());
        config.set(key::MOUSE_WHEEL_ALT_ACTION, (self.mouse_wheel.alt as u32).to_string());
        config.set(key::KEYBOARD_ACTIONS, self.key_assignments.to_config_string());
        config.set(key::TOOLBAR_BUTTONS, self.toolbar_buttons.to_config_string());
        config.set(
            key::IMAGE_EDITING_ASSOCIATION_LIST,
            self.editing_associations.to_config_string(),
        );
        config.set(key::COLOR_PROFILE, self.color_profile.as_str());
        config.set(
            key::APPLY_COLOR_PROFILE_FOR_ALL,
            if self.apply_color_profile_for_all { "True" } else { "False" },
        );
    }

    /// Lookup set for the configured extensions
    pub fn image_formats(&self) -> ImageFormatSet {
        ImageFormatSet::build(&self.default_image_formats, &self.optional_image_formats)
    }

    /// Preprocessing preferences
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            color_profile: self.color_profile.clone(),
            apply_to_all: self.apply_color_profile_for_all,
        }
    }
}

/// `igconfig.json` in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "ImageGlass", "glass")
        .map(|dirs| dirs.config_dir().join("igconfig.json"))
}

fn read_wheel(config: &ConfigFile, name: &str, default: MouseWheelAction) -> MouseWheelAction {
    let Some(text) = config.get_opt(name) else {
        return default;
    };
    match text.trim().parse().ok().and_then(MouseWheelAction::from_code) {
        Some(action) => action,
        None => {
            warn!(key = name, value = text, "invalid mouse wheel action, using default");
            default
        }
    }
}

fn read_bool(config: &ConfigFile, name: &str, default: bool) -> bool {
    let Some(text) = config.get_opt(name) else {
        return default;
    };
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => {
            warn!(key = name, value = text, "invalid boolean, using default");
            default
        }
    }
}
