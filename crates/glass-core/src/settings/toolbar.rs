//! Toolbar layout
//!
//! Which buttons the toolbar shows and in what order, stored as
//! comma-separated button codes with `-1` for a separator.

use std::fmt::Write as _;

use tracing::warn;

use crate::{Error, Result};

/// Layout used when nothing (or garbage) is configured
pub const DEFAULT_TOOLBAR_BUTTONS: &str =
    "0,1,-1,2,3,4,5,-1,6,7,8,9,10,11,-1,12,13,14,-1,15,16,17,18,19,20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarButton {
    Separator = -1,
    Back = 0,
    Next = 1,
    RotateLeft = 2,
    RotateRight = 3,
    FlipHorizontal = 4,
    FlipVertical = 5,
    AutoZoom = 6,
    ScaleToWidth = 7,
    ScaleToHeight = 8,
    ScaleToFit = 9,
    ScaleToFill = 10,
    ZoomLock = 11,
    Open = 12,
    Refresh = 13,
    Goto = 14,
    Thumbnails = 15,
    CheckedBackground = 16,
    FullScreen = 17,
    Slideshow = 18,
    Delete = 19,
    Edit = 20,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 22] = [
        Self::Separator,
        Self::Back,
        Self::Next,
        Self::RotateLeft,
        Self::RotateRight,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::AutoZoom,
        Self::ScaleToWidth,
        Self::ScaleToHeight,
        Self::ScaleToFit,
        Self::ScaleToFill,
        Self::ZoomLock,
        Self::Open,
        Self::Refresh,
        Self::Goto,
        Self::Thumbnails,
        Self::CheckedBackground,
        Self::FullScreen,
        Self::Slideshow,
        Self::Delete,
        Self::Edit,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| *b as i32 == code)
    }
}

/// Ordered toolbar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButtons {
    buttons: Vec<ToolbarButton>,
}

impl Default for ToolbarButtons {
    fn default() -> Self {
        use ToolbarButton::*;
        Self {
            buttons: vec![
                Back,
                Next,
                Separator,
                RotateLeft,
                RotateRight,
                FlipHorizontal,
                FlipVertical,
                Separator,
                AutoZoom,
                ScaleToWidth,
                ScaleToHeight,
                ScaleToFit,
                ScaleToFill,
                ZoomLock,
                Separator,
                Open,
                Refresh,
                Goto,
                Separator,
                Thumbnails,
                CheckedBackground,
                FullScreen,
                Slideshow,
                Delete,
                Edit,
            ],
        }
    }
}

impl ToolbarButtons {
    pub fn new(buttons: Vec<ToolbarButton>) -> Self {
        Self { buttons }
    }

    /// Parse the stored form strictly. An empty string is an empty toolbar.
    pub fn parse(text: &str) -> Result<Self> {
        let mut buttons = Vec::new();
        for item in text.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let button = item
                .parse()
                .ok()
                .and_then(ToolbarButton::from_code)
                .ok_or_else(|| Error::Config(format!("unknown toolbar button: {:?}", item)))?;
            if button != ToolbarButton::Separator && buttons.contains(&button) {
                return Err(Error::Config(format!("toolbar button listed twice: {:?}", button)));
            }
            buttons.push(button);
        }
        Ok(Self { buttons })
    }

    /// Parse, falling back to the default layout on any error
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            warn!(%err, "resetting toolbar buttons to defaults");
            Self::default()
        })
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    pub fn contains(&self, button: ToolbarButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}", *button as i32);
        }
        out
    }
}
