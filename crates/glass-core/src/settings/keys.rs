//! Keyboard customization
//!
//! The user picks which action each key pair performs, e.g. PageUp/PageDown
//! to previous/next image. Stored as `"combo,action;"` pairs of integers.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::warn;

use crate::{Error, Result};

/// Assignments used when nothing (or garbage) is configured
pub const DEFAULT_KEY_ASSIGNMENTS: &str = "0,0;1,2;2,0;3,4;";

/// Key pairs that can be reassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCombo {
    LeftRight = 0,
    UpDown = 1,
    PageUpDown = 2,
    SpaceBack = 3,
}

impl KeyCombo {
    pub const ALL: [KeyCombo; 4] = [
        Self::LeftRight,
        Self::UpDown,
        Self::PageUpDown,
        Self::SpaceBack,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| *c as u32 == code)
    }
}

/// Actions a key pair can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignableAction {
    PrevNextImage = 0,
    PanLeftRight = 1,
    PanUpDown = 2,
    ZoomInOut = 3,
    PauseSlideshow = 4,
    DoNothing = 5,
}

impl AssignableAction {
    pub const ALL: [AssignableAction; 6] = [
        Self::PrevNextImage,
        Self::PanLeftRight,
        Self::PanUpDown,
        Self::ZoomInOut,
        Self::PauseSlideshow,
        Self::DoNothing,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| *a as u32 == code)
    }
}

/// Key pair to action lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAssignments {
    table: BTreeMap<KeyCombo, AssignableAction>,
}

impl Default for KeyAssignments {
    fn default() -> Self {
        Self {
            table: BTreeMap::from([
                (KeyCombo::LeftRight, AssignableAction::PrevNextImage),
                (KeyCombo::UpDown, AssignableAction::PanUpDown),
                (KeyCombo::PageUpDown, AssignableAction::PrevNextImage),
                (KeyCombo::SpaceBack, AssignableAction::PauseSlideshow),
            ]),
        }
    }
}

impl KeyAssignments {
    /// Parse the stored form strictly
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = BTreeMap::new();
        for pair in text.split(';').filter(|p| !p.trim().is_empty()) {
            let (combo, action) = pair
                .split_once(',')
                .ok_or_else(|| Error::Config(format!("key assignment without ',': {:?}", pair)))?;
            let combo = parse_code(combo)
                .and_then(KeyCombo::from_code)
                .ok_or_else(|| Error::Config(format!("unknown key combo: {:?}", combo)))?;
            let action = parse_code(action)
                .and_then(AssignableAction::from_code)
                .ok_or_else(|| Error::Config(format!("unknown action: {:?}", action)))?;
            if table.insert(combo, action).is_some() {
                return Err(Error::Config(format!("key combo assigned twice: {:?}", combo)));
            }
        }
        Ok(Self { table })
    }

    /// Parse, falling back to the defaults on any error
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            warn!(%err, "resetting key assignments to defaults");
            Self::default()
        })
    }

    /// Action for a key pair; pairs missing from the table use their default
    pub fn action(&self, combo: KeyCombo) -> AssignableAction {
        match self.table.get(&combo) {
            Some(action) => *action,
            None => Self::default().table[&combo],
        }
    }

    pub fn set(&mut self, combo: KeyCombo, action: AssignableAction) {
        self.table.insert(combo, action);
    }

    /// Stored form, ordered by combo
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        for (combo, action) in &self.table {
            let _ = write!(out, "{},{};", *combo as u32, *action as u32);
        }
        out
    }
}

fn parse_code(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
