//! Color profile selector resolution
//!
//! A selector is the user-facing string naming a profile: either a path to
//! an ICC file or one of the built-in names. An existing file always wins
//! over a name match. Nothing here is an error: an unknown selector simply
//! resolves to nothing and the caller keeps its current profile state.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::builtin::BuiltinProfile;
use crate::profile::ColorProfile;

/// A resolved color profile reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelector {
    /// An existing ICC file
    Path(PathBuf),
    /// A built-in profile
    Builtin(BuiltinProfile),
}

impl ProfileSelector {
    /// Load the referenced profile.
    ///
    /// Files that cannot be read or parsed as ICC yield `None`.
    pub fn load(&self) -> Option<ColorProfile> {
        match self {
            Self::Builtin(which) => Some(which.load()),
            Self::Path(path) => match ColorProfile::from_file(path) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring unreadable color profile");
                    None
                }
            },
        }
    }
}

/// Resolve a selector string
pub fn resolve_selector(selector: &str) -> Option<ProfileSelector> {
    if selector.is_empty() {
        return None;
    }

    let path = Path::new(selector);
    if path.is_file() {
        return Some(ProfileSelector::Path(path.to_path_buf()));
    }

    BuiltinProfile::from_name(selector).map(ProfileSelector::Builtin)
}

/// Resolve and load a selector string in one step
pub fn load_profile(selector: &str) -> Option<ColorProfile> {
    let resolved = resolve_selector(selector);
    if resolved.is_none() {
        debug!(selector, "color profile selector did not match a file or built-in");
    }
    resolved.and_then(|s| s.load())
}

/// Canonical spelling of a selector.
///
/// Returns the selector itself for an existing file, the canonical built-in
/// name for a case-insensitive name match, and an empty string otherwise,
/// which callers treat as "use default behavior".
pub fn canonical_profile_name(selector: &str) -> String {
    match resolve_selector(selector) {
        Some(ProfileSelector::Path(_)) => selector.to_string(),
        Some(ProfileSelector::Builtin(which)) => which.name().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_name_resolves() {
        assert_eq!(
            resolve_selector("AdobeRGB1998"),
            Some(ProfileSelector::Builtin(BuiltinProfile::AdobeRgb1998))
        );
        assert_eq!(
            resolve_selector("applergb"),
            Some(ProfileSelector::Builtin(BuiltinProfile::AppleRgb))
        );
    }

    #[test]
    fn test_unknown_selector_resolves_to_nothing() {
        assert_eq!(resolve_selector("NotAProfile"), None);
        assert_eq!(resolve_selector(""), None);
        assert!(load_profile("/no/such/profile.icc").is_none());
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_profile_name("SRGB"), "sRGB");
        assert_eq!(canonical_profile_name("coatedfogra39"), "CoatedFOGRA39");
        assert_eq!(canonical_profile_name("bogus"), "");
    }

    #[test]
    fn test_existing_path_wins_over_name() {
        let dir = std::env::temp_dir().join(format!("glass-resolve-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // A file literally named like a built-in
        let file = dir.join("sRGB");
        std::fs::write(&file, b"not an icc profile").unwrap();
        let selector = file.to_str().unwrap();

        assert_eq!(
            resolve_selector(selector),
            Some(ProfileSelector::Path(file.clone()))
        );
        assert_eq!(canonical_profile_name(selector), selector);
        // Unparseable file is treated as not found
        assert!(load_profile(selector).is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_is_not_a_profile_path() {
        let dir = std::env::temp_dir();
        assert_eq!(resolve_selector(dir.to_str().unwrap()), None);
    }
}
