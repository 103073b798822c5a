//! Supported image file extensions

use std::collections::HashSet;
use std::path::Path;

/// Extensions enabled out of the box
pub const DEFAULT_IMAGE_FORMATS: &str = "*.avif;*.b64;*.bmp;*.cur;*.cut;*.dib;*.emf;*.exif;*.gif;*.ico;\
*.jfif;*.jpe;*.jpeg;*.jpg;*.pbm;*.pcx;*.pgm;*.png;*.ppm;*.psb;*.svg;*.tif;*.tiff;*.webp;*.wmf;*.wpg;*.xbm;*.xpm;";

/// Extensions the user may opt into
pub const OPTIONAL_IMAGE_FORMATS: &str = "*.arw;*.cr2;*.crw;*.dcr;*.dds;*.dng;*.exr;*.hdr;*.heic;\
*.heif;*.mrw;*.nef;*.orf;*.pef;*.psd;*.raf;*.raw;*.rw2;*.sr2;*.tga;*.x3f;";

/// Fast exact lookup of supported extensions.
///
/// Built from `;`-separated `*.ext` lists. Matching is exact on the whole
/// extension, so `.c` is not accepted just because `.cur` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFormatSet {
    extensions: HashSet<String>,
}

impl ImageFormatSet {
    /// Build from the default and optional lists
    pub fn build(default_formats: &str, optional_formats: &str) -> Self {
        let extensions = default_formats
            .split(';')
            .chain(optional_formats.split(';'))
            .map(|entry| entry.trim().trim_matches('*').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Check an extension, with or without the leading dot
    pub fn contains(&self, extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        if ext.starts_with('.') {
            self.extensions.contains(&ext)
        } else {
            self.extensions.contains(&format!(".{}", ext))
        }
    }

    /// Check a path by its extension
    pub fn supports_path(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.contains(e))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_strips_wildcards() {
        let set = ImageFormatSet::build("*.png;*.JPG;", "*.psd");
        assert_eq!(set.len(), 3);
        assert!(set.contains(".png"));
        assert!(set.contains("jpg"));
        assert!(set.contains(".PSD"));
    }

    #[test]
    fn test_no_substring_matches() {
        let set = ImageFormatSet::build("*.cur;*.heic;", "");
        assert!(!set.contains(".c"));
        assert!(!set.contains(".h"));
        assert!(!set.contains(".he"));
        assert!(set.contains(".cur"));
    }

    #[test]
    fn test_empty_entries_ignored() {
        let set = ImageFormatSet::build(";;*.gif;;", ";");
        assert_eq!(set.len(), 1);
        assert!(ImageFormatSet::build("", "").is_empty());
    }

    #[test]
    fn test_supports_path() {
        let set = ImageFormatSet::build(DEFAULT_IMAGE_FORMATS, OPTIONAL_IMAGE_FORMATS);
        assert!(set.supports_path("photos/IMG_0001.JPG"));
        assert!(set.supports_path("raw/DSC_1.nef"));
        assert!(!set.supports_path("src/main.c"));
        assert!(!set.supports_path("README"));
    }
}
