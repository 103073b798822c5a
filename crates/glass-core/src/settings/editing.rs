//! External editors per file extension
//!
//! Stored as bracketed groups, one per extension:
//! `[.jpg;Paint;C:\Windows\paint.exe;"<file>"][.png;...]`. The fields are
//! extension, display name, executable path and arguments. `<file>` in the
//! arguments is replaced with the image path when the editor is launched.

use std::path::Path;

use tracing::warn;

use crate::{Error, Result};

/// Placeholder replaced with the image path
pub const FILE_PLACEHOLDER: &str = "<file>";

const RESERVED: [char; 3] = [';', '[', ']'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingAssociation {
    /// Lowercase, with the leading dot
    pub extension: String,
    pub app_name: String,
    pub app_path: String,
    pub app_arguments: String,
}

impl EditingAssociation {
    pub fn new(
        extension: &str,
        app_name: &str,
        app_path: &str,
        app_arguments: &str,
    ) -> Result<Self> {
        let extension = normalize_extension(extension)?;
        for field in [app_name, app_path, app_arguments] {
            if field.contains(&RESERVED[..]) {
                return Err(Error::Config(format!(
                    "editing association field contains ';', '[' or ']': {:?}",
                    field
                )));
            }
        }
        if app_path.trim().is_empty() {
            return Err(Error::Config(format!("no editor path for {}", extension)));
        }
        Ok(Self {
            extension,
            app_name: app_name.trim().to_string(),
            app_path: app_path.trim().to_string(),
            app_arguments: app_arguments.trim().to_string(),
        })
    }

    /// Editor arguments for `file`; the path is appended when there is no placeholder
    pub fn arguments_for(&self, file: &Path) -> String {
        let quoted = format!("\"{}\"", file.display());
        if self.app_arguments.contains(FILE_PLACEHOLDER) {
            self.app_arguments.replace(FILE_PLACEHOLDER, &quoted)
        } else if self.app_arguments.is_empty() {
            quoted
        } else {
            format!("{} {}", self.app_arguments, quoted)
        }
    }
}

/// Editing associations, in the order they were configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingAssociations {
    entries: Vec<EditingAssociation>,
}

impl EditingAssociations {
    /// Parse the stored form strictly. An empty string has no associations.
    pub fn parse(text: &str) -> Result<Self> {
        let mut associations = Self::default();
        let mut rest = text.trim();
        while !rest.is_empty() {
            let body = rest
                .strip_prefix('[')
                .ok_or_else(|| Error::Config(format!("expected '[' at {:?}", rest)))?;
            let (group, tail) = body
                .split_once(']')
                .ok_or_else(|| Error::Config(format!("unterminated group: {:?}", rest)))?;
            let fields: Vec<&str> = group.split(';').collect();
            let [extension, name, path, arguments] = fields.as_slice() else {
                return Err(Error::Config(format!(
                    "editing association needs 4 fields, got {}: {:?}",
                    fields.len(),
                    group
                )));
            };
            let entry = EditingAssociation::new(extension, name, path, arguments)?;
            if associations.get(&entry.extension).is_some() {
                return Err(Error::Config(format!(
                    "extension associated twice: {}",
                    entry.extension
                )));
            }
            associations.entries.push(entry);
            rest = tail.trim_start();
        }
        Ok(associations)
    }

    /// Parse, falling back to no associations on any error
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            warn!(%err, "dropping invalid image editing associations");
            Self::default()
        })
    }

    /// Association for an extension, with or without the dot, any case
    pub fn get(&self, extension: &str) -> Option<&EditingAssociation> {
        let extension = normalize_extension(extension).ok()?;
        self.entries.iter().find(|e| e.extension == extension)
    }

    /// Association for a file, by its extension
    pub fn for_path(&self, path: &Path) -> Option<&EditingAssociation> {
        self.get(path.extension()?.to_str()?)
    }

    /// Add or replace the association for its extension
    pub fn set(&mut self, entry: EditingAssociation) {
        match self.entries.iter_mut().find(|e| e.extension == entry.extension) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn remove(&mut self, extension: &str) -> Option<EditingAssociation> {
        let extension = normalize_extension(extension).ok()?;
        let index = self.entries.iter().position(|e| e.extension == extension)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditingAssociation> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_config_string(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "[{};{};{};{}]",
                    e.extension, e.app_name, e.app_path, e.app_arguments
                )
            })
            .collect()
    }
}

fn normalize_extension(extension: &str) -> Result<String> {
    let bare = extension.trim().trim_start_matches('.');
    if bare.is_empty() || bare.contains(&RESERVED[..]) || bare.contains('.') {
        return Err(Error::Config(format!("invalid extension: {:?}", extension)));
    }
    Ok(format!(".{}", bare.to_ascii_lowercase()))
}
