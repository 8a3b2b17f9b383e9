//! Host settings object.
//!
//! The host persists one JSON object per extension. This crate only reads
//! and edits the `menuStyles` sub-object; saving is the host's job; the CLI
//! binary stands in for the host when it writes the file back.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const MENU_STYLES_KEY: &str = "menuStyles";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSettings {
    root: Map<String, Value>,
}

impl HostSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(format!("settings root must be an object, got {}", other)),
        }
    }

    /// Loads settings from a JSON file. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("Settings file {:?} not found, starting empty", path);
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to parse settings file {:?}: {}", path, e);
                return Err(e.to_string());
            }
        };
        Self::from_value(value)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }
        let content = serde_json::to_string_pretty(&self.root).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Read-only view of `<extension>.menuStyles`, if present.
    pub fn menu_styles(&self, extension: &str) -> Option<&Map<String, Value>> {
        self.root
            .get(extension)?
            .as_object()?
            .get(MENU_STYLES_KEY)?
            .as_object()
    }

    /// Mutable `<extension>.menuStyles`, created (or replaced when it is not
    /// an object) on demand.
    pub fn menu_styles_mut(&mut self, extension: &str) -> &mut Map<String, Value> {
        let ext = object_entry(&mut self.root, extension);
        object_entry(ext, MENU_STYLES_KEY)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        log::warn!("Settings key {:?} is not an object, replacing it", key);
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(inner) => inner,
        _ => unreachable!("entry was just made an object"),
    }
}
