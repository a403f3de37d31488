//! Persistent GUI settings.

use crate::theme::ThemeColors;
use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "gui_settings.json";


/// Theme colors and container spacing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiSettings {
    pub colors: ThemeColors,
    /// Padding of newly added containers.
    pub padding: i32,
    /// Item spacing of newly added stack containers.
    pub item_spacing: i32,
}

impl Default for GuiSettings {
    fn default() -> Self {
        GuiSettings {
            colors: ThemeColors::default(),
            padding: 10,
            item_spacing: 10,
        }
    }
}

impl GuiSettings {
    /// Read settings, falling back to defaults if that fails for any reason.
    pub fn read(path: impl AsRef<Path>) -> Self {
        Self::try_read(path).unwrap_or_default()
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("unable to open {}", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}


#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("pico_gui_no_such_settings.json");
    assert!(GuiSettings::try_read(&path).is_err());
    assert_eq!(GuiSettings::read(&path), GuiSettings::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let settings: GuiSettings = serde_json::from_str(r#"{ "padding": 4 }"#).unwrap();
    assert_eq!(settings.padding, 4);
    assert_eq!(settings.item_spacing, 10);
    assert_eq!(settings.colors, ThemeColors::default());
}

#[test]
fn write_then_read() {
    let path = std::env::temp_dir()
        .join(format!("pico_gui_settings_{}.json", std::process::id()));
    let mut settings = GuiSettings::default();
    settings.item_spacing = 3;
    settings.colors.checkbox_fill = vek::Rgb::new(1, 2, 3);
    settings.write(&path).unwrap();
    let read = GuiSettings::try_read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(read, settings);
}
