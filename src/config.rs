use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::controls::ControlSet;
use crate::error::{SketchError, SketchResult};
use crate::export::DEFAULT_FILE_NAME;
use crate::params::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, DrawingParams, StrokeColor};

/// Environment variable naming the configuration file to load
pub const CONFIG_ENV: &str = "EFRAME_SKETCH_CONFIG";
/// Configuration file looked up in the working directory when the variable is unset
pub const CONFIG_FILE: &str = "sketch.json";

/// Startup configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub background: String,
    pub stroke_color: String,
    pub stroke_width: u32,
    pub file_name: String,
    pub download_dir: PathBuf,
    pub controls: ControlSet,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            surface_width: 800,
            surface_height: 600,
            background: "white".to_owned(),
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            file_name: DEFAULT_FILE_NAME.to_owned(),
            download_dir: PathBuf::from("."),
            controls: ControlSet::default(),
        }
    }
}

impl SketchConfig {
    pub fn from_json(json: &str) -> SketchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> SketchResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV`], else [`CONFIG_FILE`] if it
    /// exists, else the defaults.
    pub fn load() -> SketchResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            log::info!("Loading configuration from {}", path);
            return Self::from_file(Path::new(&path));
        }
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }
        Ok(Self::default())
    }

    /// The parameters a fresh session starts with
    pub fn initial_params(&self) -> SketchResult<DrawingParams> {
        DrawingParams::new(StrokeColor::parse(&self.stroke_color)?, self.stroke_width)
    }

    pub fn background_rgba(&self) -> SketchResult<[u8; 4]> {
        csscolorparser::parse(&self.background)
            .map(|color| color.to_rgba8())
            .map_err(|_| SketchError::InvalidColor(self.background.clone()))
    }
}
