use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::data::loader::CurveSelection;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "LAS_VIEWER_CONFIG";
/// Settings file looked up in the working directory otherwise.
pub const CONFIG_FILE: &str = "las-viewer.json";

// ---------------------------------------------------------------------------
// Settings types
// ---------------------------------------------------------------------------

/// How each track is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackOrientation {
    /// Value on x, depth on y increasing downwards (log-track style).
    Vertical,
    /// Depth on x, value on y.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

/// One chart track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub mnemonic: String,
    /// RGB line colour; a generated palette colour when absent.
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    /// Plotted values are divided by this. Averages are unaffected.
    #[serde(default = "one")]
    pub display_scale: f64,
}

fn one() -> f64 {
    1.0
}

impl TrackConfig {
    fn new(mnemonic: &str, color: [u8; 3]) -> Self {
        TrackConfig {
            mnemonic: mnemonic.to_string(),
            color: Some(color),
            display_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub depth_mnemonic: String,
    pub tracks: Vec<TrackConfig>,
    /// Slider steps per depth unit.
    pub slider_resolution: f64,
    pub orientation: TrackOrientation,
    pub theme: Theme,
    pub line_width: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            depth_mnemonic: "DEPT".into(),
            tracks: vec![
                TrackConfig::new("GRZ", [0, 0, 255]),
                TrackConfig::new("PORD", [0, 160, 0]),
                TrackConfig::new("ZDEN", [255, 0, 0]),
            ],
            slider_resolution: 100.0,
            orientation: TrackOrientation::Vertical,
            theme: Theme::Dark,
            line_width: 1.5,
        }
    }
}

impl ViewerConfig {
    /// Load settings from `$LAS_VIEWER_CONFIG`, else `./las-viewer.json`,
    /// else return the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        let local = PathBuf::from(CONFIG_FILE);
        local.exists().then_some(local)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let config: ViewerConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.depth_mnemonic.trim().is_empty(), "depth mnemonic is empty");
        ensure!(!self.tracks.is_empty(), "no tracks configured");
        ensure!(
            self.slider_resolution > 0.0,
            "slider resolution must be positive, got {}",
            self.slider_resolution
        );
        for track in &self.tracks {
            if track.mnemonic.trim().is_empty() {
                bail!("track with empty mnemonic");
            }
            ensure!(
                track.display_scale > 0.0,
                "display scale of {} must be positive",
                track.mnemonic
            );
        }
        Ok(())
    }

    /// Columns the loader has to extract.
    pub fn curve_selection(&self) -> CurveSelection {
        CurveSelection {
            depth: self.depth_mnemonic.clone(),
            curves: self.tracks.iter().map(|t| t.mnemonic.clone()).collect(),
        }
    }
}
