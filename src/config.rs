use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::PixelPlowResult;

/// Engine tunables. All fields have defaults so a missing or partial
/// `config.toml` is never fatal; the defaults reproduce the behavior the
/// engine was tuned against (1600×900 canonical frames, 0.8 confidence).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Substring matched against window titles to pick the emulator window.
    pub window_title: String,
    /// Directory of reference template bitmaps, keyed by file stem.
    pub templates_dir: PathBuf,
    /// Canonical working resolution every capture is resized to before
    /// template matching. Templates are authored at this resolution.
    pub canonical_width: u32,
    pub canonical_height: u32,
    /// Minimum normalized cross-correlation score for a template match.
    pub match_confidence: f32,
    /// Fresh captures attempted before a locate gives up.
    pub locate_tries: u32,
    /// Blocking pause after a navigation click, absorbs transition animation.
    pub settle_delay_ms: u64,
    /// Duration of a page-scroll drag gesture.
    pub drag_duration_ms: u64,
    /// Drag gestures issued between page-number re-measurements.
    pub drags_per_round: u32,
    /// Re-measurement rounds before page navigation gives up.
    pub max_page_rounds: u32,
    /// Pages advanced by one drag (the newspaper shows a two-page spread).
    pub page_stride: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Android Emulator".to_string(),
            templates_dir: PathBuf::from("templates"),
            canonical_width: 1600,
            canonical_height: 900,
            match_confidence: 0.8,
            locate_tries: 10,
            settle_delay_ms: 1000,
            drag_duration_ms: 400,
            drags_per_round: 3,
            max_page_rounds: 5,
            page_stride: 2,
        }
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Some(candidate);
            }
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join("config.toml");
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in working directory");
            return Some(candidate);
        }
    }

    None
}

/// Load `config.toml` from next to the executable or the working directory,
/// falling back to defaults when no file exists.
pub fn load_config() -> PixelPlowResult<EngineConfig> {
    let Some(path) = resolve_config_path() else {
        tracing::info!("no config.toml found, using defaults");
        return Ok(EngineConfig::default());
    };

    let content = std::fs::read_to_string(&path)?;
    let config: EngineConfig = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), window = %config.window_title, "config loaded");
    Ok(config)
}
