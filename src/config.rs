use anyhow::{Context, Result};
use config::{Config, File};
use directories::ProjectDirs;
use readfast::engine::{DEFAULT_WPM, MAX_WPM, MIN_WPM, WPM_STEP};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Theme {
    pub bg: String,      // background
    pub text: String,    // word body and editor text
    pub sub: String,     // hints, status bar, guide markers
    pub sub_alt: String, // borders, unfilled progress
    pub focal: String,   // focal character
    pub main: String,    // brand and filled progress
    pub done: String,    // "complete" badge
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#131738".to_string(),
            text: "#c5cae9".to_string(),
            sub: "#7986cb".to_string(),
            sub_alt: "#283593".to_string(),
            focal: "#ef5350".to_string(),
            main: "#9fa8da".to_string(),
            done: "#66bb6a".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Speed a new session starts at.
    pub default_wpm: u32,
    /// Run the markdown stripper over pasted text.
    pub auto_strip_on_paste: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_wpm: DEFAULT_WPM,
            auto_strip_on_paste: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub reader: ReaderConfig,
    pub theme: Theme,
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "readfast").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Clamps into the speed range and rounds to the nearest step.
pub fn snap_wpm(wpm: u32) -> u32 {
    let clamped = wpm.clamp(MIN_WPM, MAX_WPM);
    let snapped = (clamped + WPM_STEP / 2) / WPM_STEP * WPM_STEP;
    snapped.clamp(MIN_WPM, MAX_WPM)
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(config_path().as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let reader = ReaderConfig::default();
        let theme = Theme::default();

        let mut builder = Config::builder()
            .set_default("reader.default_wpm", i64::from(reader.default_wpm))?
            .set_default("reader.auto_strip_on_paste", reader.auto_strip_on_paste)?
            .set_default("theme.bg", theme.bg)?
            .set_default("theme.text", theme.text)?
            .set_default("theme.sub", theme.sub)?
            .set_default("theme.sub_alt", theme.sub_alt)?
            .set_default("theme.focal", theme.focal)?
            .set_default("theme.main", theme.main)?
            .set_default("theme.done", theme.done)?;

        if let Some(path) = path {
            if path.exists() {
                info!(path = %path.display(), "reading config");
                builder = builder.add_source(File::from(path.to_path_buf()));
            }
        }

        let cfg = builder.build()?;

        let mut app_config: AppConfig = cfg.try_deserialize()?;
        app_config.reader.default_wpm = snap_wpm(app_config.reader.default_wpm);

        Ok(app_config)
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path().context("Could not determine a config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let body = toml::to_string_pretty(self)?;
        fs::write(path, body).with_context(|| format!("Could not write {}", path.display()))?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }
}
