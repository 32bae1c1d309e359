use std::str::FromStr;

use anyhow::{Context, Result};

use crate::editor::EditorSettings;
use crate::export::PageLayout;
use crate::snap::SnapConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub snap: SnapConfig,
    pub canvas_width: f64,
    pub min_canvas_height: f64,
    pub export_filename: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let grid_size: f64 = parse_env("GRID_SIZE", 20.0)?;
        let snap_threshold: f64 = parse_env("SNAP_THRESHOLD", 10.0)?;
        let alignment_threshold: f64 = parse_env("ALIGNMENT_THRESHOLD", 15.0)?;
        let snap = SnapConfig::new(grid_size, snap_threshold, alignment_threshold)
            .context("Invalid snap configuration (GRID_SIZE / SNAP_THRESHOLD / ALIGNMENT_THRESHOLD)")?;

        let canvas_width: f64 = parse_env("CANVAS_WIDTH", 800.0)?;
        let min_canvas_height: f64 = parse_env("MIN_CANVAS_HEIGHT", 1000.0)?;
        anyhow::ensure!(
            canvas_width > 0.0 && min_canvas_height > 0.0,
            "CANVAS_WIDTH and MIN_CANVAS_HEIGHT must be positive"
        );

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            snap,
            canvas_width,
            min_canvas_height,
            export_filename: std::env::var("EXPORT_FILENAME")
                .unwrap_or_else(|_| "resume.pdf".to_string()),
        })
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            canvas_width: self.canvas_width,
            min_canvas_height: self.min_canvas_height,
            snap: self.snap,
        }
    }

    pub fn page_layout(&self) -> PageLayout {
        PageLayout::a4()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            snap: SnapConfig::default(),
            canvas_width: 800.0,
            min_canvas_height: 1000.0,
            export_filename: "resume.pdf".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
