use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::layout::LayoutConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `cv.md`, `personal-info.md` and `projects.md`.
    pub content_dir: PathBuf,
    /// Directory the generated PDF is cached in.
    pub artifact_dir: PathBuf,
    pub cv_pdf_name: String,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let layout = match std::env::var("LAYOUT_CONFIG") {
            Ok(path) => LayoutConfig::from_file(Path::new(&path))
                .with_context(|| format!("Failed to load layout config from '{path}'"))?,
            Err(_) => LayoutConfig::default(),
        };

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            content_dir: env_or("CONTENT_DIR", "content").into(),
            artifact_dir: env_or("ARTIFACT_DIR", "public").into(),
            cv_pdf_name: env_or("CV_PDF_NAME", "cv.pdf"),
            layout,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
