use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub report: ReportSettings,
}

/// School-specific values printed on every exported report.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub class_name: String,
    pub class_teachers: String,
    pub font: String,
    /// Attendance considered acceptable, e.g. "96%".
    pub attendance_target: String,
    /// e.g. "2024-2025".
    pub academic_year: String,
    pub logo: Option<Vec<u8>>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            class_name: "Reception".to_string(),
            class_teachers: String::new(),
            font: "Arial".to_string(),
            attendance_target: "96%".to_string(),
            academic_year: academic_year(chrono::Local::now().date_naive()),
            logo: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            report: ReportSettings::from_env()?,
        })
    }
}

impl ReportSettings {
    fn from_env() -> Result<Self> {
        let defaults = ReportSettings::default();

        let logo = match std::env::var("REPORT_LOGO_PATH") {
            Ok(path) if !path.trim().is_empty() => Some(load_logo(Path::new(path.trim()))?),
            _ => None,
        };

        Ok(ReportSettings {
            class_name: env_or("REPORT_CLASS_NAME", defaults.class_name),
            class_teachers: env_or("REPORT_CLASS_TEACHERS", defaults.class_teachers),
            font: env_or("REPORT_FONT", defaults.font),
            attendance_target: env_or("REPORT_ATTENDANCE_TARGET", defaults.attendance_target),
            academic_year: env_or("REPORT_ACADEMIC_YEAR", defaults.academic_year),
            logo,
        })
    }
}

/// Academic years start in September: 2024-10-01 is in "2024-2025",
/// 2025-03-01 is in "2024-2025" too.
pub fn academic_year(today: NaiveDate) -> String {
    let start = if today.month() >= 9 {
        today.year()
    } else {
        today.year() - 1
    };
    format!("{}-{}", start, start + 1)
}

/// Reads the school logo. Only PNG, GIF and JPEG images are accepted.
pub fn load_logo(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read logo at '{}'", path.display()))?;

    let known = bytes.starts_with(b"\x89PNG\r\n\x1a\n")
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF]);
    if !known {
        bail!(
            "Logo at '{}' is not a PNG, GIF or JPEG image",
            path.display()
        );
    }
    Ok(bytes)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
