use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::canvas::DEFAULT_TEXT_SIZE;
use crate::geometry::CanvasSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "macro-image";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_SHARE_SUBDIR: &str = "Pictures";
const DEFAULT_CANVAS_WIDTH: u32 = 400;
const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_path: Option<PathBuf>,
    pub share_dir: Option<PathBuf>,
    pub text_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            font_path: None,
            share_dir: None,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl AppConfig {
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Configured share directory, else `$HOME/Pictures`, else the working directory.
    pub fn resolved_share_dir(&self) -> PathBuf {
        if let Some(dir) = self.share_dir.as_ref() {
            return dir.clone();
        }
        let (_, home) = config_env_dirs();
        home.map(|home| home.join(DEFAULT_SHARE_SUBDIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_app_config(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn parse_app_config(contents: &str) -> serde_json::Result<AppConfig> {
    serde_json::from_str(contents)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/macro-image/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/macro-image/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path(APP_DIR, APP_CONFIG_FILE, None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_keys() {
        let config = parse_app_config(r#"{ "canvas_width": 320, "font_path": "/fonts/a.ttf" }"#)
            .expect("config should parse");

        assert_eq!(
            config.canvas_size(),
            CanvasSize::new(320, DEFAULT_CANVAS_HEIGHT)
        );
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/a.ttf")));
        assert_eq!(config.text_size, DEFAULT_TEXT_SIZE);
        assert!(config.share_dir.is_none());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config =
            load_app_config_with(Some(Path::new("/nonexistent/macro-image-config")), None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn configured_share_dir_wins() {
        let config = AppConfig {
            share_dir: Some(PathBuf::from("/srv/shared")),
            ..AppConfig::default()
        };
        assert_eq!(config.resolved_share_dir(), PathBuf::from("/srv/shared"));
    }
}
