/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD, or
/// `~/.config/virus`. Falls back to defaults if the file is missing or
/// incomplete. A file that exists but does not parse is reported and
/// ignored; a file that cannot be read is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct NovelConfig {
    pub frame_ms: u64,
    pub gamepad: GamepadConfig,
    pub sound_enabled: bool,
    pub logging: LoggingConfig,
    /// Set when config.toml existed but failed to parse.
    pub warning: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub reset: Vec<String>,
    pub reward: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    /// Log file path. `None` disables logging.
    pub file: Option<PathBuf>,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    sound: TomlSound,
    #[serde(default)]
    logging: TomlLogging,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_reset")]
    reset: Vec<String>,
    #[serde(default = "default_reward")]
    reward: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlSound {
    #[serde(default = "default_sound_enabled")]
    enabled: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLogging {
    #[serde(default)]
    file: Option<String>,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_frame_ms() -> u64 { 16 }
fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }
fn default_reset() -> Vec<String> { vec!["X".into()] }
fn default_reward() -> Vec<String> { vec!["Y".into()] }
fn default_sound_enabled() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { frame_ms: default_frame_ms() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            reset: default_reset(),
            reward: default_reward(),
        }
    }
}

impl Default for TomlSound {
    fn default() -> Self {
        TomlSound { enabled: default_sound_enabled() }
    }
}

impl Default for TomlLogging {
    fn default() -> Self {
        TomlLogging { file: None, level: default_log_level() }
    }
}

// ── Loading ──

impl NovelConfig {
    /// Load config from the first `config.toml` found.
    pub fn load() -> Result<Self, AppError> {
        let dirs = candidate_dirs();
        for dir in &dirs {
            let path = dir.join("config.toml");
            if path.exists() {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| AppError::Config { path: path.clone(), source })?;
                return Ok(NovelConfig::from_toml_str(&text, dir));
            }
        }
        Ok(NovelConfig::default())
    }

    /// Build a config from TOML text. Relative log paths resolve
    /// against `base_dir`. Parse errors fall back to defaults and are
    /// recorded in `warning`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => NovelConfig::from_schema(cfg, base_dir),
            Err(e) => {
                let mut cfg = NovelConfig::default();
                cfg.warning = Some(format!("config.toml parse error: {e}; using default settings"));
                cfg
            }
        }
    }

    fn from_schema(cfg: TomlConfig, base_dir: &Path) -> Self {
        let file = cfg.logging.file
            .filter(|f| !f.trim().is_empty())
            .map(|f| {
                let p = PathBuf::from(f);
                if p.is_absolute() { p } else { base_dir.join(p) }
            });

        NovelConfig {
            frame_ms: cfg.general.frame_ms.max(1),
            gamepad: GamepadConfig {
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
                reset: cfg.gamepad.reset,
                reward: cfg.gamepad.reward,
            },
            sound_enabled: cfg.sound.enabled,
            logging: LoggingConfig {
                file,
                level: cfg.logging.level,
            },
            warning: None,
        }
    }
}

impl Default for NovelConfig {
    fn default() -> Self {
        NovelConfig::from_schema(TomlConfig::default(), Path::new("."))
    }
}

/// Candidate directories to search: exe dir + CWD + XDG config (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG config home (~/.config/virus)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".config/virus");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = NovelConfig::from_toml_str("", Path::new("/tmp"));
        assert_eq!(cfg.frame_ms, 16);
        assert!(cfg.sound_enabled);
        assert_eq!(cfg.logging.file, None);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.gamepad.confirm, vec!["A".to_string(), "Start".to_string()]);
        assert!(cfg.warning.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
            [sound]
            enabled = false

            [gamepad]
            reward = ["R1"]
        "#;
        let cfg = NovelConfig::from_toml_str(text, Path::new("/tmp"));
        assert!(!cfg.sound_enabled);
        assert_eq!(cfg.gamepad.reward, vec!["R1".to_string()]);
        assert_eq!(cfg.gamepad.reset, vec!["X".to_string()]);
        assert_eq!(cfg.frame_ms, 16);
    }

    #[test]
    fn relative_log_path_resolves_against_config_dir() {
        let text = r#"
            [logging]
            file = "virus.log"
            level = "debug"
        "#;
        let cfg = NovelConfig::from_toml_str(text, Path::new("/opt/virus"));
        assert_eq!(cfg.logging.file, Some(PathBuf::from("/opt/virus/virus.log")));
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn blank_log_path_disables_logging() {
        let cfg = NovelConfig::from_toml_str("[logging]\nfile = \"  \"\n", Path::new("/tmp"));
        assert_eq!(cfg.logging.file, None);
    }

    #[test]
    fn zero_frame_time_is_raised() {
        let cfg = NovelConfig::from_toml_str("[general]\nframe_ms = 0\n", Path::new("/tmp"));
        assert_eq!(cfg.frame_ms, 1);
    }

    #[test]
    fn parse_error_falls_back_with_warning() {
        let cfg = NovelConfig::from_toml_str("[sound\nenabled = ", Path::new("/tmp"));
        assert!(cfg.warning.is_some());
        assert!(cfg.sound_enabled);
        assert_eq!(cfg.frame_ms, 16);
    }
}
