// LogDock - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::layout::DockEdge;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogDock data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logdock/ or %APPDATA%\LogDock\)
    pub config_dir: PathBuf,

    /// Data directory for the persisted session.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Minimized band thickness in logical pixels.
    pub band_thickness: Option<f64>,
    /// Grid row cap (0 = unbounded).
    pub max_rows: Option<usize>,
    /// Grid column cap (0 = unbounded).
    pub max_columns: Option<usize>,
    /// Docking edge for minimized panels: "top", "bottom", "left",
    /// "right", or "none".
    pub dock_edge: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Minimized band thickness in logical pixels.
    pub band_thickness: f64,
    /// Grid row cap (0 = unbounded).
    pub max_rows: usize,
    /// Grid column cap (0 = unbounded).
    pub max_columns: usize,
    /// Docking edge for minimized panels.
    pub dock_edge: DockEdge,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            band_thickness: constants::DEFAULT_BAND_THICKNESS,
            max_rows: 0,
            max_columns: 0,
            dock_edge: DockEdge::Right,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning -- the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: band_thickness --
    if let Some(thickness) = raw.ui.band_thickness {
        if (constants::MIN_BAND_THICKNESS..=constants::MAX_BAND_THICKNESS).contains(&thickness) {
            config.band_thickness = thickness;
        } else {
            warnings.push(format!(
                "[ui] band_thickness = {thickness} is out of range ({}-{}). Using default ({}).",
                constants::MIN_BAND_THICKNESS,
                constants::MAX_BAND_THICKNESS,
                constants::DEFAULT_BAND_THICKNESS,
            ));
        }
    }

    // -- UI: max_rows --
    if let Some(rows) = raw.ui.max_rows {
        if rows <= constants::MAX_GRID_CAP {
            config.max_rows = rows;
        } else {
            warnings.push(format!(
                "[ui] max_rows = {rows} is out of range (0-{}). Using default (0 = unbounded).",
                constants::MAX_GRID_CAP,
            ));
        }
    }

    // -- UI: max_columns --
    if let Some(columns) = raw.ui.max_columns {
        if columns <= constants::MAX_GRID_CAP {
            config.max_columns = columns;
        } else {
            warnings.push(format!(
                "[ui] max_columns = {columns} is out of range (0-{}). Using default (0 = unbounded).",
                constants::MAX_GRID_CAP,
            ));
        }
    }

    // -- UI: dock_edge --
    if let Some(ref edge) = raw.ui.dock_edge {
        match edge.parse::<DockEdge>() {
            Ok(parsed) => config.dock_edge = parsed,
            Err(_) => {
                warnings.push(format!(
                    "[ui] dock_edge = \"{edge}\" is not recognised. \
                     Valid values: top, bottom, left, right, none. Using default (right).",
                ));
            }
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults_without_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert!(config.dark_mode);
        assert_eq!(config.band_thickness, constants::DEFAULT_BAND_THICKNESS);
        assert_eq!(config.dock_edge, DockEdge::Right);
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[ui]
theme = "light"
band_thickness = 300.0
max_rows = 2
dock_edge = "bottom"

[logging]
level = "debug"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert!(!config.dark_mode);
        assert_eq!(config.band_thickness, 300.0);
        assert_eq!(config.max_rows, 2);
        assert_eq!(config.dock_edge, DockEdge::Bottom);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[ui]
band_thickness = 5.0
max_columns = 99
dock_edge = "diagonal"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.band_thickness, constants::DEFAULT_BAND_THICKNESS);
        assert_eq!(config.max_columns, 0);
        assert_eq!(config.dock_edge, DockEdge::Right);
    }

    #[test]
    fn test_unparseable_config_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "not [ valid toml");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
        assert!(config.dark_mode);
    }
}
