//! Configuration for the outline workspace
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority, `OUTLY_*`)
//! 2. Config file (~/.config/outly/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

use crate::outline::format::DEFAULT_INDENT_WIDTH;


/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Columns of indentation per outline nesting level
    pub indent_width: usize,

    /// Theme name: "dark", "light", "mono"
    pub theme: String,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Milliseconds between scripted demo steps
    pub demo_cadence_ms: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            theme: "dark".to_string(),
            enable_tui: true,
            demo_cadence_ms: 1500,
            logging: LoggingConfig::default(),
        }
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,

    /// Whether to also write JSON logs to rotating files
    pub file_enabled: bool,

    pub file_dir: PathBuf,
    pub file_prefix: String,
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "outly".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (the subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub indent_width: Option<usize>,
    pub theme: Option<String>,
    pub demo_cadence_ms: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_prefix: Option<String>,
    pub file_rotation: Option<LogRotation>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/outly/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("outly").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional, fail quietly.
            }
        }

        let template = Self::default().to_toml();
        let _ = std::fs::write(&path, template);
    }

    /// Serialize as the commented config template. Single source of truth
    /// for `ensure_config_exists` and `config --reset`.
    pub fn to_toml(&self) -> String {
        format!(
            "# outly configuration\n\
             # Environment variables (OUTLY_*) take precedence over this file.\n\
             \n\
             # Columns of indentation per outline nesting level\n\
             indent_width = {indent_width}\n\
             \n\
             # Theme: \"dark\", \"light\", \"mono\"\n\
             theme = {theme:?}\n\
             \n\
             # Milliseconds between demo session steps\n\
             demo_cadence_ms = {cadence}\n\
             \n\
             [logging]\n\
             # Default level when RUST_LOG is not set: error, warn, info, debug, trace\n\
             level = {level:?}\n\
             # Also write JSON logs to rotating files\n\
             file_enabled = {file_enabled}\n\
             file_dir = {file_dir:?}\n\
             file_prefix = {file_prefix:?}\n\
             # Rotation: \"hourly\", \"daily\", \"never\"\n\
             file_rotation = {rotation:?}\n",
            indent_width = self.indent_width,
            theme = self.theme,
            cadence = self.demo_cadence_ms,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_prefix = self.logging.file_prefix,
            rotation = self.logging.file_rotation.as_str(),
        )
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is a fatal error;
    /// failing fast beats silently running on defaults while the user
    /// debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, delete the file and restart outly.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Merge a parsed file over the built-in defaults. Env overrides are
    /// applied separately in `from_env` so this stays testable.
    pub(crate) fn merge(file: FileConfig) -> Self {
        let defaults = Self::default();
        let file_logging = file.logging.unwrap_or_default();

        Self {
            indent_width: file.indent_width.unwrap_or(defaults.indent_width),
            theme: file.theme.unwrap_or(defaults.theme),
            enable_tui: defaults.enable_tui,
            demo_cadence_ms: file.demo_cadence_ms.unwrap_or(defaults.demo_cadence_ms),
            logging: LoggingConfig {
                level: file_logging.level.unwrap_or(defaults.logging.level),
                file_enabled: file_logging
                    .file_enabled
                    .unwrap_or(defaults.logging.file_enabled),
                file_dir: file_logging
                    .file_dir
                    .map(PathBuf::from)
                    .unwrap_or(defaults.logging.file_dir),
                file_prefix: file_logging
                    .file_prefix
                    .unwrap_or(defaults.logging.file_prefix),
                file_rotation: file_logging
                    .file_rotation
                    .unwrap_or(defaults.logging.file_rotation),
            },
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let mut config = Self::merge(Self::load_file_config());

        if let Some(theme) = std::env::var("OUTLY_THEME").ok().filter(|s| !s.is_empty()) {
            config.theme = theme;
        }

        if let Some(width) = std::env::var("OUTLY_INDENT_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.indent_width = width;
        }

        // TUI toggle: env only (runtime flag)
        config.enable_tui = std::env::var("OUTLY_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        if let Ok(dir) = std::env::var("OUTLY_LOG_DIR") {
            config.logging.file_dir = PathBuf::from(dir);
        }

        config
    }
}
