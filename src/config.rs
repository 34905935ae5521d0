use crate::layout::{LayoutSettings, RankBasis, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_SPACING};
use clap::{Parser, ValueEnum};
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Layout units covered by one terminal column / row.
const DEFAULT_CELL_WIDTH: f64 = 10.0;
const DEFAULT_CELL_HEIGHT: f64 = 40.0;
const DEFAULT_MAX_LABEL_WIDTH: u16 = 16;
const DEFAULT_START_FULLSCREEN: bool = false;
const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_PREFIX: &str = "MINDWEAVE";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    column_width: Option<f64>,
    row_spacing: Option<f64>,
    rank_basis: Option<RankBasis>,
    cell_width: Option<f64>,
    cell_height: Option<f64>,
    max_label_width: Option<u16>,
    start_fullscreen: Option<bool>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub filename: Option<PathBuf>, // From command line argument
    pub column_width: f64,
    pub row_spacing: f64,
    pub rank_basis: RankBasis,
    pub cell_width: f64,
    pub cell_height: f64,
    pub max_label_width: u16,
    pub start_fullscreen: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            filename: None,
            column_width: DEFAULT_COLUMN_WIDTH,
            row_spacing: DEFAULT_ROW_SPACING,
            rank_basis: RankBasis::default(),
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            max_label_width: DEFAULT_MAX_LABEL_WIDTH,
            start_fullscreen: DEFAULT_START_FULLSCREEN,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            column_width: self.column_width,
            row_spacing: self.row_spacing,
            rank_basis: self.rank_basis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Nodes, edges and view flags as JSON
    Json,
    /// Indented outline of the visible nodes
    Text,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Mind map viewer for analysis results", long_about = None)]
pub struct CliArgs {
    /// Analysis result to load: a JSON node array or a `{"mindmap": [...]}` response
    pub filename: Option<PathBuf>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the computed frame and exit instead of opening the viewer
    #[arg(long, value_enum)]
    pub dump: Option<DumpFormat>,

    /// Collapse every node below the roots before showing the map
    #[arg(long)]
    pub collapse_all: bool,

    /// Toggle the node with this id (repeatable)
    #[arg(long = "toggle", value_name = "ID")]
    pub toggles: Vec<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub debug_config: bool,

    #[arg(long)]
    pub column_width: Option<f64>,
    #[arg(long)]
    pub row_spacing: Option<f64>,
    #[arg(long, value_enum)]
    pub rank_basis: Option<RankBasis>,
    #[arg(long)]
    pub cell_width: Option<f64>,
    #[arg(long)]
    pub cell_height: Option<f64>,
    #[arg(long)]
    pub max_label_width: Option<u16>,

    /// Start in fullscreen mode
    #[arg(long)]
    pub fullscreen: bool,

    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Loads configuration from all sources.
pub fn load_config(args: &CliArgs) -> Result<AppConfig, ConfigError> {
    // MINDWEAVE_ROW_SPACING=80; nested keys would use `__`.
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__");
    // Missing env vars are fine; an unreadable environment just means no overrides.
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    build_config_from_args(args, Some(env_map))
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mindweave").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// Separate function to allow testing with specific args and override sources
pub fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<AppConfig, ConfigError> {
    let config_file_path = args.config.clone().or_else(default_config_path);

    let mut config_builder = ConfigCrate::builder();

    if let Some(ref path) = config_file_path {
        config_builder = config_builder.add_source(File::from(path.clone()).required(false));
    }

    // Overrides (environment or a test map) beat the file.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded: FileConfig = config_builder.build()?.try_deserialize()?;

    // args > overrides > file > defaults
    let config = AppConfig {
        filename: args.filename.clone(),
        column_width: args
            .column_width
            .or(loaded.column_width)
            .unwrap_or(DEFAULT_COLUMN_WIDTH),
        row_spacing: args
            .row_spacing
            .or(loaded.row_spacing)
            .unwrap_or(DEFAULT_ROW_SPACING),
        rank_basis: args.rank_basis.or(loaded.rank_basis).unwrap_or_default(),
        cell_width: args
            .cell_width
            .or(loaded.cell_width)
            .unwrap_or(DEFAULT_CELL_WIDTH),
        cell_height: args
            .cell_height
            .or(loaded.cell_height)
            .unwrap_or(DEFAULT_CELL_HEIGHT),
        max_label_width: args
            .max_label_width
            .or(loaded.max_label_width)
            .unwrap_or(DEFAULT_MAX_LABEL_WIDTH),
        start_fullscreen: args.fullscreen
            || loaded.start_fullscreen.unwrap_or(DEFAULT_START_FULLSCREEN),
        log_level: args
            .log_level
            .clone()
            .or(loaded.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        log_file: args.log_file.clone().or(loaded.log_file),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Validates the loaded configuration for consistency.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let positive = [
        ("column_width", config.column_width),
        ("row_spacing", config.row_spacing),
        ("cell_width", config.cell_width),
        ("cell_height", config.cell_height),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a positive number, got {}",
                name, value
            )));
        }
    }

    if config.max_label_width == 0 {
        return Err(ConfigError::ValidationError(
            "max_label_width must be at least 1".to_string(),
        ));
    }

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&config.log_level) {
        return Err(ConfigError::ValidationError(format!(
            "log_level {:?} is not a valid filter: {}",
            config.log_level, e
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ValueKind;
    use std::io::Write;

    fn test_args(extra: &[&str]) -> CliArgs {
        let mut cmd = vec!["mindweave"];
        cmd.extend_from_slice(extra);
        CliArgs::try_parse_from(cmd).expect("Failed to parse test args")
    }

    // Points at a file that does not exist so a user's own config never leaks in.
    fn isolated(extra: &[&str]) -> (tempfile::TempDir, CliArgs) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("none.toml");
        let missing = missing.to_str().expect("temp path is utf-8").to_string();
        let mut cmd = vec!["--config", missing.as_str()];
        cmd.extend_from_slice(extra);
        let args = test_args(&cmd);
        (dir, args)
    }

    #[test]
    fn test_default_config() {
        let (_dir, args) = isolated(&[]);
        let config = build_config_from_args(&args, None).expect("Failed to load default config");

        assert_eq!(config.column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(config.row_spacing, DEFAULT_ROW_SPACING);
        assert_eq!(config.rank_basis, RankBasis::Visible);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.filename.is_none(), "Default filename should be None");
        assert!(!config.start_fullscreen);
    }

    #[test]
    fn test_file_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp config");
        writeln!(file, "column_width = 100.0\nrank_basis = \"all\"\nstart_fullscreen = true")
            .expect("Failed to write temp config");

        let path = file.path().to_str().expect("temp path is utf-8").to_string();
        let args = test_args(&["--config", path.as_str()]);
        let config = build_config_from_args(&args, None).expect("Failed to load file config");

        assert_eq!(config.column_width, 100.0);
        assert_eq!(config.rank_basis, RankBasis::All);
        assert!(config.start_fullscreen);
        assert_eq!(config.row_spacing, DEFAULT_ROW_SPACING);
    }

    #[test]
    fn test_env_override() {
        let mut override_map = Map::new();
        override_map.insert(
            "row_spacing".to_string(),
            Value::new(None, ValueKind::Float(60.0)),
        );
        override_map.insert(
            "log_level".to_string(),
            Value::new(None, ValueKind::String("debug".to_string())),
        );

        let (_dir, args) = isolated(&[]);
        let config = build_config_from_args(&args, Some(override_map))
            .expect("Failed to load config with simulated env");

        assert_eq!(config.row_spacing, 60.0, "Env override row_spacing failed");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.column_width, DEFAULT_COLUMN_WIDTH,
            "Env override affected unrelated default"
        );
    }

    #[test]
    fn test_arg_override() {
        let mut override_map = Map::new();
        override_map.insert(
            "column_width".to_string(),
            Value::new(None, ValueKind::Float(50.0)),
        );

        let (_dir, args) = isolated(&[
            "map.json",
            "--column-width=300",
            "--rank-basis=all",
            "--fullscreen",
        ]);
        let config = build_config_from_args(&args, Some(override_map))
            .expect("Failed to build config from args");

        assert_eq!(config.filename, Some(PathBuf::from("map.json")));
        assert_eq!(config.column_width, 300.0);
        assert_eq!(config.rank_basis, RankBasis::All);
        assert!(config.start_fullscreen);
    }

    #[test]
    fn test_cli_intents() {
        let args = test_args(&["--dump", "text", "--collapse-all", "--toggle", "a", "--toggle", "7"]);
        assert_eq!(args.dump, Some(DumpFormat::Text));
        assert!(args.collapse_all);
        assert_eq!(args.toggles, vec!["a", "7"]);
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let (_dir, args) = isolated(&["--row-spacing=0"]);
        let err = build_config_from_args(&args, None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("row_spacing"));
    }

    #[test]
    fn test_rejects_zero_label_width() {
        let (_dir, args) = isolated(&["--max-label-width=0"]);
        assert!(build_config_from_args(&args, None).is_err());
    }

    #[test]
    fn test_layout_settings() {
        let config = AppConfig {
            column_width: 80.0,
            ..AppConfig::default()
        };
        let settings = config.layout_settings();
        assert_eq!(settings.column_width, 80.0);
        assert_eq!(settings.row_spacing, DEFAULT_ROW_SPACING);
    }
}
