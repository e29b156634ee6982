//! Configuration module for `AstecaProgress`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::storage::CorruptPolicy;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Points required per level when the config does not say otherwise.
const DEFAULT_POINTS_PER_LEVEL: u32 = 100;

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the file-backed store
    #[serde(default)]
    pub data_dir: String,
    /// Store key for the user progress record
    #[serde(default)]
    pub progress_key: String,
    /// Store key for the exam booking book
    #[serde(default)]
    pub exam_key: String,
    /// What to do with an unreadable record: "use-defaults" or "reject"
    #[serde(default)]
    pub corrupt_policy: String,
}

/// Progression configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Points required to advance one level
    #[serde(default)]
    pub points_per_level: u32,
    /// Point value awarded per named event (e.g. `course_link_visit = 10`)
    #[serde(default)]
    pub rewards: BTreeMap<String, u32>,
}

/// Report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default report format ("markdown" or "html")
    #[serde(default)]
    pub format: String,
    /// Directory for generated report files
    #[serde(default)]
    pub output_dir: String,
}

/// User identity shown in reports and rankings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Team name, matched against the catalog team table
    #[serde(default)]
    pub team: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Progression settings
    #[serde(default)]
    pub progression: ProgressionConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// User identity settings
    #[serde(default)]
    pub user: UserConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the store data directory
    pub data_dir: Option<String>,
}

impl Config {
    /// Get the `$ASTECA_PROGRESS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/astecaprogress`
    /// - macOS: `~/Library/Application Support/astecaprogress`
    /// - Windows: `%APPDATA%\astecaprogress`
    #[must_use]
    pub fn get_astecaprogress_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("astecaprogress")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// This method is used when loading configuration to ensure that newly added
    /// configuration fields are populated with their default values. Only fields
    /// that are empty (or zero) in the current config and non-empty in defaults
    /// are updated.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::from_toml(old_config_str)?;
    /// let defaults = Config::from_defaults();
    /// if config.merge_defaults(&defaults) {
    ///     // Config was updated with new fields
    ///     config.save()?;
    /// }
    /// ```
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // Merge logging fields - only if they're empty (use defaults for empty values)
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        // Merge storage fields
        if self.storage.data_dir.is_empty() && !defaults.storage.data_dir.is_empty() {
            self.storage.data_dir.clone_from(&defaults.storage.data_dir);
            changed = true;
        }
        if self.storage.progress_key.is_empty() && !defaults.storage.progress_key.is_empty() {
            self.storage
                .progress_key
                .clone_from(&defaults.storage.progress_key);
            changed = true;
        }
        if self.storage.exam_key.is_empty() && !defaults.storage.exam_key.is_empty() {
            self.storage.exam_key.clone_from(&defaults.storage.exam_key);
            changed = true;
        }
        if self.storage.corrupt_policy.is_empty() && !defaults.storage.corrupt_policy.is_empty() {
            self.storage
                .corrupt_policy
                .clone_from(&defaults.storage.corrupt_policy);
            changed = true;
        }

        // Merge progression fields - zero means unset for the level quantum
        if self.progression.points_per_level == 0 && defaults.progression.points_per_level != 0 {
            self.progression.points_per_level = defaults.progression.points_per_level;
            changed = true;
        }
        if self.progression.rewards.is_empty() && !defaults.progression.rewards.is_empty() {
            self.progression.rewards.clone_from(&defaults.progression.rewards);
            changed = true;
        }

        // Merge report fields
        if self.report.format.is_empty() && !defaults.report.format.is_empty() {
            self.report.format.clone_from(&defaults.report.format);
            changed = true;
        }
        if self.report.output_dir.is_empty() && !defaults.report.output_dir.is_empty() {
            self.report.output_dir.clone_from(&defaults.report.output_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// This allows command-line arguments to override configuration file values
    /// without modifying the persistent configuration file. Only non-`None` values
    /// in the overrides struct will replace config values.
    ///
    /// # Arguments
    ///
    /// * `overrides` - A `ConfigOverrides` struct with optional override values
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// // config.logging.level is now "debug" for this run only
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(data_dir) = &overrides.data_dir {
            self.storage.data_dir.clone_from(data_dir);
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    ///
    /// The file is located in the directory returned by [`get_astecaprogress_dir`].
    ///
    /// [`get_astecaprogress_dir`]: Self::get_astecaprogress_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_astecaprogress_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ASTECA_PROGRESS` variable in a string
    ///
    /// Replaces occurrences of `$ASTECA_PROGRESS` with the actual astecaprogress
    /// directory path. This allows configuration values to reference the
    /// config directory dynamically.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$ASTECA_PROGRESS") {
            let asteca_dir = Self::get_astecaprogress_dir();
            value.replace("$ASTECA_PROGRESS", asteca_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands any `$ASTECA_PROGRESS`
    /// variables in the path-valued fields. Missing fields will use their serde
    /// defaults (typically empty strings, zero, or false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in path-valued fields
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.storage.data_dir = Self::expand_variables(&config.storage.data_dir);
        config.report.output_dir = Self::expand_variables(&config.report.output_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Loads the compiled-in default configuration that is bundled with the binary.
    /// The defaults differ between debug and release builds:
    /// - Debug: Uses `DefaultCLIConfigDebug.toml`
    /// - Release: Uses `DefaultCLIConfigRelease.toml`
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML or cannot be parsed.
    /// This should never happen in practice since the defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// This is the primary way to load configuration. It handles several scenarios:
    /// - If config file exists: Loads from file, merges missing fields from defaults, saves updated config
    /// - If config file doesn't exist (first run): Creates config directory if needed, loads defaults, saves to file
    ///
    /// The merge behavior ensures that upgrading the application automatically adds new config
    /// fields while preserving existing user settings.
    ///
    /// # Returns
    /// A `Config` instance loaded from file or defaults. Falls back to defaults if any error occurs
    /// during loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults

            // Create the directory if it doesn't exist
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Save the default config
            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// Serializes the current configuration to TOML format and writes it to the
    /// platform-specific config file. The config directory will be created if it
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config cannot be serialized to TOML (shouldn't happen)
    /// - The config directory cannot be created
    /// - The file cannot be written (permissions, disk full, etc.)
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// The store data directory as a path.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// The corrupt-record policy named by the config.
    ///
    /// Unknown or empty values fall back to [`CorruptPolicy::UseDefaults`],
    /// matching the recover-quietly behavior the store was built around.
    #[must_use]
    pub fn corrupt_policy(&self) -> CorruptPolicy {
        self.storage
            .corrupt_policy
            .parse()
            .unwrap_or(CorruptPolicy::UseDefaults)
    }

    /// Points required to advance one level (zero in the file means unset).
    #[must_use]
    pub const fn points_per_level(&self) -> u32 {
        if self.progression.points_per_level == 0 {
            DEFAULT_POINTS_PER_LEVEL
        } else {
            self.progression.points_per_level
        }
    }

    /// Point value for a named event from the rewards table.
    #[must_use]
    pub fn reward_for(&self, event: &str) -> Option<u32> {
        self.progression.rewards.get(event).copied()
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `data_dir`: Store data directory
    /// - `progress_key`: Store key for the progress record
    /// - `exam_key`: Store key for the exam book
    /// - `corrupt_policy`: Unreadable-record policy
    /// - `points_per_level`: Level quantum
    /// - `rewards.<event>`: Point value for a named event
    /// - `format`: Default report format
    /// - `output_dir`: Report output directory
    /// - `name`, `team`: User identity
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(event) = key.strip_prefix("rewards.") {
            return self.reward_for(event).map(|points| points.to_string());
        }
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" | "data-dir" => Some(self.storage.data_dir.clone()),
            "progress_key" | "progress-key" => Some(self.storage.progress_key.clone()),
            "exam_key" | "exam-key" => Some(self.storage.exam_key.clone()),
            "corrupt_policy" | "corrupt-policy" => Some(self.storage.corrupt_policy.clone()),
            "points_per_level" | "points-per-level" => {
                Some(self.progression.points_per_level.to_string())
            }
            "format" => Some(self.report.format.clone()),
            "output_dir" | "output-dir" => Some(self.report.output_dir.clone()),
            "name" => Some(self.user.name.clone()),
            "team" => Some(self.user.team.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates a configuration value using a string key and value. The value will
    /// be validated and converted to the appropriate type.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The key is not recognized
    /// - The value cannot be parsed (e.g., "maybe" for the verbose boolean, a
    ///   zero or non-numeric level quantum, an unknown corrupt policy)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        if let Some(event) = key.strip_prefix("rewards.") {
            let points = value
                .parse::<u32>()
                .map_err(|_| format!("Invalid point value for '{key}': '{value}'"))?;
            self.progression.rewards.insert(event.to_string(), points);
            return Ok(());
        }
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" | "data-dir" => self.storage.data_dir = value.to_string(),
            "progress_key" | "progress-key" => self.storage.progress_key = value.to_string(),
            "exam_key" | "exam-key" => self.storage.exam_key = value.to_string(),
            "corrupt_policy" | "corrupt-policy" => {
                value
                    .parse::<CorruptPolicy>()
                    .map_err(|e| format!("Invalid corrupt policy: {e}"))?;
                self.storage.corrupt_policy = value.to_string();
            }
            "points_per_level" | "points-per-level" => {
                let quantum = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid level quantum: '{value}'"))?;
                if quantum == 0 {
                    return Err("points_per_level must be at least 1".to_string());
                }
                self.progression.points_per_level = quantum;
            }
            "format" => self.report.format = value.to_string(),
            "output_dir" | "output-dir" => self.report.output_dir = value.to_string(),
            "name" => self.user.name = value.to_string(),
            "team" => self.user.team = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Resets a single configuration value to its default value. This is useful
    /// for reverting individual settings without losing all customizations. A
    /// `rewards.<event>` key reverts to the default table's value, or is removed
    /// when the defaults have no such event.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        if let Some(event) = key.strip_prefix("rewards.") {
            match defaults.progression.rewards.get(event) {
                Some(points) => {
                    self.progression.rewards.insert(event.to_string(), *points);
                }
                None => {
                    self.progression.rewards.remove(event);
                }
            }
            return Ok(());
        }
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" | "data-dir" => {
                self.storage.data_dir.clone_from(&defaults.storage.data_dir);
            }
            "progress_key" | "progress-key" => self
                .storage
                .progress_key
                .clone_from(&defaults.storage.progress_key),
            "exam_key" | "exam-key" => {
                self.storage.exam_key.clone_from(&defaults.storage.exam_key);
            }
            "corrupt_policy" | "corrupt-policy" => self
                .storage
                .corrupt_policy
                .clone_from(&defaults.storage.corrupt_policy),
            "points_per_level" | "points-per-level" => {
                self.progression.points_per_level = defaults.progression.points_per_level;
            }
            "format" => self.report.format.clone_from(&defaults.report.format),
            "output_dir" | "output-dir" => {
                self.report.output_dir.clone_from(&defaults.report.output_dir);
            }
            "name" => self.user.name.clone_from(&defaults.user.name),
            "team" => self.user.team.clone_from(&defaults.user.team),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, causing the next [`load()`](Config::load)
    /// call to recreate it from defaults. This is a destructive operation that
    /// removes all user customizations.
    ///
    /// If the config file doesn't exist, this method succeeds without doing anything.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config file exists but cannot be deleted (permissions, file locked, etc.)
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[storage]")?;
        writeln!(f, "  data_dir = \"{}\"", self.storage.data_dir)?;
        writeln!(f, "  progress_key = \"{}\"", self.storage.progress_key)?;
        writeln!(f, "  exam_key = \"{}\"", self.storage.exam_key)?;
        writeln!(f, "  corrupt_policy = \"{}\"", self.storage.corrupt_policy)?;

        writeln!(f, "\n[progression]")?;
        writeln!(f, "  points_per_level = {}", self.progression.points_per_level)?;
        for (event, points) in &self.progression.rewards {
            writeln!(f, "  rewards.{event} = {points}")?;
        }

        writeln!(f, "\n[report]")?;
        writeln!(f, "  format = \"{}\"", self.report.format)?;
        writeln!(f, "  output_dir = \"{}\"", self.report.output_dir)?;

        writeln!(f, "\n[user]")?;
        writeln!(f, "  name = \"{}\"", self.user.name)?;
        writeln!(f, "  team = \"{}\"", self.user.team)?;

        Ok(())
    }
}
