//! Configuration loading and validation for the heart field.
//!
//! Files are JSON unless their extension is `.toml`.

use std::fs;
use std::path::Path;

use heartburst_simulation::{Canvas, ExplosionParams, FieldSettings, SimulationError, MIN_CANVAS_EXTENT};
use thiserror::Error;

// Re-export types
pub use self::types::{
    defaults, Config, FileSenderOptions, SenderConfig, SenderType, SerializerConfig, SerializerType,
    SimulationConfig, TransportConfig,
};
mod types;

// Config error handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<SimulationError> for ConfigError {
    fn from(err: SimulationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Reads, parses and validates a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: Config = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let sim = &config.simulation;

    // Validate canvas dimensions
    if sim.canvas_width < MIN_CANVAS_EXTENT || sim.canvas_height < MIN_CANVAS_EXTENT {
        return Err(ConfigError::ValidationError(format!(
            "Canvas must be at least {MIN_CANVAS_EXTENT}x{MIN_CANVAS_EXTENT} pixels"
        )));
    }

    // Validate explosion parameters
    if !sim.explosion_radius.is_finite() || sim.explosion_radius <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Explosion radius must be positive".to_string(),
        ));
    }
    if !sim.explosion_force.is_finite() || sim.explosion_force <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Explosion force must be positive".to_string(),
        ));
    }

    // Validate frame rate
    if sim.frame_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Frame rate must be greater than 0".to_string(),
        ));
    }

    // Validate output frequency
    if config.transport.output_frequency == 0 {
        return Err(ConfigError::ValidationError(
            "Output frequency must be greater than 0".to_string(),
        ));
    }

    if config.transport.sender.sender_type == SenderType::File {
        config.transport.sender.file_options()?;
    }

    Ok(())
}

impl SimulationConfig {
    pub fn canvas(&self) -> Result<Canvas, ConfigError> {
        Ok(Canvas::new(self.canvas_width, self.canvas_height)?)
    }

    pub fn field_settings(&self) -> Result<FieldSettings, ConfigError> {
        let explosion = ExplosionParams::new(self.explosion_radius, self.explosion_force)?;
        let settings = FieldSettings::new(self.particle_count, explosion)
            .with_debug_overlay(self.debug_overlay)
            .with_frame_rate(self.frame_rate)?
            .with_parallel_threshold(self.parallel_threshold);
        Ok(settings)
    }
}

impl SenderConfig {
    /// Options for the `file` sender. The output path is required.
    pub fn file_options(&self) -> Result<FileSenderOptions, ConfigError> {
        let value = self.options.clone().ok_or_else(|| {
            ConfigError::ValidationError("File sender requires options.output_path".to_string())
        })?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_minimal_json_with_defaults() {
        let file = write_json(
            r#"{
              "simulation": {
                "canvas_width": 800,
                "canvas_height": 600,
                "particle_count": 200,
                "explosion_radius": 200.0,
                "explosion_force": 50.0
              }
            }"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config, Config::reference(800, 600));
        assert_eq!(config.simulation.frame_rate, 25);
        assert!(!config.simulation.debug_overlay);
        assert_eq!(config.transport.serializer.serializer_type, SerializerType::Json);
        assert_eq!(config.transport.sender.sender_type, SenderType::Stdio);
        assert_eq!(config.transport.output_frequency, 1);
    }

    #[test]
    fn load_toml_with_file_sender() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("hearts.toml");
        file.write_str(
            r#"
[simulation]
canvas_width = 1024
canvas_height = 768
particle_count = 0
explosion_radius = 150.0
explosion_force = 20.0
debug_overlay = true
frame_rate = 50
seed = 99

[transport]
output_frequency = 5

[transport.serializer]
type = "binary"

[transport.sender]
type = "file"
options = { output_path = "frames.log" }
"#,
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.simulation.particle_count, 0);
        assert_eq!(config.simulation.seed, Some(99));
        assert!(config.simulation.debug_overlay);
        assert_eq!(config.transport.serializer.serializer_type, SerializerType::Binary);
        assert_eq!(
            config.transport.sender.file_options().unwrap().output_path,
            "frames.log"
        );
        assert_eq!(config.simulation.field_settings().unwrap().tick_period, Duration::from_millis(20));
    }

    #[test]
    fn simulation_config_builds_field_settings() {
        let config = Config::reference(800, 600);

        let canvas = config.simulation.canvas().unwrap();
        assert_eq!(canvas.dimensions(), (800, 600));

        let settings = config.simulation.field_settings().unwrap();
        assert_eq!(settings.particle_count, 200);
        assert_eq!(settings.explosion.radius(), 200.0);
        assert_eq!(settings.explosion.force(), 50.0);
        assert_eq!(settings.tick_period, Duration::from_millis(40));
    }

    #[test]
    fn omitted_settings_match_simulation_defaults() {
        let settings = Config::reference(800, 600).simulation.field_settings().unwrap();
        let direct = FieldSettings::new(200, ExplosionParams::new(200.0, 50.0).unwrap());

        assert_eq!(settings, direct);
        assert_eq!(settings.tick_period, heartburst_simulation::DEFAULT_TICK_PERIOD);
        assert_eq!(settings.parallel_threshold, heartburst_simulation::DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn rejects_small_canvas() {
        let mut config = Config::reference(800, 600);
        config.simulation.canvas_height = 50;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_non_positive_explosion() {
        let mut config = Config::reference(800, 600);
        config.simulation.explosion_force = 0.0;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));

        let mut config = Config::reference(800, 600);
        config.simulation.explosion_radius = -10.0;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_zero_frame_rate() {
        let file = write_json(
            r#"{
              "simulation": {
                "canvas_width": 800, "canvas_height": 600, "particle_count": 10,
                "explosion_radius": 200.0, "explosion_force": 50.0, "frame_rate": 0
              }
            }"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn file_sender_needs_output_path() {
        let mut config = Config::reference(800, 600);
        config.transport.sender.sender_type = SenderType::File;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let file = write_json(r#"{ "simulation": { "canvas_width": 800 } }"#);
        assert!(matches!(load_config(file.path()), Err(ConfigError::JsonParseError(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_config(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
