use serde::{Deserialize, Serialize};

/// Default values for every optional setting.
pub mod defaults {
    use heartburst_simulation::{DEFAULT_FRAME_RATE, DEFAULT_PARALLEL_THRESHOLD};

    /// 25 frames per second, a 40ms tick.
    pub const FRAME_RATE: u32 = DEFAULT_FRAME_RATE;
    pub const PARALLEL_THRESHOLD: usize = DEFAULT_PARALLEL_THRESHOLD;
    pub const OUTPUT_FREQUENCY: u32 = 1;
    pub const DEBUG_OVERLAY: bool = false;

    // Reference page setup.
    pub const REFERENCE_PARTICLE_COUNT: usize = 200;
    pub const REFERENCE_EXPLOSION_RADIUS: f64 = 200.0;
    pub const REFERENCE_EXPLOSION_FORCE: f64 = 50.0;

    pub(crate) fn frame_rate() -> u32 { FRAME_RATE }
    pub(crate) fn parallel_threshold() -> usize { PARALLEL_THRESHOLD }
    pub(crate) fn output_frequency() -> u32 { OUTPUT_FREQUENCY }
    pub(crate) fn debug_overlay() -> bool { DEBUG_OVERLAY }
}

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// The reference setup: 200 hearts, radius 200, force 50, 25 fps.
    pub fn reference(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            simulation: SimulationConfig {
                canvas_width,
                canvas_height,
                particle_count: defaults::REFERENCE_PARTICLE_COUNT,
                explosion_radius: defaults::REFERENCE_EXPLOSION_RADIUS,
                explosion_force: defaults::REFERENCE_EXPLOSION_FORCE,
                debug_overlay: defaults::DEBUG_OVERLAY,
                frame_rate: defaults::FRAME_RATE,
                parallel_threshold: defaults::PARALLEL_THRESHOLD,
                seed: None,
            },
            transport: TransportConfig::default(),
        }
    }
}

/// Simulation-specific configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub particle_count: usize,
    pub explosion_radius: f64,
    pub explosion_force: f64,
    #[serde(default = "defaults::debug_overlay")]
    pub debug_overlay: bool,
    #[serde(default = "defaults::frame_rate")]
    pub frame_rate: u32,
    #[serde(default = "defaults::parallel_threshold")]
    pub parallel_threshold: usize,
    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Transport-specific configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransportConfig {
    #[serde(default)]
    pub serializer: SerializerConfig,
    #[serde(default)]
    pub sender: SenderConfig,
    /// Ship every Nth frame.
    #[serde(default = "defaults::output_frequency")]
    pub output_frequency: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            serializer: SerializerConfig::default(),
            sender: SenderConfig::default(),
            output_frequency: defaults::OUTPUT_FREQUENCY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializerType {
    #[default]
    Json,
    Binary,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    #[default]
    Stdio,
    File,
    Null,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SerializerConfig {
    #[serde(rename = "type")]
    pub serializer_type: SerializerType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SenderConfig {
    #[serde(rename = "type")]
    pub sender_type: SenderType,
    pub options: Option<serde_json::Value>,
}

/// Configuration specific to the File sender
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileSenderOptions {
    pub output_path: String,
}
