// Global configuration: plain structs with defaults, loadable from YAML or JSON

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Growth chamber parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    // Seed ring
    pub seed_count: usize,
    pub seed_speed: f32,
    pub seed_life: f32,
    pub seed_width: f32,

    // Per-frame behavior
    pub angle_jitter: f32,
    pub branch_chance: f32,
    pub branch_angle_spread: f32,
    pub branch_speed_decay: f32,
    pub branch_life_decay: f32,
    pub branch_width_decay: f32,
    pub life_step: f32,
    pub dormancy_threshold: f32,

    // Trails
    pub max_trail_age: f32,
    pub trail_age_increment: f32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            seed_count: 8,
            seed_speed: 2.0,
            seed_life: 100.0,
            seed_width: 3.0,
            angle_jitter: 0.25,
            branch_chance: 0.03,
            branch_angle_spread: 0.75,
            branch_speed_decay: 0.9,
            branch_life_decay: 0.8,
            branch_width_decay: 0.8,
            life_step: 0.1,
            dormancy_threshold: 0.01,
            max_trail_age: 8.0,
            trail_age_increment: 0.01,
        }
    }
}

/// Particle field parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,

    // Per-axis drift sinusoids
    pub drift_x: f32,
    pub drift_y: f32,
    pub freq_x: f32,
    pub freq_y: f32,
    pub phase_skew: f32,

    // Shared breathing pulse
    pub pulse_freq: f32,
    pub pulse_amp: f32,

    pub smoothing: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,

    /// Share of the sporocarp silhouette laid over the cap dome; the rest
    /// forms the stem column.
    pub cap_fraction: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            drift_x: 0.5,
            drift_y: 0.3,
            freq_x: 0.3,
            freq_y: 0.2,
            phase_skew: 0.7,
            pulse_freq: 0.8,
            pulse_amp: 0.04,
            smoothing: 0.08,
            pointer_radius: 2.0,
            pointer_strength: 0.02,
            cap_fraction: 0.7,
        }
    }
}

/// Observation map parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub node_count: usize,
    pub margin_x: f32,
    pub margin_y: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub hit_slack: f32,
    pub pulse_step: f32,
    pub user_x: f32,
    pub user_y: f32,
    /// Screen-space threshold below which two nodes get a background strand.
    pub link_distance: f32,
    pub seeded_comment_ratio: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            node_count: 24,
            margin_x: 5.0,
            margin_y: 8.0,
            min_size: 4.0,
            max_size: 10.0,
            hit_slack: 15.0,
            pulse_step: 0.02,
            user_x: 20.0,
            user_y: 40.0,
            link_distance: 200.0,
            seeded_comment_ratio: 0.3,
        }
    }
}

/// Floating annotation parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Wall-clock seconds between ambient spawns.
    pub spawn_interval: f32,
    /// Fixed life decrement per frame.
    pub life_decay: f32,
    pub base_rise: f32,
    pub rise_jitter: f32,
    pub sway_range: f32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 0.4,
            life_decay: 0.005,
            base_rise: 0.02,
            rise_jitter: 0.03,
            sway_range: 1.0,
        }
    }
}

/// Laboratory reward economy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub reward_interval: f32,
    pub reward_amount: u32,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            reward_interval: 5.0,
            reward_amount: 10,
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Directory holding the persisted session records.
    pub state_dir: String,

    pub growth: GrowthConfig,
    pub field: FieldConfig,
    pub map: MapConfig,
    pub annotations: AnnotationConfig,
    pub lab: LabConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            state_dir: "mycelia-state".to_string(),
            growth: GrowthConfig::default(),
            field: FieldConfig::default(),
            map: MapConfig::default(),
            annotations: AnnotationConfig::default(),
            lab: LabConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, dispatching on the file extension.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        if path.ends_with(".json") {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(serde_yaml::from_str(&raw)?)
        }
    }

    /// Probe the conventional config paths in the working directory, falling
    /// back to defaults. Parse problems are reported but never fatal.
    pub fn from_default_paths() -> Self {
        for path in ["config.yaml", "config.yml", "config.json"] {
            if std::path::Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        println!("Loaded configuration from {}", path);
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Ignoring {}: {}", path, e);
                    }
                }
            }
        }
        Self::default()
    }
}
