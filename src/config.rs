use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{experiment, gaze};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub gaze: GazeConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub experiment: ExperimentConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GazeConfig {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default = "default_up_threshold")]
    pub up_threshold: f32,
    #[serde(default = "default_down_threshold")]
    pub down_threshold: f32,
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed_px: f32,
    #[serde(default = "default_intent_frames")]
    pub intent_frames: u32,
}

fn default_buffer_size() -> usize {
    gaze::BUFFER_SIZE
}

fn default_up_threshold() -> f32 {
    gaze::UP_THRESHOLD
}

fn default_down_threshold() -> f32 {
    gaze::DOWN_THRESHOLD
}

fn default_scroll_speed() -> f32 {
    gaze::SCROLL_SPEED_PX
}

fn default_intent_frames() -> u32 {
    gaze::SCROLL_INTENT_FRAMES
}

impl Default for GazeConfig {
    fn default() -> Self {
        GazeConfig {
            buffer_size: default_buffer_size(),
            up_threshold: default_up_threshold(),
            down_threshold: default_down_threshold(),
            scroll_speed_px: default_scroll_speed(),
            intent_frames: default_intent_frames(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceConfig {
    /// Whether the operator's continuous-notes toggle survives a trial
    /// boundary. The observed protocol forces an explicit re-enable every
    /// trial, so this defaults to false.
    #[serde(default = "default_preserve_preference")]
    pub preserve_preference: bool,
}

fn default_preserve_preference() -> bool {
    false
}

impl Default for VoiceConfig {
    fn default() -> Self {
        VoiceConfig {
            preserve_preference: default_preserve_preference(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExperimentConfig {
    #[serde(default = "default_trials_per_condition")]
    pub trials_per_condition: usize,
}

fn default_trials_per_condition() -> usize {
    experiment::TRIALS_PER_CONDITION
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            trials_per_condition: default_trials_per_condition(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".gaze-study"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.yaml"))
    }

    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = serde_yaml::from_str(&contents)
                .context("Failed to parse config file")?;

            // Validate configuration after loading
            config.validate()?;

            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            println!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.gaze.buffer_size == 0 {
            bail!("gaze.buffer_size must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.gaze.up_threshold) {
            bail!("gaze.up_threshold must be within [0.0, 1.0]");
        }
        if !(0.0..=1.0).contains(&self.gaze.down_threshold) {
            bail!("gaze.down_threshold must be within [0.0, 1.0]");
        }
        if self.gaze.up_threshold >= self.gaze.down_threshold {
            bail!("gaze.up_threshold must be below gaze.down_threshold");
        }

        if self.gaze.scroll_speed_px <= 0.0 {
            bail!("gaze.scroll_speed_px must be positive");
        }
        if self.gaze.intent_frames == 0 {
            bail!("gaze.intent_frames must be greater than 0");
        }

        if self.experiment.trials_per_condition == 0 {
            bail!("experiment.trials_per_condition must be greater than 0");
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        let config_path = Self::config_path()?;
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, yaml)
            .context("Failed to write config file")?;

        Ok(())
    }
}
