//! Tuning constants shared by every controller.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Physics and spawn constants.  Units are pixels and ticks.
///
/// Any subset of fields may be given in TOML; the rest keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Added to the vertical velocity every airborne tick.
    pub gravity: f64,
    /// Vertical velocity applied when a jump starts (negative is up).
    pub jump_force: f64,
    /// Horizontal distance covered per walking tick.
    pub speed: f64,
    /// Resting `y` of the character.
    pub ground_level: f64,
    /// Initial `x` of the character.
    pub start_x: f64,
    /// Horizontal distance a projectile travels per tick.
    pub projectile_speed: f64,
    /// Horizontal offset from the character at which projectiles spawn.
    pub projectile_offset: f64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_force: -12.0,
            speed: 4.0,
            ground_level: 300.0,
            start_x: 100.0,
            projectile_speed: 5.0,
            projectile_offset: 50.0,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded machine config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Reject values that would break landing or make the simulation
    /// produce NaNs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("speed", self.speed),
            ("ground_level", self.ground_level),
            ("start_x", self.start_x),
            ("projectile_speed", self.projectile_speed),
            ("projectile_offset", self.projectile_offset),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: "must be positive",
            });
        }
        if self.jump_force >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_force",
                reason: "must be negative (upwards)",
            });
        }
        if self.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: "must not be negative",
            });
        }
        if self.projectile_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "projectile_speed",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
