use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Movement and session tuning. Defaults match the reference client;
/// any field can be overridden from a TOML file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Walk speed, cells per second.
    pub speed: f32,
    /// Look sensitivity, radians per pixel of mouse delta.
    pub rot_speed: f32,
    /// Downward acceleration, cells per second squared.
    pub gravity: f32,
    /// Ticks with a larger wall-clock delta are skipped outright to
    /// avoid tunneling through geometry on stalled frames.
    pub max_tick_dt: f32,
    /// Block selection reach, cells.
    pub reach: f32,
    /// World edge: positions wrap or respawn past this magnitude.
    pub world_limit: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            rot_speed: core::f32::consts::PI / 800.0,
            gravity: 9.8,
            max_tick_dt: 0.25,
            reach: 6.0,
            world_limit: 100.0,
        }
    }
}

impl SimConfig {
    /// Falling speed floor, four seconds' worth of gravity.
    #[inline]
    pub fn terminal_velocity(&self) -> f32 {
        -self.gravity * 4.0
    }

    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        self.gravity / 2.0
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_velocities_follow_gravity() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.terminal_velocity(), -39.2);
        assert_eq!(cfg.jump_velocity(), 4.9);
    }

    #[test]
    fn partial_toml_overrides_keep_defaults() {
        let cfg = SimConfig::from_toml_str("speed = 7.5\ngravity = 20.0\n").unwrap();
        assert_eq!(cfg.speed, 7.5);
        assert_eq!(cfg.gravity, 20.0);
        assert_eq!(cfg.reach, 6.0);
        assert_eq!(cfg.terminal_velocity(), -80.0);
    }
}
