//! Session configuration supplied by the surrounding game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapgen::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::types::Cell;

pub const DEFAULT_SPEED: f64 = 0.05;
pub const DEFAULT_ADVERSARY_COUNT: usize = 3;
pub const DEFAULT_MIN_SPAWN_DISTANCE: f64 = 10.0;

/// How an adversary turns its plan into steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Keep the plan only as a re-plan timer and walk the preferred heading.
    #[default]
    Heading,
    /// Walk the planned path one cell per move.
    FollowPlan,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Per-tick probability that an adversary acts.
    pub speed: f64,
    pub step_mode: StepMode,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { speed: DEFAULT_SPEED, step_mode: StepMode::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChaseConfig {
    pub height: usize,
    pub width: usize,
    pub adversary_count: usize,
    pub min_spawn_distance: f64,
    /// Defaults to the maze origin.
    pub protagonist_start: Option<Cell>,
    pub movement: MovementConfig,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            adversary_count: DEFAULT_ADVERSARY_COUNT,
            min_spawn_distance: DEFAULT_MIN_SPAWN_DISTANCE,
            protagonist_start: None,
            movement: MovementConfig::default(),
        }
    }
}

impl ChaseConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ChaseConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.height, self.width
            )));
        }
        let speed = self.movement.speed;
        if !speed.is_finite() || !(0.0..=1.0).contains(&speed) {
            return Err(ConfigError::Invalid(format!("speed {speed} is not a probability")));
        }
        if !self.min_spawn_distance.is_finite() || self.min_spawn_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_spawn_distance {} must be a non-negative number",
                self.min_spawn_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_board() {
        let config = ChaseConfig::default();
        assert_eq!((config.height, config.width), (31, 28));
        assert_eq!(config.adversary_count, 3);
        assert_eq!(config.movement.speed, 0.05);
        assert_eq!(config.movement.step_mode, StepMode::Heading);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ChaseConfig::from_toml_str("").unwrap(), ChaseConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = ChaseConfig::from_toml_str(
            r#"
            height = 11
            adversary_count = 1
            protagonist_start = { row = 5, col = 7 }

            [movement]
            step_mode = "follow_plan"
            "#,
        )
        .unwrap();
        assert_eq!(config.height, 11);
        assert_eq!(config.width, 28);
        assert_eq!(config.adversary_count, 1);
        assert_eq!(config.protagonist_start, Some(Cell::new(5, 7)));
        assert_eq!(config.movement.step_mode, StepMode::FollowPlan);
        assert_eq!(config.movement.speed, 0.05);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            ChaseConfig::from_toml_str("ghost_speed = 0.5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        for source in ["width = 0", "[movement]\nspeed = 1.5", "min_spawn_distance = -1.0"] {
            assert!(
                matches!(ChaseConfig::from_toml_str(source), Err(ConfigError::Invalid(_))),
                "{source:?} should be rejected"
            );
        }
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 15\nheight = 9").unwrap();
        let config = ChaseConfig::load(file.path()).unwrap();
        assert_eq!((config.height, config.width), (9, 15));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(ChaseConfig::load(&missing), Err(ConfigError::Io { .. })));
    }
}
