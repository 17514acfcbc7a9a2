//! Generator settings, loadable from TOML.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```toml
//! width = 80
//! height = 40
//! update_mode = "random_order"
//! rule = { kind = "area_threshold", radius = 3, min = 2 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::placement::{CapPolicy, MonsterPlacer, ObjectPlacer};
use crate::terrain::{RuleConfig, TerrainSimulator, UpdateMode};
use crate::tiles::TileClassifier;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Chance that an interior cell starts solid.
    pub initial_wall_prob: f64,
    pub rule: RuleConfig,
    pub update_mode: UpdateMode,
    /// Simulation steps applied by [`crate::generate`].
    pub steps: u32,
    pub ground_variant_prob: f64,
    pub chest_prob: f64,
    pub bag_prob: f64,
    pub chest_radius: u32,
    pub monster_radius: u32,
    pub monster_prob: f64,
    pub max_monsters: u32,
    pub cap_policy: CapPolicy,
    /// Keep the tile map from before the latest step as an extra layer.
    pub keep_previous: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            initial_wall_prob: 0.45,
            rule: RuleConfig::default(),
            update_mode: UpdateMode::Synchronous,
            steps: 5,
            ground_variant_prob: 0.05,
            chest_prob: 0.1,
            bag_prob: 0.45,
            chest_radius: 5,
            monster_radius: 3,
            monster_prob: 0.2,
            max_monsters: 3,
            cap_policy: CapPolicy::Strict,
            keep_previous: false,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 2 || self.height <= 2 {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }

        let limit = self.width.min(self.height);
        let radii = [("chest_radius", self.chest_radius), ("monster_radius", self.monster_radius)];
        for (name, radius) in radii {
            if radius as usize >= limit {
                return Err(ConfigError::RadiusTooLarge { name, radius, limit });
            }
        }

        for (name, value) in [
            ("initial_wall_prob", self.initial_wall_prob),
            ("ground_variant_prob", self.ground_variant_prob),
            ("chest_prob", self.chest_prob),
            ("bag_prob", self.bag_prob),
            ("monster_prob", self.monster_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        self.rule.validate(self.width, self.height)
    }

    /// Parses and validates.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn simulator(&self) -> TerrainSimulator {
        TerrainSimulator::from_rule_config(self.rule, self.update_mode)
    }

    pub fn classifier(&self) -> TileClassifier {
        TileClassifier::new(self.ground_variant_prob)
    }

    pub fn object_placer(&self) -> ObjectPlacer {
        ObjectPlacer {
            chest_prob: self.chest_prob,
            bag_prob: self.bag_prob,
            chest_radius: self.chest_radius,
        }
    }

    pub fn monster_placer(&self) -> MonsterPlacer {
        MonsterPlacer {
            monster_radius: self.monster_radius,
            monster_prob: self.monster_prob,
            max_monsters: self.max_monsters,
            cap_policy: self.cap_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn defaults_are_valid_and_match_component_defaults() {
        let config = GeneratorConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.object_placer(), ObjectPlacer::default());
        assert_eq!(config.monster_placer(), MonsterPlacer::default());
        assert_eq!(config.classifier(), TileClassifier::default());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            width = 80
            update_mode = "random_order"
            cap_policy = "lenient"
            rule = { kind = "area_threshold", radius = 3, min = 2 }
            "#,
        )
        .expect("config parses");

        assert_eq!(config.width, 80);
        assert_eq!(config.height, 50);
        assert_eq!(config.update_mode, UpdateMode::RandomOrder);
        assert_eq!(config.cap_policy, CapPolicy::Lenient);
        assert_eq!(config.rule, RuleConfig::AreaThreshold { radius: 3, min: 2 });
        assert_eq!(config.chest_prob, 0.1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = GeneratorConfig::from_toml_str("chest_probability = 0.5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn tiny_grids_are_rejected() {
        let config = GeneratorConfig { width: 2, ..GeneratorConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 2, height: 50 })
        ));
    }

    #[test]
    fn radius_must_fit_inside_the_grid() {
        let config = GeneratorConfig {
            width: 10,
            height: 10,
            chest_radius: 10,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RadiusTooLarge { name: "chest_radius", radius: 10, limit: 10 })
        ));
    }

    #[test]
    fn probabilities_outside_unit_range_or_nan_are_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = GeneratorConfig { monster_prob: bad, ..GeneratorConfig::default() };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::ProbabilityOutOfRange { name: "monster_prob", .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn invalid_rule_parameters_are_rejected() {
        let config = GeneratorConfig {
            rule: RuleConfig::AreaThreshold { radius: 0, min: 1 },
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRule(_))));
    }

    #[test]
    fn load_reads_a_file_and_reports_missing_ones() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "steps = 9\nkeep_previous = true").expect("write config");
        let config = GeneratorConfig::load(file.path()).expect("config loads");
        assert_eq!(config.steps, 9);
        assert!(config.keep_previous);

        let missing = GeneratorConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
