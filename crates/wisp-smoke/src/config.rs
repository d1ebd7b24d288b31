//! Smoke appearance configuration (parsed from TOML)

use std::path::Path;
use wisp_core::{Result, WispError};

/// Tunables for freshly created smoke particles.
///
/// Every default matches the stock smoke look; a config file only needs to
/// name the values it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeConfig {
    /// Sprite textures, one picked at random per pool slot
    pub textures: Vec<String>,
    pub fade_duration_min: f32,
    pub fade_duration_max: f32,
    /// Angular speed bounds as multiples of π rad/s
    pub rot_speed_min: f32,
    pub rot_speed_max: f32,
    /// HSV value bounds of the grey tint
    pub tint_value_min: f32,
    pub tint_value_max: f32,
    /// Opacity of a particle that has not started fading
    pub max_alpha: f32,
    pub interior_z_order: i32,
    pub exterior_z_order: i32,
    pub seed: u32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            textures: vec![
                "part-smoke-02.img".to_string(),
                "part-smoke-03.img".to_string(),
            ],
            fade_duration_min: 0.5,
            fade_duration_max: 0.75,
            rot_speed_min: 0.25,
            rot_speed_max: 0.5,
            tint_value_min: 0.9,
            tint_value_max: 0.95,
            max_alpha: 0.9,
            interior_z_order: 500,
            exterior_z_order: 1000,
            seed: 0xDEAD_BEEF,
        }
    }
}

impl SmokeConfig {
    /// Parse a SmokeConfig from a TOML table. Unknown keys are ignored and
    /// mistyped values fall back to the default.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(arr) = table.get("textures").and_then(|v| v.as_array()) {
            config.textures = arr
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = table.get("fade_duration_min") {
            config.fade_duration_min = toml_f32(v, config.fade_duration_min);
        }
        if let Some(v) = table.get("fade_duration_max") {
            config.fade_duration_max = toml_f32(v, config.fade_duration_max);
        }
        if let Some(v) = table.get("rot_speed_min") {
            config.rot_speed_min = toml_f32(v, config.rot_speed_min);
        }
        if let Some(v) = table.get("rot_speed_max") {
            config.rot_speed_max = toml_f32(v, config.rot_speed_max);
        }
        if let Some(v) = table.get("tint_value_min") {
            config.tint_value_min = toml_f32(v, config.tint_value_min);
        }
        if let Some(v) = table.get("tint_value_max") {
            config.tint_value_max = toml_f32(v, config.tint_value_max);
        }
        if let Some(v) = table.get("max_alpha") {
            config.max_alpha = toml_f32(v, config.max_alpha);
        }
        if let Some(v) = table.get("interior_z_order") {
            config.interior_z_order = toml_int(v, config.interior_z_order);
        }
        if let Some(v) = table.get("exterior_z_order") {
            config.exterior_z_order = toml_int(v, config.exterior_z_order);
        }
        if let Some(v) = table.get("seed") {
            config.seed = toml_int(v, config.seed);
        }

        config
    }

    /// Parse and validate a TOML document. Keys may sit at the top level or
    /// under a `[smoke]` table.
    pub fn parse(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let table = match root.get("smoke").and_then(|v| v.as_table()) {
            Some(smoke) => smoke,
            None => &root,
        };
        let config = Self::from_toml(table);
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Reject values that would break particle invariants
    pub fn validate(&self) -> Result<()> {
        if self.textures.is_empty() {
            return Err(WispError::ConfigError(
                "textures must name at least one sprite".to_string(),
            ));
        }
        if !(self.fade_duration_min.is_finite() && self.fade_duration_min > 0.0) {
            return Err(WispError::ConfigError(format!(
                "fade_duration_min must be positive, got {}",
                self.fade_duration_min
            )));
        }
        check_range("fade_duration", self.fade_duration_min, self.fade_duration_max)?;
        check_range("rot_speed", self.rot_speed_min, self.rot_speed_max)?;
        check_range("tint_value", self.tint_value_min, self.tint_value_max)?;
        if !(0.0..=1.0).contains(&self.tint_value_min) || !(0.0..=1.0).contains(&self.tint_value_max) {
            return Err(WispError::ConfigError(
                "tint_value bounds must lie in [0, 1]".to_string(),
            ));
        }
        // NaN fails `contains`, so it is rejected here too
        if !(0.0..=1.0).contains(&self.max_alpha) {
            return Err(WispError::ConfigError(format!(
                "max_alpha must lie in [0, 1], got {}",
                self.max_alpha
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, min: f32, max: f32) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(WispError::ConfigError(format!(
            "{name} bounds must be finite, got {min}..{max}"
        )));
    }
    if min > max {
        return Err(WispError::ConfigError(format!(
            "{name}_min ({min}) exceeds {name}_max ({max})"
        )));
    }
    Ok(())
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// Integer value that fits `T`, or `default` when mistyped or out of range
fn toml_int<T: TryFrom<i64>>(v: &toml::Value, default: T) -> T {
    v.as_integer()
        .and_then(|i| T::try_from(i).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SmokeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.textures.len(), 2);
        assert_eq!(config.interior_z_order, 500);
        assert_eq!(config.exterior_z_order, 1000);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
textures = ["puff.img"]
fade_duration_min = 1.0
fade_duration_max = 2
max_alpha = 0.5
interior_z_order = 100
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = SmokeConfig::from_toml(&table);
        assert_eq!(config.textures, vec!["puff.img".to_string()]);
        assert!((config.fade_duration_min - 1.0).abs() < 1e-6);
        assert!((config.fade_duration_max - 2.0).abs() < 1e-6);
        assert!((config.max_alpha - 0.5).abs() < 1e-6);
        assert_eq!(config.interior_z_order, 100);
        // Untouched keys keep their defaults
        assert_eq!(config.exterior_z_order, 1000);
        assert!((config.rot_speed_max - 0.5).abs() < 1e-6);
    }

    #[test]
    fn parse_reads_smoke_table() {
        let config = SmokeConfig::parse("[smoke]\nseed = 7\n").unwrap();
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn parse_rejects_inverted_range() {
        let err = SmokeConfig::parse("fade_duration_min = 2.0\nfade_duration_max = 1.0").unwrap_err();
        assert!(matches!(err, WispError::ConfigError(_)));
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let err = SmokeConfig::parse("textures = [").unwrap_err();
        assert!(matches!(err, WispError::TomlParseError(_)));
    }

    #[test]
    fn validate_rejects_empty_textures() {
        let config = SmokeConfig {
            textures: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_fade() {
        let config = SmokeConfig {
            fade_duration_min: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SmokeConfig::load(Path::new("/nonexistent/wisp/smoke.toml")).unwrap_err();
        assert!(matches!(err, WispError::IoError(_)));
    }

    #[test]
    fn validate_rejects_nan_fade() {
        let err = SmokeConfig::parse("fade_duration_min = nan\nfade_duration_max = nan").unwrap_err();
        assert!(matches!(err, WispError::ConfigError(_)));

        let config = SmokeConfig {
            fade_duration_max: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_ranges() {
        let config = SmokeConfig {
            rot_speed_min: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SmokeConfig {
            fade_duration_max: f32::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SmokeConfig {
            max_alpha: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_integers_keep_defaults() {
        let toml_str = r#"
interior_z_order = 4294967296
exterior_z_order = -5
seed = -1
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = SmokeConfig::from_toml(&table);
        assert_eq!(config.interior_z_order, 500);
        assert_eq!(config.exterior_z_order, -5);
        assert_eq!(config.seed, 0xDEAD_BEEF);
    }
}
