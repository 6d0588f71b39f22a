//! Run configuration.
//!
//! Every field has a default matching the member-network screen, so a
//! config file only needs the values it changes.

use hilumi_core::geo_query::DEFAULT_NEAR_RADIUS_KM;
use hilumi_core::heatmap::DEFAULT_RESOLUTION;
use hilumi_core::members::{DEFAULT_SEED, DEFAULT_TOTAL_MEMBERS};
use hilumi_core::{AngularSector, GeneratorConfig, HilumiError, StreamKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a view run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Population size
    pub total_members: usize,

    /// Master seed for determinism
    pub seed: u64,

    /// Random stream backing the generator
    pub stream: StreamKind,

    /// Radius of the "near ATLAS" view in km
    pub near_radius_km: f64,

    /// Angular sector of the "angular" view
    pub sector: AngularSector,

    /// Optional distance cap for the angular view in km
    pub sector_radius_km: Option<f64>,

    /// Maximum rows printed per view
    pub list_limit: usize,

    /// H3 resolution of the density heatmap
    pub heatmap_resolution: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_members: DEFAULT_TOTAL_MEMBERS,
            seed: DEFAULT_SEED,
            stream: StreamKind::Lcg,
            near_radius_km: DEFAULT_NEAR_RADIUS_KM,
            sector: AngularSector::default(),
            sector_radius_km: None,
            list_limit: 20,
            heatmap_resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl RunConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, HilumiError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HilumiError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values the queries cannot use.
    pub fn validate(&self) -> Result<(), HilumiError> {
        if !self.near_radius_km.is_finite() || self.near_radius_km < 0.0 {
            return Err(HilumiError::config(format!(
                "near_radius_km must be a non-negative number, got {}",
                self.near_radius_km
            )));
        }
        if let Some(radius) = self.sector_radius_km {
            if !radius.is_finite() || radius < 0.0 {
                return Err(HilumiError::config(format!(
                    "sector_radius_km must be a non-negative number, got {}",
                    radius
                )));
            }
        }
        for bound in [self.sector.min, self.sector.max] {
            if !(0.0..=360.0).contains(&bound) {
                return Err(HilumiError::sector(format!("{} is outside 0..=360", bound)));
            }
        }
        if self.heatmap_resolution > 15 {
            return Err(HilumiError::InvalidResolution(self.heatmap_resolution));
        }
        Ok(())
    }

    /// Generator parameters for this run.
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            total_members: self.total_members,
            seed: self.seed,
            stream: self.stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_screen() {
        let config = RunConfig::default();

        assert_eq!(config.total_members, 1247);
        assert_eq!(config.seed, 42);
        assert_eq!(config.stream, StreamKind::Lcg);
        assert_eq!(config.near_radius_km, 50.0);
        assert_eq!(config.sector, AngularSector::new(90.0, 120.0));
        assert_eq!(config.list_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RunConfig::from_json_str(r#"{ "seed": 7, "stream": "chacha" }"#).unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.stream, StreamKind::ChaCha);
        assert_eq!(config.total_members, 1247);
        assert_eq!(config.generator().seed, 7);
    }

    #[test]
    fn test_sector_from_json() {
        let config =
            RunConfig::from_json_str(r#"{ "sector": { "min": 350.0, "max": 10.0 } }"#).unwrap();
        assert!(config.sector.wraps());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            RunConfig::from_json_str(r#"{ "near_radius_km": -1.0 }"#),
            Err(HilumiError::Config(_))
        ));
        assert!(matches!(
            RunConfig::from_json_str(r#"{ "heatmap_resolution": 20 }"#),
            Err(HilumiError::InvalidResolution(20))
        ));
        assert!(matches!(
            RunConfig::from_json_str(r#"{ "sector": { "min": 0.0, "max": 400.0 } }"#),
            Err(HilumiError::InvalidSector(_))
        ));
        assert!(matches!(
            RunConfig::from_json_str("not json"),
            Err(HilumiError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "total_members": 10, "list_limit": 5 }}"#).unwrap();

        let config = RunConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.total_members, 10);
        assert_eq!(config.list_limit, 5);

        assert!(matches!(
            RunConfig::from_json_file("/nonexistent/hilumi.json"),
            Err(HilumiError::Io(_))
        ));
    }
}
