use std::fmt;
use std::fs;
use std::path::Path;

use foundation::math::GeoCoordinate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STYLE: &str = "mapbox://styles/mapbox/light-v10";
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_KEY";

pub const MAX_ZOOM: f64 = 24.0;
pub const MAX_PITCH: f64 = 85.0;

/// Map view and scene anchor settings.
///
/// `center` is both where the map camera starts and the scene's reference
/// frame anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub center: GeoCoordinate,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub style: String,
    pub antialias: bool,
    pub buildings: u32,
    pub access_token: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: GeoCoordinate::new(52.064220142918835, 5.193455681100045),
            zoom: 15.0,
            pitch: 60.0,
            bearing: -40.0,
            style: DEFAULT_STYLE.to_string(),
            antialias: true,
            buildings: 40,
            access_token: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Options object handed to the map engine when it is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// `[lng, lat]`, the engine's ordering.
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub style: String,
    pub antialias: bool,
    pub buildings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl MapConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        let config: MapConfig = serde_json::from_str(&payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Fills the access token from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.center
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("center: {e}")))?;
        if !(0.0..=MAX_ZOOM).contains(&self.zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom {} outside [0, {MAX_ZOOM}]",
                self.zoom
            )));
        }
        if !(0.0..=MAX_PITCH).contains(&self.pitch) {
            return Err(ConfigError::Invalid(format!(
                "pitch {} outside [0, {MAX_PITCH}]",
                self.pitch
            )));
        }
        if !self.bearing.is_finite() {
            return Err(ConfigError::Invalid("bearing is not finite".to_string()));
        }
        if self.style.trim().is_empty() {
            return Err(ConfigError::Invalid("style is empty".to_string()));
        }
        Ok(())
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            center: [self.center.longitude, self.center.latitude],
            zoom: self.zoom,
            pitch: self.pitch,
            bearing: self.bearing,
            style: self.style.clone(),
            antialias: self.antialias,
            buildings: self.buildings,
            access_token: self.access_token.clone(),
        }
    }
}

/// Parses `"LAT,LNG"` in degrees, rejecting out-of-range values.
pub fn parse_lat_lng(s: &str) -> Result<GeoCoordinate, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("longitude {lng:?}: {e}"))?;
    GeoCoordinate::try_new(lat, lng).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_STYLE, MapConfig, parse_lat_lng};
    use foundation::math::GeoCoordinate;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("map_scene_{label}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_anchor_on_utrecht() {
        let config = MapConfig::default();
        assert_eq!(config.center, GeoCoordinate::new(52.064220142918835, 5.193455681100045));
        assert_eq!(config.zoom, 15.0);
        assert_eq!(config.pitch, 60.0);
        assert_eq!(config.bearing, -40.0);
        assert_eq!(config.style, DEFAULT_STYLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let dir = temp_dir("partial");
        let path = dir.join("map.json");
        fs::write(&path, r#"{"center":{"lat":48.85,"lng":2.35},"zoom":12}"#).unwrap();

        let config = MapConfig::load(&path).unwrap();
        assert_eq!(config.center, GeoCoordinate::new(48.85, 2.35));
        assert_eq!(config.zoom, 12.0);
        assert_eq!(config.pitch, 60.0);
        assert!(config.antialias);
    }

    #[test]
    fn access_token_key_matches_engine_options() {
        let dir = temp_dir("token");
        let path = dir.join("map.json");
        fs::write(&path, r#"{"accessToken":"pk.file"}"#).unwrap();

        let config = MapConfig::load(&path).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("pk.file"));

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["accessToken"], "pk.file");
        assert!(written.get("access_token").is_none());
        let options = serde_json::to_value(config.map_options()).unwrap();
        assert_eq!(options["accessToken"], "pk.file");
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let dir = temp_dir("errors");
        let err = MapConfig::load(dir.join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));

        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = MapConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_view() {
        let config = MapConfig {
            pitch: 90.0,
            ..MapConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = MapConfig {
            center: GeoCoordinate::new(95.0, 0.0),
            ..MapConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("center"));
    }

    #[test]
    fn env_token_overrides_config() {
        let mut config = MapConfig::default();
        config.apply_env_from(|key| (key == "MAPBOX_KEY").then(|| "pk.test".to_string()));
        assert_eq!(config.access_token.as_deref(), Some("pk.test"));

        config.apply_env_from(|_| Some("  ".to_string()));
        assert_eq!(config.access_token.as_deref(), Some("pk.test"));
    }

    #[test]
    fn map_options_use_lng_lat_order() {
        let options = MapConfig::default().map_options();
        assert_eq!(options.center, [5.193455681100045, 52.064220142918835]);
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("accessToken").is_none());
        assert_eq!(json["pitch"], 60.0);
    }

    #[test]
    fn parses_lat_lng_pairs() {
        assert_eq!(parse_lat_lng("52.06, 5.19").unwrap(), GeoCoordinate::new(52.06, 5.19));
        assert!(parse_lat_lng("52.06").is_err());
        assert!(parse_lat_lng("abc,5").is_err());
        assert!(parse_lat_lng("100,5").is_err());
    }
}
