use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use foundation::math::{GeoCoordinate, ReferenceFrame};
use layers::LabelsLayerSnapshot;
use serde::Serialize;
use tracing::info;

use crate::building::Building;
use crate::config::{MapConfig, parse_lat_lng};
use crate::map_scene::MapScene;

#[derive(Debug, Parser)]
#[command(name = "atlas-labels", about = "Place building labels in a map-anchored 3D scene")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the scene offset of each target relative to a reference coordinate.
    Project {
        /// Scene anchor as LAT,LNG.
        #[arg(long, value_parser = parse_lat_lng)]
        reference: GeoCoordinate,
        /// Target as LAT,LNG; repeatable.
        #[arg(long = "target", value_parser = parse_lat_lng, required = true)]
        targets: Vec<GeoCoordinate>,
    },
    /// Place a JSON array of buildings and print the resulting labels.
    Place {
        /// Map config JSON; defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        buildings: PathBuf,
    },
    /// Print the options object for the map engine.
    Options {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Runs `cli` and returns the JSON document to print. `env` looks up
/// environment variables.
pub fn run(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<String, String> {
    match cli.command {
        Command::Project { reference, targets } => to_json(&project_offsets(reference, &targets)),
        Command::Place { config, buildings } => {
            let config = load_config(config.as_deref(), env)?;
            to_json(&place_buildings(config, &buildings)?)
        }
        Command::Options { config } => {
            let config = load_config(config.as_deref(), env)?;
            to_json(&config.map_options())
        }
    }
}

/// A single target yields a bare offset object; several yield an array.
pub fn project_offsets(reference: GeoCoordinate, targets: &[GeoCoordinate]) -> serde_json::Value {
    let frame = ReferenceFrame::new(reference);
    let mut offsets: Vec<_> = targets
        .iter()
        .map(|t| serde_json::json!(frame.project(*t)))
        .collect();
    if offsets.len() == 1 {
        offsets.remove(0)
    } else {
        serde_json::Value::Array(offsets)
    }
}

pub fn place_buildings(config: MapConfig, buildings: &Path) -> Result<LabelsLayerSnapshot, String> {
    let payload =
        fs::read_to_string(buildings).map_err(|e| format!("read {buildings:?}: {e}"))?;
    let records: Vec<Building> =
        serde_json::from_str(&payload).map_err(|e| format!("parse {buildings:?}: {e}"))?;

    let mut scene = MapScene::new(config).map_err(|e| e.to_string())?;
    scene.add_buildings(&records).map_err(|e| e.to_string())?;
    info!(count = scene.building_count(), "buildings placed");

    Ok(scene.labels())
}

pub fn load_config(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<MapConfig, String> {
    let mut config = match path {
        Some(path) => MapConfig::load(path).map_err(|e| format!("{path:?}: {e}"))?,
        None => MapConfig::default(),
    };
    config.apply_env_from(env);
    Ok(config)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))
}

#[cfg(test)]
mod tests {
    use super::{Cli, run};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("atlas_labels_{label}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run_args(args: &[&str]) -> Result<serde_json::Value, String> {
        let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
        let out = run(cli, no_env)?;
        Ok(serde_json::from_str(&out).unwrap())
    }

    #[test]
    fn project_single_target_prints_object() {
        let out = run_args(&[
            "atlas-labels",
            "project",
            "--reference",
            "52.064220142918835,5.193455681100045",
            "--target",
            "52.064220142918835,5.194455681100045",
        ])
        .unwrap();

        let x = out["x"].as_f64().unwrap();
        assert!((x - 67.0).abs() <= 5.0, "x = {x}");
        assert_eq!(out["y"], 0.0);
        assert!(out["z"].as_f64().unwrap().abs() <= 1.0);
    }

    #[test]
    fn project_many_targets_prints_array() {
        let out = run_args(&[
            "atlas-labels",
            "project",
            "--reference",
            "52.06,5.19",
            "--target",
            "52.06,5.19",
            "--target",
            "52.07,5.19",
        ])
        .unwrap();

        let offsets = out.as_array().unwrap();
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets[0]["x"], 0.0);
        assert!(offsets[1]["z"].as_f64().unwrap() < 0.0);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["atlas-labels", "project", "--reference", "52,5"]).is_err());
        assert!(
            Cli::try_parse_from([
                "atlas-labels",
                "project",
                "--reference",
                "95,5",
                "--target",
                "52,5",
            ])
            .is_err()
        );
    }

    #[test]
    fn place_prints_labels_keyed_by_uid() {
        let dir = temp_dir("place");
        let buildings = dir.join("buildings.json");
        fs::write(
            &buildings,
            r#"[{"userId":"u1","lat":52.065,"lng":5.19,"uid":"b1"},
                {"userId":"u2","lat":52.06,"lng":5.2,"uid":"b2"}]"#,
        )
        .unwrap();

        let out = run_args(&[
            "atlas-labels",
            "place",
            "--buildings",
            buildings.to_str().unwrap(),
        ])
        .unwrap();

        let labels = out["labels"].as_array().unwrap();
        let keys: Vec<_> = labels.iter().map(|l| l["key"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["b1", "b2"]);
        assert_eq!(labels[0]["text"], "🏢");
    }

    #[test]
    fn place_fails_on_missing_or_invalid_buildings() {
        let dir = temp_dir("place_errors");
        let missing = dir.join("missing.json");
        let err = run_args(&["atlas-labels", "place", "--buildings", missing.to_str().unwrap()])
            .unwrap_err();
        assert!(err.contains("read"));

        let invalid = dir.join("invalid.json");
        fs::write(&invalid, r#"[{"userId":"u","lat":120.0,"lng":5.0,"uid":"x"}]"#).unwrap();
        let err = run_args(&["atlas-labels", "place", "--buildings", invalid.to_str().unwrap()])
            .unwrap_err();
        assert!(err.contains("\"x\""), "{err}");
    }

    #[test]
    fn options_take_token_from_env() {
        let dir = temp_dir("options");
        let config = dir.join("map.json");
        fs::write(&config, r#"{"zoom":13,"accessToken":"pk.file"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "atlas-labels",
            "options",
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();
        let env = |key: &str| (key == "MAPBOX_KEY").then(|| "pk.env".to_string());
        let out: serde_json::Value = serde_json::from_str(&run(cli, env).unwrap()).unwrap();

        assert_eq!(out["accessToken"], "pk.env");
        assert_eq!(out["zoom"], 13.0);
        assert_eq!(out["center"][0], 5.193455681100045);
    }

    #[test]
    fn options_without_config_use_defaults() {
        let out = run_args(&["atlas-labels", "options"]).unwrap();
        assert_eq!(out["pitch"], 60.0);
        assert!(out.get("accessToken").is_none());
    }
}
