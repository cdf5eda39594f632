use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::building::{Archetype, BuildingSpec};

/// Parsed `campus.toml`. Every section is optional.
#[derive(Clone, Debug, Deserialize)]
pub struct CampusConfig {
    #[serde(default = "default_buildings")]
    pub buildings: Vec<BuildingSpec>,
    #[serde(default)]
    pub player: Player,
    #[serde(default)]
    pub camera: Camera,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            buildings: default_buildings(),
            player: Player::default(),
            camera: Camera::default(),
        }
    }
}

pub fn default_buildings() -> Vec<BuildingSpec> {
    vec![
        BuildingSpec {
            archetype: Archetype::Dormitory,
            position: [20.0, 0.0, 20.0],
        },
        BuildingSpec {
            archetype: Archetype::Classroom,
            position: [50.0, 0.0, 50.0],
        },
        BuildingSpec {
            archetype: Archetype::Miscellaneous,
            position: [80.0, 0.0, 80.0],
        },
        BuildingSpec {
            archetype: Archetype::Dormitory,
            position: [-30.0, 0.0, -30.0],
        },
    ]
}

#[derive(Clone, Debug, Deserialize)]
pub struct Player {
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
}

fn default_spawn() -> [f32; 3] {
    [0.0, 0.5, 0.0]
}
fn default_move_speed() -> f32 {
    0.2
}
fn default_mouse_sensitivity() -> f32 {
    0.002
}

impl Default for Player {
    fn default() -> Self {
        Self {
            spawn: default_spawn(),
            move_speed: default_move_speed(),
            mouse_sensitivity: default_mouse_sensitivity(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Camera {
    #[serde(default = "d_outside")]
    pub distance_outside: f32,
    #[serde(default = "d_inside")]
    pub distance_inside: f32,
    #[serde(default = "d_smoothing")]
    pub smoothing: f32,
    #[serde(default)]
    pub pitch_min: f32,
    #[serde(default = "d_pitch_max")]
    pub pitch_max: f32,
}

fn d_outside() -> f32 {
    10.0
}
fn d_inside() -> f32 {
    6.0
}
fn d_smoothing() -> f32 {
    0.1
}
fn d_pitch_max() -> f32 {
    std::f32::consts::FRAC_PI_3
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance_outside: d_outside(),
            distance_inside: d_inside(),
            smoothing: d_smoothing(),
            pitch_min: 0.0,
            pitch_max: d_pitch_max(),
        }
    }
}

pub fn parse_config(s: &str) -> Result<CampusConfig, Box<dyn Error>> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_from_path(path: &Path) -> Result<CampusConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_default_campus() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.buildings, default_buildings());
        assert_eq!(cfg.player.spawn, [0.0, 0.5, 0.0]);
        assert_eq!(cfg.camera.distance_inside, 6.0);
    }

    #[test]
    fn buildings_accept_short_archetype_names() {
        let cfg = parse_config(
            r#"
            [[buildings]]
            archetype = "dorm"
            position = [1.0, 0.0, 2.0]

            [[buildings]]
            archetype = "classroom"
            position = [10.0, 0.0, 0.0]

            [player]
            move_speed = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.buildings.len(), 2);
        assert_eq!(cfg.buildings[0].archetype, Archetype::Dormitory);
        assert_eq!(cfg.buildings[1].position, [10.0, 0.0, 0.0]);
        assert_eq!(cfg.player.move_speed, 0.4);
        assert_eq!(cfg.player.mouse_sensitivity, 0.002);
    }

    #[test]
    fn unknown_archetype_keeps_the_rest_of_the_campus() {
        let cfg = parse_config(
            r#"
            [[buildings]]
            archetype = "dormitory"
            position = [20.0, 0.0, 20.0]

            [[buildings]]
            archetype = "library"
            position = [60.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.buildings.len(), 2);
        assert_eq!(cfg.buildings[0].archetype, Archetype::Dormitory);
        assert_eq!(cfg.buildings[1].archetype, Archetype::Unknown);
    }
}
