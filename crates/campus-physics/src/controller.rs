//! Turns held movement keys and mouse deltas into per-tick moves.

use campus_geom::Vec3;
use campus_world::Building;
use serde::{Deserialize, Serialize};

use crate::camera::ChaseCamera;
use crate::resolver::{MoveOutcome, MovementResolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Accepts DOM-style codes (`KeyW`) and bare letters, either case.
    pub fn from_code(code: &str) -> Option<Self> {
        let letter = code.strip_prefix("Key").unwrap_or(code);
        match letter.to_ascii_uppercase().as_str() {
            "W" => Some(MoveKey::Forward),
            "S" => Some(MoveKey::Back),
            "A" => Some(MoveKey::Left),
            "D" => Some(MoveKey::Right),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParams {
    /// Distance per reference frame.
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    /// Frames per second `move_speed` is tuned for.
    pub reference_rate: f32,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            move_speed: 0.2,
            mouse_sensitivity: 0.002,
            reference_rate: 60.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActorController {
    pub params: ControllerParams,
    held: [bool; 4],
    pointer_captured: bool,
}

impl ActorController {
    pub fn new(params: ControllerParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn key_down(&mut self, key: MoveKey) {
        self.held[key.slot()] = true;
    }

    pub fn key_up(&mut self, key: MoveKey) {
        self.held[key.slot()] = false;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.slot()]
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    /// Mouse look; ignored unless the pointer is captured.
    pub fn mouse_move(&self, camera: &mut ChaseCamera, dx: f32, dy: f32) {
        if self.pointer_captured {
            camera.rotate(dx, dy, self.params.mouse_sensitivity);
        }
    }

    /// Movement for one reference frame in the camera's horizontal basis.
    pub fn move_vector(&self, camera: &ChaseCamera) -> Vec3 {
        let (forward, right) = camera.basis();
        let speed = self.params.move_speed;
        let mut v = Vec3::ZERO;
        if self.is_held(MoveKey::Forward) {
            v += forward * speed;
        }
        if self.is_held(MoveKey::Back) {
            v -= forward * speed;
        }
        if self.is_held(MoveKey::Left) {
            v -= right * speed;
        }
        if self.is_held(MoveKey::Right) {
            v += right * speed;
        }
        v
    }

    /// Moves `position` for a frame of `dt` seconds. Returns `None` when no
    /// movement was requested; the resolver is not consulted then.
    pub fn update(
        &self,
        position: &mut Vec3,
        camera: &mut ChaseCamera,
        resolver: &MovementResolver,
        buildings: &[Building],
        dt: f32,
    ) -> Option<MoveOutcome> {
        let delta = self.move_vector(camera) * (dt * self.params.reference_rate);
        if delta.length_squared() == 0.0 {
            return None;
        }
        let outcome = resolver.resolve(buildings, *position, delta);
        *position = outcome.position;
        camera.set_environment(outcome.inside_building);
        Some(outcome)
    }
}
