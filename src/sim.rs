//! Headless tick loop: scripted input in, actor and camera state out.

use campus_geom::Vec3;
use campus_physics::{
    ActorController, CameraParams, ChaseCamera, ControllerParams, MoveKey, MovementResolver,
};
use campus_world::{Campus, CampusConfig};

pub struct Session {
    pub campus: Campus,
    pub resolver: MovementResolver,
    pub controller: ActorController,
    pub camera: ChaseCamera,
    pub position: Vec3,
    pub tick: u64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    pub moved: u64,
    pub contacts: u64,
    pub slides: u64,
    pub ramp_ticks: u64,
    pub inside_ticks: u64,
}

pub fn camera_params(cfg: &CampusConfig) -> CameraParams {
    CameraParams {
        distance_outside: cfg.camera.distance_outside,
        distance_inside: cfg.camera.distance_inside,
        smoothing: cfg.camera.smoothing,
        pitch_min: cfg.camera.pitch_min,
        pitch_max: cfg.camera.pitch_max,
        ..CameraParams::default()
    }
}

pub fn controller_params(cfg: &CampusConfig) -> ControllerParams {
    ControllerParams {
        move_speed: cfg.player.move_speed,
        mouse_sensitivity: cfg.player.mouse_sensitivity,
        ..ControllerParams::default()
    }
}

/// Parses held keys such as `"WD"`; unknown letters are skipped with a warning.
pub fn parse_keys(keys: &str) -> Vec<MoveKey> {
    keys.chars()
        .filter_map(|c| {
            let k = MoveKey::from_code(&c.to_string());
            if k.is_none() {
                log::warn!("ignoring unknown movement key '{}'", c);
            }
            k
        })
        .collect()
}

impl Session {
    pub fn new(cfg: &CampusConfig, campus: Campus) -> Self {
        let mut controller = ActorController::new(controller_params(cfg));
        // Scripted runs drive the camera as if the pointer were captured
        controller.set_pointer_captured(true);
        Self {
            campus,
            resolver: MovementResolver::default(),
            controller,
            camera: ChaseCamera::new(camera_params(cfg)),
            position: Vec3::from(cfg.player.spawn),
            tick: 0,
        }
    }

    pub fn hold(&mut self, keys: &[MoveKey]) {
        for &k in keys {
            self.controller.key_down(k);
        }
    }

    /// One frame: mouse look, movement, then camera.
    pub fn step(&mut self, dt: f32, turn: f32, stats: &mut TickStats) {
        if turn != 0.0 {
            self.controller.mouse_move(&mut self.camera, turn, 0.0);
        }
        let outcome = self.controller.update(
            &mut self.position,
            &mut self.camera,
            &self.resolver,
            &self.campus.buildings,
            dt,
        );
        if let Some(o) = outcome {
            stats.moved += 1;
            stats.contacts += u64::from(o.contact.is_some());
            stats.slides += u64::from(o.slid);
            stats.ramp_ticks += u64::from(o.on_ramp);
            stats.inside_ticks += u64::from(o.inside_building);
            log::trace!(
                "tick {} pos=({:.3}, {:.3}, {:.3}) contact={} slid={} ramp={}",
                self.tick,
                o.position.x,
                o.position.y,
                o.position.z,
                o.contact.is_some(),
                o.slid,
                o.on_ramp
            );
        }
        self.camera.update(self.position, self.campus.obstacles());
        self.tick += 1;
    }

    pub fn run(&mut self, ticks: u64, dt: f32, turn: f32) -> TickStats {
        let mut stats = TickStats::default();
        for _ in 0..ticks {
            self.step(dt, turn, &mut stats);
        }
        stats
    }
}
