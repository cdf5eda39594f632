//! Per-tick actor movement against generated campus geometry, plus the chase camera.
#![forbid(unsafe_code)]

pub mod camera;
pub mod controller;
pub mod resolver;

pub use camera::{CameraParams, ChaseCamera};
pub use controller::{ActorController, ControllerParams, MoveKey};
pub use resolver::{ActorShape, Axis, Contact, MoveOutcome, MovementResolver, Scope, resolve};
