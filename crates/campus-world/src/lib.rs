//! Deterministic campus generation: buildings, grounds, and props.
#![forbid(unsafe_code)]

pub mod building;
pub mod campus;
pub mod config;
pub mod environment;
pub mod ground;
pub mod layout;
pub mod material;
pub mod render;
pub mod seq;

pub use building::{Archetype, Building, BuildingSpec, Ramp};
pub use campus::Campus;
pub use config::{CampusConfig, load_config_from_path};
pub use environment::{Environment, Lamp, PathSegment};
pub use layout::{CellKind, FloorLayout};
pub use material::MaterialKey;
pub use render::{RenderPart, Shape};
