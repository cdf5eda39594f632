//! The generated world as a whole: immutable once built.

use crate::building::{Building, BuildingSpec};
use crate::environment::{self, Environment};
use crate::ground;
use crate::render::RenderPart;
use campus_geom::{Aabb, Vec3};
use rayon::prelude::*;

#[derive(Clone, Debug)]
pub struct Campus {
    pub buildings: Vec<Building>,
    pub environment: Environment,
    pub ground: Vec<RenderPart>,
    obstacles: Vec<Aabb>,
}

impl Campus {
    /// Generates every building (in parallel; each is a pure function of its
    /// spec), then the grounds around them. Output order follows `specs`.
    pub fn generate(specs: &[BuildingSpec]) -> Self {
        let buildings: Vec<Building> = specs.par_iter().map(Building::from_spec).collect();
        for b in &buildings {
            log::info!(
                "building {:?} at ({}, {}, {}): {} floors, {} volumes, {} ramps",
                b.archetype,
                b.origin.x,
                b.origin.y,
                b.origin.z,
                b.floor_count,
                b.all_volumes().len(),
                b.ramps().len()
            );
        }
        Self::from_buildings(buildings)
    }

    pub fn from_buildings(buildings: Vec<Building>) -> Self {
        let environment = environment::generate(&buildings);
        log::info!(
            "environment: {} paths, {} lamps, {} shrubs, {} grass patches",
            environment.paths.len(),
            environment.lamps.len(),
            environment.shrubs.len(),
            environment.grass.len()
        );
        let obstacles = buildings
            .iter()
            .flat_map(|b| b.all_volumes().iter().copied())
            .chain(environment.solid_bounds())
            .collect();
        Self {
            buildings,
            environment,
            ground: ground::generate(),
            obstacles,
        }
    }

    /// Every solid box in the scene, for camera ray casts.
    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    /// First building whose bounding volume contains `p`.
    pub fn building_at(&self, p: Vec3) -> Option<(usize, &Building)> {
        self.buildings.iter().enumerate().find(|(_, b)| b.contains(p))
    }

    /// Render parts for the whole scene: ground, buildings, then props.
    pub fn render_parts(&self) -> impl Iterator<Item = &RenderPart> {
        self.ground
            .iter()
            .chain(self.buildings.iter().flat_map(|b| b.parts.iter()))
            .chain(self.environment.parts.iter())
    }
}
