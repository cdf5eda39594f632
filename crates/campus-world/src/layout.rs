//! Per-floor interior layout rules.
//!
//! Each archetype has a fixed rule that turns a floor seed into a grid of cell
//! tags plus the partition walls that realise it. Seeds are chained by adding
//! small offsets to the floor seed; the offsets below are load-bearing for
//! reproducing existing campuses.

use crate::building::{Archetype, FLOOR_HEIGHT, WALL_OFFSET, WALL_THICKNESS};
use crate::seq::{pick, sample};
use campus_geom::Vec3;
use serde::{Deserialize, Serialize};

pub const CELL_SIZE: f32 = 4.0;

/// Dormitory columns become rooms when their draw exceeds this.
const DORM_ROOM_THRESHOLD: f64 = 0.4;
const MISC_WALL_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Corridor,
    Room,
}

/// Column-major cell grid: index is `x * grid_z + z`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub grid_x: usize,
    pub grid_z: usize,
    pub cells: Vec<CellKind>,
}

impl FloorLayout {
    pub fn new(width: f32, depth: f32) -> Self {
        let grid_x = (width / CELL_SIZE).floor() as usize;
        let grid_z = (depth / CELL_SIZE).floor() as usize;
        Self {
            grid_x,
            grid_z,
            cells: vec![CellKind::Empty; grid_x * grid_z],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, z: usize) -> usize {
        x * self.grid_z + z
    }

    pub fn get(&self, x: usize, z: usize) -> Option<CellKind> {
        if x < self.grid_x && z < self.grid_z {
            Some(self.cells[self.idx(x, z)])
        } else {
            None
        }
    }

    fn set(&mut self, x: usize, z: usize, kind: CellKind) {
        if x < self.grid_x && z < self.grid_z {
            let i = self.idx(x, z);
            self.cells[i] = kind;
        }
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Columns whose every cell is a corridor.
    pub fn corridor_columns(&self) -> Vec<usize> {
        (0..self.grid_x)
            .filter(|&x| (0..self.grid_z).all(|z| self.get(x, z) == Some(CellKind::Corridor)))
            .collect()
    }
}

/// A partition wall relative to the building origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partition {
    pub center: Vec3,
    pub size: Vec3,
}

pub struct FloorPlan {
    pub layout: FloorLayout,
    pub partitions: Vec<Partition>,
}

/// Interior for one floor of an `archetype` building with footprint `width` x `depth`.
pub fn generate_floor(archetype: Archetype, width: f32, depth: f32, floor: usize, seed: i64) -> FloorPlan {
    let floor_seed = seed + floor as i64;
    let wall_y = floor as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT / 2.0;
    let mut plan = FloorPlan {
        layout: FloorLayout::new(width, depth),
        partitions: Vec::new(),
    };
    match archetype {
        Archetype::Dormitory => dormitory(&mut plan, width, depth, wall_y, floor_seed),
        Archetype::Classroom => classroom(&mut plan, width, depth, wall_y, floor_seed),
        Archetype::Miscellaneous => miscellaneous(&mut plan, width, depth, wall_y, floor_seed),
        Archetype::Unknown => {}
    }
    plan
}

fn dormitory(plan: &mut FloorPlan, width: f32, depth: f32, wall_y: f32, floor_seed: i64) {
    let (grid_x, grid_z) = (plan.layout.grid_x, plan.layout.grid_z);
    let corridor_x = grid_x / 2;
    for z in 0..grid_z {
        plan.layout.set(corridor_x, z, CellKind::Corridor);
    }
    for x in 0..grid_x {
        if x == corridor_x || sample(floor_seed + x as i64) <= DORM_ROOM_THRESHOLD {
            continue;
        }
        let z = pick(floor_seed + x as i64 + 1, grid_z);
        plan.layout.set(x, z, CellKind::Room);
        // Half a cell toward the corridor
        let col = if x < corridor_x { x as f32 + 0.5 } else { x as f32 - 0.5 };
        plan.partitions.push(Partition {
            center: Vec3::new(
                col * CELL_SIZE - width / 2.0,
                wall_y,
                z as f32 * CELL_SIZE - depth / 2.0 + CELL_SIZE / 2.0,
            ),
            size: Vec3::new(WALL_THICKNESS, FLOOR_HEIGHT, CELL_SIZE),
        });
    }
}

fn classroom(plan: &mut FloorPlan, width: f32, depth: f32, wall_y: f32, floor_seed: i64) {
    let (grid_x, grid_z) = (plan.layout.grid_x, plan.layout.grid_z);
    let room_count = (sample(floor_seed) * 3.0).floor() as usize + 1;
    for i in 0..room_count {
        let s = floor_seed + i as i64;
        let cells_x = (sample(s) * 3.0 + 1.0).floor() as usize;
        let cells_z = (sample(s + 1) * 2.0 + 1.0).floor() as usize;
        let x = pick(s + 2, grid_x.saturating_sub(cells_x));
        let z = pick(s + 3, grid_z.saturating_sub(cells_z));
        for dx in x..x + cells_x {
            for dz in z..z + cells_z {
                plan.layout.set(dx, dz, CellKind::Room);
            }
        }

        let size_x = cells_x as f32 * CELL_SIZE;
        let size_z = cells_z as f32 * CELL_SIZE;
        let left = x as f32 * CELL_SIZE - width / 2.0;
        let front = z as f32 * CELL_SIZE - depth / 2.0;
        let along_x = Vec3::new(size_x, FLOOR_HEIGHT, WALL_THICKNESS);
        let along_z = Vec3::new(WALL_THICKNESS, FLOOR_HEIGHT, size_z);
        plan.partitions.extend([
            Partition {
                center: Vec3::new(left + size_x / 2.0, wall_y, front + size_z + WALL_OFFSET),
                size: along_x,
            },
            Partition {
                center: Vec3::new(left + size_x / 2.0, wall_y, front - WALL_OFFSET),
                size: along_x,
            },
            Partition {
                center: Vec3::new(left - WALL_OFFSET, wall_y, front + size_z / 2.0),
                size: along_z,
            },
            Partition {
                center: Vec3::new(left + size_x + WALL_OFFSET, wall_y, front + size_z / 2.0),
                size: along_z,
            },
        ]);
    }
}

fn miscellaneous(plan: &mut FloorPlan, width: f32, depth: f32, wall_y: f32, floor_seed: i64) {
    let (grid_x, grid_z) = (plan.layout.grid_x, plan.layout.grid_z);
    for i in 0..MISC_WALL_COUNT {
        let s = floor_seed + i as i64;
        let x = pick(s, grid_x);
        let z = pick(s + 1, grid_z);
        plan.layout.set(x, z, CellKind::Room);
        plan.partitions.push(Partition {
            center: Vec3::new(
                x as f32 * CELL_SIZE - width / 2.0 + CELL_SIZE / 2.0,
                wall_y,
                z as f32 * CELL_SIZE - depth / 2.0 + CELL_SIZE + WALL_OFFSET,
            ),
            size: Vec3::new(CELL_SIZE, FLOOR_HEIGHT, WALL_THICKNESS),
        });
    }
}
