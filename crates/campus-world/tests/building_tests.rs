use campus_geom::{Aabb, Vec3};
use campus_world::building::{FLOOR_HEIGHT, WALL_THICKNESS};
use campus_world::layout::CELL_SIZE;
use campus_world::{Archetype, Building, CellKind};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}

fn vapprox(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn centers(boxes: &[Aabb]) -> Vec<Vec3> {
    boxes.iter().map(Aabb::center).collect()
}

fn same_boxes(a: &[Aabb], b: &[Aabb]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.min.x.to_bits() == y.min.x.to_bits()
                && x.min.y.to_bits() == y.min.y.to_bits()
                && x.min.z.to_bits() == y.min.z.to_bits()
                && x.max.x.to_bits() == y.max.x.to_bits()
                && x.max.y.to_bits() == y.max.y.to_bits()
                && x.max.z.to_bits() == y.max.z.to_bits()
        })
}

fn default_campus() -> Vec<Building> {
    vec![
        Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0)),
        Building::new(Archetype::Classroom, Vec3::new(50.0, 0.0, 50.0)),
        Building::new(Archetype::Miscellaneous, Vec3::new(80.0, 0.0, 80.0)),
        Building::new(Archetype::Dormitory, Vec3::new(-30.0, 0.0, -30.0)),
    ]
}

#[test]
fn dormitory_golden_layout() {
    let b = Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0));
    assert_eq!(b.seed, 22_000);
    assert_eq!(b.floor_count, 4);

    let expected: [&[(f32, f32)]; 4] = [
        &[(12.0, 24.0), (16.0, 24.0)],
        &[(12.0, 24.0), (16.0, 16.0), (24.0, 24.0)],
        &[(12.0, 16.0), (20.0, 24.0), (24.0, 16.0)],
        &[(20.0, 16.0)],
    ];
    for (f, walls) in expected.iter().enumerate() {
        let got = centers(b.inner_volumes(f));
        assert_eq!(got.len(), walls.len(), "floor {f}");
        let y = f as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT / 2.0;
        for (c, &(x, z)) in got.iter().zip(walls.iter()) {
            assert!(vapprox(*c, Vec3::new(x, y, z)), "floor {f}: {c:?} vs ({x}, {y}, {z})");
        }
        for wall in b.inner_volumes(f) {
            assert!(vapprox(wall.size(), Vec3::new(WALL_THICKNESS, FLOOR_HEIGHT, CELL_SIZE)));
        }
    }
}

#[test]
fn dormitory_scenario_corridor_and_rooms() {
    let origin = Vec3::new(20.0, 0.0, 20.0);
    let a = Building::new(Archetype::Dormitory, origin);
    let b = Building::new(Archetype::Dormitory, origin);
    for (la, lb) in a.layouts.iter().zip(&b.layouts) {
        assert_eq!(la.corridor_columns().len(), 1);
        let rooms = la.count(CellKind::Room);
        assert!(rooms <= la.grid_x - 1);
        assert_eq!(la, lb);
    }
}

#[test]
fn generation_is_bit_identical() {
    for (a, b) in default_campus().iter().zip(default_campus().iter()) {
        assert!(same_boxes(a.all_volumes(), b.all_volumes()));
        assert_eq!(a.ramps(), b.ramps());
        assert_eq!(a.bounding_volume, b.bounding_volume);
    }
}

#[test]
fn every_volume_inside_bounding_volume() {
    for b in default_campus() {
        for f in 0..b.floor_count {
            for v in b.outer_volumes(f).iter().chain(b.inner_volumes(f)) {
                assert!(b.bounding_volume.contains_aabb(v), "{:?} floor {f}: {v:?}", b.archetype);
            }
        }
    }
}

#[test]
fn exterior_walls_leave_a_door_on_the_ground_floor() {
    let b = Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0));
    assert_eq!(b.outer_volumes(0).len(), 5);
    for f in 1..b.floor_count {
        assert_eq!(b.outer_volumes(f).len(), 4);
    }
    // Door gap is 8 wide and centred on the origin's x
    let left = b.outer_volumes(0)[0];
    let right = b.outer_volumes(0)[1];
    assert!(approx(left.max.x, 16.0));
    assert!(approx(right.min.x, 24.0));
    assert!(approx(left.min.x, 10.0));
    assert!(approx(right.max.x, 30.0));
    // A point in the doorway at walking height hits no exterior wall
    let doorway = Aabb::from_center_size(Vec3::new(20.0, 0.5, 10.0), Vec3::new(1.0, 1.0, 1.0));
    assert!(b.outer_volumes(0).iter().all(|w| !w.intersects(&doorway)));
}

#[test]
fn classroom_and_misc_interiors() {
    let c = Building::new(Archetype::Classroom, Vec3::new(50.0, 0.0, 50.0));
    let counts: Vec<usize> = (0..c.floor_count).map(|f| c.inner_volumes(f).len()).collect();
    assert_eq!(counts, vec![4, 8, 12]);

    let m = Building::new(Archetype::Miscellaneous, Vec3::new(80.0, 0.0, 80.0));
    assert_eq!(m.floor_count, 1);
    assert_eq!(m.inner_volumes(0).len(), 3);
    assert!(vapprox(m.inner_volumes(0)[0].center(), Vec3::new(74.5, 1.5, 76.51)));
    assert!(m.ramps().is_empty());
}

#[test]
fn unknown_archetype_is_an_empty_single_floor_shell() {
    let u = Building::new(Archetype::Unknown, Vec3::new(60.0, 0.0, 0.0));
    assert_eq!(u.floor_count, 1);
    assert_eq!((u.width, u.depth), (15.0, 15.0));
    assert!(u.inner_volumes(0).is_empty());
    assert!(u.ramps().is_empty());
    assert_eq!(u.outer_volumes(0).len(), 5);
    assert_eq!(u.layouts[0].count(CellKind::Empty), 9);
}

#[test]
fn ramps_connect_consecutive_floors() {
    let b = Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0));
    assert_eq!(b.ramps().len(), 3);
    for (f, r) in b.ramps().iter().enumerate() {
        assert_eq!(r.floor, f);
        assert!(approx(r.x, 28.0));
        assert!(approx(r.start_z, 8.0));
        assert!(approx(r.end_z, 12.0));
        assert!(r.start_z < r.end_z);
        assert!(approx(r.start_y, f as f32 * FLOOR_HEIGHT));
        assert!(approx(r.end_y, (f + 1) as f32 * FLOOR_HEIGHT));
        assert!(approx(r.height_at(10.0), f as f32 * FLOOR_HEIGHT + 1.5));
    }
    assert_eq!(b.ramp(1).map(|r| r.floor), Some(1));
    assert!(b.ramp(3).is_none());

    let c = Building::new(Archetype::Classroom, Vec3::new(50.0, 0.0, 50.0));
    assert_eq!(c.ramps().len(), 2);
    assert!(approx(c.ramps()[0].x, 60.0));
}

#[test]
fn floor_localization_clamps() {
    let b = Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0));
    assert_eq!(b.localize_floor(0.5, 0.5), 0);
    assert_eq!(b.localize_floor(3.5, 0.5), 1);
    assert_eq!(b.localize_floor(5.4, 0.5), 2);
    assert_eq!(b.localize_floor(-10.0, 0.5), 0);
    assert_eq!(b.localize_floor(100.0, 0.5), 3);
}

#[test]
fn bounding_volume_spans_all_floors() {
    let b = Building::new(Archetype::Classroom, Vec3::new(50.0, 0.0, 50.0));
    assert!(approx(b.bounding_volume.min.y, 0.0));
    assert!(approx(b.bounding_volume.max.y, 9.0));
    assert!(b.contains(Vec3::new(50.0, 6.5, 50.0)));
    assert!(!b.contains(Vec3::new(50.0, 9.5, 50.0)));
    assert!(vapprox(b.entrance(), Vec3::new(50.0, 0.0, 37.5)));
}
