use campus_geom::Vec3;
use campus_physics::MovementResolver;
use campus_world::{Archetype, Building};
use proptest::prelude::*;

fn campus() -> Vec<Building> {
    vec![
        Building::new(Archetype::Dormitory, Vec3::new(20.0, 0.0, 20.0)),
        Building::new(Archetype::Classroom, Vec3::new(50.0, 0.0, 50.0)),
    ]
}

fn arb_start() -> impl Strategy<Value = Vec3> {
    (0.0f32..70.0, 0.0f32..70.0).prop_map(|(x, z)| Vec3::new(x, 0.5, z))
}

fn arb_delta() -> impl Strategy<Value = Vec3> {
    (-0.5f32..0.5, -0.5f32..0.5).prop_map(|(x, z)| Vec3::new(x, 0.0, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A move either lands where asked (modulo height) or goes no faster than the slide speed
    #[test]
    fn committed_motion_is_bounded(start in arb_start(), delta in arb_delta()) {
        let buildings = campus();
        let r = MovementResolver::default();
        let out = r.resolve(&buildings, start, delta);
        let horizontal = out.committed.with_y(0.0).length();
        match out.contact {
            None => prop_assert!((horizontal - delta.length()).abs() <= 1e-4),
            Some(_) => prop_assert!(horizontal <= r.slide_factor * delta.length() + 1e-4),
        }
        prop_assert!(!out.slid || out.contact.is_some());
    }

    // Resolution is a pure function of its inputs
    #[test]
    fn resolve_is_deterministic(start in arb_start(), delta in arb_delta()) {
        let buildings = campus();
        let r = MovementResolver::default();
        prop_assert_eq!(r.resolve(&buildings, start, delta), r.resolve(&buildings, start, delta));
    }
}
