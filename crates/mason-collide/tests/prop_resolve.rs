use mason_collide::resolve;
use mason_geom::{Hitbox, Vec3};
use mason_world::{Grid, Rgb};
use proptest::prelude::*;

const STONE: Rgb = Rgb(0x88_88_88);

fn floor_world() -> Grid {
    let mut grid = Grid::with_size(8, 8, 4);
    for x in 0..8 {
        for z in 0..8 {
            grid.set_block(x, 0, z, None, Some(STONE));
        }
    }
    grid
}

proptest! {
    #[test]
    fn zero_delta_is_identity_for_any_contents(
        cells in prop::collection::vec((0..4i32, 0..4i32, 0..4i32), 0..20),
        ox in 0.0f32..4.0, oy in 0.0f32..4.0, oz in 0.0f32..4.0,
    ) {
        let mut grid = Grid::with_size(4, 4, 4);
        for (x, y, z) in cells {
            grid.set_block(x, y, z, None, Some(STONE));
        }
        let resolved = resolve(&grid, &Hitbox::cube(0.25), Vec3::new(ox, oy, oz), Vec3::ZERO);
        prop_assert_eq!(resolved, Vec3::ZERO);
    }

    #[test]
    fn vertical_falls_never_pass_the_floor_top(
        ox in 1.0f32..7.0, oz in 1.0f32..7.0,
        oy in 1.3f32..3.5, dy in -1.2f32..-0.01,
    ) {
        let grid = floor_world();
        let hb = Hitbox::cube(0.25);
        let origin = Vec3::new(ox, oy, oz);
        let resolved = resolve(&grid, &hb, origin, Vec3::new(0.0, dy, 0.0));

        // vertical clips never touch the other axes
        prop_assert_eq!(resolved.x, 0.0);
        prop_assert_eq!(resolved.z, 0.0);
        // the underside stops at or above the floor surface
        let underside = origin.y + resolved.y - hb.half_y;
        prop_assert!(underside >= 1.0 - 1e-4, "underside = {underside}");
        // and the clip never adds downward motion
        prop_assert!(resolved.y >= dy - 1e-6);
    }
}
