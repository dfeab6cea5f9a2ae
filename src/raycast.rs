use mason_geom::Vec3;
use mason_world::{Face, Grid};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Face of the hit block the ray entered through.
    pub face: Face,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

/// Voxel DDA: walks cell boundaries along `dir` and returns the first
/// occupied cell within `max_dist`, with the entry face. A ray that
/// starts inside a block has no entry face and reports no hit.
pub fn cast(grid: &Grid, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
    let len = dir.length();
    if len < 1e-6 {
        return None;
    }
    let d = dir / len;

    let mut vx = origin.x.floor() as i32;
    let mut vy = origin.y.floor() as i32;
    let mut vz = origin.z.floor() as i32;

    let stepx: i32 = if d.x > 0.0 {
        1
    } else if d.x < 0.0 {
        -1
    } else {
        0
    };
    let stepy: i32 = if d.y > 0.0 {
        1
    } else if d.y < 0.0 {
        -1
    } else {
        0
    };
    let stepz: i32 = if d.z > 0.0 {
        1
    } else if d.z < 0.0 {
        -1
    } else {
        0
    };

    let invx = inv_or_max(d.x);
    let invy = inv_or_max(d.y);
    let invz = inv_or_max(d.z);
    let tdx = if stepx == 0 { f32::MAX } else { invx };
    let tdy = if stepy == 0 { f32::MAX } else { invy };
    let tdz = if stepz == 0 { f32::MAX } else { invz };

    let fx = origin.x - origin.x.floor();
    let fy = origin.y - origin.y.floor();
    let fz = origin.z - origin.z.floor();
    let mut tmx = if stepx > 0 {
        (1.0 - fx) * invx
    } else if stepx < 0 {
        fx * invx
    } else {
        f32::MAX
    };
    let mut tmy = if stepy > 0 {
        (1.0 - fy) * invy
    } else if stepy < 0 {
        fy * invy
    } else {
        f32::MAX
    };
    let mut tmz = if stepz > 0 {
        (1.0 - fz) * invz
    } else if stepz < 0 {
        fz * invz
    } else {
        f32::MAX
    };

    let mut prev = (vx, vy, vz);
    let mut t = 0.0f32;

    for _ in 0..512 {
        if t > max_dist {
            break;
        }
        if grid.get(vx, vy, vz).is_some() {
            let face = match (vx - prev.0, vy - prev.1, vz - prev.2) {
                (1, _, _) => Face::XNeg,
                (-1, _, _) => Face::XPos,
                (_, 1, _) => Face::YNeg,
                (_, -1, _) => Face::YPos,
                (_, _, 1) => Face::ZNeg,
                (_, _, -1) => Face::ZPos,
                _ => return None, // started inside a block
            };
            return Some(RayHit {
                x: vx,
                y: vy,
                z: vz,
                face,
            });
        }
        prev = (vx, vy, vz);
        // step through the nearest boundary
        if tmx < tmy {
            if tmx < tmz {
                vx += stepx;
                t = tmx;
                tmx += tdx;
            } else {
                vz += stepz;
                t = tmz;
                tmz += tdz;
            }
        } else if tmy < tmz {
            vy += stepy;
            t = tmy;
            tmy += tdy;
        } else {
            vz += stepz;
            t = tmz;
            tmz += tdz;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_world::Rgb;

    #[test]
    fn straight_down_hits_the_top_face() {
        let mut grid = Grid::with_size(3, 3, 3);
        grid.set_block(1, 0, 1, None, Some(Rgb(0xff_ff_ff)));
        let hit = cast(
            &grid,
            Vec3::new(1.5, 2.5, 1.5),
            Vec3::new(0.0, -1.0, 0.0),
            6.0,
        )
        .expect("hit");
        assert_eq!((hit.x, hit.y, hit.z), (1, 0, 1));
        assert_eq!(hit.face, Face::YPos);
    }

    #[test]
    fn horizontal_ray_reports_the_entry_face() {
        let mut grid = Grid::with_size(5, 3, 3);
        grid.set_block(3, 1, 1, None, Some(Rgb(0xff_ff_ff)));
        let hit = cast(
            &grid,
            Vec3::new(0.5, 1.5, 1.5),
            Vec3::new(1.0, 0.0, 0.0),
            6.0,
        )
        .expect("hit");
        assert_eq!((hit.x, hit.y, hit.z), (3, 1, 1));
        assert_eq!(hit.face, Face::XNeg);
    }

    #[test]
    fn reach_limit_and_empty_space_miss() {
        let mut grid = Grid::with_size(32, 3, 3);
        grid.set_block(20, 1, 1, None, Some(Rgb(0xff_ff_ff)));
        let origin = Vec3::new(0.5, 1.5, 1.5);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        assert!(cast(&grid, origin, dir, 6.0).is_none());
        assert!(cast(&grid, origin, dir, 25.0).is_some());
        assert!(cast(&grid, origin, Vec3::new(0.0, 1.0, 0.0), 6.0).is_none());
    }
}
