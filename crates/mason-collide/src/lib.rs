//! Swept axis-aligned collision resolution against the block grid.
//!
//! The resolver turns a proposed displacement into a safe one: each
//! candidate block clips the displacement along the single axis whose
//! boundary the moving hitbox reaches first, and candidates are
//! applied in sequence, each refining the previous result.
#![forbid(unsafe_code)]

use mason_geom::{Hitbox, Vec3};
use mason_world::{Block, Face, Grid};

/// Leading-corner sign convention: `sign(0) = +1`.
#[inline]
fn lead(delta: f32, half: f32) -> f32 {
    if delta < 0.0 { -half } else { half }
}

/// Clips `delta` against a single solid block.
///
/// The leading corner of the hitbox is swept toward the destination;
/// a block whose unit cell the corner misses on every axis never
/// interacts with the displacement. Otherwise the axis whose cell
/// boundary is crossed first (in normalized ray distance) is the sole
/// colliding axis for this block. The clamp is skipped when the block
/// has a colliding neighbor through the approached face: that
/// neighbor clamps the same axis itself, which keeps adjacent solids
/// from double-clamping.
pub fn resolve_block(
    block: &Block,
    hitbox: &Hitbox,
    origin: Vec3,
    delta: Vec3,
    grid: &Grid,
) -> Vec3 {
    let mut out = delta;

    if !block.collides {
        return out;
    }

    let to = Vec3::new(
        origin.x + delta.x + lead(delta.x, hitbox.half_x),
        origin.y + delta.y + lead(delta.y, hitbox.half_y),
        origin.z + delta.z + lead(delta.z, hitbox.half_z),
    );

    let bx = block.x as f32;
    let by = block.y as f32;
    let bz = block.z as f32;

    if (to.x < bx || to.x > bx + 1.0)
        && (to.y < by || to.y > by + 1.0)
        && (to.z < bz || to.z > bz + 1.0)
    {
        return out;
    }

    let magnitude = delta.length();
    if magnitude == 0.0 {
        return out;
    }
    let vector = delta / magnitude;

    // Face of the cell the motion is headed for, per axis.
    let destination = Vec3::new(
        if delta.x < 0.0 { bx + 1.0 } else { bx },
        if delta.y < 0.0 { by + 1.0 } else { by },
        if delta.z < 0.0 { bz + 1.0 } else { bz },
    );
    let travelled = destination - to;

    // Normalized ray distance at which each moving axis crosses its
    // boundary; the smallest one is reached first and collides.
    let mut hit: Option<(f32, Axis)> = None;
    let mut consider = |steps: f32, axis: Axis| {
        if hit.is_none_or(|(best, _)| steps < best) {
            hit = Some((steps, axis));
        }
    };
    if delta.x != 0.0 {
        consider(-travelled.x / vector.x, Axis::X);
    }
    if delta.y != 0.0 {
        consider(-travelled.y / vector.y, Axis::Y);
    }
    if delta.z != 0.0 {
        consider(-travelled.z / vector.z, Axis::Z);
    }

    match hit {
        Some((_, Axis::X)) => {
            let face = if delta.x < 0.0 { Face::XPos } else { Face::XNeg };
            if open_through(grid, block, face) {
                out.x = bx - origin.x + lead(-delta.x, hitbox.half_x);
                if delta.x < 0.0 {
                    out.x += 1.0;
                }
            }
        }
        Some((_, Axis::Y)) => {
            let face = if delta.y < 0.0 { Face::YPos } else { Face::YNeg };
            if open_through(grid, block, face) {
                out.y = by - origin.y + lead(-delta.y, hitbox.half_y);
                if delta.y < 0.0 {
                    out.y += 1.0;
                }
            }
        }
        Some((_, Axis::Z)) => {
            let face = if delta.z < 0.0 { Face::ZPos } else { Face::ZNeg };
            if open_through(grid, block, face) {
                out.z = bz - origin.z + lead(-delta.z, hitbox.half_z);
                if delta.z < 0.0 {
                    out.z += 1.0;
                }
            }
        }
        None => {}
    }

    out
}

#[derive(Copy, Clone, Debug)]
enum Axis {
    X,
    Y,
    Z,
}

/// True when the cell behind `face` cannot clamp this axis itself.
#[inline]
fn open_through(grid: &Grid, block: &Block, face: Face) -> bool {
    grid.get_toward(block.x, block.y, block.z, face)
        .is_none_or(|n| !n.collides)
}

/// Grid-level driver: clips `delta` against every candidate cell the
/// destination-biased hitbox range covers.
///
/// Candidates are enumerated ascending x, then z, then y, and applied
/// in sequence, each refining the delta produced by the previous one.
/// The enumeration order is the tie-break among simultaneously
/// overlapping solids; no exact simultaneous solve is attempted.
pub fn resolve(grid: &Grid, hitbox: &Hitbox, origin: Vec3, delta: Vec3) -> Vec3 {
    if delta == Vec3::ZERO {
        return delta;
    }

    let dest = origin + delta;
    let x0 = (dest.x - hitbox.half_x).floor() as i32;
    let x1 = (dest.x + hitbox.half_x).floor() as i32;
    let z0 = (dest.z - hitbox.half_z).floor() as i32;
    let z1 = (dest.z + hitbox.half_z).floor() as i32;
    let y0 = (dest.y - hitbox.half_y).floor() as i32;
    let y1 = (dest.y + hitbox.half_y).floor() as i32;

    let mut out = delta;
    let mut visited: Vec<(i32, i32, i32)> = Vec::new();
    for x in x0..=x1 {
        for z in z0..=z1 {
            for y in y0..=y1 {
                let Some(block) = grid.get(x, y, z) else {
                    continue;
                };
                // a cell cannot appear twice in a rectangular range,
                // but guard anyway
                if visited.contains(&(x, y, z)) {
                    continue;
                }
                visited.push((x, y, z));
                let refined = resolve_block(block, hitbox, origin, out, grid);
                if refined != out {
                    log::trace!(
                        target: "collide",
                        "clip at ({x},{y},{z}): {out:?} -> {refined:?}"
                    );
                }
                out = refined;
            }
        }
    }
    out
}
