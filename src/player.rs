use mason_geom::{Hitbox, Vec3};
use mason_world::Grid;

use crate::config::SimConfig;
use crate::input::InputState;

use std::f32::consts::FRAC_PI_2;

/// The locally controlled actor: a capsule-like axis-aligned hitbox
/// driven by held keys and resolved against the grid every tick.
#[derive(Debug)]
pub struct Walker {
    pub pos: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub y_velocity: f32,
    /// One jump per ground contact.
    pub has_jump: bool,
    /// Free-fly ignores gravity; collision still applies.
    pub free_fly: bool,
    pub hitbox: Hitbox,
}

impl Walker {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            pos: spawn,
            pitch: 0.0,
            yaw: 0.0,
            y_velocity: 0.0,
            has_jump: true,
            free_fly: true,
            hitbox: Hitbox::cube(0.25),
        }
    }

    pub fn look(&mut self, cfg: &SimConfig, dx: f32, dy: f32) {
        self.yaw -= dx * cfg.rot_speed;
        self.pitch = (self.pitch - dy * cfg.rot_speed).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn toggle_free_fly(&mut self) {
        self.free_fly = !self.free_fly;
        self.y_velocity = 0.0;
    }

    /// Unit view direction for the current yaw/pitch (yaw 0 looks
    /// toward -z, matching the movement basis below).
    pub fn view_dir(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Advances one tick: build the candidate displacement from input
    /// and gravity, clip it against the grid, apply it, then derive
    /// grounded/jump state by comparing the clipped vertical motion
    /// with the candidate.
    pub fn update(&mut self, cfg: &SimConfig, dt: f32, input: &InputState, grid: &Grid) {
        self.look(cfg, input.look_dx, input.look_dy);
        if input.toggle_fly {
            self.toggle_free_fly();
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        let mut dz = 0.0;

        if input.forward {
            dx -= self.yaw.sin() * cfg.speed * dt;
            dz -= self.yaw.cos() * cfg.speed * dt;
        } else if input.backward {
            dx += self.yaw.sin() * cfg.speed * dt;
            dz += self.yaw.cos() * cfg.speed * dt;
        }

        if input.left {
            dx -= self.yaw.cos() * cfg.speed * dt;
            dz += self.yaw.sin() * cfg.speed * dt;
        } else if input.right {
            dx += self.yaw.cos() * cfg.speed * dt;
            dz -= self.yaw.sin() * cfg.speed * dt;
        }

        if self.free_fly {
            if input.ascend {
                dy += cfg.speed * dt;
            } else if input.descend {
                dy -= cfg.speed * dt;
            }
        } else {
            self.y_velocity -= cfg.gravity * dt;

            if input.ascend && self.has_jump {
                self.y_velocity = cfg.jump_velocity();
                self.has_jump = false;
            }

            if self.y_velocity < cfg.terminal_velocity() {
                self.y_velocity = cfg.terminal_velocity();
            }

            dy += self.y_velocity * dt;
        }

        let resolved = mason_collide::resolve(
            grid,
            &self.hitbox,
            self.pos,
            Vec3::new(dx, dy, dz),
        );
        self.pos += resolved;

        if resolved.y != dy {
            self.y_velocity = 0.0;
            if resolved.y > dy {
                // downward motion was reduced: standing on something
                self.has_jump = true;
            }
        } else {
            self.has_jump = false;
        }

        self.keep_in_world(cfg, grid);
    }

    /// World-edge handling: falling out respawns at the map center,
    /// horizontal overshoot wraps to the opposite edge.
    fn keep_in_world(&mut self, cfg: &SimConfig, grid: &Grid) {
        let limit = cfg.world_limit;
        if self.pos.y < -limit {
            self.pos.y = limit;
            self.pos.x = grid.width() as f32 / 2.0;
            self.pos.z = grid.depth() as f32 / 2.0;
        } else if self.pos.x.abs() > limit {
            self.pos.x = if self.pos.x < 0.0 { limit } else { -limit };
        } else if self.pos.y > limit {
            self.pos.y = -limit;
        } else if self.pos.z.abs() > limit {
            self.pos.z = if self.pos.z < 0.0 { limit } else { -limit };
        }
    }
}
