use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;

use mason_geom::Vec3;
use mason_proto::{ClientMsg, PlayerId, ServerMsg};
use mason_world::{Grid, Rgb};

use crate::config::SimConfig;
use crate::input::InputState;
use crate::player::Walker;
use crate::raycast::{self, RayHit};
use crate::remote::RemotePlayer;

/// The whole simulation state for one connection: the grid, the local
/// walker, mirrors of the other players, and the queues that couple
/// the core to its transport.
///
/// Everything runs on the caller's thread. The transport pushes
/// decoded messages into the channel from wherever it likes; they are
/// drained in arrival order at the start of each tick, and outgoing
/// intents accumulate until the transport takes them.
pub struct Session {
    pub grid: Grid,
    pub walker: Walker,
    pub remotes: HashMap<PlayerId, RemotePlayer>,
    pub local_id: Option<PlayerId>,
    pub local_color: Rgb,
    pub looking_at: Option<RayHit>,
    pub tick: u64,
    cfg: SimConfig,
    rx: Receiver<ServerMsg>,
    outgoing: Vec<ClientMsg>,
    connected: bool,
}

impl Session {
    pub fn new(cfg: SimConfig) -> (Self, Sender<ServerMsg>) {
        let (tx, rx) = unbounded();
        let session = Self {
            grid: Grid::new(),
            walker: Walker::new(Vec3::ZERO),
            remotes: HashMap::new(),
            local_id: None,
            local_color: Rgb::WHITE,
            looking_at: None,
            tick: 0,
            cfg,
            rx,
            outgoing: Vec::new(),
            connected: false,
        };
        (session, tx)
    }

    /// Session over a locally generated or loaded grid, no server.
    /// The walker spawns above the map center.
    pub fn offline(cfg: SimConfig, grid: Grid) -> (Self, Sender<ServerMsg>) {
        let (mut session, tx) = Self::new(cfg);
        let spawn = Vec3::new(grid.width() as f32 / 2.0, 6.0, grid.depth() as f32 / 2.0);
        session.grid = grid;
        session.walker = Walker::new(spawn);
        session.connected = true;
        (session, tx)
    }

    #[inline]
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// One simulation tick: drain queued events, move the walker,
    /// refresh block selection, and turn gestures into intents.
    ///
    /// A stalled frame (dt over the safety threshold) skips the whole
    /// step rather than applying an oversized displacement; queued
    /// events simply wait for the next healthy tick.
    pub fn step(&mut self, dt: f32, input: &InputState) {
        if dt > self.cfg.max_tick_dt {
            log::warn!(target: "session", "skipping stalled tick (dt={dt:.3}s)");
            return;
        }
        self.tick += 1;

        let queued: Vec<ServerMsg> = self.rx.try_iter().collect();
        for msg in queued {
            self.apply(msg);
        }

        if !self.connected {
            return;
        }

        self.walker.update(&self.cfg, dt, input, &self.grid);
        self.outgoing.push(ClientMsg::Move {
            x: self.walker.pos.x,
            y: self.walker.pos.y,
            z: self.walker.pos.z,
            pitch: self.walker.pitch,
            yaw: self.walker.yaw,
        });

        self.update_selection();
        self.apply_gestures(input);
    }

    /// Applies one authoritative state change. Every message kind
    /// degrades to a no-op when it does not apply (unknown ids,
    /// already-empty cells); nothing here can fail.
    fn apply(&mut self, msg: ServerMsg) {
        match msg {
            ServerMsg::Connect {
                id,
                color,
                x,
                y,
                z,
                pitch,
                yaw,
                map,
            } => {
                self.local_id = Some(id);
                self.local_color = color;
                self.walker = Walker::new(Vec3::new(x, y, z));
                self.walker.pitch = pitch;
                self.walker.yaw = yaw;
                self.grid.load(&map);
                self.connected = true;
                log::info!(target: "events", "[tick {}] connected as #{id}", self.tick);
            }
            ServerMsg::Join {
                id,
                color,
                x,
                y,
                z,
                pitch,
                yaw,
            } => {
                if Some(id) == self.local_id {
                    return;
                }
                self.remotes
                    .insert(id, RemotePlayer::new(id, color, x, y, z, pitch, yaw));
                log::info!(target: "events", "[tick {}] #{id} joined", self.tick);
            }
            ServerMsg::Leave { id } => {
                if self.remotes.remove(&id).is_some() {
                    log::info!(target: "events", "[tick {}] #{id} left", self.tick);
                }
            }
            ServerMsg::Move {
                id,
                x,
                y,
                z,
                pitch,
                yaw,
            } => {
                if Some(id) == self.local_id {
                    return;
                }
                if let Some(remote) = self.remotes.get_mut(&id) {
                    remote.set_pose(x, y, z, pitch, yaw);
                }
            }
            ServerMsg::Color { id, color } => {
                if Some(id) == self.local_id {
                    return;
                }
                if let Some(remote) = self.remotes.get_mut(&id) {
                    remote.set_color(color);
                }
            }
            ServerMsg::Place { x, y, z, color } => {
                self.grid.set_block(x, y, z, None, Some(color));
            }
            ServerMsg::Break { x, y, z } => {
                self.grid.set_block(x, y, z, None, None);
            }
        }
    }

    fn update_selection(&mut self) {
        let hit = raycast::cast(
            &self.grid,
            self.walker.pos,
            self.walker.view_dir(),
            self.cfg.reach,
        );

        let old_cell = self.looking_at.map(|h| (h.x, h.y, h.z));
        let new_cell = hit.map(|h| (h.x, h.y, h.z));
        if old_cell != new_cell {
            if let Some((x, y, z)) = old_cell {
                self.grid.set_selected(x, y, z, false);
            }
            if let Some((x, y, z)) = new_cell {
                self.grid.set_selected(x, y, z, true);
            }
        }
        self.looking_at = hit;
    }

    /// Edit gestures only produce intents; the grid changes when the
    /// authoritative echo comes back through the channel.
    fn apply_gestures(&mut self, input: &InputState) {
        let Some(hit) = self.looking_at else {
            return;
        };

        if input.clone_color {
            if let Some(block) = self.grid.get(hit.x, hit.y, hit.z) {
                let color = block.color;
                self.set_local_color(color);
            }
        } else if input.break_block {
            self.outgoing.push(ClientMsg::Break {
                x: hit.x,
                y: hit.y,
                z: hit.z,
            });
        } else if input.place {
            let (x, y, z) = hit.face.translate(hit.x, hit.y, hit.z);
            self.outgoing.push(ClientMsg::Place { x, y, z });
        }
    }

    /// Local color change (picker or clone gesture); announced to the
    /// server so edits echo back with it.
    pub fn set_local_color(&mut self, color: Rgb) {
        self.local_color = color;
        self.outgoing.push(ClientMsg::Color { color });
    }

    pub fn take_outgoing(&mut self) -> Vec<ClientMsg> {
        std::mem::take(&mut self.outgoing)
    }
}

/// Transport-side helper: decode one text frame and enqueue it.
/// Undecodable frames are logged and dropped; they never reach the
/// core.
pub fn ingest_frame(tx: &Sender<ServerMsg>, frame: &str) {
    match mason_proto::decode(frame) {
        Ok(msg) => {
            let _ = tx.send(msg);
        }
        Err(err) => {
            log::warn!(target: "events", "dropping undecodable frame: {err}");
        }
    }
}
