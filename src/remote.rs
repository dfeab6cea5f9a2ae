use mason_proto::PlayerId;
use mason_world::Rgb;

/// Pose mirror of another connected player. The server is
/// authoritative; each tick just overwrites the last known state.
/// Rendering keeps its own avatar resources keyed by id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemotePlayer {
    pub id: PlayerId,
    pub color: Rgb,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl RemotePlayer {
    pub fn new(id: PlayerId, color: Rgb, x: f32, y: f32, z: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            id,
            color,
            x,
            y,
            z,
            pitch,
            yaw,
        }
    }

    pub fn set_pose(&mut self, x: f32, y: f32, z: f32, pitch: f32, yaw: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.pitch = pitch;
        self.yaw = yaw;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}
