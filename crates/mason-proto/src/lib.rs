//! Wire protocol: closed tagged unions for every event the transport
//! can deliver or send, decoded once at the boundary. The simulation
//! core never inspects untyped payload fields.
//!
//! Frames are JSON text with an `action` tag; colors travel as 24-bit
//! integers and the map payload as the nested `[x][z][y]` volume.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use mason_world::{Rgb, Volume};

pub type PlayerId = u64;

/// State changes delivered by the server. `Place`/`Break` carry
/// remote-authoritative coordinates and color; the client applies
/// them verbatim and never predicts edits locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ServerMsg {
    Connect {
        id: PlayerId,
        color: Rgb,
        x: f32,
        y: f32,
        z: f32,
        pitch: f32,
        yaw: f32,
        map: Volume,
    },
    Join {
        id: PlayerId,
        color: Rgb,
        x: f32,
        y: f32,
        z: f32,
        pitch: f32,
        yaw: f32,
    },
    Leave {
        id: PlayerId,
    },
    Move {
        id: PlayerId,
        x: f32,
        y: f32,
        z: f32,
        pitch: f32,
        yaw: f32,
    },
    Color {
        id: PlayerId,
        color: Rgb,
    },
    Place {
        x: i32,
        y: i32,
        z: i32,
        color: Rgb,
    },
    Break {
        x: i32,
        y: i32,
        z: i32,
    },
}

/// Intents produced by the local simulation for the transport.
/// Edit intents carry coordinates only; color and removal semantics
/// are authoritative on the remote side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ClientMsg {
    Move {
        x: f32,
        y: f32,
        z: f32,
        pitch: f32,
        yaw: f32,
    },
    Place {
        x: i32,
        y: i32,
        z: i32,
    },
    Break {
        x: i32,
        y: i32,
        z: i32,
    },
    Color {
        color: Rgb,
    },
}

pub fn decode(frame: &str) -> Result<ServerMsg, serde_json::Error> {
    serde_json::from_str(frame)
}

pub fn encode(msg: &ClientMsg) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}
