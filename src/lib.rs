//! Simulation core of a shared voxel sandbox: a dense block grid,
//! swept collision against it, incremental face visibility, and a
//! tick-driven session that applies authoritative edits and produces
//! movement/edit intents. Rendering, input capture, and the actual
//! transport live outside this crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod input;
pub mod player;
pub mod raycast;
pub mod remote;
pub mod session;

pub use config::SimConfig;
pub use input::InputState;
pub use player::Walker;
pub use raycast::RayHit;
pub use remote::RemotePlayer;
pub use session::{Session, ingest_frame};
