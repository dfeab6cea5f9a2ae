//! Block grid crate: face directions, blocks, the dense world grid,
//! and incremental face-visibility maintenance.
#![forbid(unsafe_code)]

pub mod face;
pub mod grid;
pub mod types;
pub mod volume;

pub use face::{Face, FaceSet};
pub use grid::Grid;
pub use types::{Block, Rgb};
pub use volume::Volume;
