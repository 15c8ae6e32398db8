pub mod catalog;
pub mod error;
pub mod grid;
pub mod job;
pub mod progress;
mod generation;
mod preset;

pub use error::{Error, Result};
pub use generation::{GenerationRequest, TILE_SIZE};
pub use grid::{Tile, TileGrid, TileGridSpec, TileKey};
pub use job::{Job, JobOutput, JobStatus, WallpaperImage};
pub use preset::{ExportTarget, Preset, TileFill};
