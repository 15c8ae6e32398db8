pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod generator;
pub mod state;
pub mod stitcher;

pub use error::AppError;
