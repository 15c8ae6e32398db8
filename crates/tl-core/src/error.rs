use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("image size must be positive, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("unknown export preset '{0}' (expected desktop, phone or tile)")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, Error>;
