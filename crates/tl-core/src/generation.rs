use crate::error::{Error, Result};

/// Edge length of a generated tile, in pixels. The model is always asked for
/// square output of this size.
pub const TILE_SIZE: u32 = 512;

/// A single request for a new seamless texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    width: u32,
    height: u32,
}

impl GenerationRequest {
    /// Square request at the native tile size.
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        Self::with_size(prompt, TILE_SIZE, TILE_SIZE)
    }

    pub fn with_size(prompt: impl Into<String>, width: u32, height: u32) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }

        Ok(Self {
            prompt,
            width,
            height,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
