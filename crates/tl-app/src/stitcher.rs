//! Composites one tile into a larger bitmap for export.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use tl_core::{ExportTarget, TileFill};

use crate::error::AppError;

/// Where each copy of the tile lands, left-to-right then top-to-bottom,
/// until the canvas is covered. Copies on the last row and column may hang
/// past the edge.
pub fn tile_origins(tile_width: u32, tile_height: u32, width: u32, height: u32) -> Vec<(u32, u32)> {
    if tile_width == 0 || tile_height == 0 {
        return Vec::new();
    }

    let mut origins = Vec::new();
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            origins.push((x, y));
            x += tile_width;
        }
        y += tile_height;
    }
    origins
}

pub fn stitch(tile: &RgbaImage, target: &ExportTarget) -> RgbaImage {
    match target.fill {
        TileFill::Scale => {
            imageops::resize(tile, target.width, target.height, FilterType::Lanczos3)
        }
        TileFill::Repeat => {
            let mut canvas = RgbaImage::new(target.width, target.height);
            for (x, y) in tile_origins(tile.width(), tile.height(), target.width, target.height) {
                // `replace` clips at the canvas bounds.
                imageops::replace(&mut canvas, tile, i64::from(x), i64::from(y));
            }
            canvas
        }
    }
}

pub fn decode_tile(bytes: &[u8]) -> Result<RgbaImage, AppError> {
    let image = image::load_from_memory(bytes).map_err(AppError::Decode)?;
    Ok(image.to_rgba8())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(AppError::Encode)?;
    Ok(buf.into_inner())
}

/// Decode, stitch and encode off the async runtime. Compositing only starts
/// once decoding has fully finished.
pub async fn render_png(bytes: Vec<u8>, target: ExportTarget) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || {
        let tile = decode_tile(&bytes)?;
        let canvas = stitch(&tile, &target);
        encode_png(&canvas)
    })
    .await?
}
