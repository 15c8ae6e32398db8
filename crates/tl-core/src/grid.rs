//! Preview grid: how many tiles cover the viewport, and how they reveal.

use std::time::Duration;

use crate::job::WallpaperImage;

/// On-screen edge length of one preview tile, in logical pixels.
pub const TILE_EDGE: u32 = 180;
/// Columns and rows are capped independently at this many tiles.
pub const MAX_TILES_PER_AXIS: u32 = 12;
/// Delay between consecutive tiles of the cascading reveal.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGridSpec {
    pub columns: u32,
    pub rows: u32,
}

impl TileGridSpec {
    /// Computed once for the viewport. One extra row is added so the grid
    /// still covers the screen after scroll or resize drift.
    pub fn from_viewport(width: u32, height: u32) -> Self {
        let columns = width.div_ceil(TILE_EDGE).clamp(1, MAX_TILES_PER_AXIS);
        let rows = height.div_ceil(TILE_EDGE).clamp(1, MAX_TILES_PER_AXIS) + 1;

        Self { columns, rows }
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Identity of a rendered tile. A new generation means every tile is a new
/// element and its entrance animation starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub generation: u64,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile<'a> {
    pub key: TileKey,
    pub column: u32,
    pub row: u32,
    pub image: &'a WallpaperImage,
    pub reveal_delay: Duration,
}

impl Tile<'_> {
    /// Top-left corner of the tile in grid pixels.
    pub fn origin(&self) -> (u32, u32) {
        (self.column * TILE_EDGE, self.row * TILE_EDGE)
    }
}

#[derive(Debug, Clone)]
pub struct TileGrid {
    spec: TileGridSpec,
    wallpaper: Option<WallpaperImage>,
    generation: u64,
}

impl TileGrid {
    pub fn new(spec: TileGridSpec) -> Self {
        Self {
            spec,
            wallpaper: None,
            generation: 0,
        }
    }

    pub fn spec(&self) -> TileGridSpec {
        self.spec
    }

    pub fn wallpaper(&self) -> Option<&WallpaperImage> {
        self.wallpaper.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shows `image` on every tile and restarts the cascade, even when the
    /// image is the one already displayed.
    pub fn show(&mut self, image: WallpaperImage) {
        self.wallpaper = Some(image);
        self.generation += 1;
    }

    /// Tiles in row-major order. Empty until a wallpaper is shown.
    pub fn tiles(&self) -> impl Iterator<Item = Tile<'_>> + '_ {
        let generation = self.generation;
        let columns = self.spec.columns;
        let count = match self.wallpaper {
            Some(_) => self.spec.tile_count(),
            None => 0,
        };

        self.wallpaper.iter().flat_map(move |image| {
            (0..count).map(move |index| Tile {
                key: TileKey { generation, index },
                column: index % columns,
                row: index / columns,
                image,
                reveal_delay: REVEAL_STAGGER * index,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_for_common_viewport() {
        let spec = TileGridSpec::from_viewport(1920, 1080);
        assert_eq!(spec.columns, 11);
        assert_eq!(spec.rows, 7);
        assert_eq!(spec.tile_count(), 77);
    }

    #[test]
    fn test_columns_cap_at_twelve() {
        assert_eq!(TileGridSpec::from_viewport(2160, 500).columns, 12);
        assert_eq!(TileGridSpec::from_viewport(2161, 500).columns, 12);
        assert_eq!(TileGridSpec::from_viewport(7680, 500).columns, 12);
    }

    #[test]
    fn test_rows_cap_then_pad() {
        assert_eq!(TileGridSpec::from_viewport(500, 10_000).rows, 13);
        assert_eq!(TileGridSpec::from_viewport(500, 180).rows, 2);
        assert_eq!(TileGridSpec::from_viewport(500, 181).rows, 3);
    }

    #[test]
    fn test_degenerate_viewport_still_has_a_tile() {
        let spec = TileGridSpec::from_viewport(0, 0);
        assert_eq!(spec, TileGridSpec { columns: 1, rows: 2 });
    }

    #[test]
    fn test_no_tiles_before_wallpaper() {
        let grid = TileGrid::new(TileGridSpec::from_viewport(800, 600));
        assert_eq!(grid.tiles().count(), 0);
    }

    #[test]
    fn test_every_tile_shows_same_image_with_staggered_delay() {
        let mut grid = TileGrid::new(TileGridSpec::from_viewport(360, 180));
        let image = WallpaperImage::new("https://x/out-0.png");
        grid.show(image.clone());

        let tiles: Vec<_> = grid.tiles().collect();
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| *t.image == image));
        assert_eq!(tiles[0].reveal_delay, Duration::ZERO);
        assert_eq!(tiles[3].reveal_delay, Duration::from_millis(150));
        assert_eq!((tiles[3].column, tiles[3].row), (1, 1));
        assert_eq!(tiles[3].origin(), (180, 180));
    }

    #[test]
    fn test_showing_same_image_replays_reveal() {
        let mut grid = TileGrid::new(TileGridSpec::from_viewport(360, 180));
        let image = WallpaperImage::new("https://x/out-0.png");

        grid.show(image.clone());
        let before = grid.tiles().next().unwrap().key;
        grid.show(image);
        let after = grid.tiles().next().unwrap().key;

        assert_eq!(before.index, after.index);
        assert_ne!(before, after);
        assert_eq!(grid.generation(), 2);
    }
}
