use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How the tile fills an export canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFill {
    /// Repeat the tile at its natural resolution from the origin.
    Repeat,
    /// Resample one whole tile to the canvas size.
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Desktop,
    Phone,
    SingleTile,
}

impl Preset {
    pub fn all() -> [Preset; 3] {
        [Self::Desktop, Self::Phone, Self::SingleTile]
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Desktop => "desktop",
            Self::Phone => "phone",
            Self::SingleTile => "tile",
        }
    }

    pub fn target(&self) -> ExportTarget {
        match self {
            Self::Desktop => ExportTarget::new(*self, 3800, 2100, TileFill::Repeat),
            Self::Phone => ExportTarget::new(*self, 1170, 2532, TileFill::Repeat),
            Self::SingleTile => ExportTarget::new(*self, 256, 256, TileFill::Scale),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "phone" => Ok(Self::Phone),
            "tile" | "single-tile" | "singletile" => Ok(Self::SingleTile),
            _ => Err(Error::UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTarget {
    pub preset: Preset,
    pub width: u32,
    pub height: u32,
    pub fill: TileFill,
}

impl ExportTarget {
    pub fn new(preset: Preset, width: u32, height: u32, fill: TileFill) -> Self {
        Self {
            preset,
            width,
            height,
            fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let sizes: Vec<_> = Preset::all()
            .iter()
            .map(|p| (p.target().width, p.target().height))
            .collect();
        assert_eq!(sizes, vec![(3800, 2100), (1170, 2532), (256, 256)]);
    }

    #[test]
    fn test_single_tile_scales() {
        assert_eq!(Preset::SingleTile.target().fill, TileFill::Scale);
        assert_eq!(Preset::Desktop.target().fill, TileFill::Repeat);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Desktop".parse::<Preset>(), Ok(Preset::Desktop));
        assert_eq!("single-tile".parse::<Preset>(), Ok(Preset::SingleTile));
        assert_eq!(
            "tablet".parse::<Preset>(),
            Err(Error::UnknownPreset("tablet".into()))
        );
    }
}
