//! PNG rendering of generation output for the example binaries.
use std::path::Path;

use image::{Rgb, RgbImage};
use map_shapes::prelude::*;

/// Installs a formatting subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Colors and scale used when writing a mask to an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output pixels per grid cell.
    pub cell_px: u32,
    pub background: [u8; 3],
    pub corridor: [u8; 3],
    pub shape: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_px: 8,
            background: [24, 24, 32],
            corridor: [180, 180, 160],
            shape: [220, 90, 40],
        }
    }
}

impl RenderConfig {
    pub fn with_cell_px(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px.max(1);
        self
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }
}

/// Writes the final mask of `output` to `path`, highlighting shape cells.
pub fn render_output_to_png(
    output: &GenerationOutput,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let grid = output.mask().grid();
    let px = config.cell_px.max(1);
    let mut img = RgbImage::from_pixel(
        grid.width() * px,
        grid.height() * px,
        Rgb(config.background),
    );

    for cell in output.mask().occupied_cells() {
        let color = if output.shapes_mask.is_occupied(cell) {
            config.shape
        } else {
            config.corridor
        };
        let (x0, y0) = (cell.x as u32 * px, cell.y as u32 * px);
        for y in y0..y0 + px {
            for x in x0..x0 + px {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }

    img.save(path.as_ref())?;
    tracing::info!("Wrote {}.", path.as_ref().display());
    Ok(())
}
