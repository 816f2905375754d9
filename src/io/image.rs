//! PNG export of finished grids

use crate::analysis::rules::RuleSet;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileCatalog;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render a fully resolved grid with one pixel per cell
///
/// Each cell takes the colour of its tile's top-left source pixel.
///
/// # Errors
///
/// Returns an error if:
/// - A cell is not resolved
/// - A resolved tile has no colour in `catalog`
pub fn render_grid(grid: &Grid, rules: &RuleSet, catalog: &TileCatalog) -> Result<RgbaImage> {
    let tiles = grid.resolved_tiles().ok_or_else(|| {
        grid.first_open()
            .map_or_else(
                || AlgorithmError::InvalidSourceData {
                    reason: "Grid has no cells".to_string(),
                },
                |position| AlgorithmError::UnresolvedCell { position },
            )
    })?;

    let mut img = RgbaImage::new(grid.width() as u32, grid.height() as u32);
    for ((row, col), &index) in tiles.indexed_iter() {
        let color = rules
            .tile_id(index)
            .and_then(|tile| catalog.color(tile))
            .ok_or(AlgorithmError::InvalidTileIndex {
                index,
                max_tiles: rules.tile_count(),
            })?;
        img.put_pixel(col as u32, row as u32, Rgba(color));
    }
    Ok(img)
}

/// Render a fully resolved grid and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid cannot be rendered (see [`render_grid`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    rules: &RuleSet,
    catalog: &TileCatalog,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, rules, catalog)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
