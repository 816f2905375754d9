//! Source image loading and tile rule extraction

use ndarray::Array2;
use std::collections::HashSet;
use std::path::Path;

use crate::analysis::rules::RuleSet;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{TileCatalog, TileExtractor};

/// Source image held as a grid of RGBA pixels
pub struct ImageProcessor {
    source_data: Array2<[u8; 4]>,
    unique_color_count: usize,
}

impl ImageProcessor {
    /// Load an image file and convert it to RGBA pixels
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    /// - The image has no pixels
    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let mut source_data = Array2::from_elem((height, width), [0u8; 4]);
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(slot) = source_data.get_mut([y as usize, x as usize]) {
                *slot = pixel.0;
            }
        }

        Self::from_pixels(source_data)
    }

    /// Wrap an existing pixel grid (rows x cols)
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no pixels
    pub fn from_pixels(source_data: Array2<[u8; 4]>) -> Result<Self> {
        if source_data.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "source image has no pixels".to_string(),
            });
        }

        let unique_color_count = source_data.iter().collect::<HashSet<_>>().len();
        Ok(Self {
            source_data,
            unique_color_count,
        })
    }

    /// Source pixels in row-major order
    pub const fn source_data(&self) -> &Array2<[u8; 4]> {
        &self.source_data
    }

    /// Source dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.source_data.dim()
    }

    /// Number of distinct colours in the source
    pub const fn unique_color_count(&self) -> usize {
        self.unique_color_count
    }

    /// Extract `tile_size` blocks and derive the rule set and tile catalog
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or the derived rules are
    /// inconsistent
    pub fn extract_rules(&self, tile_size: usize) -> Result<(RuleSet, TileCatalog)> {
        let extractor = TileExtractor::extract(&self.source_data, tile_size)?;
        let rules = extractor.rules()?;
        Ok((rules, extractor.catalog().clone()))
    }
}
