//! Wave function collapse generation of tiled images from a sample
//!
//! Every n×n block of a source image becomes a tile. The source tells which
//! tiles may border each other in each direction and how often each tile
//! occurs. Generation fills a toroidal output grid by repeatedly collapsing
//! the lowest-entropy cell and propagating the adjacency constraints, and
//! starts over from scratch whenever a cell is left with no possible tile.

#![forbid(unsafe_code)]

/// Collapse engine: candidate sets, entropy queue, propagation and restarts
pub mod algorithm;
/// Adjacency and frequency models extracted from source images
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and weighted sampling
pub mod math;
/// Directions, the output grid and tile extraction
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
