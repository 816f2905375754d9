//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Directions and toroidal neighbour enumeration
//! - Output grid state
//! - Tile identifiers and extraction from source pixels

/// Directions and toroidal neighbour enumeration
pub mod geometry;
/// Output grid and per-cell states
pub mod grid;
/// Tile identifiers, catalog and extraction
pub mod tiles;

pub use geometry::{Direction, Position};
pub use grid::{CellState, Grid};
