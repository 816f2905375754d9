//! Mathematical utilities for the algorithm

/// Entropy and weighted sampling over tile weights
pub mod probability;
