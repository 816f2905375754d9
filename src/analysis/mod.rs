//! Rule extraction: adjacency and frequency statistics of source tiles

/// Directional adjacency rules between tiles
pub mod adjacency;
/// Occurrence weights of tiles
pub mod frequency;
/// Source image loading and rule extraction
pub mod patterns;
/// Validated rule set consumed by the propagation engine
pub mod rules;
