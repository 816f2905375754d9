/// Bitset of tile indices used for candidate sets
pub mod bitset;
/// Collapse loop orchestration with restart on contradiction
pub mod executor;
/// Candidate reduction and constraint propagation
pub mod propagation;
/// Entropy-ordered queue with lazy invalidation
pub mod queue;
/// Pluggable random sampling for collapse decisions
pub mod selection;
