//! Derived social metrics for kith-graph.
//!
//! Pure query functions over `(store, adjacency)` pairs:
//!
//! - **Recommendations**: second-degree candidates scored by shared
//!   friends and shared interests
//! - **Affinity**: pairwise connection-strength composite

pub mod affinity;
pub mod recommend;

pub use affinity::connection_strength;
pub use recommend::{recommendation_scores, Recommendation};
