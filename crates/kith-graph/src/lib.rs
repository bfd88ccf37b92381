//! # kith-graph
//!
//! In-memory social-graph engine: users, symmetric friendship edges, and
//! per-user posts, with structural queries over the connection graph.
//!
//! - [`model::User`] / [`model::Post`] — identity and post records
//! - [`store::UserStore`]              — arena of records keyed by user id
//! - [`adjacency::AdjacencyIndex`]     — undirected symmetric adjacency index
//! - [`traversal`]                     — BFS shortest paths, mutual friends,
//!   second-degree candidates
//! - [`engine::SocialGraph`]           — the engine coordinator + stats
//! - [`snapshot::Snapshot`]            — full-state persistence contract

pub mod adjacency;
pub mod engine;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod traversal;

pub use adjacency::AdjacencyIndex;
pub use engine::{NetworkStats, SocialGraph};
pub use error::GraphError;
pub use model::{Post, User};
pub use snapshot::Snapshot;
pub use store::UserStore;
pub use traversal::{mutual_friends, second_degree_candidates, shortest_path};
