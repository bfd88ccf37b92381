use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::adjacency::AdjacencyIndex;
use crate::error::GraphError;
use crate::model::{Post, User};
use crate::store::UserStore;
use crate::traversal;

// ─────────────────────────────────────────────
// NetworkStats
// ─────────────────────────────────────────────

/// Aggregate counters over the whole graph, recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStats {
    pub user_count: usize,
    pub edge_count: usize,
    /// Mean degree: `2 · edges / users`, 0.0 for an empty graph.
    pub avg_degree: f64,
    pub post_count: usize,
    /// Id with the highest degree; ties broken by lowest id.
    pub most_connected: Option<String>,
}

// ─────────────────────────────────────────────
// SocialGraph
// ─────────────────────────────────────────────

/// The social-graph engine: one entity store plus one adjacency index,
/// kept consistent by routing every mutation through this coordinator.
///
/// An explicit instance owned by the caller — there is no process-wide
/// singleton. All operations are synchronous and run to completion;
/// embedding in a multi-threaded host requires one coarse lock around
/// the whole engine per mutating call.
///
/// ## Write protocol
/// 1. Validate ids against the [`UserStore`].
/// 2. Mutate the store and/or the [`AdjacencyIndex`].
///
/// The adjacency index is only ever touched for validated ids, which is
/// what keeps its symmetry invariant local to that module.
#[derive(Debug, Default)]
pub struct SocialGraph {
    store: UserStore,
    adjacency: AdjacencyIndex,
}

impl SocialGraph {
    /// Construct an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from already-validated parts (snapshot restore).
    pub(crate) fn from_parts(store: UserStore, adjacency: AdjacencyIndex) -> Self {
        Self { store, adjacency }
    }

    /// Replace all engine state at once (snapshot restore, no merge).
    pub(crate) fn replace(&mut self, other: SocialGraph) {
        self.store = other.store;
        self.adjacency = other.adjacency;
    }

    // ── Entity operations ──────────────────────────────

    /// Register a new user with an empty friend set and no posts.
    pub fn register_user(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        interests: impl IntoIterator<Item = String>,
    ) -> Result<(), GraphError> {
        let user = User::new(id, name, interests);
        let id = user.id.clone();
        self.store.register(user)?;
        self.adjacency.add_node(id.as_str());
        debug!(user = %id, "registered user");
        Ok(())
    }

    /// Publish a post for `author`; returns its index in the author's
    /// sequence so callers can reference it later.
    pub fn add_post(
        &mut self,
        author: &str,
        content: impl Into<String>,
        tags: impl IntoIterator<Item = String>,
    ) -> Result<usize, GraphError> {
        let index = self.store.add_post(author, Post::new(content, tags))?;
        debug!(author = %author, index, "added post");
        Ok(index)
    }

    /// Record that `liker` liked `author`'s post at `index`. Idempotent.
    pub fn like_post(
        &mut self,
        liker: &str,
        author: &str,
        index: usize,
    ) -> Result<(), GraphError> {
        self.store.like_post(liker, author, index)?;
        debug!(liker = %liker, author = %author, index, "liked post");
        Ok(())
    }

    // ── Connection operations ──────────────────────────

    /// Create the friendship `a ↔ b`. Both ids must be registered;
    /// `a == b` is a no-op and connecting twice changes nothing.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        self.require_registered(a)?;
        self.require_registered(b)?;
        if self.adjacency.connect(a, b) {
            debug!(a = %a, b = %b, "connected");
        }
        Ok(())
    }

    /// Remove the friendship `a ↔ b` if present. Idempotent; never errors
    /// on an absent edge, but the ids must still be registered.
    pub fn disconnect(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        self.require_registered(a)?;
        self.require_registered(b)?;
        if self.adjacency.disconnect(a, b) {
            debug!(a = %a, b = %b, "disconnected");
        }
        Ok(())
    }

    /// Current friend set of `id` (possibly empty).
    pub fn neighbors(&self, id: &str) -> Result<&HashSet<String>, GraphError> {
        self.require_registered(id)?;
        // Registration always adds the adjacency entry, so a registered
        // user is always tracked.
        self.adjacency
            .neighbors(id)
            .ok_or_else(|| GraphError::UnknownUser(id.to_string()))
    }

    // ── Traversal queries ──────────────────────────────

    /// Shortest connection path, see [`traversal::shortest_path`].
    pub fn shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<Vec<String>>, GraphError> {
        traversal::shortest_path(&self.store, &self.adjacency, start, end)
    }

    /// Users connected to both `a` and `b`.
    pub fn mutual_friends(&self, a: &str, b: &str) -> Result<BTreeSet<String>, GraphError> {
        traversal::mutual_friends(&self.store, &self.adjacency, a, b)
    }

    /// Friends-of-friends candidate pool, see
    /// [`traversal::second_degree_candidates`].
    pub fn second_degree_candidates(&self, id: &str) -> Result<BTreeSet<String>, GraphError> {
        traversal::second_degree_candidates(&self.store, &self.adjacency, id)
    }

    // ── Stats ──────────────────────────────────────────

    /// Network-wide counters. The most-connected id is deterministic:
    /// highest degree first, lowest id on ties.
    pub fn stats(&self) -> NetworkStats {
        let user_count = self.store.user_count();
        let edge_count = self.adjacency.edge_count();
        let avg_degree = if user_count == 0 {
            0.0
        } else {
            (edge_count * 2) as f64 / user_count as f64
        };

        let most_connected = self
            .store
            .iter()
            .map(|(id, _)| (self.adjacency.degree(id), id))
            .max_by(|(da, ia), (db, ib)| da.cmp(db).then_with(|| ib.cmp(ia)))
            .map(|(_, id)| id.clone());

        NetworkStats {
            user_count,
            edge_count,
            avg_degree,
            post_count: self.store.post_count(),
            most_connected,
        }
    }

    // ── Accessors ──────────────────────────────────────

    /// The entity store, for read-only consumers (scoring, snapshots).
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// The adjacency index, for read-only consumers.
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    fn require_registered(&self, id: &str) -> Result<(), GraphError> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownUser(id.to_string()))
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
