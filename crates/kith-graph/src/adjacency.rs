use std::collections::{HashMap, HashSet};

// ─────────────────────────────────────────────
// AdjacencyIndex
// ─────────────────────────────────────────────

/// In-memory undirected adjacency index over user ids.
///
/// Symmetry is an invariant maintained here, not an assumption re-checked
/// elsewhere: every mutation writes both directions, so for all tracked
/// `a, b`, `b ∈ neighbors(a) ⟺ a ∈ neighbors(b)`.
///
/// Id validity (is this a registered user?) is the engine coordinator's
/// concern — this index only manages edges between ids it is told about.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// user id → neighbor id set. Edges are a set, never a multiset.
    neighbors: HashMap<String, HashSet<String>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutations ──────────────────────────────────────

    /// Start tracking `id` with an empty neighbor set.
    /// Called once per user at registration.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.neighbors.entry(id.into()).or_default();
    }

    /// Insert the undirected edge `a ↔ b`.
    ///
    /// Self-edges are never created: `a == b` is a no-op, not an error.
    /// Idempotent — connecting twice leaves the same neighbor sets as once.
    /// Returns `true` if the edge was newly created.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let fresh = self
            .neighbors
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.neighbors
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
        fresh
    }

    /// Remove the undirected edge `a ↔ b` if present.
    ///
    /// Disconnection is idempotent: removing an absent edge is a no-op.
    /// Returns `true` if an edge was actually removed.
    pub fn disconnect(&mut self, a: &str, b: &str) -> bool {
        let removed = self
            .neighbors
            .get_mut(a)
            .map(|set| set.remove(b))
            .unwrap_or(false);
        if let Some(set) = self.neighbors.get_mut(b) {
            set.remove(a);
        }
        removed
    }

    // ── Queries ────────────────────────────────────────

    /// Neighbor set of `id`, or `None` if the id was never tracked.
    pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
        self.neighbors.get(id)
    }

    /// True if the undirected edge `a ↔ b` exists.
    pub fn connected(&self, a: &str, b: &str) -> bool {
        self.neighbors
            .get(a)
            .map(|set| set.contains(b))
            .unwrap_or(false)
    }

    /// Number of neighbors of `id` (0 for untracked ids).
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors.get(id).map(HashSet::len).unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges: half the sum of degrees.
    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashSet<String>)> {
        self.neighbors.iter()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
