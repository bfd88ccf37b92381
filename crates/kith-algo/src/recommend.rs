//! Friend recommendation scoring over the second-degree candidate pool.

use std::collections::HashMap;

use kith_graph::{second_degree_candidates, AdjacencyIndex, GraphError, UserStore};

/// Weight of one shared first-degree friend.
pub const SHARED_FRIEND_WEIGHT: f64 = 1.0;
/// Weight of one shared interest tag.
pub const SHARED_INTEREST_WEIGHT: f64 = 0.5;

/// One scored recommendation candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub user_id: String,
    pub score: f64,
}

/// Score every second-degree candidate of `id`.
///
/// A candidate accumulates [`SHARED_FRIEND_WEIGHT`] for each direct friend
/// of `id` also connected to the candidate, plus
/// [`SHARED_INTEREST_WEIGHT`] per shared interest tag. Users with no
/// shared friend never enter the pool, so every returned score is at
/// least [`SHARED_FRIEND_WEIGHT`].
///
/// The result is a strict total order — score descending, id ascending on
/// ties — so repeated calls on unchanged state return identical sequences.
pub fn recommendation_scores(
    store: &UserStore,
    adjacency: &AdjacencyIndex,
    id: &str,
) -> Result<Vec<Recommendation>, GraphError> {
    let candidates = second_degree_candidates(store, adjacency, id)?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    // Shared-friend counts: walk each friend's neighborhood once and
    // credit every neighbor that is a valid candidate.
    let mut scores: HashMap<&str, f64> = HashMap::new();
    if let Some(friends) = adjacency.neighbors(id) {
        for friend in friends {
            let Some(fof) = adjacency.neighbors(friend) else {
                continue;
            };
            for neighbor in fof {
                if let Some(candidate) = candidates.get(neighbor.as_str()) {
                    *scores.entry(candidate.as_str()).or_insert(0.0) += SHARED_FRIEND_WEIGHT;
                }
            }
        }
    }

    // Interest bonus. Unknown users cannot appear here: candidates come
    // from the adjacency index, which only tracks registered ids.
    let me = store
        .get(id)
        .ok_or_else(|| GraphError::UnknownUser(id.to_string()))?;
    for (candidate, score) in scores.iter_mut() {
        if let Some(other) = store.get(candidate) {
            *score += SHARED_INTEREST_WEIGHT * me.shared_interests(other) as f64;
        }
    }

    let mut ranked: Vec<Recommendation> = scores
        .into_iter()
        .map(|(user_id, score)| Recommendation {
            user_id: user_id.to_string(),
            score,
        })
        .collect();

    // Score descending, then id ascending: a total order.
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    Ok(ranked)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
