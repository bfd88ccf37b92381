//! Pairwise connection-strength scoring.

use kith_graph::{mutual_friends, AdjacencyIndex, GraphError, UserStore};

/// Weight of a direct friendship.
pub const DIRECT_WEIGHT: f64 = 1.0;
/// Weight per mutual friend.
pub const MUTUAL_FRIEND_WEIGHT: f64 = 0.2;
/// Weight per shared interest tag.
pub const SHARED_INTEREST_WEIGHT: f64 = 0.1;
/// Weight per like exchanged between the two users' posts.
pub const LIKE_WEIGHT: f64 = 0.05;

/// Composite affinity score between `a` and `b`.
///
/// ```text
/// strength = 1.0·direct + 0.2·|mutual| + 0.1·|shared interests|
///          + 0.05·(likes of b's posts by a + likes of a's posts by b)
/// ```
///
/// A pure function of current state — used for ranking and filtering
/// connections, never for mutating the graph.
pub fn connection_strength(
    store: &UserStore,
    adjacency: &AdjacencyIndex,
    a: &str,
    b: &str,
) -> Result<f64, GraphError> {
    let user_a = store
        .get(a)
        .ok_or_else(|| GraphError::UnknownUser(a.to_string()))?;
    let user_b = store
        .get(b)
        .ok_or_else(|| GraphError::UnknownUser(b.to_string()))?;

    let mut score = 0.0;

    if adjacency.connected(a, b) {
        score += DIRECT_WEIGHT;
    }

    score += MUTUAL_FRIEND_WEIGHT * mutual_friends(store, adjacency, a, b)?.len() as f64;
    score += SHARED_INTEREST_WEIGHT * user_a.shared_interests(user_b) as f64;

    let exchanged = store.likes_given(a, b) + store.likes_given(b, a);
    score += LIKE_WEIGHT * exchanged as f64;

    Ok(score)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kith_graph::SocialGraph;

    fn strength(g: &SocialGraph, a: &str, b: &str) -> f64 {
        connection_strength(g.store(), g.adjacency(), a, b).unwrap()
    }

    fn pair() -> SocialGraph {
        let mut g = SocialGraph::new();
        g.register_user("a", "A", std::iter::empty()).unwrap();
        g.register_user("b", "B", std::iter::empty()).unwrap();
        g
    }

    #[test]
    fn strangers_score_zero() {
        let g = pair();
        assert_eq!(strength(&g, "a", "b"), 0.0);
    }

    #[test]
    fn direct_connection_scores_one() {
        let mut g = pair();
        g.connect("a", "b").unwrap();
        assert!((strength(&g, "a", "b") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_like_scores_five_hundredths() {
        // No connection, no interests — one like on one of b's posts.
        let mut g = pair();
        g.add_post("b", "thoughts", std::iter::empty()).unwrap();
        g.like_post("a", "b", 0).unwrap();
        assert!((strength(&g, "a", "b") - 0.05).abs() < 1e-12);
    }

    #[test]
    fn likes_count_in_both_directions() {
        let mut g = pair();
        g.add_post("a", "one", std::iter::empty()).unwrap();
        g.add_post("b", "two", std::iter::empty()).unwrap();
        g.like_post("b", "a", 0).unwrap();
        g.like_post("a", "b", 0).unwrap();
        assert!((strength(&g, "a", "b") - 0.10).abs() < 1e-12);
    }

    #[test]
    fn mutual_friends_add_fifth_each() {
        let mut g = pair();
        g.register_user("m1", "M1", std::iter::empty()).unwrap();
        g.register_user("m2", "M2", std::iter::empty()).unwrap();
        for m in ["m1", "m2"] {
            g.connect("a", m).unwrap();
            g.connect("b", m).unwrap();
        }
        assert!((strength(&g, "a", "b") - 0.4).abs() < 1e-12);
    }

    #[test]
    fn shared_interests_add_tenth_each() {
        let mut g = SocialGraph::new();
        g.register_user("a", "A", ["rust".to_string(), "jazz".to_string()])
            .unwrap();
        g.register_user("b", "B", ["jazz".to_string(), "rust".to_string()])
            .unwrap();
        assert!((strength(&g, "a", "b") - 0.2).abs() < 1e-12);
    }

    #[test]
    fn composite_sums_all_factors() {
        let mut g = SocialGraph::new();
        g.register_user("a", "A", ["rust".to_string()]).unwrap();
        g.register_user("b", "B", ["rust".to_string()]).unwrap();
        g.register_user("m", "M", std::iter::empty()).unwrap();
        g.connect("a", "b").unwrap();
        g.connect("a", "m").unwrap();
        g.connect("b", "m").unwrap();
        g.add_post("b", "post", std::iter::empty()).unwrap();
        g.like_post("a", "b", 0).unwrap();

        // 1.0 direct + 0.2 mutual + 0.1 interest + 0.05 like
        assert!((strength(&g, "a", "b") - 1.35).abs() < 1e-12);
    }

    #[test]
    fn strength_is_symmetric() {
        let mut g = SocialGraph::new();
        g.register_user("a", "A", ["rust".to_string()]).unwrap();
        g.register_user("b", "B", ["rust".to_string()]).unwrap();
        g.register_user("m", "M", std::iter::empty()).unwrap();
        g.connect("a", "m").unwrap();
        g.connect("b", "m").unwrap();
        g.add_post("a", "post", std::iter::empty()).unwrap();
        g.like_post("b", "a", 0).unwrap();

        assert_eq!(strength(&g, "a", "b"), strength(&g, "b", "a"));
    }

    #[test]
    fn idempotent_likes_do_not_inflate_score() {
        let mut g = pair();
        g.add_post("b", "post", std::iter::empty()).unwrap();
        g.like_post("a", "b", 0).unwrap();
        g.like_post("a", "b", 0).unwrap();
        assert!((strength(&g, "a", "b") - 0.05).abs() < 1e-12);
    }

    #[test]
    fn unknown_user_errors() {
        let g = pair();
        let err = connection_strength(g.store(), g.adjacency(), "a", "ghost").unwrap_err();
        assert!(matches!(err, GraphError::UnknownUser(id) if id == "ghost"));
    }
}
