use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::adjacency::AdjacencyIndex;
use crate::error::GraphError;
use crate::store::UserStore;

// ─────────────────────────────────────────────
// Shortest path (BFS)
// ─────────────────────────────────────────────

/// Shortest (fewest-edges) path from `start` to `end`, inclusive of both.
///
/// BFS over the undirected adjacency index with parent tracking; in an
/// unweighted graph BFS dequeues nodes in nondecreasing distance order,
/// so the first time `end` is discovered the reconstructed path is
/// shortest. Nodes are marked visited on enqueue, never on dequeue, so
/// each node enters the queue at most once.
///
/// Returns `None` if `end` is unreachable. When several shortest paths
/// exist, which one is returned depends on neighbor iteration order —
/// only the length and validity of the result are contractual.
pub fn shortest_path(
    store: &UserStore,
    adjacency: &AdjacencyIndex,
    start: &str,
    end: &str,
) -> Result<Option<Vec<String>>, GraphError> {
    require_registered(store, start)?;
    require_registered(store, end)?;

    if start == end {
        return Ok(Some(vec![start.to_string()]));
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = adjacency.neighbors(current) else {
            continue;
        };
        for neighbor in neighbors {
            let neighbor = neighbor.as_str();
            if !visited.insert(neighbor) {
                continue;
            }
            parent.insert(neighbor, current);
            if neighbor == end {
                return Ok(Some(reconstruct(&parent, start, end)));
            }
            queue.push_back(neighbor);
        }
    }

    Ok(None) // frontier exhausted, end unreachable
}

/// Follow parent pointers back from `end` and reverse into start → end order.
fn reconstruct(parent: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<String> {
    let mut path = vec![end.to_string()];
    let mut cursor = end;
    while cursor != start {
        match parent.get(cursor) {
            Some(&p) => {
                path.push(p.to_string());
                cursor = p;
            }
            None => break, // only possible if called with an undiscovered end
        }
    }
    path.reverse();
    path
}

// ─────────────────────────────────────────────
// Mutual friends
// ─────────────────────────────────────────────

/// Users connected to both `a` and `b`.
///
/// Iterates the smaller neighbor set and probes the larger, so the cost
/// is `O(min(|N(a)|, |N(b)|))`.
pub fn mutual_friends(
    store: &UserStore,
    adjacency: &AdjacencyIndex,
    a: &str,
    b: &str,
) -> Result<BTreeSet<String>, GraphError> {
    require_registered(store, a)?;
    require_registered(store, b)?;

    let (na, nb) = match (adjacency.neighbors(a), adjacency.neighbors(b)) {
        (Some(na), Some(nb)) => (na, nb),
        _ => return Ok(BTreeSet::new()),
    };
    let (small, large) = if na.len() <= nb.len() { (na, nb) } else { (nb, na) };

    Ok(small
        .iter()
        .filter(|id| large.contains(*id))
        .cloned()
        .collect())
}

// ─────────────────────────────────────────────
// Second-degree candidates
// ─────────────────────────────────────────────

/// Friends-of-friends of `id` who are not already direct friends and not
/// `id` itself — the candidate pool for friend recommendations.
///
/// A user appears here iff they are reachable through at least one shared
/// friend, which is why zero-overlap users never enter the scoring pass.
pub fn second_degree_candidates(
    store: &UserStore,
    adjacency: &AdjacencyIndex,
    id: &str,
) -> Result<BTreeSet<String>, GraphError> {
    require_registered(store, id)?;

    let Some(friends) = adjacency.neighbors(id) else {
        return Ok(BTreeSet::new());
    };

    let mut candidates = BTreeSet::new();
    for friend in friends {
        let Some(fof) = adjacency.neighbors(friend) else {
            continue;
        };
        for candidate in fof {
            if candidate != id && !friends.contains(candidate) {
                candidates.insert(candidate.clone());
            }
        }
    }
    Ok(candidates)
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

fn require_registered(store: &UserStore, id: &str) -> Result<(), GraphError> {
    if store.contains(id) {
        Ok(())
    } else {
        Err(GraphError::UnknownUser(id.to_string()))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
