//! Snapshot persistence: the full engine state as one structured record.
//!
//! The engine only owns the load/save contract — JSON over generic
//! readers and writers. File handling, path layout, and any CLI framing
//! belong to the caller.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adjacency::AdjacencyIndex;
use crate::engine::SocialGraph;
use crate::error::GraphError;
use crate::model::{Post, User};
use crate::store::UserStore;

// ─────────────────────────────────────────────
// Wire records
// ─────────────────────────────────────────────

/// On-disk user record. The id is the map key, not a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub interests: Vec<String>,
    pub join_timestamp: i64,
}

/// On-disk post record; likes are a list on disk, a set in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub content: String,
    pub tags: Vec<String>,
    pub timestamp: i64,
    pub likes: Vec<String>,
}

/// The full serialized engine state.
///
/// `connections` may carry each edge in both directions (symmetric
/// redundancy) or in just one — a half-edge in a hand-edited snapshot is
/// repaired to a full symmetric edge on restore rather than rejected.
/// `BTreeMap` keys keep the serialized form deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: BTreeMap<String, UserRecord>,
    pub connections: BTreeMap<String, Vec<String>>,
    pub posts: BTreeMap<String, Vec<PostRecord>>,
}

impl Snapshot {
    // ── Capture ────────────────────────────────────────

    /// Capture the current engine state.
    pub fn capture(graph: &SocialGraph) -> Self {
        let users = graph
            .store()
            .iter()
            .map(|(id, user)| {
                (
                    id.clone(),
                    UserRecord {
                        name: user.name.clone(),
                        interests: user.interests.iter().cloned().collect(),
                        join_timestamp: user.joined_at,
                    },
                )
            })
            .collect();

        let connections = graph
            .adjacency()
            .iter()
            .map(|(id, neighbors)| {
                let mut list: Vec<String> = neighbors.iter().cloned().collect();
                list.sort();
                (id.clone(), list)
            })
            .collect();

        let posts = graph
            .store()
            .iter_posts()
            .map(|(author, seq)| {
                let records = seq
                    .iter()
                    .map(|p| PostRecord {
                        content: p.content.clone(),
                        tags: p.tags.iter().cloned().collect(),
                        timestamp: p.created_at,
                        likes: p.likes.iter().cloned().collect(),
                    })
                    .collect();
                (author.clone(), records)
            })
            .collect();

        Self { users, connections, posts }
    }

    // ── Wire format ────────────────────────────────────

    /// Serialize as pretty-printed JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), GraphError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserialize from JSON. A payload missing required fields is a
    /// [`GraphError::MalformedSnapshot`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    // ── Restore ────────────────────────────────────────

    /// Validate this snapshot and build the engine parts it describes.
    ///
    /// All referential checks happen here, before any engine state is
    /// touched — restore is all-or-nothing by construction.
    fn build(&self) -> Result<SocialGraph, GraphError> {
        let mut store = UserStore::new();
        let mut adjacency = AdjacencyIndex::new();

        for (id, rec) in &self.users {
            store.register(User {
                id: id.clone(),
                name: rec.name.clone(),
                interests: rec.interests.iter().cloned().collect(),
                joined_at: rec.join_timestamp,
            })?;
            adjacency.add_node(id.as_str());
        }

        for (id, neighbors) in &self.connections {
            if !store.contains(id) {
                return Err(GraphError::MalformedSnapshot(format!(
                    "connections reference unregistered user {id}"
                )));
            }
            for neighbor in neighbors {
                if !store.contains(neighbor) {
                    return Err(GraphError::MalformedSnapshot(format!(
                        "edge {id} ↔ {neighbor} references unregistered user {neighbor}"
                    )));
                }
                // A half-edge is treated as present: connect writes both
                // directions, which is exactly the repair the format
                // allows. Self-loop entries are skipped, matching the
                // connect no-op.
                adjacency.connect(id, neighbor);
            }
        }

        for (author, records) in &self.posts {
            if !store.contains(author) {
                return Err(GraphError::MalformedSnapshot(format!(
                    "posts reference unregistered author {author}"
                )));
            }
            for rec in records {
                let mut post = Post {
                    content: rec.content.clone(),
                    tags: rec.tags.iter().cloned().collect(),
                    created_at: rec.timestamp,
                    likes: Default::default(),
                };
                for liker in &rec.likes {
                    if !store.contains(liker) {
                        return Err(GraphError::MalformedSnapshot(format!(
                            "post by {author} liked by unregistered user {liker}"
                        )));
                    }
                    post.like(liker.clone());
                }
                store.add_post(author, post)?;
            }
        }

        Ok(SocialGraph::from_parts(store, adjacency))
    }
}

impl SocialGraph {
    /// Serialize the full engine state to `writer`.
    pub fn save_snapshot<W: Write>(&self, writer: W) -> Result<(), GraphError> {
        Snapshot::capture(self).to_writer(writer)
    }

    /// Replace all engine state with the snapshot read from `reader`.
    ///
    /// Load is all-or-nothing: if the payload is malformed or references
    /// unregistered users, the prior in-memory state is left untouched.
    pub fn load_snapshot<R: Read>(&mut self, reader: R) -> Result<(), GraphError> {
        let snapshot = Snapshot::from_reader(reader)?;
        self.restore(snapshot)
    }

    /// Replace all engine state with an already-decoded snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), GraphError> {
        let rebuilt = snapshot.build()?;
        let stats = rebuilt.stats();
        self.replace(rebuilt);
        info!(
            users = stats.user_count,
            edges = stats.edge_count,
            posts = stats.post_count,
            "restored snapshot"
        );
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> SocialGraph {
        let mut g = SocialGraph::new();
        g.register_user("ada", "Ada", ["math".to_string(), "code".to_string()])
            .unwrap();
        g.register_user("bob", "Bob", ["code".to_string()]).unwrap();
        g.register_user("cleo", "Cleo", std::iter::empty()).unwrap();
        g.connect("ada", "bob").unwrap();
        g.add_post("ada", "hello world", ["intro".to_string()]).unwrap();
        g.like_post("bob", "ada", 0).unwrap();
        g
    }

    #[test]
    fn round_trip_preserves_state() {
        let g = sample_graph();
        let mut buf = Vec::new();
        g.save_snapshot(&mut buf).unwrap();

        let mut restored = SocialGraph::new();
        restored.load_snapshot(buf.as_slice()).unwrap();

        assert_eq!(restored.stats(), g.stats());
        assert!(restored.neighbors("ada").unwrap().contains("bob"));
        let post = &restored.store().posts_of("ada")[0];
        assert_eq!(post.content, "hello world");
        assert!(post.likes.contains("bob"));
        assert_eq!(
            restored.store().get("ada").unwrap().joined_at,
            g.store().get("ada").unwrap().joined_at
        );
    }

    #[test]
    fn load_replaces_rather_than_merges() {
        let g = sample_graph();
        let mut buf = Vec::new();
        g.save_snapshot(&mut buf).unwrap();

        let mut other = SocialGraph::new();
        other.register_user("zed", "Zed", std::iter::empty()).unwrap();
        other.load_snapshot(buf.as_slice()).unwrap();

        assert!(!other.store().contains("zed"));
        assert!(other.store().contains("ada"));
    }

    #[test]
    fn asymmetric_edge_is_repaired_on_load() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        // Hand-edit: keep only one direction of ada ↔ bob.
        snapshot.connections.get_mut("bob").unwrap().clear();

        let mut g = SocialGraph::new();
        g.restore(snapshot).unwrap();
        assert!(g.neighbors("ada").unwrap().contains("bob"));
        assert!(g.neighbors("bob").unwrap().contains("ada"));
    }

    #[test]
    fn self_loop_entry_is_skipped_on_load() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        snapshot
            .connections
            .get_mut("cleo")
            .unwrap()
            .push("cleo".to_string());

        let mut g = SocialGraph::new();
        g.restore(snapshot).unwrap();
        assert!(g.neighbors("cleo").unwrap().is_empty());
    }

    #[test]
    fn unknown_edge_endpoint_is_malformed() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        snapshot
            .connections
            .get_mut("ada")
            .unwrap()
            .push("ghost".to_string());

        let mut g = SocialGraph::new();
        let err = g.restore(snapshot).unwrap_err();
        assert!(matches!(err, GraphError::MalformedSnapshot(_)));
    }

    #[test]
    fn unknown_post_author_is_malformed() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        snapshot.posts.insert(
            "ghost".to_string(),
            vec![PostRecord {
                content: "boo".to_string(),
                tags: vec![],
                timestamp: 0,
                likes: vec![],
            }],
        );

        let mut g = SocialGraph::new();
        assert!(matches!(
            g.restore(snapshot),
            Err(GraphError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn unknown_liker_is_malformed() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        snapshot
            .posts
            .get_mut("ada")
            .unwrap()[0]
            .likes
            .push("ghost".to_string());

        let mut g = SocialGraph::new();
        assert!(matches!(
            g.restore(snapshot),
            Err(GraphError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn failed_load_leaves_prior_state_untouched() {
        let mut snapshot = Snapshot::capture(&sample_graph());
        snapshot
            .connections
            .get_mut("ada")
            .unwrap()
            .push("ghost".to_string());

        let mut g = SocialGraph::new();
        g.register_user("keeper", "Keeper", std::iter::empty()).unwrap();
        assert!(g.restore(snapshot).is_err());

        // prior state intact
        assert!(g.store().contains("keeper"));
        assert_eq!(g.stats().user_count, 1);
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let g = sample_graph();
        let mut buf = Vec::new();
        g.save_snapshot(&mut buf).unwrap();
        buf.truncate(buf.len() / 2);

        let mut fresh = SocialGraph::new();
        let err = fresh.load_snapshot(buf.as_slice()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedSnapshot(_)));
        assert_eq!(fresh.stats().user_count, 0);
    }

    #[test]
    fn missing_top_level_field_is_malformed() {
        let payload = br#"{"users": {}, "connections": {}}"#;
        let err = Snapshot::from_reader(payload.as_slice()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedSnapshot(_)));
    }

    #[test]
    fn snapshot_file_round_trip() {
        let g = sample_graph();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let file = std::fs::File::create(&path).unwrap();
        g.save_snapshot(file).unwrap();

        let mut restored = SocialGraph::new();
        restored
            .load_snapshot(std::fs::File::open(&path).unwrap())
            .unwrap();
        assert_eq!(restored.stats(), g.stats());
    }
}
