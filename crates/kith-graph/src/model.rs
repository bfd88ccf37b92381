use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// User
// ─────────────────────────────────────────────

/// A registered member of the social graph.
///
/// The string `id` is the unique, immutable key; every other subsystem
/// (adjacency index, post store, scoring) refers to a user by id, never
/// by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, chosen at registration.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Interest tags. Set semantics: order irrelevant, no duplicates.
    pub interests: BTreeSet<String>,

    /// Unix timestamp (seconds) of registration.
    pub joined_at: i64,
}

impl User {
    /// Construct a user joining now.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        interests: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interests: interests.into_iter().collect(),
            joined_at: now_unix(),
        }
    }

    /// Number of interest tags shared with `other`.
    pub fn shared_interests(&self, other: &User) -> usize {
        self.interests.intersection(&other.interests).count()
    }
}

// ─────────────────────────────────────────────
// Post
// ─────────────────────────────────────────────

/// A post owned by its author.
///
/// Posts live in an ordered per-author sequence; the position in that
/// sequence is the post's index, which callers use to reference it later
/// (e.g. to like it). Newest posts are appended last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post body.
    pub content: String,

    /// Topic tags. Set semantics.
    pub tags: BTreeSet<String>,

    /// Unix timestamp (seconds) of creation.
    pub created_at: i64,

    /// Ids of users who liked this post. Insertion is idempotent.
    pub likes: BTreeSet<String>,
}

impl Post {
    /// Construct a post created now, with no likes yet.
    pub fn new(
        content: impl Into<String>,
        tags: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            content: content.into(),
            tags: tags.into_iter().collect(),
            created_at: now_unix(),
            likes: BTreeSet::new(),
        }
    }

    /// Record a like from `liker`. Returns `false` if already present.
    pub fn like(&mut self, liker: impl Into<String>) -> bool {
        self.likes.insert(liker.into())
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

pub(crate) fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
