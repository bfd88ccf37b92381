use std::collections::HashMap;

use crate::error::GraphError;
use crate::model::{Post, User};

// ─────────────────────────────────────────────
// UserStore
// ─────────────────────────────────────────────

/// Arena of user and post records, keyed by user id.
///
/// Both the adjacency index and the scoring crate index into this store
/// by id — records are never linked by direct reference, so removal and
/// serialization never chase pointers.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
    /// author id → ordered post sequence (insertion order = display order).
    posts: HashMap<String, Vec<Post>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutations ──────────────────────────────────────

    /// Register a new user. A user is created exactly once; re-registering
    /// an id is an error, never a silent overwrite.
    pub fn register(&mut self, user: User) -> Result<(), GraphError> {
        if self.users.contains_key(&user.id) {
            return Err(GraphError::DuplicateIdentity(user.id));
        }
        self.posts.entry(user.id.clone()).or_default();
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Append a post to `author`'s sequence and return its index.
    pub fn add_post(&mut self, author: &str, post: Post) -> Result<usize, GraphError> {
        if !self.users.contains_key(author) {
            return Err(GraphError::UnknownUser(author.to_string()));
        }
        let seq = self.posts.entry(author.to_string()).or_default();
        seq.push(post);
        Ok(seq.len() - 1)
    }

    /// Record that `liker` liked `author`'s post at `index`. Idempotent.
    pub fn like_post(
        &mut self,
        liker: &str,
        author: &str,
        index: usize,
    ) -> Result<(), GraphError> {
        if !self.users.contains_key(liker) {
            return Err(GraphError::UnknownUser(liker.to_string()));
        }
        if !self.users.contains_key(author) {
            return Err(GraphError::UnknownUser(author.to_string()));
        }
        // Registration always seeds the post entry, but go through the
        // entry API so a missing sequence can never panic.
        let seq = self.posts.entry(author.to_string()).or_default();
        let len = seq.len();
        match seq.get_mut(index) {
            Some(post) => {
                post.like(liker);
                Ok(())
            }
            None => Err(GraphError::IndexOutOfRange {
                author: author.to_string(),
                index,
                len,
            }),
        }
    }

    // ── Queries ────────────────────────────────────────

    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Posts of `author` in display order (empty slice for a registered
    /// user with no posts).
    pub fn posts_of(&self, author: &str) -> &[Post] {
        self.posts.get(author).map(Vec::as_slice).unwrap_or(&[])
    }

    /// How many of `author`'s posts were liked by `liker`.
    pub fn likes_given(&self, liker: &str, author: &str) -> usize {
        self.posts_of(author)
            .iter()
            .filter(|p| p.likes.contains(liker))
            .count()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Total posts across all authors.
    pub fn post_count(&self) -> usize {
        self.posts.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &User)> {
        self.users.iter()
    }

    pub fn iter_posts(&self) -> impl Iterator<Item = (&String, &Vec<Post>)> {
        self.posts.iter()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
