use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("user id already registered: {0}")]
    DuplicateIdentity(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("post index {index} out of range for {author} ({len} posts)")]
    IndexOutOfRange {
        author: String,
        index: usize,
        len: usize,
    },

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedSnapshot(e.to_string())
    }
}
