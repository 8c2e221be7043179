use thiserror::Error;

use crate::chunk::TAG_LEN;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("truncated chunk header: stream ended after {got} of 12 bytes")]
    TruncatedHeader { got: usize },
    #[error("metadata length {declared} exceeds maximum allowed size {limit}")]
    MetadataTooLarge { declared: u32, limit: u64 },
    #[error("invalid tag found: \"{}\" ({})", .0.escape_ascii(), hex::encode(.0))]
    InvalidTag([u8; TAG_LEN]),
    #[error("truncated metadata: stream ended after {got} of {want} bytes")]
    TruncatedMetadata { want: u32, got: usize },
    #[error("truncated content length: stream ended after {got} of 4 bytes")]
    TruncatedContentLength { got: usize },
    #[error("truncated content: stream ended after {got} of {want} bytes")]
    TruncatedContent { want: u32, got: u64 },
}

impl ChunkError {
    /// The stream ended somewhere other than a chunk boundary.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            ChunkError::TruncatedHeader { .. }
                | ChunkError::TruncatedMetadata { .. }
                | ChunkError::TruncatedContentLength { .. }
                | ChunkError::TruncatedContent { .. }
        )
    }
}
