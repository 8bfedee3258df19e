//! Data gateway - the four remote calls against the books table

#[cfg(test)]
pub mod memory;
mod rest;

pub use rest::RestGateway;

use crate::error::RemoteError;
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;

/// Direct proxy to the remote store. No retries, no batching.
#[async_trait]
pub trait BookGateway: Send + Sync {
    /// Every row, newest first.
    async fn list_all(&self) -> Result<Vec<Book>, RemoteError>;
    async fn insert(&self, draft: &BookDraft) -> Result<(), RemoteError>;
    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<(), RemoteError>;
    async fn delete(&self, id: &BookId) -> Result<(), RemoteError>;
}

/// Stand-in used when no credentials were configured. Every call fails
/// without touching the network.
pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> RemoteError {
        RemoteError::Transport(self.reason.clone())
    }
}

#[async_trait]
impl BookGateway for Unconfigured {
    async fn list_all(&self) -> Result<Vec<Book>, RemoteError> {
        Err(self.err())
    }

    async fn insert(&self, _draft: &BookDraft) -> Result<(), RemoteError> {
        Err(self.err())
    }

    async fn update(&self, _id: &BookId, _draft: &BookDraft) -> Result<(), RemoteError> {
        Err(self.err())
    }

    async fn delete(&self, _id: &BookId) -> Result<(), RemoteError> {
        Err(self.err())
    }
}
