//! In-process store for driving the catalog without a network

use super::BookGateway;
use crate::error::RemoteError;
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryGateway {
    rows: Mutex<Vec<Book>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote calls made so far, successful or not
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every following call fails with `message` until cleared
    pub fn fail_with(&self, message: Option<&str>) {
        *self.fail_with.lock().unwrap() = message.map(str::to_string);
    }

    fn enter(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(RemoteError::Rejected {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookGateway for MemoryGateway {
    async fn list_all(&self) -> Result<Vec<Book>, RemoteError> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, draft: &BookDraft) -> Result<(), RemoteError> {
        self.enter()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        self.rows.lock().unwrap().push(Book {
            id: BookId::Int(*next_id),
            name: draft.name.clone(),
            pages: draft.pages,
            created_at: Some(epoch + Duration::seconds(*next_id)),
        });
        Ok(())
    }

    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<(), RemoteError> {
        self.enter()?;
        // Like a PostgREST filter, an id that matches nothing is not an error.
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|b| b.id == *id) {
            row.name = draft.name.clone();
            row.pages = draft.pages;
        }
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), RemoteError> {
        self.enter()?;
        self.rows.lock().unwrap().retain(|b| b.id != *id);
        Ok(())
    }
}
