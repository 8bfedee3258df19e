//! Common types and data structures

use crate::error::FormError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned row id. Tables keyed by an identity column send a number,
/// tables keyed by `uuid` send a string; both only ever go back into a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Int(i64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Int(id) => write!(f, "{}", id),
            BookId::Text(id) => f.write_str(id),
        }
    }
}

/// Row of the remote `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub pages: i32,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Accepts both `timestamptz` (with offset) and bare `timestamp` columns.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Validated field values, ready to be written to the remote table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    pub name: String,
    pub pages: i32,
}

/// Raw text of the two form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub name: String,
    pub pages: String,
}

impl BookForm {
    pub fn from_book(book: &Book) -> Self {
        Self {
            name: book.name.clone(),
            pages: book.pages.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.pages.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.pages.clear();
    }

    /// Required-field check, then pages must be an integer >= 1.
    pub fn validate(&self) -> Result<BookDraft, FormError> {
        let name = self.name.trim();
        let pages = self.pages.trim();
        if name.is_empty() || pages.is_empty() {
            return Err(FormError::MissingField);
        }
        let pages: i32 = pages.parse().map_err(|_| FormError::InvalidPages)?;
        if pages < 1 {
            return Err(FormError::InvalidPages);
        }
        Ok(BookDraft {
            name: name.to_string(),
            pages,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Blocking notification shown until the user dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
