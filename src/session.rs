//! Validation and derived-field computation for new reading sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics;

/// Message used whenever a user touches a book they do not own.
pub(crate) const NOT_OWNER_MESSAGE: &str = "You do not have access to this book";

/// A session creation request as received from the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub book_id: String,
    pub start_page: i32,
    pub end_page: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The parts of a book that bound a session: its length and its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookBound {
    pub total_pages: i32,
    pub owner_id: String,
}

/// A validated session with its derived fields, ready to be persisted.
///
/// Derived fields are computed once here and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub book_id: String,
    pub start_page: i32,
    pub end_page: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub pages_read: i32,
}

/// A session after the repository assigned it an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub id: String,
    #[serde(flatten)]
    pub record: SessionRecord,
    pub created_at: DateTime<Utc>,
}

/// Response body acknowledging a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReceipt {
    pub id: String,
    pub pages_read: i32,
    pub duration_seconds: i64,
    pub speed: String,
}

impl From<&StoredSession> for SessionReceipt {
    fn from(stored: &StoredSession) -> Self {
        let record = &stored.record;
        Self {
            id: stored.id.clone(),
            pages_read: record.pages_read,
            duration_seconds: record.duration_seconds,
            speed: metrics::format_reading_speed(
                i64::from(record.pages_read),
                record.duration_seconds,
            ),
        }
    }
}

/// Validates `input` against its book and computes the derived fields.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. page and time ranges must be strictly increasing ([`Error::Validation`])
/// 2. the book must exist ([`Error::NotFound`])
/// 3. the book must belong to `requesting_user_id` ([`Error::Forbidden`])
/// 4. `end_page` must not exceed the book's page count ([`Error::Validation`])
///
/// Nothing is persisted here.
pub fn derive_session(
    input: &NewSession,
    book: Option<&BookBound>,
    requesting_user_id: &str,
) -> Result<SessionRecord> {
    if input.start_page < 0 {
        return Err(Error::Validation(format!(
            "Start page ({}) cannot be negative",
            input.start_page
        )));
    }
    if input.end_page <= input.start_page {
        return Err(Error::Validation(format!(
            "End page ({}) must be greater than start page ({})",
            input.end_page, input.start_page
        )));
    }
    if input.end_time <= input.start_time {
        return Err(Error::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    let book = book.ok_or(Error::NotFound("Book"))?;

    if book.owner_id != requesting_user_id {
        return Err(Error::Forbidden(NOT_OWNER_MESSAGE.to_string()));
    }

    if input.end_page > book.total_pages {
        return Err(Error::Validation(format!(
            "End page ({}) cannot exceed book's total pages ({})",
            input.end_page, book.total_pages
        )));
    }

    Ok(SessionRecord {
        book_id: input.book_id.clone(),
        start_page: input.start_page,
        end_page: input.end_page,
        start_time: input.start_time,
        end_time: input.end_time,
        duration_seconds: metrics::duration_seconds(input.start_time, input.end_time),
        pages_read: metrics::pages_read(input.start_page, input.end_page),
    })
}
