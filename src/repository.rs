//! The persistence capabilities the reading core depends on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::SessionSample;
use crate::error::Result;
use crate::session::{BookBound, SessionRecord, StoredSession};

/// Order in which [`ReadingRepository::list_sessions`] walks sessions before
/// applying the scope's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Which sessions and books an analytics query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScope {
    pub owner_id: String,
    pub book_id: Option<String>,
    /// Inclusive lower bound on session start time.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on session start time.
    pub end_date: Option<DateTime<Utc>>,
    pub order: SessionOrder,
    /// `None` returns every matching session.
    pub limit: Option<u64>,
}

impl SessionScope {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            book_id: None,
            start_date: None,
            end_date: None,
            order: SessionOrder::default(),
            limit: None,
        }
    }

    /// Whether a session starting at `start_time` falls inside the date range.
    pub fn covers(&self, start_time: DateTime<Utc>) -> bool {
        self.start_date.map_or(true, |from| start_time >= from)
            && self.end_date.map_or(true, |to| start_time <= to)
    }
}

/// Storage backend for books and reading sessions.
///
/// [`crate::SeaOrmStore`] is the database implementation. The service
/// functions in [`crate::service`] take any implementation, which keeps the
/// derivation and analytics code free of I/O.
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Page bound and owner of a book, or `None` if it does not exist.
    async fn find_book_by_id(&self, book_id: &str) -> Result<Option<BookBound>>;

    /// Sessions matching `scope`, joined with their owner's timezone.
    async fn list_sessions(&self, scope: &SessionScope) -> Result<Vec<SessionSample>>;

    /// Number of books owned by `scope.owner_id`, narrowed to `scope.book_id`
    /// when set. The date range and limit are ignored.
    async fn count_books(&self, scope: &SessionScope) -> Result<u64>;

    /// Stores a derived session and returns it with its generated id.
    async fn persist(&self, record: SessionRecord) -> Result<StoredSession>;
}
