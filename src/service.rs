//! Operations that combine a [`ReadingRepository`] with the pure core.
//!
//! Each function performs its repository fetches, then hands the results to
//! the synchronous derivation or analytics code. Nothing is retried or cached.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::analytics::{self, HourlySpeed, Summary, Velocity};
use crate::error::Result;
use crate::repository::{ReadingRepository, SessionOrder, SessionScope};
use crate::session::{self, NewSession, StoredSession};

/// Session fetch cap applied when a query does not set one.
pub const DEFAULT_ANALYTICS_LIMIT: u64 = 100;

/// Filters shared by the analytics operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub book_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_analytics_limit")]
    pub limit: u64,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self {
            book_id: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_ANALYTICS_LIMIT,
        }
    }
}

fn default_analytics_limit() -> u64 {
    DEFAULT_ANALYTICS_LIMIT
}

impl AnalyticsQuery {
    fn scope(&self, owner_id: &str, order: SessionOrder, limit: Option<u64>) -> SessionScope {
        SessionScope {
            owner_id: owner_id.to_string(),
            book_id: self.book_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            order,
            limit,
        }
    }
}

/// Validates a new session against its book and stores it.
pub async fn record_session<R>(repo: &R, input: NewSession, user_id: &str) -> Result<StoredSession>
where
    R: ReadingRepository + ?Sized,
{
    let book = repo.find_book_by_id(&input.book_id).await?;

    let record = session::derive_session(&input, book.as_ref(), user_id).inspect_err(|e| {
        warn!(book_id = %input.book_id, user_id, error = %e, "rejected reading session");
    })?;

    let stored = repo.persist(record).await?;
    info!(
        session_id = %stored.id,
        book_id = %stored.record.book_id,
        pages_read = stored.record.pages_read,
        duration_seconds = stored.record.duration_seconds,
        "recorded reading session"
    );
    Ok(stored)
}

/// Reading speed per local hour over the most recent `query.limit` sessions.
pub async fn speed_by_time_of_day<R>(
    repo: &R,
    user_id: &str,
    query: &AnalyticsQuery,
) -> Result<HourlySpeed>
where
    R: ReadingRepository + ?Sized,
{
    let scope = query.scope(user_id, SessionOrder::NewestFirst, Some(query.limit));
    let sessions = repo.list_sessions(&scope).await?;
    debug!(user_id, sessions = sessions.len(), "computing hourly speed");
    analytics::hourly_speed(&sessions)
}

/// Velocity trend over the earliest `query.limit` sessions in the scope.
pub async fn reading_velocity<R>(
    repo: &R,
    user_id: &str,
    query: &AnalyticsQuery,
) -> Result<Velocity>
where
    R: ReadingRepository + ?Sized,
{
    let scope = query.scope(user_id, SessionOrder::OldestFirst, Some(query.limit));
    let sessions = repo.list_sessions(&scope).await?;
    debug!(user_id, sessions = sessions.len(), "computing reading velocity");
    Ok(analytics::velocity(&sessions))
}

/// Totals over every session in the scope. `query.limit` does not apply.
pub async fn reading_summary<R>(
    repo: &R,
    user_id: &str,
    query: &AnalyticsQuery,
) -> Result<Summary>
where
    R: ReadingRepository + ?Sized,
{
    let scope = query.scope(user_id, SessionOrder::OldestFirst, None);
    let sessions = repo.list_sessions(&scope).await?;
    let books = repo.count_books(&scope).await?;
    debug!(user_id, sessions = sessions.len(), books, "computing reading summary");
    Ok(analytics::summary(&sessions, books))
}
