//! Database entity models for the reading tracker.
//!
//! These are the Sea-ORM entity definitions used by [`crate::SeaOrmStore`].
//! Together they describe the schema created by the migrator:
//!
//! ```text
//! users 1 ──< books 1 ──< reading_sessions
//! ```
//!
//! Deleting a user removes their books, and deleting a book removes its
//! sessions.

/// Book entity model, including the [`book::BookStatus`] lifecycle enum.
pub mod book;

/// Reading session entity model with its derived metric columns.
pub mod reading_session;

/// User entity model carrying the timezone used for hour-of-day bucketing.
pub mod user;
