//! Book and user inputs accepted by the store, with their validation rules.

use serde::Deserialize;

use crate::entity::book::BookStatus;
use crate::error::{Error, Result};
use crate::timezone;

const MAX_TEXT_LEN: usize = 200;

/// Page size used when a book listing does not ask for one.
pub const DEFAULT_BOOK_LIMIT: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub total_pages: i32,
    #[serde(default)]
    pub status: BookStatus,
}

impl NewBook {
    pub fn validate(&self) -> Result<()> {
        validate_text("Title", &self.title)?;
        validate_text("Author", &self.author)?;
        validate_total_pages(self.total_pages)
    }
}

/// Partial update of a book. At least one field must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub total_pages: Option<i32>,
    pub status: Option<BookStatus>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.total_pages.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation(
                "At least one field must be provided for update".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            validate_text("Title", title)?;
        }
        if let Some(author) = &self.author {
            validate_text("Author", author)?;
        }
        if let Some(total_pages) = self.total_pages {
            validate_total_pages(total_pages)?;
        }
        Ok(())
    }
}

/// Filter and paging for a user's book list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookListQuery {
    pub status: Option<BookStatus>,
    #[serde(default = "default_book_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_BOOK_LIMIT,
            offset: 0,
        }
    }
}

fn default_book_limit() -> u64 {
    DEFAULT_BOOK_LIMIT
}

/// Registration input for a reader. Credentials are handled elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub timezone: Option<String>,
}

impl NewUser {
    /// Returns the timezone to store, falling back to `default` when unset.
    pub fn resolved_timezone<'a>(&'a self, default: &'a str) -> Result<&'a str> {
        let id = timezone::resolve_timezone_id(self.timezone.as_deref(), default);
        timezone::parse_timezone(id)
            .map_err(|_| Error::Validation(format!("Unknown timezone '{id}'")))?;
        Ok(id)
    }

    pub fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation("A valid email is required".to_string()));
        }
        Ok(())
    }
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(Error::Validation(format!("{field} is required")));
    }
    if len > MAX_TEXT_LEN {
        return Err(Error::Validation(format!(
            "{field} must be less than {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_total_pages(total_pages: i32) -> Result<()> {
    if total_pages < 1 {
        return Err(Error::Validation(
            "Total pages must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
