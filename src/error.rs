//! Error type shared by the metric core, the services and the SeaORM store.

use sea_orm::DbErr;

/// Errors raised by reading-session derivation, analytics and persistence.
///
/// Every error is terminal for the operation that produced it. The boundary
/// layer is expected to map it to a user-visible status, see
/// [`Error::status_code`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced resource does not exist. Carries the resource name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The resource exists but belongs to another user.
    #[error("{0}")]
    Forbidden(String),

    /// Input violates a page, time or bound constraint.
    #[error("{0}")]
    Validation(String),

    /// A timezone identifier or an environment setting could not be used.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The underlying database rejected an operation.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl Error {
    /// HTTP-style status code for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Forbidden(_) => 403,
            Error::Validation(_) => 400,
            Error::Configuration(_) | Error::Database(_) => 500,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource() {
        assert_eq!(Error::NotFound("Book").to_string(), "Book not found");
    }

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(Error::NotFound("Book").status_code(), 404);
        assert_eq!(Error::Forbidden("no".into()).status_code(), 403);
        assert_eq!(Error::Validation("bad".into()).status_code(), 400);
        assert_eq!(Error::Configuration("tz".into()).status_code(), 500);
        assert_eq!(
            Error::Database(DbErr::Custom("down".into())).status_code(),
            500
        );
    }
}
