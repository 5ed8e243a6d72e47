//! UUID parsing for path segments and body fields.

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a textual id, reporting `message` as a validation error.
///
/// Path ids arrive as plain strings so a malformed one still gets the
/// JSON error envelope instead of axum's plain-text rejection.
pub fn parse_id(raw: &str, message: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::debug!("id {:?} rejected: {}", raw, e);
        AppError::validation(message)
    })
}
