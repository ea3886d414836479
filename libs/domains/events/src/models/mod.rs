//! Domain records and the camelCase DTOs exposed over HTTP.

mod comment;
mod compilation;
mod event;
mod request;

pub use comment::*;
pub use compilation::*;
pub use event::*;
pub use request::*;

use validator::ValidationError;

/// Rejects strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
