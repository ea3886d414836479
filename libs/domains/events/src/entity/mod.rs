//! Sea-ORM entities of the events domain. States are stored as their
//! SCREAMING_SNAKE_CASE names.

pub mod comment;
pub mod compilation;
pub mod compilation_event;
pub mod event;
pub mod request;

use std::str::FromStr;

use crate::error::{EventError, EventResult};

/// Parse a stored enum column; garbage in the table is a server fault.
pub(crate) fn parse_stored<T: FromStr>(column: &str, raw: &str) -> EventResult<T> {
    raw.parse::<T>()
        .map_err(|_| EventError::Internal(format!("Unexpected {} value in storage: {}", column, raw)))
}
