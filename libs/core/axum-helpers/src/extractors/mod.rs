//! Extractors that turn malformed input into an [`AppError`](crate::AppError)
//! so every rejection shares the same JSON body.

pub mod client_ip;
pub mod valid_path;
pub mod validated_json;
pub mod validated_query;

pub use client_ip::ClientIp;
pub use valid_path::ValidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
