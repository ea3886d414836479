//! HTTP surface of the events domain.
//!
//! | Router | Mounted at |
//! |---|---|
//! | [`private_router`] | `/users` |
//! | [`admin_events_router`] | `/admin/events` |
//! | [`admin_compilations_router`] | `/admin/compilations` |
//! | [`admin_comments_router`] | `/admin/comments` |
//! | [`public_events_router`] | `/events` |
//! | [`public_compilations_router`] | `/compilations` |

mod admin;
mod private;
mod public;

pub use admin::{AdminApiDoc, admin_comments_router, admin_compilations_router, admin_events_router};
pub use private::{PrivateApiDoc, private_router};
pub use public::{PublicApiDoc, public_compilations_router, public_events_router};

pub const PRIVATE_TAG: &str = "Private: events";
pub const ADMIN_EVENTS_TAG: &str = "Admin: events";
pub const ADMIN_COMPILATIONS_TAG: &str = "Admin: compilations";
pub const ADMIN_COMMENTS_TAG: &str = "Admin: comments";
pub const PUBLIC_TAG: &str = "Public: events";
