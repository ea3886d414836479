//! Categories Domain
//!
//! Every event belongs to exactly one category. Admins manage the list;
//! anyone can browse it. Deleting a category that still has events is refused,
//! which is checked through the [`CategoryUsage`] port implemented by the
//! events domain.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_categories::{handlers, CategoryService, InMemoryCategoryRepository, usage::NoCategoryUsage};
//!
//! let service = CategoryService::new(InMemoryCategoryRepository::new(), Arc::new(NoCategoryUsage));
//! let admin = handlers::admin_router(service.clone());   // /admin/categories
//! let public = handlers::public_router(service);         // /categories
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod usage;

pub use error::{CategoryError, CategoryResult};
pub use models::{Category, NewCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
pub use usage::CategoryUsage;
