//! Users over HTTP, persisted to a single JSON file.
//!
//! The whole collection lives in memory inside a [`UserStore`]; every create
//! or delete rewrites `users.json` from scratch as `{"users": [...]}`.
//! [`router`] exposes list / get / create / delete on top of it.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use json_users::{router, UserStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(UserStore::open("users.json")?);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router(store)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! **Single-process only.** Two processes pointed at the same file will
//! clobber each other's writes.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod routes;
pub mod seed;
pub mod serializer;
pub mod store;

pub use config::{Config, ConfigError, LogFormat};
pub use error::{Error, Result};
pub use model::User;
pub use routes::{router, ApiError};
pub use seed::{Seed, SeedOutcome};
pub use store::{UserStore, UserStoreBuilder};
