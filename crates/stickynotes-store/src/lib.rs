//! stickynotes-store: Storage layer for the sticky notes service
//!
//! This crate provides:
//! - The [`NoteStore`] query interface over the `notes` table
//! - A PostgreSQL implementation via sqlx, plus in-memory and
//!   "not configured" stand-ins
//! - Idempotent schema creation
//! - [`NoteService`], which validates input before executing it
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stickynotes_store::{NoteService, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//! let notes = NoteService::new(Arc::new(store));
//!
//! let newest_first = notes.list().await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod schema;
pub mod service;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{NewNote, NoteRow};
pub use service::NoteService;
pub use store::{NoteStore, Store, StoreConfig, UnavailableStore};

// Re-export stickynotes-core for downstream crates
pub use stickynotes_core;
