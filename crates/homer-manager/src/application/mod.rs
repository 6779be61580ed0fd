//! Application layer for homer-manager.
//!
//! The application layer orchestrates the dashboard operations: it knows
//! *what* to do, but delegates *how* bytes reach disk or the network to the
//! infrastructure layer through the [`DocumentStore`] and [`IconSource`]
//! traits.
//!
//! # Responsibilities
//!
//! - Validating inputs before anything is read or written
//! - Read-modify-write of the configuration document under a lock
//! - Caching the remote icon listing
//! - Defining the error types every surface reports
//!
//! # What does NOT belong here?
//!
//! - YAML parsing and emitting (infrastructure)
//! - HTTP clients and servers (infrastructure)
//! - Pure document edits (`homer-core`)

pub mod config_service;
pub mod error;
pub mod icon_catalog;

pub use config_service::{ConfigService, DocumentStore};
pub use error::{CatalogError, ManagerError, StoreError};
pub use icon_catalog::{IconCatalog, IconSource};
