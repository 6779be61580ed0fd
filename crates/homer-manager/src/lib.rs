//! homer-manager library crate.
//!
//! This crate manages the YAML configuration file of a Homer dashboard and the
//! icon files it references.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser / script (JSON over HTTP)
//!         ↕
//! [homer-manager]
//!   ├── domain/           ManagerSettings (plain runtime settings)
//!   ├── application/      ConfigService (read → edit → write),
//!   │                     IconCatalog (TTL cache over an IconSource)
//!   └── infrastructure/
//!         ├── yaml_store/     config.yml on disk (serde_yaml + stable emitter)
//!         ├── github_source/  remote icon manifest and raw files (reqwest)
//!         ├── local_assets/   the local icon directory
//!         ├── settings_file/  optional TOML settings file
//!         └── http_server/    operation surface + asset endpoint (axum)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain`, `homer-core`, and the two traits it
//!   defines (`DocumentStore`, `IconSource`); concrete adapters are injected.
//!   The one exception is the local asset directory, which `IconCatalog`
//!   reaches through `infrastructure::local_assets`.
//! - `infrastructure` implements those traits and owns every socket and file.

/// Domain layer: runtime settings (no I/O).
pub mod domain;

/// Application layer: the configuration operations and the icon catalog.
pub mod application;

/// Infrastructure layer: file store, remote icon source, HTTP server.
pub mod infrastructure;
