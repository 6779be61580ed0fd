//! Infrastructure layer for homer-manager.
//!
//! The infrastructure layer handles all I/O: the YAML file on disk, the
//! remote icon repository, the local asset directory, and the HTTP server.
//!
//! # Responsibilities
//!
//! - Reading and writing `config.yml` ([`yaml_store`], [`yaml_emit`])
//! - Querying the icon repository over HTTP ([`github_source`])
//! - Listing, saving, and serving local icon files ([`local_assets`])
//! - Loading the optional settings file ([`settings_file`])
//! - Routing HTTP requests to the application layer ([`http_server`])
//!
//! # What does NOT belong here?
//!
//! - Validation and read-modify-write sequencing (application layer)
//! - Document edits (`homer-core`)
//! - CLI parsing (that is done in `main.rs`)

pub mod github_source;
pub mod http_server;
pub mod local_assets;
pub mod settings_file;
pub mod yaml_emit;
pub mod yaml_store;

pub use github_source::GithubIconSource;
pub use http_server::{build_router, run_server, AppState};
pub use settings_file::load_settings;
pub use yaml_store::YamlFileStore;
