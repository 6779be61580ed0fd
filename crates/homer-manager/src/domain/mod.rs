//! Domain layer for homer-manager.
//!
//! Only plain configuration structures live here.  The dashboard document
//! model itself belongs to `homer-core`; reading settings from disk or the
//! environment is done by `infrastructure::settings_file` and `main.rs`.

pub mod settings;

pub use settings::{IconSourceSettings, ManagerSettings};
