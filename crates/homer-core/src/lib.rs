//! # homer-core
//!
//! Shared library for the Homer dashboard configuration manager containing the
//! configuration document model, the validated operation inputs, the
//! positional edit rules, and the icon-manifest grouping logic.
//!
//! This crate performs no I/O.  Reading and writing the YAML file, talking to
//! the remote icon repository, and serving HTTP all live in `homer-manager`.
//!
//! # Architecture overview
//!
//! The dashboard is driven by a single YAML document: a few display settings
//! plus an ordered list of service categories, each holding an ordered list of
//! linked items.  Everything the manager does is a small edit of that tree.
//!
//! - **`domain`** – The data model.  [`ConfigDocument`] and its children, the
//!   enumerated [`Columns`] width, and the [`IconInfo`] entries derived from
//!   the remote manifest.
//!
//! - **`operations`** – What a caller may ask for.  Input structs that reject
//!   malformed values before anything is touched, and the positional edits
//!   (append, remove, swap with neighbour, update in place) applied to a
//!   document.

pub mod domain;
pub mod operations;

// Re-export the most-used types at the crate root so callers can write
// `homer_core::ConfigDocument` instead of `homer_core::domain::document::ConfigDocument`.
pub use domain::document::{
    Colors, Columns, ConfigDocument, ServiceCategory, ServiceItem, Toggle,
};
pub use domain::icon::{group_icon_entries, is_safe_file_name, IconFormat, IconInfo, TreeEntry};
pub use domain::validation::ValidationError;
pub use operations::inputs::{
    CategoryInput, Direction, DownloadInput, GlobalSettingsInput, ItemUpdateInput, MoveInput,
    NewItemInput,
};
