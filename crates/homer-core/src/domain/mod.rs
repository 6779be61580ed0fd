//! Domain entities for the dashboard configuration manager.
//!
//! This module contains pure data types with no infrastructure dependencies.
//!
//! - [`document`] describes the persisted configuration tree.  Categories and
//!   items have no stable identity: they are addressed by position only, so an
//!   insert or removal shifts every later sibling.
//! - [`icon`] describes entries of the remote icon manifest and how they are
//!   grouped by logical name.

/// The persisted configuration document.
pub mod document;

/// Icon manifest entries and grouping.
pub mod icon;

/// Input validation failures.
pub mod validation;
