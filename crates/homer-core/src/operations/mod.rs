//! Operation inputs and positional document edits.
//!
//! Every externally triggered operation follows the same sequence, driven by
//! `homer-manager`:
//!
//! ```text
//! validate input ─► read document ─► apply one edit ─► write document
//! ```
//!
//! [`inputs`] owns the first step: each input type has a `validate()` that
//! must pass before the document is even loaded.  [`edits`] owns the third:
//! methods on [`ConfigDocument`](crate::ConfigDocument) that report whether
//! anything changed, so an out-of-range position is a no-op rather than an
//! error.

pub mod edits;
pub mod inputs;
