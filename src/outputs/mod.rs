//! Output persistence.
//!
//! # Submodules
//!
//! - [`json`]: the corpus file, loaded at start-up and rewritten on every
//!   checkpoint and at the end of a run

pub mod json;
