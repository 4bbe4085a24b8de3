#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Lineage Core
//!
//! Person records, payload decoding, and parent resolution. This crate has
//! no internal Lineage dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: [`PersonRecord`], [`EnrichedPerson`], [`ParentLink`]
//! - [`resolver`]: [`resolve`] and [`resolve_with_stats`]

pub mod error;
pub mod resolver;
pub mod types;

mod proptests;

// Re-exports for convenience
pub use error::{Error, Result};
pub use resolver::{ResolveStats, resolve, resolve_with_stats};
pub use types::{EnrichedPerson, ParentLink, PersonRecord, Sex, decode_people};
