//! # lineage-cli
//!
//! Command-line front end for Lineage.
//!
//! - [`commands::show`] renders a path (home, people, not found) as text,
//!   HTML or JSON, loading people through a [`lineage_view::PeoplePage`].
//! - [`config_handlers`] implements `config path|get|set|init`.
//! - [`config::LineageConfig`] is the TOML config file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use error::{Error, Result};
