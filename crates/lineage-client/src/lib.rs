#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::HttpPeopleSource;
pub use source::{FilePeopleSource, PeopleSource};
