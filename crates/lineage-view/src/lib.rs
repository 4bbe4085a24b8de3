#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cancel;
pub mod page;
pub mod render;
pub mod route;
pub mod table;

pub use cancel::CancelToken;
pub use page::{PageState, PeoplePage};
pub use render::{Screen, TextOptions, render_html, render_text};
pub use route::{Location, Route, navigate};
pub use table::{Cell, PeopleTable, PersonLink, PersonRow};
