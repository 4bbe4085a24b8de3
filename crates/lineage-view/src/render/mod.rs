//! Screens and their renderers.
//!
//! A [`Screen`] is everything visible for one location: the navigation bar
//! and the page content. [`text`] and [`html`] turn it into output.

pub mod html;
pub mod text;

pub use html::render_html;
pub use text::{TextOptions, render_text};

use crate::page::PageState;
use crate::route::{Location, NavItem, Route, nav_items};
use crate::table::PeopleTable;

/// Heading of the home page.
pub const HOME_TITLE: &str = "Home Page";
/// Heading of the people page.
pub const PEOPLE_TITLE: &str = "People Page";
/// Heading of the not-found page.
pub const NOT_FOUND_TITLE: &str = "Page not found";
/// Shown while people are loading.
pub const LOADING_MESSAGE: &str = "Loading...";
/// Shown when loading failed, whatever the cause.
pub const ERROR_MESSAGE: &str = "Something went wrong";
/// Shown when the server has no people.
pub const EMPTY_MESSAGE: &str = "There are no people on the server";

/// Body of the people page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeopleBody {
    /// Fetch pending.
    Loading,
    /// Fetch failed.
    Error,
    /// Fetch returned nobody.
    Empty,
    /// Fetch returned people.
    Table(PeopleTable),
}

impl PeopleBody {
    /// Body for a page state and selected slug.
    pub fn from_state(state: &PageState, selected: Option<&str>) -> Self {
        match state {
            PageState::Idle | PageState::Loading => Self::Loading,
            PageState::Failed => Self::Error,
            PageState::Empty => Self::Empty,
            PageState::Loaded(people) if people.is_empty() => Self::Empty,
            PageState::Loaded(people) => Self::Table(PeopleTable::build(people, selected)),
        }
    }
}

/// Page content under the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// The home page.
    Home,
    /// The people page.
    People(PeopleBody),
    /// Unknown path.
    NotFound,
}

impl Content {
    /// Heading of this content.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => HOME_TITLE,
            Self::People(_) => PEOPLE_TITLE,
            Self::NotFound => NOT_FOUND_TITLE,
        }
    }
}

/// Everything visible for one location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Final path after redirects.
    pub path: String,
    /// Navigation bar entries.
    pub nav: Vec<NavItem>,
    /// Page content.
    pub content: Content,
}

impl Screen {
    /// Builds the screen for `location`. `people` is the people page state;
    /// it is only consulted on people routes.
    pub fn build(location: &Location, people: &PageState) -> Self {
        let content = match &location.route {
            Route::Home => Content::Home,
            Route::People { slug } => {
                Content::People(PeopleBody::from_state(people, slug.as_deref()))
            }
            Route::Redirect { .. } | Route::NotFound => Content::NotFound,
        };

        Self {
            path: location.path.clone(),
            nav: nav_items(&location.path),
            content,
        }
    }
}
