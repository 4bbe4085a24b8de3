//! Path routing and the navigation bar.
//!
//! | Path              | Route                          |
//! |-------------------|--------------------------------|
//! | `/`               | [`Route::Home`]                |
//! | `/home`           | redirect to `/`                |
//! | `/people`         | [`Route::People`] (no slug)    |
//! | `/people/{slug}`  | [`Route::People`] (with slug)  |
//! | anything else     | [`Route::NotFound`]            |

use serde::Serialize;

/// Path of the home page.
pub const HOME_PATH: &str = "/";

/// Path of the people page.
pub const PEOPLE_PATH: &str = "/people";

const MAX_REDIRECTS: usize = 4;

/// A parsed path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// The home page.
    Home,
    /// The people page. `slug` marks a row as selected; it never filters.
    People {
        /// Slug from `/people/{slug}`.
        slug: Option<String>,
    },
    /// A path that forwards to another one.
    Redirect {
        /// Target path.
        to: &'static str,
    },
    /// Unrecognized path.
    NotFound,
}

impl Route {
    /// Parses a path. Query strings and fragments are ignored, as is a
    /// single trailing slash.
    pub fn parse(path: &str) -> Self {
        let path = normalize(path);
        let mut segments = path.split('/').skip(1);

        match (segments.next(), segments.next(), segments.next()) {
            (Some(""), None, None) => Self::Home,
            (Some("home"), None, None) => Self::Redirect { to: HOME_PATH },
            (Some("people"), None, None) => Self::People { slug: None },
            (Some("people"), Some(slug), None) if !slug.is_empty() => Self::People {
                slug: Some(slug.to_string()),
            },
            _ => Self::NotFound,
        }
    }

    /// Selected slug for people routes.
    pub fn selected_slug(&self) -> Option<&str> {
        match self {
            Self::People { slug } => slug.as_deref(),
            _ => None,
        }
    }
}

/// Where navigation ended up after following redirects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Final path.
    pub path: String,
    /// Route for `path`. Never [`Route::Redirect`].
    pub route: Route,
}

/// Resolves a path into a [`Location`], following redirects.
pub fn navigate(path: &str) -> Location {
    let mut current = normalize(path);

    for _ in 0..MAX_REDIRECTS {
        match Route::parse(&current) {
            Route::Redirect { to } => {
                tracing::debug!(from = %current, to, "Redirect");
                current = to.to_string();
            }
            route => {
                return Location {
                    path: current,
                    route,
                };
            }
        }
    }

    tracing::warn!(path, "Too many redirects");
    Location {
        path: current,
        route: Route::NotFound,
    }
}

/// Path for a person's row.
pub fn person_path(slug: &str) -> String {
    format!("{PEOPLE_PATH}/{slug}")
}

fn normalize(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

// ============================================================================
// Navigation bar
// ============================================================================

/// One entry of the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Visible label.
    pub label: &'static str,
    /// Target path.
    pub href: &'static str,
    /// Whether the current path belongs to this entry.
    pub active: bool,
}

/// Builds the navigation bar for the current path.
///
/// "Home" is active only on `/` exactly. "People" is active on `/people`
/// and everything below it.
pub fn nav_items(current_path: &str) -> Vec<NavItem> {
    let current = normalize(current_path);
    let in_people = current == PEOPLE_PATH || current.starts_with("/people/");

    vec![
        NavItem {
            label: "Home",
            href: HOME_PATH,
            active: current == HOME_PATH,
        },
        NavItem {
            label: "People",
            href: PEOPLE_PATH,
            active: in_people,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/people"), Route::People { slug: None });
        assert_eq!(
            Route::parse("/people/carolus-haverbeke-1832"),
            Route::People {
                slug: Some("carolus-haverbeke-1832".to_string())
            }
        );
        assert_eq!(Route::parse("/home"), Route::Redirect { to: "/" });
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/peoples"), Route::NotFound);
        assert_eq!(Route::parse("/people/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/about"), Route::NotFound);
        assert_eq!(Route::parse("/home/x"), Route::NotFound);
    }

    #[test]
    fn test_parse_tolerates_trailing_slash_and_query() {
        assert_eq!(Route::parse("/people/"), Route::People { slug: None });
        assert_eq!(
            Route::parse("/people/eve/?tab=1"),
            Route::People {
                slug: Some("eve".to_string())
            }
        );
        assert_eq!(Route::parse("/#top"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("people"), Route::People { slug: None });
    }

    #[test]
    fn test_navigate_follows_home_redirect() {
        let location = navigate("/home");
        assert_eq!(location.path, "/");
        assert_eq!(location.route, Route::Home);
    }

    #[test]
    fn test_navigate_keeps_regular_paths() {
        let location = navigate("/people/eve/");
        assert_eq!(location.path, "/people/eve");
        assert_eq!(location.route.selected_slug(), Some("eve"));
    }

    #[test]
    fn test_person_path() {
        assert_eq!(person_path("eve"), "/people/eve");
        assert_eq!(
            Route::parse(&person_path("eve")).selected_slug(),
            Some("eve")
        );
    }

    #[test]
    fn test_nav_items_home_active_only_on_root() {
        let items = nav_items("/");
        assert!(items[0].active);
        assert!(!items[1].active);

        let items = nav_items("/about");
        assert!(!items[0].active);
        assert!(!items[1].active);
    }

    #[test]
    fn test_nav_items_people_active_below_people() {
        for path in ["/people", "/people/", "/people/eve"] {
            let items = nav_items(path);
            assert!(!items[0].active, "{path}");
            assert!(items[1].active, "{path}");
        }
        assert!(!nav_items("/peoples")[1].active);
    }
}
