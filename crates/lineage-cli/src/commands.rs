//! The `show` command.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use lineage_client::{ClientConfig, FilePeopleSource, HttpPeopleSource, PeopleSource};
use lineage_core::EnrichedPerson;
use lineage_view::{
    Location, PageState, PeoplePage, Route, Screen, TextOptions, navigate, render_html,
    render_text,
};
use serde::Serialize;

use crate::error::Result;

/// Output format of `lineage show`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal text.
    #[default]
    Text,
    /// HTML fragment.
    Html,
    /// JSON document with the route and the enriched people.
    Json,
}

/// Where people come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    /// Remote endpoint.
    Http(ClientConfig),
    /// Local JSON file.
    File(PathBuf),
}

impl SourceSpec {
    /// Builds the source. HTTP settings are validated here.
    pub fn open(&self) -> Result<Arc<dyn PeopleSource>> {
        Ok(match self {
            Self::Http(config) => Arc::new(HttpPeopleSource::new(config.clone())?),
            Self::File(path) => Arc::new(FilePeopleSource::new(path.clone())),
        })
    }
}

/// How a `show` run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowStatus {
    /// Rendered a settled page.
    Done,
    /// The people fetch failed; the error screen was rendered.
    Failed,
    /// Interrupted before the fetch settled.
    Interrupted,
}

impl ShowStatus {
    /// Process exit code.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Done => 0,
            Self::Failed => 2,
            Self::Interrupted => 130,
        }
    }
}

/// Rendered output plus how the run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowOutcome {
    /// Text to print, newline-terminated.
    pub output: String,
    /// Run status.
    pub status: ShowStatus,
}

#[derive(Serialize)]
struct JsonScreen<'a> {
    path: &'a str,
    route: &'a Route,
    state: &'static str,
    people: &'a [EnrichedPerson],
}

/// Renders the page for `path`.
///
/// People routes activate a [`PeoplePage`] against `source` and wait for it
/// to settle. If `interrupt` completes first, the page is deactivated and
/// whatever it showed at that moment is rendered.
pub async fn show<I>(
    source: &SourceSpec,
    path: &str,
    format: OutputFormat,
    color: bool,
    interrupt: I,
) -> Result<ShowOutcome>
where
    I: Future<Output = ()>,
{
    let location = navigate(path);
    tracing::debug!(path = %location.path, route = ?location.route, "Navigated");

    let (state, interrupted) = match location.route {
        Route::People { .. } => load_people(source.open()?, interrupt).await,
        _ => (PageState::Idle, false),
    };

    let status = if interrupted {
        ShowStatus::Interrupted
    } else if state == PageState::Failed {
        ShowStatus::Failed
    } else {
        ShowStatus::Done
    };

    let output = render(&location, &state, format, color)?;
    Ok(ShowOutcome { output, status })
}

async fn load_people<I>(source: Arc<dyn PeopleSource>, interrupt: I) -> (PageState, bool)
where
    I: Future<Output = ()>,
{
    let mut page = PeoplePage::new();
    // The task is detached; its result only reaches us through the page.
    let _task = page.activate(source);

    let interrupted = tokio::select! {
        _ = page.settled() => false,
        () = interrupt => true,
    };
    if interrupted {
        tracing::warn!("Interrupted before people loaded");
        page.deactivate();
    }

    (page.state(), interrupted)
}

fn render(
    location: &Location,
    state: &PageState,
    format: OutputFormat,
    color: bool,
) -> Result<String> {
    let mut output = match format {
        OutputFormat::Text => render_text(&Screen::build(location, state), TextOptions { color }),
        OutputFormat::Html => render_html(&Screen::build(location, state)),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonScreen {
            path: &location.path,
            route: &location.route,
            state: state_name(state),
            people: state.people().unwrap_or_default(),
        })?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn state_name(state: &PageState) -> &'static str {
    match state {
        PageState::Idle => "idle",
        PageState::Loading => "loading",
        PageState::Failed => "failed",
        PageState::Empty => "empty",
        PageState::Loaded(_) => "loaded",
    }
}
