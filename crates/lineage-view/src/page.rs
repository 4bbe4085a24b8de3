//! People page state.
//!
//! Each call to [`PeoplePage::activate`] starts one fetch, guarded by its own
//! [`CancelToken`]. Deactivating (or activating again) cancels that token.
//! From then on the old fetch can no longer touch the page: the fetch races
//! the token, and every state write re-checks it under the state lock.

use std::fmt;
use std::sync::Arc;

use lineage_client::PeopleSource;
use lineage_core::{EnrichedPerson, resolve_with_stats};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cancel::CancelToken;

// ============================================================================
// PageState
// ============================================================================

/// What the people page currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PageState {
    /// Never activated.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch failed. The cause is logged, not shown.
    Failed,
    /// The fetch succeeded with no people.
    Empty,
    /// The fetch succeeded; parents are resolved.
    Loaded(Vec<EnrichedPerson>),
}

impl PageState {
    /// Returns `true` while a fetch is pending (or about to start).
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading)
    }

    /// The loaded people, if any.
    pub fn people(&self) -> Option<&[EnrichedPerson]> {
        match self {
            Self::Loaded(people) => Some(people),
            _ => None,
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Failed => write!(f, "failed"),
            Self::Empty => write!(f, "empty"),
            Self::Loaded(people) => write!(f, "loaded ({} people)", people.len()),
        }
    }
}

// ============================================================================
// PeoplePage
// ============================================================================

/// The people page: its state and the live activation.
///
/// Row selection comes from the route and is applied at render time, so
/// changing the selected slug never refetches. Dropping the page
/// deactivates it.
pub struct PeoplePage {
    state: Arc<watch::Sender<PageState>>,
    live: Option<CancelToken>,
}

impl PeoplePage {
    /// Creates an idle page.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PageState::Idle);
        Self {
            state: Arc::new(tx),
            live: None,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    /// Returns `true` if an activation is live.
    pub fn is_active(&self) -> bool {
        self.live.as_ref().is_some_and(|token| !token.is_cancelled())
    }

    /// Starts loading people from `source`.
    ///
    /// Cancels any previous activation first, then moves to
    /// [`PageState::Loading`] and spawns the fetch on the current tokio
    /// runtime. The returned handle completes when the fetch task ends,
    /// whether or not it was allowed to update the page.
    pub fn activate(&mut self, source: Arc<dyn PeopleSource>) -> JoinHandle<()> {
        self.deactivate();

        let token = CancelToken::new();
        self.live = Some(token.clone());
        self.state.send_replace(PageState::Loading);
        tracing::debug!(source = %source.describe(), "People page activated");

        tokio::spawn(load(source, Arc::clone(&self.state), token))
    }

    /// Cancels the live activation, if any. The state is left as it is.
    pub fn deactivate(&mut self) {
        if let Some(token) = self.live.take() {
            // Cancel under the state lock so no in-progress write can land
            // after this returns.
            self.state.send_if_modified(|_| {
                token.cancel();
                false
            });
        }
    }

    /// Waits until the live activation settles (or is cancelled) and
    /// returns the resulting state.
    pub async fn settled(&self) -> PageState {
        if let Some(token) = &self.live {
            let mut rx = self.state.subscribe();
            tokio::select! {
                _ = rx.wait_for(|state| !state.is_pending()) => {}
                () = token.cancelled() => {}
            }
        }
        self.state()
    }
}

impl Default for PeoplePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PeoplePage {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl fmt::Debug for PeoplePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeoplePage")
            .field("state", &self.state.borrow().to_string())
            .field("active", &self.is_active())
            .finish()
    }
}

/// One activation's fetch.
async fn load(
    source: Arc<dyn PeopleSource>,
    state: Arc<watch::Sender<PageState>>,
    token: CancelToken,
) {
    let fetched = tokio::select! {
        biased;
        () = token.cancelled() => {
            tracing::debug!(source = %source.describe(), "Fetch abandoned after cancellation");
            return;
        }
        fetched = source.fetch_people() => fetched,
    };

    let next = match fetched {
        Ok(records) if records.is_empty() => PageState::Empty,
        Ok(records) => {
            let (people, stats) = resolve_with_stats(&records);
            tracing::info!(
                people = stats.people,
                resolved = stats.resolved_links,
                unresolved = stats.unresolved_names.len(),
                duplicates = stats.duplicate_names.len(),
                "People loaded"
            );
            PageState::Loaded(people)
        }
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "Failed to load people");
            PageState::Failed
        }
    };

    commit(&state, &token, next);
}

/// Writes `next` unless `token` is cancelled. The check runs under the
/// state lock.
fn commit(state: &watch::Sender<PageState>, token: &CancelToken, next: PageState) -> bool {
    let written = state.send_if_modified(|current| {
        if token.is_cancelled() {
            return false;
        }
        *current = next;
        true
    });
    if !written {
        tracing::debug!("Discarded result of a cancelled activation");
    }
    written
}
