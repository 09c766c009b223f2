//! Client-side shell session.
//!
//! [`ShellSession`] keeps what a browser keeps while the shell is open: the
//! loaded root data, a history stack, the global navigation state and the
//! per-contact pending favorites. Requests run as spawned tasks; their
//! results come back through a channel and are applied one at a time by
//! [`ShellSession::next_event`].
//!
//! In-flight work is keyed by [`Purpose`]. Starting a new navigation aborts
//! the previous one; a favorite submission only replaces an earlier
//! submission for the same contact. A result that arrives after its task was
//! superseded is dropped.

use std::collections::HashMap;
use std::future::Future;

use contacts_models::{
    search_history_action, ContactId, HistoryAction, Location, NavigationState, PendingFavorites,
    RootData, ShellView, SEARCH_PARAM,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::ContactsClient;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// A browser-like history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    /// A history holding a single entry.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// The current entry.
    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history has at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push or replace, dropping any forward entries on push.
    pub fn apply(&mut self, action: HistoryAction, location: Location) {
        match action {
            HistoryAction::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(location);
                self.index = self.entries.len() - 1;
            }
            HistoryAction::Replace => self.entries[self.index] = location,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Key of an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// The single global navigation (searches and link clicks).
    Navigation,
    /// A favorite submission for one contact.
    Favorite(ContactId),
}

/// What [`ShellSession::next_event`] applied.
#[derive(Debug)]
pub enum SessionEvent {
    /// A navigation completed and became the current location.
    Navigated {
        /// New current location.
        location: Location,
        /// How it entered the history.
        action: HistoryAction,
    },
    /// A navigation failed; the previous location and data are kept.
    NavigationFailed {
        /// Target that failed to load.
        location: Location,
        /// Why.
        error: SdkError,
    },
    /// A favorite submission finished and its override was cleared.
    FavoriteSettled {
        /// Contact the submission was for.
        id: ContactId,
        /// Outcome of the submission.
        result: Result<(), SdkError>,
    },
}

enum Outcome {
    Navigation {
        location: Location,
        action: HistoryAction,
        result: Result<RootData, SdkError>,
    },
    Favorite {
        id: ContactId,
        result: Result<(), SdkError>,
    },
}

struct Completed {
    purpose: Purpose,
    seq: u64,
    outcome: Outcome,
}

struct InFlight {
    seq: u64,
    handle: JoinHandle<()>,
}

// ---------------------------------------------------------------------------
// ShellSession
// ---------------------------------------------------------------------------

/// Client-side state of an open shell.
pub struct ShellSession {
    client: ContactsClient,
    data: RootData,
    history: History,
    navigation: NavigationState,
    favorites: PendingFavorites,
    inflight: HashMap<Purpose, InFlight>,
    next_seq: u64,
    tx: mpsc::UnboundedSender<Completed>,
    rx: mpsc::UnboundedReceiver<Completed>,
}

impl ShellSession {
    /// Load the root route and open a session on it.
    pub async fn open(client: ContactsClient) -> Result<Self, SdkError> {
        let data = client.load_root(None).await?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            client,
            data,
            history: History::new(Location::root()),
            navigation: NavigationState::Idle,
            favorites: PendingFavorites::default(),
            inflight: HashMap::new(),
            next_seq: 0,
            tx,
            rx,
        })
    }

    /// The shell as it should be rendered right now.
    pub fn view(&self) -> ShellView {
        ShellView::build(
            &self.data,
            self.history.current(),
            &self.navigation,
            &self.favorites,
        )
    }

    /// Last loaded root data.
    pub fn data(&self) -> &RootData {
        &self.data
    }

    /// History stack.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Global navigation state.
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Pending favorite submissions.
    pub fn favorites(&self) -> &PendingFavorites {
        &self.favorites
    }

    /// Whether anything is still running.
    pub fn is_busy(&self) -> bool {
        !self.inflight.is_empty()
    }

    // ------------------------------------------------------------------
    // Navigations
    // ------------------------------------------------------------------

    /// Submit the search form with `q`. Returns how the navigation will
    /// enter the history.
    pub fn search(&mut self, q: &str) -> HistoryAction {
        let action = search_history_action(self.data.q.as_deref());
        self.start_navigation(Location::search(q), action);
        action
    }

    /// Follow a link to `location`.
    pub fn navigate(&mut self, location: Location) {
        self.start_navigation(location, HistoryAction::Push);
    }

    fn start_navigation(&mut self, location: Location, action: HistoryAction) {
        debug!(%location, %action, "navigation started");
        self.navigation = NavigationState::Loading {
            location: location.clone(),
        };
        let client = self.client.clone();
        self.spawn(Purpose::Navigation, async move {
            let q = location.query_param(SEARCH_PARAM);
            let result = client.load_root(q.as_deref()).await;
            Outcome::Navigation {
                location,
                action,
                result,
            }
        });
    }

    /// Press "New": run the root action, then follow its redirect to the
    /// edit page. Supersedes any in-flight navigation.
    pub async fn create_contact(&mut self) -> Result<ContactId, SdkError> {
        self.abort(&Purpose::Navigation);
        self.navigation = NavigationState::Submitting {
            location: Location::root(),
        };

        let result = self.create_and_load().await;
        self.navigation = NavigationState::Idle;
        let (id, location, data) = result?;

        self.data = data;
        self.history.apply(HistoryAction::Push, location);
        Ok(id)
    }

    async fn create_and_load(&mut self) -> Result<(ContactId, Location, RootData), SdkError> {
        let id = self.client.create_contact().await?;
        let location = Location::path(&id.edit_path())?;
        self.navigation = NavigationState::Loading {
            location: location.clone(),
        };
        let data = self.client.load_root(None).await?;
        Ok((id, location, data))
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Submit a favorite toggle. The requested value shows immediately and
    /// stays until the submission settles.
    pub fn toggle_favorite(&mut self, id: ContactId, favorite: bool) {
        debug!(contact_id = %id, favorite, "favorite submitted");
        self.favorites.submit(id.clone(), favorite);
        let client = self.client.clone();
        self.spawn(Purpose::Favorite(id.clone()), async move {
            let result = client.set_favorite(&id, favorite).await;
            Outcome::Favorite { id, result }
        });
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Wait for the next request to finish and apply it. Returns `None` once
    /// nothing is in flight.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        loop {
            if self.inflight.is_empty() {
                return None;
            }
            let completed = self.rx.recv().await?;
            let current = self
                .inflight
                .get(&completed.purpose)
                .is_some_and(|f| f.seq == completed.seq);
            if !current {
                debug!(purpose = ?completed.purpose, seq = completed.seq, "dropping superseded result");
                continue;
            }
            self.inflight.remove(&completed.purpose);
            return Some(self.apply(completed.outcome).await);
        }
    }

    async fn apply(&mut self, outcome: Outcome) -> SessionEvent {
        match outcome {
            Outcome::Navigation {
                location,
                action,
                result: Ok(data),
            } => {
                self.data = data;
                self.history.apply(action, location.clone());
                self.navigation = NavigationState::Idle;
                SessionEvent::Navigated { location, action }
            }
            Outcome::Navigation {
                location,
                result: Err(error),
                ..
            } => {
                warn!(%location, %error, "navigation failed");
                self.navigation = NavigationState::Idle;
                SessionEvent::NavigationFailed { location, error }
            }
            Outcome::Favorite { id, result } => {
                self.favorites.settle(&id);
                if let Err(error) = &result {
                    warn!(contact_id = %id, %error, "favorite submission failed");
                }
                self.revalidate().await;
                SessionEvent::FavoriteSettled { id, result }
            }
        }
    }

    /// Reload root data for the current location after a mutation.
    async fn revalidate(&mut self) {
        let q = self.history.current().query_param(SEARCH_PARAM);
        match self.client.load_root(q.as_deref()).await {
            Ok(data) => self.data = data,
            Err(error) => warn!(%error, "revalidation failed, keeping stale data"),
        }
    }

    fn spawn<F>(&mut self, purpose: Purpose, task: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.next_seq += 1;
        let seq = self.next_seq;
        let tx = self.tx.clone();
        let key = purpose.clone();
        let handle = tokio::spawn(async move {
            let outcome = task.await;
            // The receiver only goes away with the session.
            let _ = tx.send(Completed {
                purpose: key,
                seq,
                outcome,
            });
        });
        if let Some(previous) = self.inflight.insert(purpose, InFlight { seq, handle }) {
            debug!(seq = previous.seq, "superseding in-flight request");
            previous.handle.abort();
        }
    }

    fn abort(&mut self, purpose: &Purpose) {
        if let Some(previous) = self.inflight.remove(purpose) {
            previous.handle.abort();
        }
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        for (_, task) in self.inflight.drain() {
            task.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        s.parse().unwrap()
    }

    #[test]
    fn push_appends_and_replace_overwrites() {
        let mut h = History::new(Location::root());
        h.apply(HistoryAction::Push, loc("/?q=a"));
        assert_eq!(h.len(), 2);
        h.apply(HistoryAction::Replace, loc("/?q=ab"));
        assert_eq!(h.len(), 2);
        assert_eq!(h.current(), &loc("/?q=ab"));
        assert_eq!(h.entries()[0], Location::root());
    }

    #[test]
    fn replace_on_fresh_history_keeps_one_entry() {
        let mut h = History::new(Location::root());
        h.apply(HistoryAction::Replace, loc("/contacts/x"));
        assert_eq!(h.len(), 1);
        assert!(!h.is_empty());
        assert_eq!(h.current().pathname(), "/contacts/x");
    }
}
