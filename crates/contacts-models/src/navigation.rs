//! Locations, navigation state and history semantics.
//!
//! These types describe where the shell is and where it is going. They are
//! shared by the server (which always renders an idle navigation) and the
//! client session (which moves through the states as requests run).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::ModelError;

/// Name of the search query parameter.
pub const SEARCH_PARAM: &str = "q";

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A path plus query string, as seen by the router.
///
/// `search` is either empty or starts with `?`, mirroring `URL.search`.
///
/// # Examples
///
/// ```
/// use contacts_models::Location;
///
/// let loc: Location = "/?q=ada".parse().unwrap();
/// assert_eq!(loc.pathname(), "/");
/// assert_eq!(loc.query_param("q").as_deref(), Some("ada"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pathname: String,
    search: String,
}

impl Location {
    /// The root route with no query.
    pub fn root() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
        }
    }

    /// A location with no query string.
    pub fn path(pathname: &str) -> Result<Self, ModelError> {
        Self::from_parts(pathname, "")
    }

    /// Build a location from a path and an already encoded query (with or
    /// without the leading `?`).
    pub fn from_parts(pathname: &str, query: &str) -> Result<Self, ModelError> {
        if !pathname.starts_with('/') {
            return Err(ModelError::InvalidLocation {
                value: pathname.to_string(),
                reason: "must start with '/'".to_string(),
            });
        }
        let query = query.trim_start_matches('?');
        Ok(Self {
            pathname: pathname.to_string(),
            search: if query.is_empty() {
                String::new()
            } else {
                format!("?{query}")
            },
        })
    }

    /// The root route searching for `q`, e.g. `/?q=ada`.
    pub fn search(q: &str) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_PARAM, q)
            .finish();
        Self {
            pathname: "/".to_string(),
            search: format!("?{query}"),
        }
    }

    /// Path component.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Query string including the leading `?`, or empty.
    pub fn search_string(&self) -> &str {
        &self.search
    }

    /// First value of the query parameter `name`, decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        form_urlencoded::parse(self.search.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Whether the query string carries `name`, even with an empty value.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_param(name).is_some()
    }

    /// Whether this location is `path` or one of its descendants.
    pub fn is_within(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        self.pathname == path
            || self
                .pathname
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

impl FromStr for Location {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let without_fragment = s.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::from_parts(path, query),
            None => Self::from_parts(without_fragment, ""),
        }
    }
}

// ---------------------------------------------------------------------------
// NavigationState
// ---------------------------------------------------------------------------

/// The router's global navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NavigationState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Loading data for `location`.
    Loading {
        /// Target of the navigation.
        location: Location,
    },
    /// A form submission to `location` is running its action.
    Submitting {
        /// Target of the submission.
        location: Location,
    },
}

impl NavigationState {
    /// Target location of the in-flight navigation, if any.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Idle => None,
            Self::Loading { location } | Self::Submitting { location } => Some(location),
        }
    }

    /// Whether the navigation is loading a new location.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Whether the in-flight navigation targets a search (its query carries `q`).
    pub fn is_searching(&self) -> bool {
        self.location()
            .is_some_and(|location| location.has_query_param(SEARCH_PARAM))
    }
}

// ---------------------------------------------------------------------------
// HistoryAction
// ---------------------------------------------------------------------------

/// How a navigation affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryAction {
    /// Append a new entry.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// History action for a search-form submission.
///
/// The first search (no `q` loaded yet) pushes so the unfiltered list stays
/// reachable with "back"; every later edit replaces the search entry.
pub fn search_history_action(current_q: Option<&str>) -> HistoryAction {
    if current_q.is_none() {
        HistoryAction::Push
    } else {
        HistoryAction::Replace
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
