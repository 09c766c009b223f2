//! Root loader data and the shell view model.
//!
//! [`ShellView::build`] projects loader data, the current location, the
//! navigation state and pending favorites onto everything the sidebar and
//! detail pane need. It is recomputed after every state change instead of
//! being patched in place.

use serde::{Deserialize, Serialize};

use crate::contact::{ContactId, ContactLabel, ContactRecord};
use crate::favorites::PendingFavorites;
use crate::navigation::{Location, NavigationState};

/// CSS class marking the search input and detail pane while loading.
pub const LOADING_CLASS: &str = "loading";

/// Data returned by the root loader.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RootData {
    /// Contacts matching `q`.
    pub contacts: Vec<ContactRecord>,
    /// The search query echoed back unchanged; `None` when absent.
    pub q: Option<String>,
}

/// Router state of a sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LinkState {
    /// The current location is the link target or below it.
    Active,
    /// The in-flight navigation targets the link.
    Pending,
    /// Neither.
    #[strum(serialize = "")]
    Inactive,
}

/// One entry of the sidebar contact list.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactLink {
    /// Contact the link points to.
    pub id: ContactId,
    /// Link target.
    pub href: String,
    /// Name or placeholder.
    pub label: ContactLabel,
    /// Effective favorite state, override included.
    pub favorite: bool,
    /// Active / pending marker.
    pub state: LinkState,
}

/// Everything the shell renders that depends on runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellView {
    /// Value of the search input.
    pub search_value: String,
    /// A navigation to a search is in flight.
    pub searching: bool,
    /// Any navigation is loading.
    pub detail_loading: bool,
    /// Sidebar entries in loader order.
    pub contacts: Vec<ContactLink>,
}

impl ShellView {
    /// Project the current state onto the view.
    pub fn build(
        data: &RootData,
        location: &Location,
        navigation: &NavigationState,
        favorites: &PendingFavorites,
    ) -> Self {
        let contacts = data
            .contacts
            .iter()
            .map(|contact| {
                let href = contact.id.detail_path();
                let state = if location.is_within(&href) {
                    LinkState::Active
                } else if navigation
                    .location()
                    .is_some_and(|target| target.is_within(&href))
                {
                    LinkState::Pending
                } else {
                    LinkState::Inactive
                };
                ContactLink {
                    id: contact.id.clone(),
                    href,
                    label: contact.label(),
                    favorite: favorites.effective(contact),
                    state,
                }
            })
            .collect();

        Self {
            search_value: data.q.clone().unwrap_or_default(),
            searching: navigation.is_searching(),
            detail_loading: navigation.is_loading(),
            contacts,
        }
    }

    /// Class of the search input.
    pub fn search_class(&self) -> &'static str {
        if self.searching { LOADING_CLASS } else { "" }
    }

    /// Class of the detail pane.
    pub fn detail_class(&self) -> &'static str {
        if self.detail_loading { LOADING_CLASS } else { "" }
    }

    /// The link for `id`, if listed.
    pub fn link(&self, id: &ContactId) -> Option<&ContactLink> {
        self.contacts.iter().find(|link| &link.id == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn contact(first: &str, favorite: bool) -> ContactRecord {
        ContactRecord {
            first: (!first.is_empty()).then(|| first.to_string()),
            favorite,
            ..ContactRecord::empty(Utc::now())
        }
    }

    fn idle_view(data: &RootData, favorites: &PendingFavorites) -> ShellView {
        ShellView::build(data, &Location::root(), &NavigationState::Idle, favorites)
    }

    #[test]
    fn idle_view_echoes_query_and_is_not_loading() {
        let data = RootData {
            contacts: vec![contact("Ada", false)],
            q: Some("ad".into()),
        };
        let view = idle_view(&data, &PendingFavorites::default());
        assert_eq!(view.search_value, "ad");
        assert_eq!(view.search_class(), "");
        assert_eq!(view.detail_class(), "");
        assert_eq!(view.contacts.len(), 1);
    }

    #[test]
    fn unnamed_contact_gets_placeholder() {
        let data = RootData {
            contacts: vec![contact("", false)],
            q: None,
        };
        let view = idle_view(&data, &PendingFavorites::default());
        assert_eq!(view.contacts[0].label.text(), "No Name");
        assert_eq!(view.search_value, "");
    }

    #[test]
    fn pending_false_hides_persisted_star() {
        let c = contact("Ada", true);
        let data = RootData {
            contacts: vec![c.clone()],
            q: None,
        };
        let mut favorites = PendingFavorites::default();
        assert!(idle_view(&data, &favorites).contacts[0].favorite);

        favorites.submit(c.id.clone(), false);
        assert!(!idle_view(&data, &favorites).contacts[0].favorite);

        favorites.settle(&c.id);
        assert!(idle_view(&data, &favorites).contacts[0].favorite);
    }

    #[test]
    fn search_navigation_marks_input_and_detail() {
        let data = RootData::default();
        let nav = NavigationState::Loading {
            location: Location::search("gr"),
        };
        let view = ShellView::build(&data, &Location::root(), &nav, &PendingFavorites::default());
        assert_eq!(view.search_class(), LOADING_CLASS);
        assert_eq!(view.detail_class(), LOADING_CLASS);
    }

    #[test]
    fn link_navigation_loads_detail_without_searching() {
        let c = contact("Ada", false);
        let data = RootData {
            contacts: vec![c.clone()],
            q: None,
        };
        let nav = NavigationState::Loading {
            location: Location::path(&c.id.detail_path()).unwrap(),
        };
        let view = ShellView::build(&data, &Location::root(), &nav, &PendingFavorites::default());
        assert!(!view.searching);
        assert!(view.detail_loading);
        assert_eq!(view.link(&c.id).unwrap().state, LinkState::Pending);
    }

    #[test]
    fn link_is_active_on_descendant_routes() {
        let c = contact("Ada", false);
        let data = RootData {
            contacts: vec![c.clone()],
            q: None,
        };
        let here = Location::path(&c.id.edit_path()).unwrap();
        let view = ShellView::build(&data, &here, &NavigationState::Idle, &PendingFavorites::default());
        assert_eq!(view.contacts[0].state, LinkState::Active);
        assert_eq!(view.contacts[0].state.to_string(), "active");
        assert_eq!(LinkState::Inactive.to_string(), "");
    }

    #[test]
    fn root_data_json_has_null_q() {
        let json = serde_json::to_value(RootData::default()).unwrap();
        assert!(json["q"].is_null());
        assert!(json["contacts"].as_array().unwrap().is_empty());
    }
}
