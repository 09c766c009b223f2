//! Contact records and their identifiers.
//!
//! A [`ContactRecord`] is created by the store and read by the shell. The
//! only client-side overlay on a record is the pending favorite value held
//! in [`PendingFavorites`](crate::PendingFavorites).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

/// Label shown for a contact that has neither a first nor a last name.
pub const NO_NAME_PLACEHOLDER: &str = "No Name";

// ---------------------------------------------------------------------------
// ContactId
// ---------------------------------------------------------------------------

/// Unique identifier of a contact.
///
/// Ids are embedded in route paths (`/contacts/{id}`), so a valid id is a
/// single non-empty path segment.
///
/// # Examples
///
/// ```
/// use contacts_models::ContactId;
///
/// let id: ContactId = "ada".parse().unwrap();
/// assert_eq!(id.to_string(), "ada");
/// assert!("a/b".parse::<ContactId>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(String);

impl ContactId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Validate and wrap an id.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let invalid = |reason: &str| ModelError::InvalidContactId {
            value: value.to_string(),
            reason: reason.to_string(),
        };
        if value.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if let Some(c) = value.chars().find(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
            return Err(invalid(&format!("must not contain {c:?}")));
        }
        Ok(Self(value.to_string()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Route of the contact detail page.
    pub fn detail_path(&self) -> String {
        format!("/contacts/{}", self.0)
    }

    /// Route of the contact edit page.
    pub fn edit_path(&self) -> String {
        format!("/contacts/{}/edit", self.0)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContactId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContactId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContactId> for String {
    fn from(id: ContactId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// ContactRecord
// ---------------------------------------------------------------------------

/// A single persisted contact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Identity of the record.
    pub id: ContactId,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Twitter handle, including the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Persisted favorite flag.
    #[serde(default)]
    pub favorite: bool,
    /// Creation time, used as the secondary sort key.
    pub created_at: DateTime<Utc>,
}

impl ContactRecord {
    /// A blank record with a fresh id.
    pub fn empty(created_at: DateTime<Utc>) -> Self {
        Self {
            id: ContactId::generate(),
            first: None,
            last: None,
            avatar: None,
            twitter: None,
            notes: None,
            favorite: false,
            created_at,
        }
    }

    /// "First Last" when either name is set, `None` otherwise.
    pub fn full_name(&self) -> Option<String> {
        let first = self.first.as_deref().unwrap_or_default();
        let last = self.last.as_deref().unwrap_or_default();
        if first.is_empty() && last.is_empty() {
            return None;
        }
        Some(format!("{first} {last}").trim().to_string())
    }

    /// The label shown in the sidebar.
    pub fn label(&self) -> ContactLabel {
        self.full_name()
            .map_or(ContactLabel::Unnamed, ContactLabel::Named)
    }

    /// Whether `query` matches the first or last name, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.first, &self.last]
            .into_iter()
            .flatten()
            .any(|name| name.to_lowercase().contains(&needle))
    }
}

/// Sidebar label of a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLabel {
    /// At least one name is set.
    Named(String),
    /// Both names are empty; rendered as the italic placeholder.
    Unnamed,
}

impl ContactLabel {
    /// Text to display; never empty.
    pub fn text(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unnamed => NO_NAME_PLACEHOLDER,
        }
    }
}

// ---------------------------------------------------------------------------
// ContactUpdate
// ---------------------------------------------------------------------------

/// Fields submitted by the edit form or the favorite toggle.
///
/// A `None` field is left untouched; an empty string clears the field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContactUpdate {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// New avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// New Twitter handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// New favorite flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ContactUpdate {
    /// An update that only sets the favorite flag.
    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }

    /// Apply the update to `record` in place.
    pub fn apply_to(&self, record: &mut ContactRecord) {
        fn set(field: &mut Option<String>, value: Option<&String>) {
            if let Some(value) = value {
                let value = value.trim();
                *field = (!value.is_empty()).then(|| value.to_string());
            }
        }

        set(&mut record.first, self.first.as_ref());
        set(&mut record.last, self.last.as_ref());
        set(&mut record.avatar, self.avatar.as_ref());
        set(&mut record.twitter, self.twitter.as_ref());
        set(&mut record.notes, self.notes.as_ref());
        if let Some(favorite) = self.favorite {
            record.favorite = favorite;
        }
    }
}

/// Interpret a submitted `favorite` form value: only `"true"` is true.
pub fn parse_favorite(value: Option<&str>) -> bool {
    value == Some("true")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: Option<&str>, last: Option<&str>) -> ContactRecord {
        ContactRecord {
            first: first.map(String::from),
            last: last.map(String::from),
            ..ContactRecord::empty(Utc::now())
        }
    }

    #[test]
    fn contact_id_rejects_path_separators() {
        assert!(ContactId::parse("").is_err());
        assert!(ContactId::parse("a/b").is_err());
        assert!(ContactId::parse("a?b").is_err());
        assert!(ContactId::parse("a b").is_err());
        assert_eq!(ContactId::parse("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let a = ContactId::generate();
        let b = ContactId::generate();
        assert_ne!(a, b);
        assert!(ContactId::parse(a.as_str()).is_ok());
    }

    #[test]
    fn contact_paths() {
        let id = ContactId::parse("xyz").unwrap();
        assert_eq!(id.detail_path(), "/contacts/xyz");
        assert_eq!(id.edit_path(), "/contacts/xyz/edit");
    }

    #[test]
    fn label_uses_placeholder_when_both_names_empty() {
        assert_eq!(record(None, None).label(), ContactLabel::Unnamed);
        assert_eq!(record(Some(""), Some("")).label(), ContactLabel::Unnamed);
        assert_eq!(record(None, None).label().text(), "No Name");
    }

    #[test]
    fn label_joins_names() {
        assert_eq!(record(Some("Ada"), Some("Lovelace")).label().text(), "Ada Lovelace");
        assert_eq!(record(Some("Ada"), None).label().text(), "Ada");
        assert_eq!(record(None, Some("Lovelace")).label().text(), "Lovelace");
    }

    #[test]
    fn matches_is_case_insensitive_on_either_name() {
        let c = record(Some("Grace"), Some("Hopper"));
        assert!(c.matches("gra"));
        assert!(c.matches("HOP"));
        assert!(!c.matches("ada"));
        assert!(!record(None, None).matches("a"));
    }

    #[test]
    fn update_sets_and_clears_fields() {
        let mut c = record(Some("Grace"), Some("Hopper"));
        let update = ContactUpdate {
            first: Some("  Amazing Grace ".into()),
            last: Some(String::new()),
            favorite: Some(true),
            ..ContactUpdate::default()
        };
        update.apply_to(&mut c);
        assert_eq!(c.first.as_deref(), Some("Amazing Grace"));
        assert_eq!(c.last, None);
        assert!(c.favorite);
    }

    #[test]
    fn favorite_update_leaves_names_alone() {
        let mut c = record(Some("Grace"), Some("Hopper"));
        ContactUpdate::favorite(true).apply_to(&mut c);
        assert!(c.favorite);
        assert_eq!(c.full_name().as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn parse_favorite_only_accepts_true() {
        assert!(parse_favorite(Some("true")));
        assert!(!parse_favorite(Some("false")));
        assert!(!parse_favorite(Some("TRUE")));
        assert!(!parse_favorite(None));
    }

    #[test]
    fn record_json_uses_camel_case_and_omits_empty_fields() {
        let c = record(Some("Ada"), None);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("last").is_none());
        assert_eq!(json["favorite"], false);
    }

    #[test]
    fn record_json_rejects_invalid_id() {
        let raw = r#"{"id":"a/b","createdAt":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<ContactRecord>(raw).is_err());
    }
}
