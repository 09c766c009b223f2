//! Contact store: an in-memory list optionally mirrored to a JSON file.
//!
//! The list is guarded by a [`RwLock`]. Mutations keep the write lock held
//! while the file is rewritten, so the file never lags behind memory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use contacts_models::{ContactId, ContactRecord, ContactUpdate};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Errors raised by [`ContactStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No contact with this id exists.
    #[error("contact not found: {0}")]
    NotFound(ContactId),

    /// Reading or writing the data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file could not be (de)serialised.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The contact persistence wrapper.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: RwLock<Vec<ContactRecord>>,
    data_file: Option<PathBuf>,
}

impl ContactStore {
    /// A store that keeps contacts in memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store, loading `data_file` when it exists.
    pub async fn open(data_file: Option<PathBuf>) -> Result<Self, StoreError> {
        let contacts = match &data_file {
            Some(path) => load(path).await?,
            None => Vec::new(),
        };
        Ok(Self {
            contacts: RwLock::new(contacts),
            data_file,
        })
    }

    /// Insert the sample contacts if the store is empty. Returns how many
    /// were added.
    pub async fn seed_if_empty(&self) -> Result<usize, StoreError> {
        let mut contacts = self.contacts.write().await;
        if !contacts.is_empty() {
            return Ok(0);
        }
        contacts.extend(sample_contacts());
        self.persist(&contacts).await?;
        info!(count = contacts.len(), "store seeded with sample contacts");
        Ok(contacts.len())
    }

    /// Contacts whose first or last name contains `query`, sorted by last
    /// name then creation time. An absent or empty query returns everything.
    pub async fn get_contacts(&self, query: Option<&str>) -> Result<Vec<ContactRecord>, StoreError> {
        let contacts = self.contacts.read().await;
        let mut matching: Vec<ContactRecord> = match query.filter(|q| !q.is_empty()) {
            Some(q) => contacts.iter().filter(|c| c.matches(q)).cloned().collect(),
            None => contacts.clone(),
        };
        matching.sort_by(|a, b| {
            (a.last.is_none(), &a.last, a.created_at).cmp(&(b.last.is_none(), &b.last, b.created_at))
        });
        Ok(matching)
    }

    /// Create and persist a blank contact.
    pub async fn create_empty_contact(&self) -> Result<ContactRecord, StoreError> {
        let contact = ContactRecord::empty(Utc::now());
        let mut contacts = self.contacts.write().await;
        contacts.push(contact.clone());
        self.persist(&contacts).await?;
        debug!(contact_id = %contact.id, "empty contact created");
        Ok(contact)
    }

    /// Look up a single contact.
    pub async fn get_contact(&self, id: &ContactId) -> Result<ContactRecord, StoreError> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Apply `update` to the contact and persist it.
    pub async fn update_contact(
        &self,
        id: &ContactId,
        update: &ContactUpdate,
    ) -> Result<ContactRecord, StoreError> {
        let mut contacts = self.contacts.write().await;
        let contact = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        update.apply_to(contact);
        let updated = contact.clone();
        self.persist(&contacts).await?;
        Ok(updated)
    }

    /// Remove the contact.
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), StoreError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.persist(&contacts).await
    }

    /// Number of stored contacts.
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    /// Whether the store holds no contacts.
    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }

    async fn persist(&self, contacts: &[ContactRecord]) -> Result<(), StoreError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, serde_json::to_vec_pretty(contacts)?).await?;
        debug!(path = %path.display(), count = contacts.len(), "contacts written");
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Vec<ContactRecord>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let contacts: Vec<ContactRecord> = serde_json::from_slice(&bytes)?;
            info!(path = %path.display(), count = contacts.len(), "contacts loaded");
            Ok(contacts)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn sample_contacts() -> Vec<ContactRecord> {
    let now = Utc::now();
    [
        ("Shruti", "Kapoor", "@shrutikapoor08", true),
        ("Glenn", "Reyes", "@glnnrys", false),
        ("Ryan", "Florence", "@ryanflorence", false),
        ("Oscar", "Newman", "@__oscarnewman", false),
        ("Michael", "Jackson", "@mjackson", true),
        ("Kent", "Dodds", "@kentcdodds", false),
    ]
    .into_iter()
    .map(|(first, last, twitter, favorite)| ContactRecord {
        first: Some(first.to_string()),
        last: Some(last.to_string()),
        twitter: Some(twitter.to_string()),
        avatar: Some(format!(
            "https://placehold.co/200x200?text={}{}",
            &first[..1],
            &last[..1]
        )),
        favorite,
        ..ContactRecord::empty(now)
    })
    .collect()
}
