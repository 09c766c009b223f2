//! HTTP client for the contacts server.
//!
//! [`ContactsClient`] speaks the same routes a browser would: loaders are
//! fetched with `Accept: application/json`, actions are posted as forms, and
//! redirects are inspected rather than followed so the caller learns where
//! an action sent it.
//!
//! ```rust,no_run
//! use contacts_sdk::ContactsClient;
//!
//! # async fn run() -> Result<(), contacts_sdk::SdkError> {
//! let client = ContactsClient::new("http://localhost:3000")?;
//! let id = client.create_contact().await?;
//! let data = client.load_root(Some("ada")).await?;
//! println!("created {id}, {} matches", data.contacts.len());
//! # Ok(())
//! # }
//! ```

use contacts_models::{ContactId, ContactRecord, ContactUpdate, Location, RootData};
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SdkError;

const JSON: &str = "application/json";

/// A client bound to one contacts server.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ContactsClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SdkError::Config(format!("invalid base URL: {e}")))?;
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Base URL the client was created with.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Root loader / action
    // ------------------------------------------------------------------

    /// Run the root loader: contacts matching `q` and `q` echoed back.
    pub async fn load_root(&self, q: Option<&str>) -> Result<RootData, SdkError> {
        let location = q.map_or_else(Location::root, Location::search);
        self.get_json(&location).await
    }

    /// Run the root action and return the id of the created contact.
    pub async fn create_contact(&self) -> Result<ContactId, SdkError> {
        let res = self.http.post(self.url(&Location::root())?).send().await?;
        let location = redirect_target(res).await?;

        let id = location
            .pathname()
            .strip_prefix("/contacts/")
            .and_then(|rest| rest.strip_suffix("/edit"))
            .ok_or_else(|| SdkError::Redirect(location.to_string()))?;
        let id = ContactId::parse(id)?;
        debug!(contact_id = %id, "contact created");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Contact routes
    // ------------------------------------------------------------------

    /// Fetch a single contact.
    pub async fn get_contact(&self, id: &ContactId) -> Result<ContactRecord, SdkError> {
        self.get_json(&Location::path(&id.detail_path())?).await
    }

    /// Submit the edit form.
    pub async fn update_contact(
        &self,
        id: &ContactId,
        update: &ContactUpdate,
    ) -> Result<(), SdkError> {
        let req = self
            .http
            .post(self.url(&Location::path(&id.edit_path())?)?)
            .form(update);
        self.submit(req).await
    }

    /// Submit the favorite toggle.
    pub async fn set_favorite(&self, id: &ContactId, favorite: bool) -> Result<(), SdkError> {
        let value = if favorite { "true" } else { "false" };
        let req = self
            .http
            .post(self.url(&Location::path(&id.detail_path())?)?)
            .form(&[("favorite", value)]);
        self.submit(req).await
    }

    /// Delete the contact.
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), SdkError> {
        let path = format!("{}/destroy", id.detail_path());
        let req = self.http.post(self.url(&Location::path(&path)?)?);
        self.submit(req).await
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn url(&self, location: &Location) -> Result<Url, SdkError> {
        self.base_url
            .join(&location.to_string())
            .map_err(|e| SdkError::Config(format!("invalid location {location}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, location: &Location) -> Result<T, SdkError> {
        let res = self
            .http
            .get(self.url(location)?)
            .header(ACCEPT, JSON)
            .send()
            .await?;
        Ok(check_status(res).await?.json().await?)
    }

    /// Send an action request; success is any 2xx or 3xx.
    async fn submit(&self, req: RequestBuilder) -> Result<(), SdkError> {
        let res = req.send().await?;
        if res.status().is_redirection() {
            return Ok(());
        }
        check_status(res).await.map(drop)
    }
}

async fn check_status(res: Response) -> Result<Response, SdkError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(SdkError::Status { status, body })
}

async fn redirect_target(res: Response) -> Result<Location, SdkError> {
    if !res.status().is_redirection() {
        let res = check_status(res).await?;
        return Err(SdkError::Redirect(format!(
            "expected a redirect, got {}",
            res.status()
        )));
    }
    let target = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SdkError::Redirect("no Location header".into()))?;
    Ok(target.parse()?)
}
