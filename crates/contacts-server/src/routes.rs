//! Route handlers: the root loader/action pair and the nested contact routes.
//!
//! Every page that renders the shell runs the root loader with the request's
//! `q`, then renders its own content into the detail pane. Requests sent with
//! `Accept: application/json` get the loader data instead of HTML.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use contacts_models::{
    parse_favorite, ContactId, ContactUpdate, Location, NavigationState, PendingFavorites,
    RootData, ShellView, SEARCH_PARAM,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::AppState;
use crate::error::AppError;
use crate::view::{self, Outlet, APP_CSS};

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /contacts/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteForm {
    /// `"true"` marks the contact as favorite; anything else clears it.
    pub favorite: Option<String>,
}

// ---------------------------------------------------------------------------
// Root loader / action
// ---------------------------------------------------------------------------

/// `GET /?q=`: contacts matching `q` plus `q` echoed back.
pub async fn root_loader(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let location = request_location(&uri)?;
    let data = load_root(&state, &location).await?;
    if wants_json(&headers) {
        return Ok(Json(data).into_response());
    }
    render_shell(&data, &location, Outlet::Index)
}

/// `POST /`: create a blank contact and redirect to its edit page.
pub async fn root_action(State(state): State<Arc<AppState>>) -> Result<Redirect, AppError> {
    let contact = state.store.create_empty_contact().await?;
    info!(contact_id = %contact.id, "contact created");
    Ok(Redirect::to(&contact.id.edit_path()))
}

// ---------------------------------------------------------------------------
// Contact routes
// ---------------------------------------------------------------------------

/// `GET /contacts/{id}`: contact detail.
pub async fn contact_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let id = ContactId::parse(&id)?;
    let contact = state.store.get_contact(&id).await?;
    if wants_json(&headers) {
        return Ok(Json(contact).into_response());
    }
    let location = request_location(&uri)?;
    let data = load_root(&state, &location).await?;
    render_shell(&data, &location, Outlet::Contact(contact))
}

/// `GET /contacts/{id}/edit`: edit form.
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Response, AppError> {
    let id = ContactId::parse(&id)?;
    let contact = state.store.get_contact(&id).await?;
    let location = request_location(&uri)?;
    let data = load_root(&state, &location).await?;
    render_shell(&data, &location, Outlet::EditContact(contact))
}

/// `POST /contacts/{id}/edit`: save the edit form.
pub async fn edit_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(update): Form<ContactUpdate>,
) -> Result<Redirect, AppError> {
    let id = ContactId::parse(&id)?;
    state.store.update_contact(&id, &update).await?;
    info!(contact_id = %id, "contact updated");
    Ok(Redirect::to(&id.detail_path()))
}

/// `POST /contacts/{id}`: set or clear the favorite flag.
pub async fn favorite_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect, AppError> {
    let id = ContactId::parse(&id)?;
    let favorite = parse_favorite(form.favorite.as_deref());
    state
        .store
        .update_contact(&id, &ContactUpdate::favorite(favorite))
        .await?;
    info!(contact_id = %id, favorite, "favorite updated");
    Ok(Redirect::to(&id.detail_path()))
}

/// `POST /contacts/{id}/destroy`: delete and go back to the index.
pub async fn destroy_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = ContactId::parse(&id)?;
    state.store.delete_contact(&id).await?;
    info!(contact_id = %id, "contact deleted");
    Ok(Redirect::to("/"))
}

/// `GET /app.css`.
pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The request target as a [`Location`]. A repeated `q` resolves to its
/// first value, the same as on the client.
fn request_location(uri: &Uri) -> Result<Location, AppError> {
    Ok(Location::from_parts(uri.path(), uri.query().unwrap_or_default())?)
}

async fn load_root(state: &AppState, location: &Location) -> Result<RootData, AppError> {
    let q = location.query_param(SEARCH_PARAM);
    let contacts = state.store.get_contacts(q.as_deref()).await?;
    debug!(q = ?q, count = contacts.len(), "root loader");
    Ok(RootData { contacts, q })
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Server renders are never mid-navigation and carry no pending favorites.
fn render_shell(data: &RootData, location: &Location, outlet: Outlet) -> Result<Response, AppError> {
    let view = ShellView::build(
        data,
        location,
        &NavigationState::Idle,
        &PendingFavorites::default(),
    );
    Ok(Html(view::render_document(&view, outlet)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn repeated_q_resolves_to_first_value() {
        let uri: Uri = "/?q=a&q=b".parse().unwrap();
        let location = request_location(&uri).unwrap();
        assert_eq!(location.query_param(SEARCH_PARAM).as_deref(), Some("a"));
    }

    #[test]
    fn json_is_negotiated_from_accept() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!wants_json(&headers));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));
        assert!(wants_json(&headers));
    }
}
