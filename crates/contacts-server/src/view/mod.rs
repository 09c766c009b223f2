//! Server-side rendering of the shell and its nested pages.
//!
//! Pages are Dioxus components rendered to a string with `dioxus-ssr`. The
//! shell takes a [`ShellView`] so the same projection drives both the
//! server output and the client session.

mod pages;
mod shell;

use axum::http::StatusCode;
use contacts_models::{ContactRecord, ShellView};
use dioxus::prelude::*;

use self::pages::ErrorDocument;
use self::shell::AppShell;

/// Stylesheet served at `/app.css`.
pub const APP_CSS: &str = include_str!("../../assets/app.css");

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Wrap rendered `head`/`body` markup in the document envelope.
fn envelope(inner: &str) -> String {
    format!("{DOCTYPE}<html lang=\"en\">{inner}</html>")
}

/// Content rendered into the detail pane.
#[derive(Debug, Clone, PartialEq)]
pub enum Outlet {
    /// Intro text shown at `/`.
    Index,
    /// Read-only contact page.
    Contact(ContactRecord),
    /// Edit form for a contact.
    EditContact(ContactRecord),
}

/// Render the full document: shell plus the outlet.
pub fn render_document(view: &ShellView, outlet: Outlet) -> String {
    let view = view.clone();
    let body = dioxus_ssr::render_element(rsx! {
        AppShell { view: view, outlet: outlet }
    });
    envelope(&body)
}

/// Render the error boundary document.
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let status = status.to_string();
    let message = message.to_string();
    let body = dioxus_ssr::render_element(rsx! {
        ErrorDocument { status: status, message: message }
    });
    envelope(&body)
}
