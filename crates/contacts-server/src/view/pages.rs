//! Pages rendered into the detail pane, plus the standalone error document.

use contacts_models::{ContactRecord, NO_NAME_PLACEHOLDER};
use dioxus::prelude::*;

#[component]
pub fn IndexPage() -> Element {
    rsx! {
        p { id: "index-page",
            "This is a demo contacts app. Pick a contact on the left or create a new one."
        }
    }
}

#[component]
pub fn ContactPage(contact: ContactRecord) -> Element {
    let detail_path = contact.id.detail_path();
    let edit_path = contact.id.edit_path();
    let destroy_path = format!("{detail_path}/destroy");
    let avatar = contact.avatar.clone().unwrap_or_default();
    let name = contact.full_name();

    rsx! {
        div { id: "contact",
            div {
                img { alt: "", src: "{avatar}" }
            }
            div {
                h1 {
                    if let Some(name) = name {
                        "{name}"
                    } else {
                        i { "{NO_NAME_PLACEHOLDER}" }
                    }
                    " "
                    FavoriteForm { action: detail_path, favorite: contact.favorite }
                }
                if let Some(twitter) = contact.twitter.as_deref() {
                    p {
                        a { href: "https://twitter.com/{twitter}", "{twitter}" }
                    }
                }
                if let Some(notes) = contact.notes.as_deref() {
                    p { "{notes}" }
                }
                div {
                    form { method: "get", action: "{edit_path}",
                        button { r#type: "submit", "Edit" }
                    }
                    form { method: "post", action: "{destroy_path}",
                        button { r#type: "submit", "Delete" }
                    }
                }
            }
        }
    }
}

/// Star button posting the opposite of the current favorite state.
#[component]
fn FavoriteForm(action: String, favorite: bool) -> Element {
    let (next, label, glyph) = if favorite {
        ("false", "Remove from favorites", "★")
    } else {
        ("true", "Add to favorites", "☆")
    };
    rsx! {
        form { method: "post", action: "{action}",
            button { aria_label: label, name: "favorite", value: next, "{glyph}" }
        }
    }
}

#[component]
pub fn EditPage(contact: ContactRecord) -> Element {
    let edit_path = contact.id.edit_path();
    let cancel_path = contact.id.detail_path();
    let first = contact.first.clone().unwrap_or_default();
    let last = contact.last.clone().unwrap_or_default();
    let twitter = contact.twitter.clone().unwrap_or_default();
    let avatar = contact.avatar.clone().unwrap_or_default();
    let notes = contact.notes.clone().unwrap_or_default();

    rsx! {
        form { id: "contact-form", method: "post", action: "{edit_path}",
            p {
                span { "Name" }
                input { aria_label: "First name", name: "first", placeholder: "First", r#type: "text", value: "{first}" }
                input { aria_label: "Last name", name: "last", placeholder: "Last", r#type: "text", value: "{last}" }
            }
            label {
                span { "Twitter" }
                input { name: "twitter", placeholder: "@jack", r#type: "text", value: "{twitter}" }
            }
            label {
                span { "Avatar URL" }
                input { aria_label: "Avatar URL", name: "avatar", placeholder: "https://example.com/avatar.jpg", r#type: "text", value: "{avatar}" }
            }
            label {
                span { "Notes" }
                textarea { name: "notes", rows: "6", "{notes}" }
            }
            p {
                button { r#type: "submit", "Save" }
                a { href: "{cancel_path}", "Cancel" }
            }
        }
    }
}

#[component]
pub fn ErrorDocument(status: String, message: String) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            title { "Oops!" }
            link { rel: "stylesheet", href: "/app.css" }
        }
        body {
            div { id: "error-page",
                h1 { "{status}" }
                p { "{message}" }
                a { href: "/", "Back to contacts" }
            }
        }
    }
}
