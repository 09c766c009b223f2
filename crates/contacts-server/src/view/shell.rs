//! Shell layout: document head, sidebar with search and the contact list,
//! and the detail pane hosting the nested page.

use contacts_models::{ContactLabel, ContactLink, ShellView, NO_NAME_PLACEHOLDER, SEARCH_PARAM};
use dioxus::prelude::*;

use super::Outlet;
use super::pages::{ContactPage, EditPage, IndexPage};

/// The root layout: head, sidebar and detail pane. The `<html>` envelope
/// is added by the caller.
#[component]
pub fn AppShell(view: ShellView, outlet: Outlet) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "Contacts" }
            link { rel: "stylesheet", href: "/app.css" }
        }
        body {
            Sidebar { view: view.clone() }
            div { id: "detail", class: view.detail_class(),
                {outlet_content(outlet)}
            }
        }
    }
}

fn outlet_content(outlet: Outlet) -> Element {
    match outlet {
        Outlet::Index => rsx! { IndexPage {} },
        Outlet::Contact(contact) => rsx! { ContactPage { contact: contact } },
        Outlet::EditContact(contact) => rsx! { EditPage { contact: contact } },
    }
}

#[component]
fn Sidebar(view: ShellView) -> Element {
    rsx! {
        div { id: "sidebar",
            h1 { "Contacts" }
            div {
                SearchForm { value: view.search_value.clone(), searching: view.searching }
                form { method: "post", action: "/",
                    button { r#type: "submit", "New" }
                }
            }
            nav {
                if view.contacts.is_empty() {
                    p { i { "No contacts" } }
                } else {
                    ul {
                        for link in view.contacts.iter() {
                            li { key: "{link.id}",
                                ContactNavLink { link: link.clone() }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Search box. Without scripting it submits as a plain GET to `/`.
#[component]
fn SearchForm(value: String, searching: bool) -> Element {
    rsx! {
        form { id: "search-form", role: "search", method: "get", action: "/",
            input {
                id: "q",
                class: if searching { "loading" } else { "" },
                aria_label: "Search contacts",
                placeholder: "Search",
                r#type: "search",
                name: SEARCH_PARAM,
                value: "{value}",
            }
            div { id: "search-spinner", aria_hidden: "true", hidden: !searching }
        }
    }
}

#[component]
fn ContactNavLink(link: ContactLink) -> Element {
    let class = link.state.to_string();
    rsx! {
        a { href: "{link.href}", class: "{class}",
            if let ContactLabel::Named(name) = &link.label {
                "{name}"
            } else {
                i { "{NO_NAME_PLACEHOLDER}" }
            }
            " "
            if link.favorite {
                span { "★" }
            }
        }
    }
}
