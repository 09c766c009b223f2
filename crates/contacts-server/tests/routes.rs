use axum::http::header::ACCEPT;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use contacts_models::{ContactRecord, ContactUpdate, RootData};
use contacts_server::config::AppConfig;
use contacts_server::store::ContactStore;
use contacts_server::{AppState, router};

struct Harness {
    server: TestServer,
    state: std::sync::Arc<AppState>,
}

async fn harness(names: &[(&str, &str)]) -> Harness {
    let store = ContactStore::in_memory();
    for (first, last) in names {
        let c = store.create_empty_contact().await.unwrap();
        store
            .update_contact(
                &c.id,
                &ContactUpdate {
                    first: Some((*first).to_string()),
                    last: Some((*last).to_string()),
                    ..ContactUpdate::default()
                },
            )
            .await
            .unwrap();
    }
    let state = AppState::with_store(store, AppConfig::in_memory());
    let server = TestServer::new(router(state.clone())).unwrap();
    Harness { server, state }
}

fn json_accept() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

// -- root loader --------------------------------------------------------------

#[tokio::test]
async fn loader_without_q_returns_all_contacts_and_null_q() {
    let h = harness(&[("Grace", "Hopper"), ("Ada", "Lovelace")]).await;
    let res = h.server.get("/").add_header(ACCEPT, json_accept()).await;
    res.assert_status_ok();

    let data: RootData = res.json();
    assert_eq!(data.q, None);
    assert_eq!(data.contacts, h.state.store.get_contacts(None).await.unwrap());
    assert_eq!(data.contacts.len(), 2);
}

#[tokio::test]
async fn loader_returns_store_results_and_echoes_q() {
    let h = harness(&[("Grace", "Hopper"), ("Ada", "Lovelace"), ("Alan", "Turing")]).await;
    for q in ["a", "LOVE", "", "nobody", "a b"] {
        let res = h
            .server
            .get("/")
            .add_query_param("q", q)
            .add_header(ACCEPT, json_accept())
            .await;
        res.assert_status_ok();

        let data: RootData = res.json();
        assert_eq!(data.q.as_deref(), Some(q));
        assert_eq!(data.contacts, h.state.store.get_contacts(Some(q)).await.unwrap());
    }
}

#[tokio::test]
async fn loader_uses_first_of_repeated_q() {
    let h = harness(&[("Grace", "Hopper"), ("Ada", "Lovelace")]).await;
    let res = h.server.get("/?q=ada&q=grace").add_header(ACCEPT, json_accept()).await;
    res.assert_status_ok();

    let data: RootData = res.json();
    assert_eq!(data.q.as_deref(), Some("ada"));
    assert_eq!(data.contacts, h.state.store.get_contacts(Some("ada")).await.unwrap());
    assert_eq!(data.contacts.len(), 1);
}

#[tokio::test]
async fn loader_renders_shell_html_by_default() {
    let h = harness(&[("Grace", "Hopper")]).await;
    let res = h.server.get("/").add_query_param("q", "gra").await;
    res.assert_status_ok();

    let html = res.text();
    assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\"><head>"));
    assert!(html.contains("Grace Hopper"));
    assert!(html.contains("value=\"gra\""));
}

#[tokio::test]
async fn empty_store_renders_no_contacts() {
    let h = harness(&[]).await;
    let html = h.server.get("/").await.text();
    assert!(html.contains("No contacts"));
}

// -- root action --------------------------------------------------------------

#[tokio::test]
async fn action_creates_one_contact_and_redirects_to_edit() {
    let h = harness(&[("Grace", "Hopper")]).await;

    let res = h.server.post("/").await;
    res.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(h.state.store.len().await, 2);

    let location = res.header("location");
    let location = location.to_str().unwrap();
    let blank = h
        .state
        .store
        .get_contacts(None)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.full_name().is_none())
        .unwrap();
    assert_eq!(location, format!("/contacts/{}/edit", blank.id));
}

#[tokio::test]
async fn action_is_not_idempotent() {
    let h = harness(&[]).await;
    let first = h.server.post("/").await;
    let second = h.server.post("/").await;
    assert_ne!(first.header("location"), second.header("location"));
    assert_eq!(h.state.store.len().await, 2);
}

#[tokio::test]
async fn new_contact_is_listed_with_placeholder() {
    let h = harness(&[]).await;
    h.server.post("/").await;
    let html = h.server.get("/").await.text();
    assert!(html.contains("<i>No Name</i>"));
}

// -- contact routes -----------------------------------------------------------

#[tokio::test]
async fn detail_page_renders_contact_and_active_link() {
    let h = harness(&[("Grace", "Hopper")]).await;
    let c = h.state.store.get_contacts(None).await.unwrap().remove(0);

    let res = h.server.get(&c.id.detail_path()).await;
    res.assert_status_ok();
    let html = res.text();
    assert!(html.contains("id=\"contact\""));
    assert!(html.contains("class=\"active\""));
}

#[tokio::test]
async fn detail_json_returns_record() {
    let h = harness(&[("Grace", "Hopper")]).await;
    let c = h.state.store.get_contacts(None).await.unwrap().remove(0);

    let res = h
        .server
        .get(&c.id.detail_path())
        .add_header(ACCEPT, json_accept())
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<ContactRecord>(), c);
}

#[tokio::test]
async fn unknown_contact_is_404() {
    let h = harness(&[]).await;
    let res = h.server.get("/contacts/missing").await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert!(res.text().contains("contact not found"));

    h.server
        .get("/contacts/missing/edit")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    h.server
        .post("/contacts/missing/destroy")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_id_is_400() {
    let h = harness(&[]).await;
    h.server
        .get("/contacts/a%20b")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_saves_fields_and_redirects_to_detail() {
    let h = harness(&[]).await;
    let c = h.state.store.create_empty_contact().await.unwrap();

    h.server
        .get(&c.id.edit_path())
        .await
        .assert_status_ok();

    let res = h
        .server
        .post(&c.id.edit_path())
        .form(&[
            ("first", "Katherine"),
            ("last", "Johnson"),
            ("twitter", "@kj"),
            ("avatar", ""),
            ("notes", "NASA"),
        ])
        .await;
    res.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(res.header("location").to_str().unwrap(), c.id.detail_path());

    let saved = h.state.store.get_contact(&c.id).await.unwrap();
    assert_eq!(saved.full_name().as_deref(), Some("Katherine Johnson"));
    assert_eq!(saved.notes.as_deref(), Some("NASA"));
    assert_eq!(saved.avatar, None);
}

#[tokio::test]
async fn favorite_toggle_sets_and_clears() {
    let h = harness(&[("Grace", "Hopper")]).await;
    let c = h.state.store.get_contacts(None).await.unwrap().remove(0);

    let res = h
        .server
        .post(&c.id.detail_path())
        .form(&[("favorite", "true")])
        .await;
    res.assert_status(StatusCode::SEE_OTHER);
    assert!(h.state.store.get_contact(&c.id).await.unwrap().favorite);
    assert!(h.server.get("/").await.text().contains('★'));

    h.server
        .post(&c.id.detail_path())
        .form(&[("favorite", "false")])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(!h.state.store.get_contact(&c.id).await.unwrap().favorite);
}

#[tokio::test]
async fn destroy_removes_contact_and_redirects_home() {
    let h = harness(&[("Grace", "Hopper")]).await;
    let c = h.state.store.get_contacts(None).await.unwrap().remove(0);

    let res = h.server.post(&format!("{}/destroy", c.id.detail_path())).await;
    res.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(res.header("location").to_str().unwrap(), "/");
    assert!(h.state.store.is_empty().await);
}

#[tokio::test]
async fn stylesheet_is_served() {
    let h = harness(&[]).await;
    let res = h.server.get("/app.css").await;
    res.assert_status_ok();
    assert!(res.text().contains("#sidebar"));
}
