//! Tests for the blog page handlers, backed by the in-memory store.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag};
use blog_infra::{InMemoryBlogStore, InMemoryMailbox};

use super::configure_routes;
use crate::state::AppState;
use crate::templates::load_templates;

const SENDER: &str = "blog@example.com";

struct Fixture {
    store: Arc<InMemoryBlogStore>,
    mailbox: Arc<InMemoryMailbox>,
    borrowing: Post,
    draft: Post,
}

fn published(title: &str, slug: &str, day: u32, tags: &[&Tag]) -> Post {
    let at = Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap();
    Post::new(Uuid::new_v4(), "ada", title, slug, format!("All about {title}."))
        .publish_at(at)
        .with_tags(tags.iter().map(|t| (*t).clone()).collect())
}

async fn fixture() -> Fixture {
    let rust = Tag::new("Rust");
    let web = Tag::new("Web");

    let borrowing = published("Borrowing", "borrowing", 14, &[&rust, &web]);
    let draft = Post::new(Uuid::new_v4(), "ada", "Secret Draft", "secret-draft", "Not yet.")
        .with_tags(vec![rust.clone()]);

    let store = Arc::new(InMemoryBlogStore::new());
    store.add_post(published("First Steps", "first-steps", 10, &[&rust])).await;
    store.add_post(published("Ownership", "ownership", 12, &[&rust, &web])).await;
    store.add_post(borrowing.clone()).await;
    store.add_post(published("Actix Tour", "actix-tour", 16, &[&web])).await;
    store.add_post(draft.clone()).await;

    store
        .add_comment(Comment::new(borrowing.id, "Grace", "grace@example.com", "Great read"))
        .await;
    store
        .add_comment(
            Comment::new(borrowing.id, "Spammer", "spam@example.com", "Buy cheap watches")
                .deactivated(),
        )
        .await;

    Fixture {
        store,
        mailbox: Arc::new(InMemoryMailbox::new()),
        borrowing,
        draft,
    }
}

fn test_app(
    fixture: &Fixture,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let templates = load_templates(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
        .expect("templates should load");
    let state = AppState::in_memory(
        fixture.store.clone(),
        fixture.mailbox.clone(),
        Arc::new(templates),
        SENDER.to_string(),
    );

    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}

async fn get(fixture: &Fixture, uri: &str) -> (StatusCode, String) {
    let app = actix_test::init_service(test_app(fixture)).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn post_form(fixture: &Fixture, uri: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
    let app = actix_test::init_service(test_app(fixture)).await;
    let request = actix_test::TestRequest::post().uri(uri).set_form(form).to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// POST a raw body; `content_type` of `None` sends no Content-Type header.
async fn post_raw(
    fixture: &Fixture,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, String) {
    let app = actix_test::init_service(test_app(fixture)).await;
    let mut request = actix_test::TestRequest::post().uri(uri).set_payload(body);
    if let Some(content_type) = content_type {
        request = request.insert_header((header::CONTENT_TYPE, content_type));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[actix_rt::test]
async fn test_health_reports_storage() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "memory");
}

#[actix_rt::test]
async fn test_list_shows_newest_published_posts_first() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/").await;

    assert_eq!(status, StatusCode::OK);
    let actix = body.find("Actix Tour").unwrap();
    let borrowing = body.find("Borrowing").unwrap();
    let ownership = body.find("Ownership").unwrap();
    assert!(actix < borrowing && borrowing < ownership);
    assert!(!body.contains("First Steps"));
    assert!(!body.contains("Secret Draft"));
    assert!(body.contains("Page 1 of 2."));
}

#[actix_rt::test]
async fn test_list_with_garbage_page_shows_first_page() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Page 1 of 2."));
    assert!(body.contains("Actix Tour"));
}

#[actix_rt::test]
async fn test_list_with_page_out_of_range_shows_last_page() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/?page=99").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Page 2 of 2."));
    assert!(body.contains("First Steps"));
    assert!(!body.contains("Actix Tour"));
}

#[actix_rt::test]
async fn test_list_by_tag_filters_posts() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/tag/web/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Posts tagged with"));
    assert!(body.contains("Ownership"));
    assert!(body.contains("Borrowing"));
    assert!(body.contains("Actix Tour"));
    assert!(!body.contains("First Steps"));
    assert!(body.contains("Page 1 of 1."));
}

#[actix_rt::test]
async fn test_list_by_unknown_tag_is_not_found() {
    let fixture = fixture().await;
    let (status, _) = get(&fixture, "/tag/cooking/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_detail_shows_active_comments_and_similar_posts() {
    let fixture = fixture().await;
    let (status, body) = get(&fixture, "/2024/1/14/borrowing/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("All about Borrowing."));
    assert!(body.contains("Great read"));
    assert!(!body.contains("Buy cheap watches"));
    assert!(body.contains("1 comment<"));

    let similar = &body[body.find("Similar posts").unwrap()..];
    let ownership = similar.find("Ownership").unwrap();
    let actix = similar.find("Actix Tour").unwrap();
    let first = similar.find("First Steps").unwrap();
    assert!(ownership < actix && actix < first);
}

#[actix_rt::test]
async fn test_detail_of_draft_or_wrong_date_is_not_found() {
    let fixture = fixture().await;
    let day = fixture.draft.publish_date();
    let draft_uri = format!("/{}/secret-draft/", day.format("%Y/%-m/%-d"));

    assert_eq!(get(&fixture, &draft_uri).await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&fixture, "/2024/1/15/borrowing/").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&fixture, "/2024/2/30/borrowing/").await.0, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_comment_endpoint_rejects_get() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);
    let app = actix_test::init_service(test_app(&fixture)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get("Allow").unwrap(), "POST");
}

#[actix_rt::test]
async fn test_invalid_comment_is_not_saved() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);

    let (status, body) = post_form(&fixture, &uri, &[("name", "Linus"), ("email", "nope")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This field is required."));
    assert!(body.contains("Enter a valid email address."));
    assert!(!body.contains("Your comment has been added."));
    assert_eq!(fixture.store.all_comments().await.len(), 2);
}

#[actix_rt::test]
async fn test_valid_comment_is_saved_as_active() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);

    let (status, body) = post_form(
        &fixture,
        &uri,
        &[("name", "Linus"), ("email", "linus@example.com"), ("body", "Nice")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your comment has been added."));

    let comments = fixture.store.all_comments().await;
    let saved = comments.iter().find(|c| c.name == "Linus").unwrap();
    assert_eq!(saved.post_id, fixture.borrowing.id);
    assert!(saved.active);
}

#[actix_rt::test]
async fn test_comment_on_draft_is_not_found() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.draft.id);

    let (status, _) = post_form(
        &fixture,
        &uri,
        &[("name", "Linus"), ("email", "linus@example.com"), ("body", "Nice")],
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(fixture.store.all_comments().await.len(), 2);
}

#[actix_rt::test]
async fn test_share_form_renders_for_published_post() {
    let fixture = fixture().await;

    let (status, body) = get(&fixture, &format!("/{}/share/", fixture.borrowing.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("by e-mail"));

    let (status, _) = get(&fixture, &format!("/{}/share/", fixture.draft.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_valid_share_sends_one_email() {
    let fixture = fixture().await;
    let uri = format!("/{}/share/", fixture.borrowing.id);

    let (status, body) = post_form(
        &fixture,
        &uri,
        &[
            ("name", "Grace"),
            ("email", "grace@example.com"),
            ("to", "linus@example.com"),
            ("comments", "You will like this"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("E-mail successfully sent"));

    let outbox = fixture.mailbox.outbox().await;
    assert_eq!(outbox.len(), 1);
    let mail = &outbox[0];
    assert_eq!(mail.subject, "Grace recommends you read Borrowing");
    assert!(mail.body.contains("/2024/1/14/borrowing/"));
    assert!(mail.body.contains("Grace's comments: You will like this"));
    assert_eq!(mail.from, SENDER);
    assert_eq!(mail.to, vec!["linus@example.com".to_string()]);
}

#[actix_rt::test]
async fn test_invalid_share_sends_nothing() {
    let fixture = fixture().await;
    let uri = format!("/{}/share/", fixture.borrowing.id);

    let (status, body) = post_form(&fixture, &uri, &[("name", "Grace"), ("to", "bad")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("E-mail successfully sent"));
    assert!(body.contains("This field is required."));
    assert!(fixture.mailbox.outbox().await.is_empty());
}

#[actix_rt::test]
async fn test_comment_without_form_body_rerenders_with_errors() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);

    let (status, body) = post_raw(&fixture, &uri, None, "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This field is required."));
    assert!(!body.contains("Your comment has been added."));
    assert_eq!(fixture.store.all_comments().await.len(), 2);
}

#[actix_rt::test]
async fn test_share_without_form_body_rerenders_with_errors() {
    let fixture = fixture().await;
    let uri = format!("/{}/share/", fixture.borrowing.id);

    let (status, body) = post_raw(&fixture, &uri, None, "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This field is required."));
    assert!(fixture.mailbox.outbox().await.is_empty());
}

#[actix_rt::test]
async fn test_comment_with_json_body_is_treated_as_empty_form() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);

    let (status, body) =
        post_raw(&fixture, &uri, Some("application/json"), r#"{"name":"Linus"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This field is required."));
    assert_eq!(fixture.store.all_comments().await.len(), 2);
}

#[actix_rt::test]
async fn test_repeated_comment_field_keeps_last_value_and_trims() {
    let fixture = fixture().await;
    let uri = format!("/{}/comment/", fixture.borrowing.id);

    let (status, body) = post_raw(
        &fixture,
        &uri,
        Some("application/x-www-form-urlencoded"),
        "name=first&name=Linus&email=linus%40example.com&body=++Nice+post++",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your comment has been added."));

    let comments = fixture.store.all_comments().await;
    let saved = comments.iter().find(|c| c.email == "linus@example.com").unwrap();
    assert_eq!(saved.name, "Linus");
    assert_eq!(saved.body, "Nice post");
}
