//! End-to-end post pipeline over the in-memory store: the real route
//! table, middleware, and error pipeline, driven through actix's test
//! service.
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, Error};
use std::sync::Arc;

use knowledgeknot::db::{MemoryStore, Store};
use knowledgeknot::middleware::MethodOverride;
use knowledgeknot::routes;

async fn spawn_app(
    store: Arc<dyn Store>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .wrap(MethodOverride)
            .configure(routes::configure),
    )
    .await
}

fn post_form<'a>(title: &'a str, body: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![("post[title]", title), ("post[body]", body)]
}

fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(resp: ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn create_then_show_round_trips() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("A", "B"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let detail = location(&resp);
    assert!(detail.starts_with("/posts/"));

    let resp = test::call_service(&app, test::TestRequest::get().uri(&detail).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("A"));
    assert!(html.contains("B"));
}

#[actix_web::test]
async fn create_with_empty_title_reports_every_violation() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store.clone()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("", ""))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("post[title] must not be empty"));
    assert!(html.contains("post[body] must not be empty"));

    // Validation runs before persistence: nothing was written.
    assert!(store.list_posts().await.unwrap().is_empty());
}

#[actix_web::test]
async fn create_with_unknown_field_is_rejected() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(vec![
                ("post[title]", "A"),
                ("post[body]", "B"),
                ("post[admin]", "true"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("post[admin] is not allowed"));
}

#[actix_web::test]
async fn show_unknown_id_is_a_404_not_a_crash() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/posts/ffffffffffffffffffffffff")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // A malformed id can never resolve either.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/posts/not-an-id").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_through_method_override() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("before", "body"))
            .to_request(),
    )
    .await;
    let detail = location(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{detail}?_method=PUT"))
            .set_form(post_form("after", "body"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), detail);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&detail).to_request()).await;
    let html = body_text(resp).await;
    assert!(html.contains("after"));
    assert!(!html.contains("before"));
}

#[actix_web::test]
async fn update_with_invalid_fields_is_rejected() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("keep", "body"))
            .to_request(),
    )
    .await;
    let detail = location(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{detail}?_method=PUT"))
            .set_form(post_form("", "body"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&detail).to_request()).await;
    assert!(body_text(resp).await.contains("keep"));
}

#[actix_web::test]
async fn delete_removes_the_post() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("doomed", "body"))
            .to_request(),
    )
    .await;
    let detail = location(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{detail}/delete?_method=DELETE"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/posts");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&detail).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn index_lists_created_posts() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    for title in ["first post", "second post"] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_form(post_form(title, "body"))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("first post"));
    assert!(html.contains("second post"));
}

#[actix_web::test]
async fn unmatched_route_renders_the_error_view() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/nonexistent").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("404"));
    assert!(html.contains("Not Found!"));
}

#[actix_web::test]
async fn method_mismatch_on_a_known_path_is_a_404() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    // A registered path with an unregistered method is an unmatched
    // route, not a 405: it renders the same error view.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/ffffffffffffffffffffffff")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("Not Found!"));

    let resp =
        test::call_service(&app, test::TestRequest::patch().uri("/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, test::TestRequest::post().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn forms_render() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/posts/new").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("post[title]"));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_form(post_form("editable", "body"))
            .to_request(),
    )
    .await;
    let detail = location(&resp);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{detail}/edit"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("editable"));
}

#[actix_web::test]
async fn home_and_health_respond() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = spawn_app(store).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
