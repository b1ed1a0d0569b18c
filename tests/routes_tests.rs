use std::sync::Arc;

mod common;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{test, web, App};
use common::fixtures::test_publication;
use common::mocks::{MockAuthRepo, MockPublicationRepo, MockUserRepo};
use common::{test_app_state, test_auth_config};
use rental_backend::api::routes;
use rental_backend::utils::jwt::create_access_token;
use serde_json::{json, Value};
use uuid::Uuid;

struct TestApp {
    user_repo: Arc<MockUserRepo>,
    auth_repo: Arc<MockAuthRepo>,
    publication_repo: Arc<MockPublicationRepo>,
}

impl TestApp {
    fn new() -> Self {
        Self {
            user_repo: Arc::new(MockUserRepo::default()),
            auth_repo: Arc::new(MockAuthRepo::default()),
            publication_repo: Arc::new(MockPublicationRepo::default()),
        }
    }

    async fn service(
        &self,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let state = test_app_state(
            self.user_repo.clone(),
            self.auth_repo.clone(),
            self.publication_repo.clone(),
        );

        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(test_auth_config()))
                .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
                .configure(routes::configure),
        )
        .await
    }
}

fn bearer_for(user_id: Uuid) -> String {
    let token = create_access_token(user_id, &test_auth_config()).expect("token should mint");
    format!("Bearer {token}")
}

fn drill_body() -> Value {
    json!({
        "title": "Drill",
        "description": "Works well",
        "category": "bricolage",
        "price_per_day": 15,
        "location": "Paris",
        "condition": "good"
    })
}

#[actix_rt::test]
async fn missing_bearer_is_rejected_before_payload_validation() {
    let app = TestApp::new().service().await;

    // The body is invalid too; the auth failure must win.
    let req = test::TestRequest::post()
        .uri("/publications/create")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn non_bearer_scheme_is_rejected() {
    let app = TestApp::new().service().await;

    let req = test::TestRequest::post()
        .uri("/publications/create")
        .insert_header((AUTHORIZATION, "Token abc"))
        .set_json(drill_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new().service().await;

    let req = test::TestRequest::post()
        .uri("/publications/create")
        .insert_header((AUTHORIZATION, "Bearer not.a.token"))
        .set_json(drill_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn create_publication_returns_201_with_generated_fields() {
    let harness = TestApp::new();
    let app = harness.service().await;
    let owner_id = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/publications/create")
        .insert_header((AUTHORIZATION, bearer_for(owner_id)))
        .set_json(drill_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Drill");
    assert_eq!(body["description"], "Works well");
    assert_eq!(body["category"], "bricolage");
    assert_eq!(body["price_per_day"], 15.0);
    assert_eq!(body["location"], "Paris");
    assert_eq!(body["condition"], "good");
    assert_eq!(body["is_available"], true);
    assert_eq!(body["view_count"], 0);
    assert_eq!(body["owner_id"], owner_id.to_string());
    assert!(body["id"].as_str().is_some());
    assert!(body["created_at"].as_str().is_some());
    assert!(body["updated_at"].as_str().is_some());
}

#[actix_rt::test]
async fn create_with_missing_title_names_the_field() {
    let app = TestApp::new().service().await;

    let mut body = drill_body();
    body.as_object_mut().unwrap().remove("title");

    let req = test::TestRequest::post()
        .uri("/publications/create")
        .insert_header((AUTHORIZATION, bearer_for(Uuid::new_v4())))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("title"));
}

#[actix_rt::test]
async fn create_with_unknown_category_is_rejected() {
    let app = TestApp::new().service().await;

    let mut body = drill_body();
    body["category"] = json!("boats");

    let req = test::TestRequest::post()
        .uri("/publications/create")
        .insert_header((AUTHORIZATION, bearer_for(Uuid::new_v4())))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    // serde names the rejected variant and lists the allowed ones
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("boats"));
    assert!(message.contains("bricolage"));
}

#[actix_rt::test]
async fn list_returns_pagination_envelope() {
    let harness = TestApp::new();
    harness
        .publication_repo
        .push(test_publication(Uuid::new_v4(), Uuid::new_v4()));
    let app = harness.service().await;

    let req = test::TestRequest::get().uri("/publications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["publications"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn list_clamps_page_zero_from_the_query_string() {
    let harness = TestApp::new();
    harness
        .publication_repo
        .push(test_publication(Uuid::new_v4(), Uuid::new_v4()));
    let app = harness.service().await;

    let req = test::TestRequest::get()
        .uri("/publications?page=0&per_page=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"], 1);
    assert_eq!(body["total"], 1);
}

#[actix_rt::test]
async fn detail_of_soft_deleted_publication_is_404() {
    let harness = TestApp::new();
    let id = Uuid::new_v4();
    let mut publication = test_publication(id, Uuid::new_v4());
    publication.is_active = false;
    harness.publication_repo.push(publication);
    let app = harness.service().await;

    let req = test::TestRequest::get()
        .uri(&format!("/publications/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn toggle_twice_through_the_api_never_errors() {
    let harness = TestApp::new();
    let owner_id = Uuid::new_v4();
    let id = Uuid::new_v4();
    harness
        .publication_repo
        .push(test_publication(id, owner_id));
    let app = harness.service().await;

    let uri = format!("/publications/{id}/toggle-availability");

    let first = test::TestRequest::put()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bearer_for(owner_id)))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, first).await;
    assert_eq!(first["is_available"], false);

    let second = test::TestRequest::put()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bearer_for(owner_id)))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, second).await;
    assert_eq!(second["is_available"], true);
}

#[actix_rt::test]
async fn update_by_non_owner_is_403() {
    let harness = TestApp::new();
    let id = Uuid::new_v4();
    harness
        .publication_repo
        .push(test_publication(id, Uuid::new_v4()));
    let app = harness.service().await;

    let req = test::TestRequest::put()
        .uri(&format!("/publications/{id}/update"))
        .insert_header((AUTHORIZATION, bearer_for(Uuid::new_v4())))
        .set_json(json!({"title": "Someone else's drill"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
async fn register_login_me_flow() {
    let app = TestApp::new().service().await;

    let register = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "correct horse battery"
        }))
        .to_request();
    let resp = test::call_service(&app, register).await;
    assert_eq!(resp.status(), 201);
    let registered: Value = test::read_body_json(resp).await;
    assert_eq!(registered["email"], "ada@example.com");

    let login = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({
            "email": "ada@example.com",
            "password": "correct horse battery"
        }))
        .to_request();
    let login: Value = test::call_and_read_body_json(&app, login).await;
    let token = login["access_token"].as_str().expect("token expected");

    let me = test::TestRequest::get()
        .uri("/users/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, me).await;
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["id"], registered["id"]);
}

#[actix_rt::test]
async fn login_with_wrong_password_is_401() {
    let app = TestApp::new().service().await;

    let register = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "correct horse battery"
        }))
        .to_request();
    test::call_service(&app, register).await;

    let login = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({
            "email": "ada@example.com",
            "password": "wrong password"
        }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn my_publications_requires_auth_and_paginates() {
    let harness = TestApp::new();
    let owner_id = Uuid::new_v4();
    for _ in 0..3 {
        harness
            .publication_repo
            .push(test_publication(Uuid::new_v4(), owner_id));
    }
    let app = harness.service().await;

    let unauthorized = test::TestRequest::get()
        .uri("/publications/user")
        .to_request();
    let resp = test::call_service(&app, unauthorized).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/publications/user?page=1&per_page=2")
        .insert_header((AUTHORIZATION, bearer_for(owner_id)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["publications"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn category_counts_always_lists_every_category() {
    let harness = TestApp::new();
    harness
        .publication_repo
        .push(test_publication(Uuid::new_v4(), Uuid::new_v4()));
    let app = harness.service().await;

    let req = test::TestRequest::get()
        .uri("/publications/categories")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["bricolage"], 1);
    assert_eq!(body["sport"], 0);
    assert_eq!(body["transport"], 0);
}
