//! End-to-end tests through the actix service: bearer authentication,
//! admin gating, and the API-keyed external route.

mod common;

use actix_web::{App, test, web};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use members_server::api;
use members_server::config::{Config, Environment, WebhookConfig};
use members_server::entity::user;
use members_server::services::api_key as api_key_service;

use common::{FAR_FUTURE, sign_token};

fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwks: common::jwks_json(),
        page_size: 20,
        webhook: WebhookConfig {
            url: None,
            secret: None,
        },
    }
}

macro_rules! init_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new(common::verifier()))
                .app_data(web::Data::new(common::webhook_notifier()))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api/v1")
                        .configure(api::configure_health_routes)
                        .configure(api::configure_user_routes)
                        .configure(api::configure_api_key_routes)
                        .configure(api::configure_admin_log_routes)
                        .configure(api::configure_station_routes)
                        .configure(api::configure_instructor_routes)
                        .configure(api::configure_badge_routes)
                        .configure(api::configure_donation_routes),
                ),
        )
        .await
    };
}

fn bearer(sub: Uuid, email: &str) -> (&'static str, String) {
    (
        "Authorization",
        format!(
            "Bearer {}",
            sign_token(&sub.to_string(), email, FAR_FUTURE, Some("Robin"), Some("Wrench"))
        ),
    )
}

#[actix_web::test]
async fn test_health_is_public() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_first_request_provisions_and_returns_profile() {
    let db: DatabaseConnection = common::setup_db().await;
    let app = init_app!(db);
    let sub = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header(bearer(sub, "robin@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], sub.to_string());
    assert_eq!(body["email"], "robin@example.com");
    assert_eq!(body["first_name"], "Robin");

    // Same token again: same identity, no duplicate.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header(bearer(sub, "robin@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_admin_logs_forbidden_for_non_admin() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin-logs")
            .insert_header(bearer(Uuid::new_v4(), "member@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_admin_logs_ok_for_admin() {
    let db = common::setup_db().await;
    let admin_id = Uuid::new_v4();

    // Provision through one request, then grant admin out of band.
    let app = init_app!(db);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header(bearer(admin_id, "admin@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    common::grant_role(&db, admin_id, "admin").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin-logs")
            .insert_header(bearer(admin_id, "admin@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["metadata"]["total"], 0);
}

#[actix_web::test]
async fn test_non_admin_cannot_issue_api_keys() {
    let db = common::setup_db().await;
    let app = init_app!(db);
    let member = Uuid::new_v4();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/users/{}/api-keys", member))
            .insert_header(bearer(member, "member@example.com"))
            .set_json(serde_json::json!({"name": "sneaky"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_external_donation_requires_valid_api_key() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let kiosk = common::seed_user(&db, "kiosk@example.com").await;

    let created = api_key_service::create(
        &db,
        admin.id,
        kiosk.id,
        &members_server::models::CreateApiKeyRequest {
            name: "kiosk".to_string(),
            expires_at: None,
        },
    )
    .await
    .unwrap();

    let app = init_app!(db);
    let donation = serde_json::json!({"amount_in_cents": 1500});

    // No key
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/external/donations")
            .set_json(&donation)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Wrong key
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/external/donations")
            .insert_header(("X-API-Key", "mbr_nope"))
            .set_json(&donation)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Real key
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/external/donations")
            .insert_header(("X-API-Key", created.key.as_str()))
            .set_json(&donation)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["amount_in_cents"], 1500);
}

#[actix_web::test]
async fn test_profile_update_is_self_or_admin() {
    let db = common::setup_db().await;
    let app = init_app!(db);
    let me = Uuid::new_v4();
    let someone_else = common::seed_user(&db, "other@example.com").await;

    // Provision me.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header(bearer(me, "me@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Updating someone else without admin: forbidden.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/users/{}", someone_else.id))
            .insert_header(bearer(me, "me@example.com"))
            .set_json(serde_json::json!({"phone": "555-0100"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // Updating myself: fine.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/users/{}", me))
            .insert_header(bearer(me, "me@example.com"))
            .set_json(serde_json::json!({"postal_code": "90210"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["postal_code"], "90210");
}
