//! API key lifecycle tests: issue, verify, list, revoke.

mod common;

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
use uuid::Uuid;

use members_server::db;
use members_server::error::AppError;
use members_server::models::CreateApiKeyRequest;
use members_server::services::api_key as api_key_service;

fn request(name: &str) -> CreateApiKeyRequest {
    CreateApiKeyRequest {
        name: name.to_string(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_create_then_verify_roundtrip() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    let created = api_key_service::create(&db, admin.id, owner.id, &request("door controller"))
        .await
        .expect("key creation must succeed");

    assert!(created.key.starts_with("mbr_"));
    assert!(created.is_active);
    assert_eq!(created.user_id, owner.id);
    assert_eq!(created.created_by, admin.id);

    // Verification is repeatable, not single-use.
    for _ in 0..2 {
        let verified = api_key_service::verify(&db, &created.key)
            .await
            .expect("verification must succeed");
        assert_eq!(verified.id, created.id);
    }
}

#[tokio::test]
async fn test_create_writes_audit_entry_atomically() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    api_key_service::create(&db, admin.id, owner.id, &request("door controller"))
        .await
        .unwrap();

    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_for_missing_user_fails() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;

    let err = api_key_service::create(&db, admin.id, Uuid::new_v4(), &request("orphan"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("User")), "got {:?}", err);
}

#[tokio::test]
async fn test_wrong_secret_fails_with_invalid_api_key() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    api_key_service::create(&db, admin.id, owner.id, &request("door controller"))
        .await
        .unwrap();

    let err = api_key_service::verify(&db, "mbr_definitelynotthesecret")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidApiKey), "got {:?}", err);
}

#[tokio::test]
async fn test_expired_key_fails_even_though_still_active() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    let req = CreateApiKeyRequest {
        name: "short lived".to_string(),
        expires_at: Some(Utc::now() - Duration::hours(1)),
    };
    let created = api_key_service::create(&db, admin.id, owner.id, &req)
        .await
        .unwrap();

    let err = api_key_service::verify(&db, &created.key).await.unwrap_err();
    assert!(matches!(err, AppError::ApiKeyExpired), "got {:?}", err);

    // Expiry is derived, never written back: the listing still shows the key
    // as active.
    let listed = api_key_service::list_for_user(&db, owner.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_active);
}

#[tokio::test]
async fn test_deactivated_key_fails_with_inactive() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    let created = api_key_service::create(&db, admin.id, owner.id, &request("door controller"))
        .await
        .unwrap();

    let row = db::api_keys::find_by_id(&db, created.id).await.unwrap().unwrap();
    let mut active = row.into_active_model();
    active.is_active = Set(false);
    active.update(&db).await.unwrap();

    let err = api_key_service::verify(&db, &created.key).await.unwrap_err();
    assert!(matches!(err, AppError::ApiKeyInactive), "got {:?}", err);
}

#[tokio::test]
async fn test_listing_never_contains_a_secret() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    api_key_service::create(&db, admin.id, owner.id, &request("one")).await.unwrap();
    api_key_service::create(&db, admin.id, owner.id, &request("two")).await.unwrap();

    let listed = api_key_service::list_for_user(&db, owner.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    for key in &listed {
        assert!(key.key.is_empty(), "listing leaked a secret for {}", key.id);
    }
}

#[tokio::test]
async fn test_revocation_removes_key_and_audits() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let owner = common::seed_user(&db, "door@example.com").await;

    let created = api_key_service::create(&db, admin.id, owner.id, &request("door controller"))
        .await
        .unwrap();

    api_key_service::delete(&db, admin.id, created.id).await.unwrap();

    // The revoked key is unusable and no longer listed.
    let err = api_key_service::verify(&db, &created.key).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidApiKey), "got {:?}", err);
    assert!(api_key_service::list_for_user(&db, owner.id).await.unwrap().is_empty());

    // Create + delete both audited.
    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 2);

    // There is no restore path; a second delete cannot find the key.
    let err = api_key_service::delete(&db, admin.id, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::ApiKeyNotFound), "got {:?}", err);
}

#[tokio::test]
async fn test_external_donation_with_api_key() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let kiosk = common::seed_user(&db, "kiosk@example.com").await;

    let created = api_key_service::create(&db, admin.id, kiosk.id, &request("donation kiosk"))
        .await
        .unwrap();

    let key = api_key_service::verify(&db, &created.key).await.unwrap();
    let donation = members_server::services::donation::add_with_api_key(
        &db,
        &key,
        &members_server::models::DonationRequest {
            user_id: None,
            amount_in_cents: 2500,
            purpose: Some("laser fund".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(donation.amount_in_cents, 2500);

    // The audit entry is attributed to the key's owning user.
    let logs = members_server::services::admin_log::get_logs(&db, 1, 10).await.unwrap();
    let donation_log = logs
        .items
        .iter()
        .find(|l| l.log.contains("donation"))
        .expect("donation audit entry expected");
    assert_eq!(donation_log.user.id, kiosk.id);
}
