//! Audit atomicity and constraint-translation tests.
//!
//! The central invariant: a privileged mutation and its audit entry commit
//! as one unit or not at all.

mod common;

use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use members_server::db;
use members_server::entity::badge;
use members_server::error::AppError;
use members_server::models::{BadgeRequest, StationRequest};
use members_server::services::{
    admin_log as admin_log_service, badge as badge_service, instructor as instructor_service,
    station as station_service,
};

fn badge_request(name: &str, station_id: Uuid) -> BadgeRequest {
    BadgeRequest {
        name: name.to_string(),
        description: None,
        station_id,
    }
}

#[tokio::test]
async fn test_badge_create_commits_exactly_one_audit_entry() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let station = common::seed_station(&db, "Electronics").await;

    let created = badge_service::create(&db, admin.id, &badge_request("Soldering", station.id))
        .await
        .expect("badge creation must succeed");

    assert_eq!(created.station.id, station.id);
    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 1);

    let logs = admin_log_service::get_logs(&db, 1, 10).await.unwrap();
    assert_eq!(logs.metadata.total, 1);
    assert_eq!(logs.items[0].user.id, admin.id);
    assert!(logs.items[0].log.contains("Soldering"));
}

#[tokio::test]
async fn test_failed_audit_rolls_back_the_mutation() {
    let db = common::setup_db().await;
    let station = common::seed_station(&db, "Electronics").await;

    // The acting user does not exist, so the audit insert violates its
    // foreign key inside the shared transaction. The badge insert itself
    // succeeded before that point and must be rolled back with it.
    let ghost_admin = Uuid::new_v4();
    let result = badge_service::create(&db, ghost_admin, &badge_request("Soldering", station.id)).await;
    assert!(result.is_err());

    let badges = badge::Entity::find().count(&db).await.unwrap();
    assert_eq!(badges, 0, "mutation must not be visible after audit failure");
    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_badge_name_maps_to_name_conflict() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let station_a = common::seed_station(&db, "Electronics").await;
    let station_b = common::seed_station(&db, "Woodshop").await;

    let first = badge_service::create(&db, admin.id, &badge_request("Soldering", station_a.id))
        .await
        .expect("first badge must succeed");
    assert_eq!(first.station.id, station_a.id);

    let err = badge_service::create(&db, admin.id, &badge_request("Soldering", station_b.id))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::UniqueViolation { field: "name" }),
        "got {:?}",
        err
    );

    // The failed attempt must leave no audit entry behind.
    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_badge_on_station_maps_to_station_conflict() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let station = common::seed_station(&db, "Electronics").await;

    badge_service::create(&db, admin.id, &badge_request("Soldering", station.id))
        .await
        .unwrap();

    let err = badge_service::create(&db, admin.id, &badge_request("Reflow", station.id))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::UniqueViolation { field: "station" }),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_duplicate_station_name_maps_to_name_conflict() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;

    let request = StationRequest {
        name: "Laser".to_string(),
        description: None,
        image_url: None,
    };
    station_service::create(&db, admin.id, &request).await.unwrap();

    let err = station_service::create(&db, admin.id, &request).await.unwrap_err();
    assert!(
        matches!(err, AppError::UniqueViolation { field: "name" }),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_duplicate_instructor_maps_to_instructor_conflict() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let teacher = common::seed_user(&db, "teacher@example.com").await;
    let station = common::seed_station(&db, "Woodshop").await;

    instructor_service::add(&db, admin.id, station.id, teacher.id)
        .await
        .unwrap();

    let err = instructor_service::add(&db, admin.id, station.id, teacher.id)
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::UniqueViolation { field: "instructor" }),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_instructor_for_missing_user_or_station() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let station = common::seed_station(&db, "Woodshop").await;

    let err = instructor_service::add(&db, admin.id, station.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("User")), "got {:?}", err);

    let err = instructor_service::add(&db, admin.id, Uuid::new_v4(), admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Station")), "got {:?}", err);
}

#[tokio::test]
async fn test_delete_audits_in_same_transaction() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;
    let station = common::seed_station(&db, "Electronics").await;

    let created = badge_service::create(&db, admin.id, &badge_request("Soldering", station.id))
        .await
        .unwrap();

    badge_service::delete(&db, admin.id, created.id).await.unwrap();

    assert_eq!(badge::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(db::admin_logs::count(&db).await.unwrap(), 2);

    let err = badge_service::delete(&db, admin.id, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Badge")), "got {:?}", err);
}

#[tokio::test]
async fn test_logs_page_in_creation_order() {
    let db = common::setup_db().await;
    let admin = common::seed_user(&db, "admin@example.com").await;

    for name in ["Laser", "Kiln", "Lathe"] {
        let request = StationRequest {
            name: name.to_string(),
            description: None,
            image_url: None,
        };
        station_service::create(&db, admin.id, &request).await.unwrap();
    }

    let page = admin_log_service::get_logs(&db, 1, 2).await.unwrap();
    assert_eq!(page.metadata.total, 3);
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].log.contains("Laser"));
    assert!(page.items[1].log.contains("Kiln"));

    let page2 = admin_log_service::get_logs(&db, 2, 2).await.unwrap();
    assert_eq!(page2.items.len(), 1);
    assert!(page2.items[0].log.contains("Lathe"));
}
