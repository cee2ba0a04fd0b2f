//! Badge management.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, IntoActiveModel, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::{self, constraint};
use crate::error::{AppError, AppResult};
use crate::models::{BadgeRequest, BadgeResponse};
use crate::services::admin_log;

/// Map a badge mutation failure onto the unique fields a caller can violate.
fn badge_unique_checks(backend: DatabaseBackend, err: DbErr) -> AppError {
    constraint::translate_unique(backend, err, &[("name", "name"), ("station", "station")])
}

pub async fn get(db: &DatabaseConnection, id: Uuid) -> AppResult<BadgeResponse> {
    let (badge, station) = db::badges::find_with_station(db, id)
        .await?
        .ok_or(AppError::NotFound("Badge"))?;

    let station = station
        .ok_or_else(|| AppError::Unexpected(format!("badge {} references a missing station", id)))?;

    Ok(BadgeResponse::from_models(badge, station))
}

pub async fn get_all(db: &DatabaseConnection) -> AppResult<Vec<BadgeResponse>> {
    let rows = db::badges::list_with_stations(db).await?;

    rows.into_iter()
        .map(|(badge, station)| {
            let station = station.ok_or_else(|| {
                AppError::Unexpected(format!("badge {} references a missing station", badge.id))
            })?;
            Ok(BadgeResponse::from_models(badge, station))
        })
        .collect()
}

/// Create a badge for a station. The badge row and its audit entry commit in
/// one transaction; a duplicate name or station surfaces as a conflict.
pub async fn create(
    db: &DatabaseConnection,
    acting_user: Uuid,
    req: &BadgeRequest,
) -> AppResult<BadgeResponse> {
    let station = db::stations::find_by_id(db, req.station_id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    let txn = db.begin().await?;

    let badge = db::badges::insert(&txn, &req.name, req.description.as_deref(), req.station_id)
        .await
        .map_err(|err| badge_unique_checks(db.get_database_backend(), err))?;

    admin_log::add_log(
        &txn,
        acting_user,
        &format!("Created badge {} named {}", badge.id, badge.name),
    )
    .await?;

    txn.commit().await?;

    Ok(BadgeResponse::from_models(badge, station))
}

pub async fn update(
    db: &DatabaseConnection,
    acting_user: Uuid,
    id: Uuid,
    req: &BadgeRequest,
) -> AppResult<BadgeResponse> {
    let (badge, _) = db::badges::find_with_station(db, id)
        .await?
        .ok_or(AppError::NotFound("Badge"))?;

    let station = db::stations::find_by_id(db, req.station_id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    let mut active = badge.into_active_model();
    active.name = Set(req.name.clone());
    active.description = Set(req.description.clone());
    active.station_id = Set(req.station_id);

    let txn = db.begin().await?;

    let badge = db::badges::update(&txn, active)
        .await
        .map_err(|err| badge_unique_checks(db.get_database_backend(), err))?;

    admin_log::add_log(&txn, acting_user, &format!("Updated badge {}", id)).await?;

    txn.commit().await?;

    Ok(BadgeResponse::from_models(badge, station))
}

pub async fn delete(db: &DatabaseConnection, acting_user: Uuid, id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let badge = match db::badges::find_with_station(&txn, id).await? {
        Some((badge, _)) => badge,
        None => return Err(AppError::NotFound("Badge")),
    };

    db::badges::delete(&txn, badge).await?;

    admin_log::add_log(&txn, acting_user, &format!("Deleted badge {}", id)).await?;

    txn.commit().await?;

    Ok(())
}
