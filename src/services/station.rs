//! Station management.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, IntoActiveModel, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::{self, constraint};
use crate::error::{AppError, AppResult};
use crate::models::{InstructorDto, StationRequest, StationResponse, StationSummary};
use crate::services::admin_log;

fn station_unique_checks(backend: DatabaseBackend, err: DbErr) -> AppError {
    constraint::translate_unique(backend, err, &[("name", "name")])
}

/// A station with its instructor roster.
pub async fn get(db: &DatabaseConnection, id: Uuid) -> AppResult<StationResponse> {
    let station = db::stations::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    let instructors = instructors_for(db, id).await?;

    Ok(StationResponse::from_model(station, instructors))
}

pub async fn get_all(db: &DatabaseConnection) -> AppResult<Vec<StationSummary>> {
    let stations = db::stations::list_all(db).await?;
    Ok(stations.into_iter().map(Into::into).collect())
}

pub async fn create(
    db: &DatabaseConnection,
    acting_user: Uuid,
    req: &StationRequest,
) -> AppResult<StationResponse> {
    let txn = db.begin().await?;

    let station = db::stations::insert(
        &txn,
        &req.name,
        req.description.as_deref(),
        req.image_url.as_deref(),
    )
    .await
    .map_err(|err| station_unique_checks(db.get_database_backend(), err))?;

    admin_log::add_log(
        &txn,
        acting_user,
        &format!("Created station {} named {}", station.id, station.name),
    )
    .await?;

    txn.commit().await?;

    Ok(StationResponse::from_model(station, Vec::new()))
}

pub async fn update(
    db: &DatabaseConnection,
    acting_user: Uuid,
    id: Uuid,
    req: &StationRequest,
) -> AppResult<StationResponse> {
    let station = db::stations::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    let mut active = station.into_active_model();
    active.name = Set(req.name.clone());
    active.description = Set(req.description.clone());
    active.image_url = Set(req.image_url.clone());

    let txn = db.begin().await?;

    let station = db::stations::update(&txn, active)
        .await
        .map_err(|err| station_unique_checks(db.get_database_backend(), err))?;

    admin_log::add_log(&txn, acting_user, &format!("Updated station {}", id)).await?;

    txn.commit().await?;

    let instructors = instructors_for(db, id).await?;
    Ok(StationResponse::from_model(station, instructors))
}

pub async fn delete(db: &DatabaseConnection, acting_user: Uuid, id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let station = db::stations::find_by_id(&txn, id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    db::stations::delete(&txn, station).await?;

    admin_log::add_log(&txn, acting_user, &format!("Deleted station {}", id)).await?;

    txn.commit().await?;

    Ok(())
}

async fn instructors_for(db: &DatabaseConnection, station_id: Uuid) -> AppResult<Vec<InstructorDto>> {
    let rows = db::stations::instructors_with_users(db, station_id).await?;

    rows.into_iter()
        .map(|(row, user)| {
            let user = user.ok_or_else(|| {
                AppError::Unexpected(format!("instructor {} references a missing user", row.id))
            })?;
            Ok(InstructorDto::from_models(row, user))
        })
        .collect()
}
