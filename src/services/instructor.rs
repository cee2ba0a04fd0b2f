//! Station instructor assignment.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

use crate::db::{self, constraint};
use crate::error::{AppError, AppResult};
use crate::models::InstructorDto;
use crate::services::admin_log;

fn instructor_unique_checks(backend: DatabaseBackend, err: DbErr) -> AppError {
    constraint::translate_unique(backend, err, &[("instructor", "instructor")])
}

/// Make a user an instructor for a station. Duplicate assignments surface as
/// a conflict on the `instructor` field.
pub async fn add(
    db: &DatabaseConnection,
    acting_user: Uuid,
    station_id: Uuid,
    user_id: Uuid,
) -> AppResult<InstructorDto> {
    let user = db::users::find_by_id(db, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    db::stations::find_by_id(db, station_id)
        .await?
        .ok_or(AppError::NotFound("Station"))?;

    let txn = db.begin().await?;

    let row = db::instructors::insert(&txn, user_id, station_id)
        .await
        .map_err(|err| instructor_unique_checks(db.get_database_backend(), err))?;

    admin_log::add_log(
        &txn,
        acting_user,
        &format!("Added instructor {} to station {}", user_id, station_id),
    )
    .await?;

    txn.commit().await?;

    Ok(InstructorDto::from_models(row, user))
}

pub async fn remove(
    db: &DatabaseConnection,
    acting_user: Uuid,
    station_id: Uuid,
    user_id: Uuid,
) -> AppResult<()> {
    let txn = db.begin().await?;

    let row = db::instructors::find(&txn, user_id, station_id)
        .await?
        .ok_or(AppError::NotFound("Instructor"))?;

    db::instructors::delete(&txn, row).await?;

    admin_log::add_log(
        &txn,
        acting_user,
        &format!("Removed instructor {} from station {}", user_id, station_id),
    )
    .await?;

    txn.commit().await?;

    Ok(())
}
