//! Donation records.

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::db;
use crate::entity::api_key;
use crate::error::{AppError, AppResult};
use crate::models::{DonationRequest, DonationResponse};
use crate::services::admin_log;

pub async fn get_all(db: &DatabaseConnection) -> AppResult<Vec<DonationResponse>> {
    let rows = db::donations::list_with_users(db).await?;

    Ok(rows
        .into_iter()
        .map(|(donation, user)| DonationResponse::from_models(donation, user))
        .collect())
}

pub async fn get_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<DonationResponse>> {
    let user = db::users::find_by_id(db, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let rows = db::donations::list_for_user(db, user_id).await?;

    Ok(rows
        .into_iter()
        .map(|donation| DonationResponse::from_models(donation, Some(user.clone())))
        .collect())
}

/// Record a donation on behalf of an authenticated admin or accountant.
pub async fn add(
    db: &DatabaseConnection,
    acting_user: Uuid,
    req: &DonationRequest,
) -> AppResult<DonationResponse> {
    let donor = match req.user_id {
        Some(user_id) => Some(
            db::users::find_by_id(db, user_id)
                .await?
                .ok_or(AppError::NotFound("User"))?,
        ),
        None => None,
    };

    let txn = db.begin().await?;

    let donation = db::donations::insert(
        &txn,
        req.user_id,
        req.amount_in_cents,
        req.purpose.as_deref(),
        req.notes.as_deref(),
    )
    .await?;

    admin_log::add_log(
        &txn,
        acting_user,
        &format!(
            "Added donation {} for {} cents",
            donation.id, donation.amount_in_cents
        ),
    )
    .await?;

    txn.commit().await?;

    Ok(DonationResponse::from_models(donation, donor))
}

/// Record a donation submitted by an external integration holding an API
/// key. The audit entry is attributed to the key's owning user.
pub async fn add_with_api_key(
    db: &DatabaseConnection,
    key: &api_key::Model,
    req: &DonationRequest,
) -> AppResult<DonationResponse> {
    add(db, key.user_id, req).await
}

pub async fn delete(db: &DatabaseConnection, acting_user: Uuid, id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let donation = db::donations::find_by_id(&txn, id)
        .await?
        .ok_or(AppError::NotFound("Donation"))?;

    db::donations::delete(&txn, donation).await?;

    admin_log::add_log(&txn, acting_user, &format!("Deleted donation {}", id)).await?;

    txn.commit().await?;

    Ok(())
}
