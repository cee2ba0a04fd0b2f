//! Identity provisioning and user profile operations.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, IntoActiveModel, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{CurrentUser, Role, VerifiedClaims};
use crate::db::{self, constraint};
use crate::error::{AppError, AppResult};
use crate::models::{Page, UpdateUserRequest, UserDetail, UserSummary};
use crate::services::webhook::WebhookNotifier;

/// Display-name placeholders used when the token carries no hints.
const DEFAULT_FIRST_NAME: &str = "New";
const DEFAULT_LAST_NAME: &str = "Member";

/// Resolve a verified claim to a persisted identity, creating one on first
/// sight, and load everything the authorization predicates need.
///
/// Provisioning is idempotent on the subject id: a concurrent request for
/// the same new subject either finds the row the winner inserted or trips
/// the storage uniqueness constraint, which surfaces as a server error
/// rather than a duplicate or overwritten identity.
pub async fn provision(
    db: &DatabaseConnection,
    webhook: &WebhookNotifier,
    claims: &VerifiedClaims,
) -> AppResult<CurrentUser> {
    let user = match db::users::find_by_id(db, claims.subject_id).await? {
        Some(user) => user,
        None => {
            let first_name = claims.first_name.as_deref().unwrap_or(DEFAULT_FIRST_NAME);
            let last_name = claims.last_name.as_deref().unwrap_or(DEFAULT_LAST_NAME);

            match db::users::insert(db, claims.subject_id, first_name, last_name, &claims.email)
                .await
            {
                Ok(user) => {
                    info!("Provisioned new member {} ({})", user.id, user.email);

                    // Registration webhook is fire-and-forget and runs
                    // outside any transaction; its failure never unwinds
                    // provisioning.
                    let notifier = webhook.clone();
                    let created = user.clone();
                    tokio::spawn(async move {
                        notifier.member_registered(&created).await;
                    });

                    user
                }
                Err(err) => {
                    let backend = db.get_database_backend();
                    if constraint::for_backend(backend)
                        .unique_constraint(&err)
                        .is_some()
                    {
                        // A racing request beat us to an identity with this
                        // email; never overwrite the existing record.
                        return Err(AppError::Unexpected(format!(
                            "provisioning collision for subject {}",
                            claims.subject_id
                        )));
                    }
                    return Err(err.into());
                }
            }
        }
    };

    let roles = db::users::roles_for(db, user.id)
        .await?
        .into_iter()
        .filter_map(|r| {
            let parsed = Role::parse(&r.role);
            if parsed.is_none() {
                warn!("Ignoring unknown role '{}' for user {}", r.role, r.user_id);
            }
            parsed
        })
        .collect();

    let instructor_station_ids = db::users::instructor_station_ids(db, user.id).await?;

    Ok(CurrentUser {
        user,
        roles,
        instructor_station_ids,
    })
}

/// Detailed view of one user. Hidden contact fields are revealed only to the
/// user themselves.
pub async fn get_detail(
    db: &DatabaseConnection,
    id: Uuid,
    requester: Uuid,
) -> AppResult<UserDetail> {
    let user = db::users::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let roles = db::users::roles_for(db, id)
        .await?
        .into_iter()
        .map(|r| r.role)
        .collect();
    let membership_level = db::users::membership_level_for(db, id).await?;
    let instructor_station_ids = db::users::instructor_station_ids(db, id).await?;

    Ok(UserDetail::from_model(
        user,
        roles,
        membership_level,
        instructor_station_ids,
        requester == id,
    ))
}

/// Update a user's profile fields. No audit entry: profile edits are not a
/// privileged mutation.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    req: &UpdateUserRequest,
) -> AppResult<UserDetail> {
    let user = db::users::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let mut active = user.into_active_model();
    if let Some(first_name) = &req.first_name {
        active.first_name = Set(first_name.clone());
    }
    if let Some(last_name) = &req.last_name {
        active.last_name = Set(last_name.clone());
    }
    if let Some(phone) = &req.phone {
        active.phone = Set(Some(phone.clone()));
    }
    if let Some(email_visible) = req.email_visible {
        active.email_visible = Set(Some(email_visible));
    }
    if let Some(phone_visible) = req.phone_visible {
        active.phone_visible = Set(Some(phone_visible));
    }
    if let Some(postal_code) = &req.postal_code {
        active.postal_code = Set(Some(postal_code.clone()));
    }

    db::users::update(db, active).await?;
    get_detail(db, id, id).await
}

/// Paginated member directory with optional name/email search. Contact
/// fields honor the visibility flags for every row.
pub async fn list(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
    per_page: u64,
) -> AppResult<Page<UserSummary>> {
    let (users, total) = db::users::search_page(db, search, page, per_page).await?;

    let mut levels = HashMap::new();
    for user in &users {
        if let Some(level) = db::users::membership_level_for(db, user.id).await? {
            levels.insert(user.id, level);
        }
    }

    let items = users
        .into_iter()
        .map(|u| {
            let level = levels.remove(&u.id);
            UserSummary::from_model(u, level, false)
        })
        .collect();

    Ok(Page::new(items, page, per_page, total))
}
