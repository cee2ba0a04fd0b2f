//! Audit logging for privileged mutations.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::{AdminLogDto, Page, UserSummary};

/// Append one audit entry describing an action taken by `acting_user`.
///
/// `conn` must be the transaction handle of the mutation being audited:
/// the mutation and its log entry commit or roll back as one unit. Passing
/// the pooled connection here would silently break that invariant, so every
/// caller threads its open transaction through.
pub async fn add_log<C: ConnectionTrait>(
    conn: &C,
    acting_user: Uuid,
    message: &str,
) -> AppResult<()> {
    db::admin_logs::insert(conn, acting_user, message).await?;
    Ok(())
}

/// One page of audit entries in creation order, each with the acting user's
/// summary embedded. Admin gating happens in the route layer.
pub async fn get_logs(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> AppResult<Page<AdminLogDto>> {
    let (rows, total) = db::admin_logs::page(db, page, per_page).await?;

    let mut items = Vec::with_capacity(rows.len());
    for (log, user) in rows {
        // The foreign key guarantees the user existed when the entry was
        // written; a miss here is a data-integrity failure worth surfacing.
        let user = user.ok_or_else(|| {
            AppError::Unexpected(format!("audit entry {} references a missing user", log.id))
        })?;

        let membership_level = db::users::membership_level_for(db, user.id).await?;

        items.push(AdminLogDto {
            id: log.id,
            user: UserSummary::from_model(user, membership_level, true),
            log: log.log,
            created_at: log.created_at,
        });
    }

    Ok(Page::new(items, page, per_page, total))
}
