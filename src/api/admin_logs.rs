//! Audit log endpoints. Admin only.

use actix_web::{HttpResponse, get, web};
use sea_orm::DatabaseConnection;
use tracing::error;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::PageParams;
use crate::services::admin_log as admin_log_service;

/// Get a paginated list of audit log entries.
#[utoipa::path(
    get,
    path = "/api/v1/admin-logs",
    tag = "AdminLogs",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("per" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of audit entries"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer" = []))
)]
#[get("/admin-logs")]
pub async fn get_admin_logs(
    auth: AuthUser,
    params: web::Query<PageParams>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        error!(
            user_id = %auth.current.id(),
            "Non admin user attempted to access admin logs"
        );
        return Err(AppError::Forbidden);
    }

    let logs = admin_log_service::get_logs(
        db.get_ref(),
        params.page(),
        params.per(config.page_size),
    )
    .await?;

    Ok(HttpResponse::Ok().json(logs))
}

/// Configure admin log routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_admin_logs);
}
