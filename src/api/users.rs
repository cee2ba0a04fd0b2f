//! User endpoints.

use actix_web::{HttpResponse, get, put, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::UpdateUserRequest;
use crate::services::user as user_service;

/// User listing query parameters.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListUsersParams {
    pub page: Option<u64>,
    pub per: Option<u64>,
    /// Matches first name, last name (per term) or email (whole query).
    pub search: Option<String>,
}

/// Get the calling member's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = crate::models::UserDetail),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
#[get("/users/me")]
pub async fn get_me(auth: AuthUser, db: web::Data<DatabaseConnection>) -> AppResult<HttpResponse> {
    let id = auth.current.id();
    let detail = user_service::get_detail(db.get_ref(), id, id).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// List members with optional search.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Page of users"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
#[get("/users")]
pub async fn list_users(
    _auth: AuthUser,
    params: web::Query<ListUsersParams>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let page = params.page.unwrap_or(1).max(1);
    let per = params.per.unwrap_or(config.page_size).clamp(1, 100);

    let result = user_service::list(db.get_ref(), params.search.as_deref(), page, per).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Get one member's profile. Hidden contact fields are blanked for everyone
/// but the member themselves.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail", body = crate::models::UserDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
#[get("/users/{id}")]
pub async fn get_user(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let detail = user_service::get_detail(db.get_ref(), *path, auth.current.id()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Update a member's profile. Self or admin only.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = crate::models::UserDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
#[put("/users/{id}")]
pub async fn update_user(
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_self_or_admin(*path) {
        return Err(AppError::Forbidden);
    }

    let detail = user_service::update(db.get_ref(), *path, &body).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_me)
        .service(list_users)
        .service(get_user)
        .service(update_user);
}
