//! Badge endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::BadgeRequest;
use crate::services::badge as badge_service;

/// List all badges with their stations.
#[utoipa::path(
    get,
    path = "/api/v1/badges",
    tag = "Badges",
    responses(
        (status = 200, description = "All badges", body = [crate::models::BadgeResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
#[get("/badges")]
pub async fn list_badges(
    _auth: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let badges = badge_service::get_all(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(badges))
}

/// Get one badge.
#[utoipa::path(
    get,
    path = "/api/v1/badges/{id}",
    tag = "Badges",
    params(("id" = Uuid, Path, description = "Badge id")),
    responses(
        (status = 200, description = "Badge detail", body = crate::models::BadgeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Badge not found")
    ),
    security(("bearer" = []))
)]
#[get("/badges/{id}")]
pub async fn get_badge(
    _auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let badge = badge_service::get(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(badge))
}

/// Create a badge. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/badges",
    tag = "Badges",
    request_body = BadgeRequest,
    responses(
        (status = 200, description = "Created badge", body = crate::models::BadgeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Badge name or station already taken")
    ),
    security(("bearer" = []))
)]
#[post("/badges")]
pub async fn create_badge(
    auth: AuthUser,
    body: web::Json<BadgeRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let badge = badge_service::create(db.get_ref(), auth.current.id(), &body).await?;
    Ok(HttpResponse::Ok().json(badge))
}

/// Update a badge. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/badges/{id}",
    tag = "Badges",
    params(("id" = Uuid, Path, description = "Badge id")),
    request_body = BadgeRequest,
    responses(
        (status = 200, description = "Updated badge", body = crate::models::BadgeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Badge not found"),
        (status = 409, description = "Badge name or station already taken")
    ),
    security(("bearer" = []))
)]
#[put("/badges/{id}")]
pub async fn update_badge(
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<BadgeRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let badge = badge_service::update(db.get_ref(), auth.current.id(), *path, &body).await?;
    Ok(HttpResponse::Ok().json(badge))
}

/// Delete a badge. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/badges/{id}",
    tag = "Badges",
    params(("id" = Uuid, Path, description = "Badge id")),
    responses(
        (status = 204, description = "Badge deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Badge not found")
    ),
    security(("bearer" = []))
)]
#[delete("/badges/{id}")]
pub async fn delete_badge(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    badge_service::delete(db.get_ref(), auth.current.id(), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure badge routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_badges)
        .service(get_badge)
        .service(create_badge)
        .service(update_badge)
        .service(delete_badge);
}
