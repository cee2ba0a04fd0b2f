//! Station instructor endpoints. Admin only.

use actix_web::{HttpResponse, delete, post, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::InstructorRequest;
use crate::services::instructor as instructor_service;

/// Add an instructor to a station.
#[utoipa::path(
    post,
    path = "/api/v1/stations/{id}/instructors",
    tag = "Instructors",
    params(("id" = Uuid, Path, description = "Station id")),
    request_body = InstructorRequest,
    responses(
        (status = 200, description = "Instructor added", body = crate::models::InstructorDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "User or station not found"),
        (status = 409, description = "Already an instructor for this station")
    ),
    security(("bearer" = []))
)]
#[post("/stations/{id}/instructors")]
pub async fn add_instructor(
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<InstructorRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let instructor =
        instructor_service::add(db.get_ref(), auth.current.id(), *path, body.user_id).await?;
    Ok(HttpResponse::Ok().json(instructor))
}

/// Remove an instructor from a station.
#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}/instructors/{user_id}",
    tag = "Instructors",
    params(
        ("id" = Uuid, Path, description = "Station id"),
        ("user_id" = Uuid, Path, description = "Instructor's user id")
    ),
    responses(
        (status = 204, description = "Instructor removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer" = []))
)]
#[delete("/stations/{id}/instructors/{user_id}")]
pub async fn remove_instructor(
    auth: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let (station_id, user_id) = *path;
    instructor_service::remove(db.get_ref(), auth.current.id(), station_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure instructor routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_instructor).service(remove_instructor);
}
