//! Station endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::StationRequest;
use crate::services::station as station_service;

/// List all stations.
#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Stations",
    responses(
        (status = 200, description = "All stations", body = [crate::models::StationSummary]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
#[get("/stations")]
pub async fn list_stations(
    _auth: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let stations = station_service::get_all(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stations))
}

/// Get one station with its instructor roster.
#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = Uuid, Path, description = "Station id")),
    responses(
        (status = 200, description = "Station detail", body = crate::models::StationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Station not found")
    ),
    security(("bearer" = []))
)]
#[get("/stations/{id}")]
pub async fn get_station(
    _auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let station = station_service::get(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(station))
}

/// Create a station. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Stations",
    request_body = StationRequest,
    responses(
        (status = 200, description = "Created station", body = crate::models::StationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Station name already exists")
    ),
    security(("bearer" = []))
)]
#[post("/stations")]
pub async fn create_station(
    auth: AuthUser,
    body: web::Json<StationRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let station = station_service::create(db.get_ref(), auth.current.id(), &body).await?;
    Ok(HttpResponse::Ok().json(station))
}

/// Update a station. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = Uuid, Path, description = "Station id")),
    request_body = StationRequest,
    responses(
        (status = 200, description = "Updated station", body = crate::models::StationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Station name already exists")
    ),
    security(("bearer" = []))
)]
#[put("/stations/{id}")]
pub async fn update_station(
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<StationRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let station =
        station_service::update(db.get_ref(), auth.current.id(), *path, &body).await?;
    Ok(HttpResponse::Ok().json(station))
}

/// Delete a station. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = Uuid, Path, description = "Station id")),
    responses(
        (status = 204, description = "Station deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Station not found")
    ),
    security(("bearer" = []))
)]
#[delete("/stations/{id}")]
pub async fn delete_station(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    station_service::delete(db.get_ref(), auth.current.id(), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure station routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_stations)
        .service(get_station)
        .service(create_station)
        .service(update_station)
        .service(delete_station);
}
