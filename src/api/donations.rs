//! Donation endpoints.
//!
//! Donations come in through two doors: authenticated admins/accountants,
//! and external integrations (payment processors, kiosk hardware) holding an
//! API key. The external route verifies the key and audits the donation
//! under the key's owning user.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use sea_orm::DatabaseConnection;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::auth::{AuthUser, Role};
use crate::config::API_KEY_HEADER;
use crate::error::{AppError, AppResult};
use crate::models::DonationRequest;
use crate::services::{api_key as api_key_service, donation as donation_service};

fn can_manage_donations(auth: &AuthUser) -> bool {
    auth.current.is_admin() || auth.current.has_role(Role::Accountant)
}

/// List all donations. Admin or accountant only.
#[utoipa::path(
    get,
    path = "/api/v1/donations",
    tag = "Donations",
    responses(
        (status = 200, description = "All donations", body = [crate::models::DonationResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer" = []))
)]
#[get("/donations")]
pub async fn list_donations(
    auth: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !can_manage_donations(&auth) {
        return Err(AppError::Forbidden);
    }

    let donations = donation_service::get_all(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(donations))
}

/// List a member's donations. Self, admin or accountant.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/donations",
    tag = "Donations",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The member's donations", body = [crate::models::DonationResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
#[get("/users/{id}/donations")]
pub async fn list_user_donations(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_self_or_admin(*path) && !auth.current.has_role(Role::Accountant) {
        return Err(AppError::Forbidden);
    }

    let donations = donation_service::get_for_user(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(donations))
}

/// Record a donation. Admin or accountant only.
#[utoipa::path(
    post,
    path = "/api/v1/donations",
    tag = "Donations",
    request_body = DonationRequest,
    responses(
        (status = 200, description = "Recorded donation", body = crate::models::DonationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
#[post("/donations")]
pub async fn create_donation(
    auth: AuthUser,
    body: web::Json<DonationRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !can_manage_donations(&auth) {
        return Err(AppError::Forbidden);
    }

    let donation = donation_service::add(db.get_ref(), auth.current.id(), &body).await?;
    Ok(HttpResponse::Ok().json(donation))
}

/// Record a donation from an external integration authenticated with an API
/// key in the X-API-Key header.
#[utoipa::path(
    post,
    path = "/api/v1/external/donations",
    tag = "Donations",
    request_body = DonationRequest,
    responses(
        (status = 200, description = "Recorded donation", body = crate::models::DonationResponse),
        (status = 401, description = "Missing, invalid, expired or inactive API key"),
        (status = 404, description = "User not found")
    ),
    security(("api_key" = []))
)]
#[post("/external/donations")]
pub async fn create_external_donation(
    req: HttpRequest,
    body: web::Json<DonationRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let presented: SecretString = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
        .ok_or(AppError::InvalidApiKey)?;

    let key = api_key_service::verify(db.get_ref(), presented.expose_secret()).await?;

    let donation = donation_service::add_with_api_key(db.get_ref(), &key, &body).await?;
    Ok(HttpResponse::Ok().json(donation))
}

/// Delete a donation. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/donations/{id}",
    tag = "Donations",
    params(("id" = Uuid, Path, description = "Donation id")),
    responses(
        (status = 204, description = "Donation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Donation not found")
    ),
    security(("bearer" = []))
)]
#[delete("/donations/{id}")]
pub async fn delete_donation(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    donation_service::delete(db.get_ref(), auth.current.id(), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure donation routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_donations)
        .service(list_user_donations)
        .service(create_donation)
        .service(create_external_donation)
        .service(delete_donation);
}
