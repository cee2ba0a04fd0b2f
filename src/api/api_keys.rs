//! API key management endpoints. Admin only.

use actix_web::{HttpResponse, delete, get, post, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::CreateApiKeyRequest;
use crate::services::api_key as api_key_service;

/// Get all API keys for a user. The secret field is always blank; this
/// route exists only to show metadata.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/api-keys",
    tag = "ApiKeys",
    params(("user_id" = Uuid, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "API keys for the user", body = [crate::models::ApiKeyResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer" = []))
)]
#[get("/users/{user_id}/api-keys")]
pub async fn get_user_api_keys(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let keys = api_key_service::list_for_user(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(keys))
}

/// Create an API key for a user. The response carries the plaintext secret
/// exactly this once; it is never retrievable again.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/api-keys",
    tag = "ApiKeys",
    params(("user_id" = Uuid, Path, description = "Owning user id")),
    request_body = CreateApiKeyRequest,
    responses(
        (status = 200, description = "Created key including its secret", body = crate::models::ApiKeyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "User not found")
    ),
    security(("bearer" = []))
)]
#[post("/users/{user_id}/api-keys")]
pub async fn create_api_key(
    auth: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<CreateApiKeyRequest>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    let name = body.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::InvalidInput(
            "name must be between 1 and 100 characters".to_string(),
        ));
    }

    let key =
        api_key_service::create(db.get_ref(), auth.current.id(), *path, &body).await?;
    Ok(HttpResponse::Ok().json(key))
}

/// Revoke an API key.
#[utoipa::path(
    delete,
    path = "/api/v1/api-keys/{id}",
    tag = "ApiKeys",
    params(("id" = Uuid, Path, description = "API key id")),
    responses(
        (status = 204, description = "Key revoked"),
        (status = 401, description = "Unauthorized or key not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer" = []))
)]
#[delete("/api-keys/{id}")]
pub async fn delete_api_key(
    auth: AuthUser,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    if !auth.current.is_admin() {
        return Err(AppError::Forbidden);
    }

    api_key_service::delete(db.get_ref(), auth.current.id(), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure API key routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_user_api_keys)
        .service(create_api_key)
        .service(delete_api_key);
}
