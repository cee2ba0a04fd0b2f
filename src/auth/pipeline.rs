//! Actix extractor composing the authenticated request pipeline:
//! verify bearer token, provision the identity just-in-time, and load the
//! data the authorization predicates need.
//!
//! # Security
//! - The bearer token is wrapped in `SecretString` as soon as it leaves the
//!   header and never logged
//! - Claim fields are only used after signature verification
//! - Handlers receive a typed `CurrentUser`; there is no ambient identity

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use sea_orm::DatabaseConnection;
use secrecy::{ExposeSecret, SecretString};

use crate::auth::{CurrentUser, TokenVerifier};
use crate::error::AppError;
use crate::services::{user as user_service, webhook::WebhookNotifier};

/// Extractor that requires a valid bearer token.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: AuthUser) -> impl Responder {
///     // auth.current is the provisioned, fully-loaded identity
/// }
/// ```
pub struct AuthUser {
    pub current: CurrentUser,
}

/// Extract the bearer token from the Authorization header, wrapping it in
/// SecretString. None if the header is missing or not a bearer scheme.
fn bearer_token(req: &HttpRequest) -> Option<SecretString> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| SecretString::from(s.trim().to_string()))
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let verifier = req
                .app_data::<web::Data<TokenVerifier>>()
                .ok_or_else(|| {
                    AppError::Unexpected("token verifier not configured".to_string())
                })?
                .clone();
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| AppError::Unexpected("database not configured".to_string()))?
                .clone();
            let webhook = req
                .app_data::<web::Data<WebhookNotifier>>()
                .ok_or_else(|| {
                    AppError::Unexpected("webhook notifier not configured".to_string())
                })?
                .clone();

            let token = bearer_token(&req).ok_or_else(|| {
                AppError::TokenInvalid("missing bearer token".to_string())
            })?;

            // Synchronous, CPU-only validation; no claim is trusted before
            // this returns.
            let claims = verifier.verify(token.expose_secret())?;

            // Just-in-time provisioning plus eager role/instructor loading.
            let current = user_service::provision(db.get_ref(), webhook.get_ref(), &claims).await?;

            Ok(AuthUser { current })
        })
    }
}
