//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Members Server",
        version = "0.3.0",
        description = "Membership management API for a community workshop: members, roles, stations, badges, instructors, donations, API keys and audit logs"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Users
        api::users::get_me,
        api::users::list_users,
        api::users::get_user,
        api::users::update_user,
        // API keys
        api::api_keys::get_user_api_keys,
        api::api_keys::create_api_key,
        api::api_keys::delete_api_key,
        // Audit logs
        api::admin_logs::get_admin_logs,
        // Stations
        api::stations::list_stations,
        api::stations::get_station,
        api::stations::create_station,
        api::stations::update_station,
        api::stations::delete_station,
        // Instructors
        api::instructors::add_instructor,
        api::instructors::remove_instructor,
        // Badges
        api::badges::list_badges,
        api::badges::get_badge,
        api::badges::create_badge,
        api::badges::update_badge,
        api::badges::delete_badge,
        // Donations
        api::donations::list_donations,
        api::donations::list_user_donations,
        api::donations::create_donation,
        api::donations::create_external_donation,
        api::donations::delete_donation,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::PageMeta,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Users
            models::UserSummary,
            models::UserDetail,
            models::UpdateUserRequest,
            models::MembershipLevelDto,
            api::users::ListUsersParams,
            // API keys
            models::ApiKeyResponse,
            models::CreateApiKeyRequest,
            // Audit logs
            models::AdminLogDto,
            // Stations and instructors
            models::StationSummary,
            models::StationResponse,
            models::StationRequest,
            models::InstructorDto,
            models::InstructorRequest,
            // Badges
            models::BadgeResponse,
            models::BadgeRequest,
            // Donations
            models::DonationResponse,
            models::DonationRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Member profiles and directory"),
        (name = "ApiKeys", description = "API key issuance and revocation"),
        (name = "AdminLogs", description = "Audit log of privileged actions"),
        (name = "Stations", description = "Workshop stations"),
        (name = "Instructors", description = "Station instructor roster"),
        (name = "Badges", description = "Certification badges"),
        (name = "Donations", description = "Donation records")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer token and API key security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("X-API-Key"),
                    ),
                ),
            );
        }
    }
}
