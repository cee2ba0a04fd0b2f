//! API endpoint modules.

pub mod admin_logs;
pub mod api_keys;
pub mod badges;
pub mod donations;
pub mod health;
pub mod instructors;
pub mod openapi;
pub mod stations;
pub mod users;

pub use admin_logs::configure_routes as configure_admin_log_routes;
pub use api_keys::configure_routes as configure_api_key_routes;
pub use badges::configure_routes as configure_badge_routes;
pub use donations::configure_routes as configure_donation_routes;
pub use health::configure_health_routes;
pub use instructors::configure_routes as configure_instructor_routes;
pub use openapi::ApiDoc;
pub use stations::configure_routes as configure_station_routes;
pub use users::configure_routes as configure_user_routes;
