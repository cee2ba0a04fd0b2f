//! SeaORM entity definitions for the membership database.

pub mod admin_log;
pub mod api_key;
pub mod badge;
pub mod donation;
pub mod instructor;
pub mod membership_level;
pub mod station;
pub mod user;
pub mod user_membership_level;
pub mod user_role;
