//! SeaORM database migrations.
//!
//! Schema is expressed with the backend-agnostic builder so the same
//! migrations run on PostgreSQL (production) and SQLite (development and
//! tests). Unique indexes are named after their columns; the constraint
//! translator matches on those names.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_user_roles;
mod m20250301_000003_create_membership_levels;
mod m20250301_000004_create_user_membership_levels;
mod m20250301_000005_create_stations;
mod m20250301_000006_create_badges;
mod m20250301_000007_create_instructors;
mod m20250301_000008_create_api_keys;
mod m20250301_000009_create_admin_logs;
mod m20250301_000010_create_donations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_user_roles::Migration),
            Box::new(m20250301_000003_create_membership_levels::Migration),
            Box::new(m20250301_000004_create_user_membership_levels::Migration),
            Box::new(m20250301_000005_create_stations::Migration),
            Box::new(m20250301_000006_create_badges::Migration),
            Box::new(m20250301_000007_create_instructors::Migration),
            Box::new(m20250301_000008_create_api_keys::Migration),
            Box::new(m20250301_000009_create_admin_logs::Migration),
            Box::new(m20250301_000010_create_donations::Migration),
        ]
    }
}
