//! Business logic services.
//!
//! Services own transactions: every privileged mutation opens one, performs
//! the mutation and its audit entry through the same handle, and commits.
//! Authorization happens in the route layer before a service is invoked.

pub mod admin_log;
pub mod api_key;
pub mod badge;
pub mod donation;
pub mod instructor;
pub mod station;
pub mod user;
pub mod webhook;
