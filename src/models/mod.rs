//! Request/response models for the members server.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod admin_log;
pub mod api_key;
pub mod badge;
pub mod donation;
pub mod instructor;
pub mod station;
pub mod user;

pub use admin_log::AdminLogDto;
pub use api_key::{ApiKeyResponse, CreateApiKeyRequest};
pub use badge::{BadgeRequest, BadgeResponse};
pub use donation::{DonationRequest, DonationResponse};
pub use instructor::{InstructorDto, InstructorRequest};
pub use station::{StationRequest, StationResponse, StationSummary};
pub use user::{MembershipLevelDto, UpdateUserRequest, UserDetail, UserSummary};

/// Pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per: Option<u64>,
}

impl PageParams {
    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to a sane ceiling.
    pub fn per(&self, default: u64) -> u64 {
        self.per.unwrap_or(default).clamp(1, 100)
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMeta {
    pub page: u64,
    pub per: u64,
    pub total: u64,
}

/// One page of items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u64, per: u64, total: u64) -> Self {
        Page {
            items,
            metadata: PageMeta { page, per, total },
        }
    }
}
