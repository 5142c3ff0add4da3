// Pagination parameters and envelopes shared by list endpoints
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_PAGE_SIZE: u64 = 100;

/// Query strings arrive as text; flattened structs cannot rely on serde's number coercion
fn deserialize_string_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    s.parse::<u64>().map_err(serde::de::Error::custom)
}

/// Common pagination parameters for API endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_u64")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_string_to_u64")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    25
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn page_size(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.page_size()
    }
}

/// Pagination metadata for responses
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, params: &PaginationParams) -> Self {
        let limit = params.page_size();
        Self {
            total,
            page: params.page.max(1),
            limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// Response structure with pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: T,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: T, total: u64, params: &PaginationParams) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(total, params),
        }
    }
}
