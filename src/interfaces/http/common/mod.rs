//! Common API DTOs and extractors

pub mod validated_json;

pub use validated_json::ValidatedJson;

use base64::Engine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewImage;
use crate::domain::{DomainError, DomainResult};

/// Standard API response envelope
///
/// Every REST endpoint wraps its payload:
/// on success `{"success": true, "data": {...}}`,
/// on error `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination parameters for list requests
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1–100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Paginated list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Slice a full result set down to one page.
    pub fn paginate(all: Vec<T>, params: &PaginationParams) -> Self {
        let total = all.len() as u64;
        let start = ((params.page.max(1) - 1) * params.limit) as usize;
        let items: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(params.limit as usize)
            .collect();
        Self::new(items, total, params.page, params.limit)
    }
}

/// Base64-carried file upload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImageUpload {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 100))]
    pub mime_type: String,
    /// File content, base64-encoded
    #[validate(length(min = 1))]
    pub data: String,
}

impl ImageUpload {
    pub fn decode(self) -> DomainResult<NewImage> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|_| {
                DomainError::Validation("image data is not valid base64".to_string())
            })?;
        Ok(NewImage {
            bytes,
            file_name: self.file_name,
            mime_type: self.mime_type,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
