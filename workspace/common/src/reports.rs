use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub id: i32,
    pub user_id: i32,
    pub year: i32,
    pub month: i32,
    pub file_url: String,
    pub file_key: String,
    pub created_at: DateTime<Utc>,
}

/// A rendered PDF to store for a period.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    /// Base64 encoded PDF bytes
    #[validate(length(min = 1))]
    pub pdf_content: String,
}
