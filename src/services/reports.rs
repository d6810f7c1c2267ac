use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{GenerateReportRequest, PeriodQuery, ReportDto};
use model::store::reports::{self, NewReport};
use tracing::{info, instrument, warn};

use super::dto::IntoDto;
use super::period;
use crate::error::{ApiError, ApiResult};
use crate::schemas::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// `reports/{user}/report-{yyyy}-{mm}-{8 hex}.pdf`
pub fn report_key(user_id: i32, year: i32, month: u32) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("reports/{user_id}/report-{year}-{month:02}-{}.pdf", &suffix[..8])
}

#[instrument(skip(state))]
pub async fn list(state: &AppState, user_id: i32) -> ApiResult<Vec<ReportDto>> {
    let rows = reports::list(&state.db, user_id).await?;
    Ok(rows.into_dto())
}

#[instrument(skip(state))]
pub async fn get_for_period(state: &AppState, user_id: i32, query: PeriodQuery) -> ApiResult<Option<ReportDto>> {
    let row = reports::get_for_period(&state.db, user_id, query.year, query.month).await?;
    Ok(row.into_dto())
}

/// Stores the PDF, then records it. The blob is removed again when the
/// row cannot be written.
#[instrument(skip(state, request), fields(year = request.year, month = request.month))]
pub async fn generate(state: &AppState, user_id: i32, request: GenerateReportRequest) -> ApiResult<ReportDto> {
    let target = period(request.year, request.month)?;
    let bytes = STANDARD
        .decode(request.pdf_content.trim())
        .map_err(|e| ApiError::validation(format!("pdfContent is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(ApiError::validation("pdfContent must not be empty"));
    }

    let key = report_key(user_id, target.year, target.month);
    let url = state.storage.put(&key, bytes, PDF_CONTENT_TYPE).await?;

    let new_report = NewReport {
        year: target.year,
        month: target.month_i32(),
        file_url: url,
        file_key: key.clone(),
    };
    match reports::create(&state.db, user_id, new_report).await {
        Ok(row) => {
            info!("Stored report {} as {}", row.id, key);
            Ok(row.into_dto())
        }
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(&key).await {
                warn!("Failed to remove orphaned report blob {}: {}", key, cleanup);
            }
            Err(e.into())
        }
    }
}

/// Deletes the row; a blob that cannot be removed is only logged.
#[instrument(skip(state))]
pub async fn delete(state: &AppState, user_id: i32, id: i32) -> ApiResult<()> {
    let removed = reports::delete(&state.db, user_id, id).await?;
    if let Err(e) = state.storage.delete(&removed.file_key).await {
        warn!("Report {} deleted but its blob remains: {}", id, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_key_format() {
        let key = report_key(1, 2025, 3);
        assert!(key.starts_with("reports/1/report-2025-03-"));
        assert!(key.ends_with(".pdf"));

        let suffix = key
            .trim_start_matches("reports/1/report-2025-03-")
            .trim_end_matches(".pdf");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_report_keys_are_unique() {
        assert_ne!(report_key(1, 2025, 3), report_key(1, 2025, 3));
    }
}
