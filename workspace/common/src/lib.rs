//! Transport-layer types shared by the REST handlers, the RPC endpoint and
//! any client. Field names are camelCase on the wire and amounts travel as
//! decimal strings, except inside [`MonthlySummary`] where they are numbers.

mod amounts;
mod categories;
mod expenses;
mod income;
mod period;
mod reports;
mod summary;

pub use amounts::{non_negative_amount, positive_amount};
pub use categories::{CategoryDto, CategoryListQuery, CreateCategoryRequest, IdRequest};
pub use expenses::{
    CreateExpenseRequest, ExpenseDto, ExpenseListQuery, ExpenseType, GroupQuery,
    PaidUpdateResult, SeriesRequest, SeriesResult, SetPaidRequest, UpdateExpenseRequest,
};
pub use income::{IncomeDto, IncomeRangeRequest, UpsertIncomeRequest};
pub use period::PeriodQuery;
pub use reports::{GenerateReportRequest, ReportDto};
pub use summary::{CategoryBreakdown, DashboardPayload, MonthlySummary};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope of every successful REST response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
