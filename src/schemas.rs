use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use common::{
    CategoryBreakdown, CategoryDto, CreateCategoryRequest, CreateExpenseRequest,
    DashboardPayload, ExpenseDto, ExpenseType, GenerateReportRequest, IncomeDto,
    IncomeRangeRequest, MonthlySummary, PaidUpdateResult, ReportDto, SeriesRequest, SeriesResult,
    SetPaidRequest, UpdateExpenseRequest, UpsertIncomeRequest,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::storage::ObjectStore;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Where report PDFs are stored
    pub storage: Arc<dyn ObjectStore>,
    /// Directory served under `/files`
    pub files_dir: PathBuf,
    /// User every request resolves to
    pub default_user_id: i32,
    pub request_timeout: Duration,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::create_category,
        crate::handlers::categories::delete_category,
        crate::handlers::income::get_income,
        crate::handlers::income::upsert_income,
        crate::handlers::income::upsert_income_range,
        crate::handlers::expenses::list_expenses,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::expenses::set_expenses_paid,
        crate::handlers::expenses::create_expense_series,
        crate::handlers::expenses::update_expense_series,
        crate::handlers::summary::get_summary,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::reports::list_reports,
        crate::handlers::reports::get_report_for_period,
        crate::handlers::reports::generate_report,
        crate::handlers::reports::delete_report,
        crate::rpc::rpc_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CategoryDto,
            CreateCategoryRequest,
            IncomeDto,
            UpsertIncomeRequest,
            IncomeRangeRequest,
            ExpenseType,
            ExpenseDto,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            SetPaidRequest,
            PaidUpdateResult,
            SeriesRequest,
            SeriesResult,
            MonthlySummary,
            CategoryBreakdown,
            DashboardPayload,
            ReportDto,
            GenerateReportRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Expense categories"),
        (name = "income", description = "Monthly income"),
        (name = "expenses", description = "Expenses and expense series"),
        (name = "summary", description = "Monthly summary and dashboard"),
        (name = "reports", description = "Stored monthly report PDFs"),
        (name = "rpc", description = "Typed procedure endpoint"),
    ),
    info(
        title = "Monthbook API",
        description = "Monthly income and expense tracker",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
