use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    categories::{create_category, delete_category, list_categories},
    dashboard::get_dashboard,
    expenses::{
        create_expense, create_expense_series, delete_expense, list_expenses, set_expenses_paid,
        update_expense, update_expense_series,
    },
    health::health_check,
    income::{get_income, upsert_income, upsert_income_range},
    reports::{delete_report, generate_report, get_report_for_period, list_reports},
    summary::get_summary,
};
use crate::rpc::rpc_handler;
use crate::schemas::{ApiDoc, AppState};

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let files = ServeDir::new(&state.files_dir);
    let timeout = state.request_timeout;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Categories
        .route("/api/v1/categories", get(list_categories).post(create_category))
        .route("/api/v1/categories/:id", delete(delete_category))
        // Income
        .route("/api/v1/income", get(get_income).put(upsert_income))
        .route("/api/v1/income/range", put(upsert_income_range))
        // Expenses
        .route("/api/v1/expenses", get(list_expenses).post(create_expense))
        .route("/api/v1/expenses/paid", put(set_expenses_paid))
        .route("/api/v1/expenses/series", post(create_expense_series))
        .route("/api/v1/expenses/:id", put(update_expense).delete(delete_expense))
        .route("/api/v1/expenses/:id/series", put(update_expense_series))
        // Summary and dashboard
        .route("/api/v1/summary", get(get_summary))
        .route("/api/v1/dashboard", get(get_dashboard))
        // Reports
        .route("/api/v1/reports", get(list_reports).post(generate_report))
        .route("/api/v1/reports/period", get(get_report_for_period))
        .route("/api/v1/reports/:id", delete(delete_report))
        // Typed procedures
        .route("/api/rpc/:procedure", post(rpc_handler))
        // Stored report blobs
        .nest_service("/files", files)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
