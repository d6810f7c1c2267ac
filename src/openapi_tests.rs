use utoipa::OpenApi;
use utoipa::openapi::schema::Schema;
use utoipa::openapi::{PathItemType, RefOr};

use crate::schemas::ApiDoc;

fn object_properties(name: &str) -> Vec<String> {
    let openapi = ApiDoc::openapi();
    let components = openapi.components.expect("components are generated");
    match components.schemas.get(name) {
        Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
        _ => panic!("{name} should be an object schema"),
    }
}

#[test]
fn test_openapi_schema_generation() {
    let openapi = ApiDoc::openapi();
    let components = openapi.components.as_ref().unwrap();

    for name in [
        "ErrorResponse",
        "HealthResponse",
        "CategoryDto",
        "ExpenseDto",
        "SeriesRequest",
        "MonthlySummary",
        "ReportDto",
    ] {
        assert!(components.schemas.contains_key(name), "missing schema {name}");
    }

    assert!(serde_json::to_string(&openapi).is_ok());
}

#[test]
fn test_error_response_schema_structure() {
    let properties = object_properties("ErrorResponse");
    for field in ["error", "code", "success"] {
        assert!(properties.iter().any(|p| p == field));
    }
}

#[test]
fn test_health_response_schema_structure() {
    let properties = object_properties("HealthResponse");
    for field in ["status", "version", "database"] {
        assert!(properties.iter().any(|p| p == field));
    }
}

#[test]
fn test_expense_schema_uses_wire_names() {
    let properties = object_properties("ExpenseDto");
    for field in ["categoryId", "groupId", "type", "paid", "amount"] {
        assert!(properties.iter().any(|p| p == field), "missing {field}");
    }
}

#[test]
fn test_openapi_paths() {
    let openapi = ApiDoc::openapi();
    let paths = &openapi.paths.paths;

    let expected = [
        ("/health", PathItemType::Get),
        ("/api/v1/categories", PathItemType::Post),
        ("/api/v1/income/range", PathItemType::Put),
        ("/api/v1/expenses/paid", PathItemType::Put),
        ("/api/v1/expenses/{id}", PathItemType::Delete),
        ("/api/v1/expenses/{id}/series", PathItemType::Put),
        ("/api/v1/dashboard", PathItemType::Get),
        ("/api/v1/reports/period", PathItemType::Get),
        ("/api/rpc/{procedure}", PathItemType::Post),
    ];
    for (path, method) in expected {
        let item = paths.get(path).unwrap_or_else(|| panic!("missing path {path}"));
        assert!(item.operations.contains_key(&method), "missing operation on {path}");
    }

    let health = paths.get("/health").unwrap();
    let responses = &health.operations.get(&PathItemType::Get).unwrap().responses;
    assert!(responses.responses.contains_key("200"));
}
