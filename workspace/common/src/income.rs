use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::amounts::non_negative_amount;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDto {
    pub id: i32,
    pub user_id: i32,
    pub year: i32,
    pub month: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpsertIncomeRequest {
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    /// Decimal string, zero or more
    #[validate(custom(function = "non_negative_amount"))]
    pub amount: String,
    pub description: Option<String>,
}

/// Writes the same income into every month from start to end inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRangeRequest {
    #[validate(range(min = 1, max = 9999))]
    pub start_year: i32,
    #[validate(range(min = 1, max = 12))]
    pub start_month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub end_year: i32,
    #[validate(range(min = 1, max = 12))]
    pub end_month: i32,
    #[validate(custom(function = "non_negative_amount"))]
    pub amount: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_request_from_camel_case() {
        let request: UpsertIncomeRequest = serde_json::from_value(serde_json::json!({
            "year": 2025,
            "month": 3,
            "amount": "5000.00"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_range_request_validation() {
        let mut request: IncomeRangeRequest = serde_json::from_value(serde_json::json!({
            "startYear": 2025,
            "startMonth": 1,
            "endYear": 2025,
            "endMonth": 6,
            "amount": "100"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        request.end_month = 13;
        assert!(request.validate().is_err());

        request.end_month = 6;
        request.amount = "-1".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_income_dto_amount_is_string() {
        let dto = IncomeDto {
            id: 1,
            user_id: 1,
            year: 2025,
            month: 1,
            amount: Decimal::new(420050, 2),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["amount"], "4200.50");
        assert!(json.get("userId").is_some());
    }
}
