use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::amounts::positive_amount;

/// Fixed expenses repeat every month, variable ones happen once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub year: i32,
    pub month: i32,
    pub group_id: Option<String>,
    pub paid: bool,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Either `groupId`, or `year` and `month` with an optional `categoryId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExpenseListQuery {
    #[validate(range(min = 1, max = 9999))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    pub category_id: Option<i32>,
    #[validate(length(min = 1))]
    pub group_id: Option<String>,
}

/// RPC input of `expenses.byGroup`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupQuery {
    #[validate(length(min = 1))]
    pub group_id: String,
}

/// A single expense row. When `categoryId` is missing, `categoryName`
/// creates a category first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub category_name: Option<String>,
    pub group_id: Option<String>,
    pub paid: Option<bool>,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom(function = "positive_amount"))]
    pub amount: String,
}

/// Partial update; absent fields are left alone. `"groupId": null`
/// detaches the row from its series.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub group_id: Option<Option<String>>,
    pub paid: Option<bool>,
    #[serde(rename = "type")]
    pub expense_type: Option<ExpenseType>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Option<String>,
}

// Distinguishes a present `null` from a missing field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetPaidRequest {
    #[validate(length(min = 1))]
    pub ids: Vec<i32>,
    pub paid: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaidUpdateResult {
    /// Rows whose flag was written
    pub updated: u64,
}

/// Template and month range of an expense series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub category_name: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom(function = "positive_amount"))]
    pub amount: String,
    #[validate(range(min = 1, max = 9999))]
    pub start_year: i32,
    #[validate(range(min = 1, max = 12))]
    pub start_month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub end_year: i32,
    #[validate(range(min = 1, max = 12))]
    pub end_month: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResult {
    /// Series the rows now belong to; `None` after collapsing to one variable row
    pub group_id: Option<String>,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_group_id_states() {
        let absent: UpdateExpenseRequest = serde_json::from_value(json!({ "paid": true })).unwrap();
        assert_eq!(absent.group_id, None);

        let cleared: UpdateExpenseRequest = serde_json::from_value(json!({ "groupId": null })).unwrap();
        assert_eq!(cleared.group_id, Some(None));

        let set: UpdateExpenseRequest = serde_json::from_value(json!({ "groupId": "grp_x" })).unwrap();
        assert_eq!(set.group_id, Some(Some("grp_x".to_string())));
    }

    #[test]
    fn test_create_request_uses_type_field() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "categoryName": "Housing",
            "year": 2025,
            "month": 2,
            "type": "fixed",
            "amount": "950.00"
        }))
        .unwrap();
        assert_eq!(request.expense_type, ExpenseType::Fixed);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_fields() {
        let base = json!({
            "categoryId": 1,
            "year": 2025,
            "month": 2,
            "type": "variable",
            "amount": "10"
        });

        let mut zero = base.clone();
        zero["amount"] = json!("0");
        let request: CreateExpenseRequest = serde_json::from_value(zero).unwrap();
        assert!(request.validate().is_err());

        let mut long = base.clone();
        long["description"] = json!("x".repeat(256));
        let request: CreateExpenseRequest = serde_json::from_value(long).unwrap();
        assert!(request.validate().is_err());

        let mut bad_type = base;
        bad_type["type"] = json!("weekly");
        assert!(serde_json::from_value::<CreateExpenseRequest>(bad_type).is_err());
    }

    #[test]
    fn test_set_paid_requires_ids() {
        let request = SetPaidRequest { ids: vec![], paid: true };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_expense_dto_serializes_type() {
        let dto = ExpenseDto {
            id: 3,
            user_id: 1,
            category_id: 2,
            year: 2025,
            month: 1,
            group_id: None,
            paid: false,
            expense_type: ExpenseType::Variable,
            description: "Groceries".to_string(),
            amount: Decimal::new(8990, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "variable");
        assert_eq!(json["amount"], "89.90");
        assert_eq!(json["categoryId"], 2);
        assert!(json["groupId"].is_null());
    }
}
