use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A calendar month, used as query string and as RPC input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    /// 1 = January
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
}
