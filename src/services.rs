//! Operations shared by the REST handlers and the RPC endpoint.
//!
//! Inputs arrive already checked against their `validator` rules; the
//! services parse amounts, resolve categories and map rows to DTOs.

pub mod categories;
pub mod dto;
pub mod expenses;
pub mod income;
pub mod reports;
pub mod summary;

use std::str::FromStr;

use compute::YearMonth;
use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};

pub(crate) fn parse_amount(value: &str) -> ApiResult<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| ApiError::validation(format!("Invalid amount '{value}'")))
}

pub(crate) fn period(year: i32, month: i32) -> ApiResult<YearMonth> {
    Ok(YearMonth::new(year, month)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.30 ").unwrap(), Decimal::new(1230, 2));
        assert!(matches!(parse_amount("twelve"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_period_bounds() {
        assert!(period(2025, 12).is_ok());
        assert!(matches!(period(2025, 13), Err(ApiError::Validation(_))));
    }
}
