use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

/// Amounts are stored as `DECIMAL(16, 4)`.
const MAX_AMOUNT_SCALE: u32 = 4;
const MAX_INTEGER_DIGITS: u32 = 12;

fn parse(value: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|_| invalid("decimal", "amount must be a decimal string"))?;
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(invalid("precision", "amount must have at most 4 decimal places"));
    }
    if amount.abs() >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(invalid("range", "amount must have at most 12 integer digits"));
    }
    Ok(amount)
}

/// Validator for expense amounts: a decimal string strictly above zero.
pub fn positive_amount(value: &str) -> Result<(), ValidationError> {
    if parse(value)? > Decimal::ZERO {
        Ok(())
    } else {
        Err(invalid("positive", "amount must be greater than zero"))
    }
}

/// Validator for income amounts: a decimal string that is zero or more.
pub fn non_negative_amount(value: &str) -> Result<(), ValidationError> {
    if parse(value)? >= Decimal::ZERO {
        Ok(())
    } else {
        Err(invalid("non_negative", "amount must not be negative"))
    }
}
