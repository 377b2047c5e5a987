//! Validation of member create payloads.
//!
//! Payloads arrive as loosely typed JSON. Numeric fields are coerced rather
//! than matched strictly: `"33"`, `33` and `33.0` are all an age of 33.

use serde_json::{Map, Value};

use super::types::{MemberField, NewMember};
use crate::error::ValidationError;

/// Validate a JSON body and turn it into a [`NewMember`].
///
/// Checks run in field order (`first_name`, `age`, `lucky_numbers`) and the
/// first failure is returned. Unknown fields are ignored.
pub fn parse_new_member(body: &Value) -> Result<NewMember, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let first_name = first_name(object)?;
    let age = age(object)?;
    let lucky_numbers = lucky_numbers(object)?;

    Ok(NewMember {
        first_name,
        age,
        lucky_numbers,
    })
}

fn first_name(object: &Map<String, Value>) -> Result<String, ValidationError> {
    match object.get("first_name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(ValidationError::Required(MemberField::FirstName)),
    }
}

fn age(object: &Map<String, Value>) -> Result<u32, ValidationError> {
    let age = object
        .get("age")
        .and_then(coerce_int)
        .ok_or(ValidationError::NotAnInteger(MemberField::Age))?;

    if age <= 0 {
        return Err(ValidationError::NotPositive(MemberField::Age));
    }

    u32::try_from(age).map_err(|_| ValidationError::OutOfRange(MemberField::Age))
}

fn lucky_numbers(object: &Map<String, Value>) -> Result<Vec<i64>, ValidationError> {
    let Some(Value::Array(items)) = object.get("lucky_numbers") else {
        return Err(ValidationError::NotAList(MemberField::LuckyNumbers));
    };

    items
        .iter()
        .map(|item| {
            coerce_int(item).ok_or(ValidationError::NonIntegerElement(MemberField::LuckyNumbers))
        })
        .collect()
}

/// Coerce a JSON value to an integer.
///
/// Accepts integers, finite floats (truncated toward zero), booleans (0/1)
/// and strings that parse as an integer once surrounding whitespace is
/// removed.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
