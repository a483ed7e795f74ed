// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{Mapping, Value};
use crate::AsonError;

fn type_error(expected: &str, value: &Value, code: u32) -> AsonError {
    AsonError::TypeError {
        message: format!("Expected {}, got {} {}", expected, value.type_name(), value),
        hint: Some(format!("Use a {} value in your document", expected)),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(type_error("string", &value, 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(type_error("number", &value, 402)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 => Ok(n as i64),
            Value::Number(n) => Err(AsonError::TypeError {
                message: format!("Number {} is not a whole number in i64 range", n),
                hint: Some("Use an integer value".into()),
                code: Some(403),
            }),
            _ => Err(type_error("number", &value, 402)),
        }
    }
}

impl TryFrom<Value> for u32 {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
            Value::Number(n) => Err(AsonError::TypeError {
                message: format!("Number {} out of range for u32", n),
                hint: Some(format!("Use a whole number between 0 and {}", u32::MAX)),
                code: Some(407),
            }),
            _ => Err(type_error("number", &value, 402)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(type_error("boolean", &value, 404)),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = AsonError>,
{
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items.into_iter().map(T::try_from).collect(),
            _ => Err(type_error("array", &value, 405)),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = AsonError>,
{
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}

impl TryFrom<Value> for Mapping {
    type Error = AsonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Ok(items),
            _ => Err(type_error("object", &value, 406)),
        }
    }
}
