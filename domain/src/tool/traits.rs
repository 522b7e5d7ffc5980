//! Tool domain traits
//!
//! Contains pure domain logic traits for argument validation.
//! Delegate execution is defined in the application layer.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};

use super::entities::{ParamType, StringFormat, ToolDescriptor, ToolParameter};
use crate::core::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Validator for tool arguments
///
/// This is a pure domain trait that checks arguments against a
/// descriptor without any I/O operations.
pub trait ToolValidator {
    fn validate(
        &self,
        descriptor: &ToolDescriptor,
        args: &Map<String, Value>,
    ) -> Result<(), ValidationError>;
}

/// Default implementation of ToolValidator
///
/// `null` counts as absent. Keys the descriptor does not declare are not
/// checked; [`strip_unknown`] removes them before dispatch.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        descriptor: &ToolDescriptor,
        args: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        check_fields(&descriptor.method, "", &descriptor.parameters, args)
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn check_fields(
    tool: &str,
    prefix: &str,
    params: &[ToolParameter],
    object: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for param in params {
        let path = join_path(prefix, &param.name);
        match object.get(&param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err(ValidationError::new(tool, path, "is required"));
                }
            }
            Some(value) => check_value(tool, &path, &param.param_type, param.format, value)?,
        }
    }

    Ok(())
}

/// Drop argument keys the descriptor does not declare, at every object level.
pub fn strip_unknown(descriptor: &ToolDescriptor, args: &mut Map<String, Value>) {
    strip_fields(&descriptor.parameters, args);
}

fn strip_fields(params: &[ToolParameter], object: &mut Map<String, Value>) {
    let known: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
    object.retain(|key, _| known.contains(key.as_str()));

    for param in params {
        if let Some(value) = object.get_mut(&param.name) {
            strip_value(&param.param_type, value);
        }
    }
}

fn strip_value(param_type: &ParamType, value: &mut Value) {
    match (param_type, value) {
        (ParamType::Object(fields), Value::Object(inner)) => strip_fields(fields, inner),
        (ParamType::Array(item), Value::Array(items)) => {
            for element in items {
                strip_value(item, element);
            }
        }
        _ => {}
    }
}

fn type_error(tool: &str, path: &str, expected: &ParamType) -> ValidationError {
    ValidationError::new(tool, path, format!("expected {}", expected.describe()))
}

fn check_value(
    tool: &str,
    path: &str,
    param_type: &ParamType,
    format: Option<StringFormat>,
    value: &Value,
) -> Result<(), ValidationError> {
    match (param_type, value) {
        (ParamType::String, Value::String(s)) => match format {
            Some(format) => check_format(tool, path, format, s),
            None => Ok(()),
        },
        (ParamType::Integer, Value::Number(n)) => {
            if n.is_i64() || n.is_u64() {
                Ok(())
            } else {
                Err(type_error(tool, path, param_type))
            }
        }
        (ParamType::Number, Value::Number(_)) => Ok(()),
        (ParamType::Boolean, Value::Bool(_)) => Ok(()),
        (ParamType::Record, Value::Object(_)) => Ok(()),
        (ParamType::StringOrRecord, Value::String(_) | Value::Object(_)) => Ok(()),
        (ParamType::Object(fields), Value::Object(inner)) => check_fields(tool, path, fields, inner),
        (ParamType::Array(item), Value::Array(items)) => {
            for (index, element) in items.iter().enumerate() {
                check_value(tool, &format!("{}[{}]", path, index), item, None, element)?;
            }
            Ok(())
        }
        (ParamType::Enum(allowed), Value::String(s)) if allowed.iter().any(|a| a == s) => Ok(()),
        (ParamType::Literal(expected), Value::String(s)) if expected == s => Ok(()),
        _ => Err(type_error(tool, path, param_type)),
    }
}

fn check_format(
    tool: &str,
    path: &str,
    format: StringFormat,
    value: &str,
) -> Result<(), ValidationError> {
    let valid = match format {
        StringFormat::Email => EMAIL_RE.is_match(value),
        StringFormat::Url => url::Url::parse(value).is_ok(),
        StringFormat::DateTime => is_iso8601(value),
    };

    if valid {
        Ok(())
    } else {
        let message = match format {
            StringFormat::Email => "must be a valid email address",
            StringFormat::Url => "must be a valid URL",
            StringFormat::DateTime => "must be an ISO-8601 date or date-time",
        };
        Err(ValidationError::new(tool, path, message))
    }
}

fn is_iso8601(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}
