//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the draft-07
//! subset every supported host understands.
//!
//! | `ParamType` | JSON Schema |
//! |-------------|-------------|
//! | `String` (+ format) | `{"type": "string", "format": ...}` |
//! | `Integer` / `Number` / `Boolean` | matching primitive |
//! | `Record` | `{"type": "object", "additionalProperties": {}}` |
//! | `Object(fields)` | nested `properties` / `required` |
//! | `Array(item)` | `{"type": "array", "items": ...}` |
//! | `Enum(values)` | `{"type": "string", "enum": [...]}` |
//! | `Literal(v)` | `{"type": "string", "const": v}` |
//! | `StringOrRecord` | `{"oneOf": [string, object]}` |

use serde_json::{Map, Value, json};
use siren_application::ToolSchemaPort;
use siren_domain::tool::entities::{ParamType, ToolDescriptor, ToolParameter};

/// Default implementation producing provider-neutral JSON Schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn object_schema(&self, params: &[ToolParameter]) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in params {
            properties.insert(param.name.clone(), self.parameter_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    fn type_schema(&self, param_type: &ParamType) -> Value {
        match param_type {
            ParamType::String => json!({"type": "string"}),
            ParamType::Integer => json!({"type": "integer"}),
            ParamType::Number => json!({"type": "number"}),
            ParamType::Boolean => json!({"type": "boolean"}),
            ParamType::Record => json!({"type": "object", "additionalProperties": {}}),
            ParamType::Object(fields) => self.object_schema(fields),
            ParamType::Array(item) => json!({"type": "array", "items": self.type_schema(item)}),
            ParamType::Enum(values) => json!({"type": "string", "enum": values}),
            ParamType::Literal(value) => json!({"type": "string", "const": value}),
            ParamType::StringOrRecord => json!({
                "oneOf": [
                    {"type": "string"},
                    {"type": "object", "additionalProperties": {}},
                ]
            }),
        }
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn input_schema(&self, tool: &ToolDescriptor) -> Value {
        self.object_schema(&tool.parameters)
    }

    fn parameter_schema(&self, param: &ToolParameter) -> Value {
        let mut schema = self.type_schema(&param.param_type);
        if let Value::Object(map) = &mut schema {
            if let Some(format) = param.format {
                map.insert("format".to_string(), json!(format.as_str()));
            }
            if !param.description.is_empty() {
                map.insert("description".to_string(), json!(param.description));
            }
        }
        schema
    }
}
