//! Tool domain entities

use serde::{Deserialize, Serialize};

use crate::permission::{Permission, RequiredActions, Resource};

/// String format constraint checked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    Email,
    Url,
    /// ISO-8601 date or date-time
    DateTime,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Url => "uri",
            StringFormat::DateTime => "date-time",
        }
    }
}

/// Shape of a tool parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// Free-form object with arbitrary keys
    Record,
    /// Object with a fixed set of fields
    Object(Vec<ToolParameter>),
    Array(Box<ParamType>),
    Enum(Vec<String>),
    /// Exactly this string
    Literal(String),
    /// JSON text or an object, resolved by the consumer
    StringOrRecord,
}

impl ParamType {
    /// Short name used in validation messages
    pub fn describe(&self) -> String {
        match self {
            ParamType::String => "string".to_string(),
            ParamType::Integer => "integer".to_string(),
            ParamType::Number => "number".to_string(),
            ParamType::Boolean => "boolean".to_string(),
            ParamType::Record | ParamType::Object(_) => "object".to_string(),
            ParamType::Array(item) => format!("array of {}", item.describe()),
            ParamType::Enum(values) => format!("one of [{}]", values.join(", ")),
            ParamType::Literal(value) => format!("\"{}\"", value),
            ParamType::StringOrRecord => "string or object".to_string(),
        }
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name (external key, kept verbatim)
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    pub param_type: ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            format: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Description of one vendor operation exposed as a tool.
///
/// `method` is the dispatch key and the external tool name. Descriptors are
/// rebuilt by every registry call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub method: String,
    /// Human-readable name (e.g., "Send Message")
    pub display_name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
    pub required_actions: RequiredActions,
}

impl ToolDescriptor {
    pub fn new(
        method: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            display_name: display_name.into(),
            description: description.into(),
            parameters: Vec::new(),
            required_actions: RequiredActions::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Add a required `(resource, permission)` pair (builder pattern)
    pub fn requires(mut self, resource: Resource, permission: Permission) -> Self {
        self.required_actions = self.required_actions.require(resource, permission);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}
