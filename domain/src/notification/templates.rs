//! Template requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filters for listing templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl TemplateQuery {
    /// Query-string pairs for the present filters
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(tags) = &self.tag_names {
            pairs.push(("tagNames", tags.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsConfiguration {
    pub body: String,
    /// Always "SMS"
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_flash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unicode: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfiguration {
    pub subject: String,
    /// Always "EMAIL"
    pub channel: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Map<String, Value>>>,
    #[serde(rename = "isRawHTML", default, skip_serializing_if = "Option::is_none")]
    pub is_raw_html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_plain_text: Option<bool>,
}

/// Per-channel template content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfigurations {
    #[serde(rename = "SMS", default, skip_serializing_if = "Option::is_none")]
    pub sms: Option<SmsConfiguration>,
    #[serde(rename = "EMAIL", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: String,
    pub tag_names: Vec<String>,
    pub variables: Vec<TemplateVariable>,
    pub configurations: TemplateConfigurations,
}

/// Partial update; only `name` is mandatory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<TemplateVariable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<TemplateConfigurations>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_template_wire_names() {
        let request: CreateTemplateRequest = serde_json::from_value(json!({
            "name": "welcome",
            "description": "Welcome mail",
            "tagNames": ["onboarding"],
            "variables": [{"name": "first_name", "defaultValue": "there"}],
            "configurations": {
                "EMAIL": {
                    "subject": "Hi",
                    "channel": "EMAIL",
                    "body": "<p>Hi {{first_name}}</p>",
                    "isRawHTML": true
                }
            }
        }))
        .unwrap();

        let email = request.configurations.email.as_ref().unwrap();
        assert_eq!(email.is_raw_html, Some(true));
        assert!(request.configurations.sms.is_none());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["configurations"]["EMAIL"]["isRawHTML"], true);
        assert!(value["configurations"].get("SMS").is_none());
        assert_eq!(value["variables"][0]["defaultValue"], "there");
    }

    #[test]
    fn test_template_query_pairs() {
        let query = TemplateQuery {
            search: Some("welcome".into()),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![("search", "welcome".to_string()), ("page", "2".to_string())]
        );
        assert!(TemplateQuery::default().to_pairs().is_empty());
    }
}
