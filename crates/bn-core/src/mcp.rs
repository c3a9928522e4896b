//! MCP tool and resource descriptors.
//!
//! These are the shapes published by `tools/list` and `resources/list`, plus
//! the generator for the documentation resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// URI of the built-in documentation resource.
pub const DOCS_URI: &str = "beaunifi://docs";

/// JSON Schema style input schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Property definitions.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyInfo>,
    /// Required field names.
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            type_name: "object".into(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }
}

impl InputSchema {
    pub fn property(mut self, name: &str, info: PropertyInfo) -> Self {
        self.properties.insert(name.to_string(), info);
        self
    }

    pub fn required_property(mut self, name: &str, info: PropertyInfo) -> Self {
        self.required.push(name.to_string());
        self.property(name, info)
    }
}

/// Property definition in an input schema.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PropertyInfo {
    /// Type name (string, integer, etc.).
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl PropertyInfo {
    pub fn new(type_name: &str, description: &str) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A tool as advertised to MCP clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// A readable resource as advertised to MCP clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

pub fn docs_resource() -> ResourceDefinition {
    ResourceDefinition {
        uri: DOCS_URI.into(),
        name: "Beaunifi Documentation".into(),
        description: "Documentation for the Beaunifi MCP server".into(),
        mime_type: "text/plain".into(),
    }
}

/// Render the documentation resource from the tool list.
pub fn render_docs(tools: &[ToolDefinition]) -> String {
    let mut body = String::from("# Beaunifi MCP Server\n\nAvailable tools:\n");
    for tool in tools {
        body.push_str(&format!("- {}: {}\n", tool.name, tool.description));
    }

    for tool in tools {
        let schema = &tool.input_schema;
        if schema.properties.is_empty() {
            continue;
        }
        body.push_str(&format!("\n## {}\n\n", tool.name));
        for (param_name, info) in &schema.properties {
            let typ = if info.type_name.is_empty() {
                "any"
            } else {
                &info.type_name
            };
            let req = if schema.required.contains(param_name) {
                " (required)"
            } else {
                " (optional)"
            };
            body.push_str(&format!("- **{param_name}** ({typ}){req}: {}", info.description));
            if let Some(values) = &info.enum_values {
                body.push_str(&format!(" One of: {}.", values.join(", ")));
            }
            if let Some(default) = &info.default {
                body.push_str(&format!(" Default: {default}."));
            }
            body.push('\n');
        }
    }

    body.push_str(
        "\nUse smart_process for the best experience when working with unknown files.\n",
    );
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tool() -> ToolDefinition {
        ToolDefinition {
            name: "beautify_js".into(),
            description: "Beautify JavaScript code".into(),
            input_schema: InputSchema::default()
                .required_property("code", PropertyInfo::new("string", "Code to beautify"))
                .property(
                    "indent_size",
                    PropertyInfo::new("integer", "Spaces per level").with_default(json!(2)),
                ),
        }
    }

    #[test]
    fn test_tool_serializes_as_mcp() {
        let val = serde_json::to_value(sample_tool()).unwrap();
        assert_eq!(val["inputSchema"]["type"], "object");
        assert_eq!(val["inputSchema"]["required"], json!(["code"]));
        assert_eq!(val["inputSchema"]["properties"]["indent_size"]["default"], 2);
        assert!(val["inputSchema"]["properties"]["code"].get("enum").is_none());
    }

    #[test]
    fn test_enum_property() {
        let p = PropertyInfo::new("string", "Type").with_enum(&["js", "css"]);
        let val = serde_json::to_value(p).unwrap();
        assert_eq!(val["enum"], json!(["js", "css"]));
    }

    #[test]
    fn test_render_docs_lists_tools_and_params() {
        let docs = render_docs(&[sample_tool()]);
        assert!(docs.starts_with("# Beaunifi MCP Server"));
        assert!(docs.contains("- beautify_js: Beautify JavaScript code"));
        assert!(docs.contains("**code** (string) (required)"));
        assert!(docs.contains("**indent_size** (integer) (optional)"));
        assert!(docs.contains("Default: 2."));
        assert!(docs.contains("smart_process"));
    }

    #[test]
    fn test_docs_resource() {
        let r = docs_resource();
        assert_eq!(r.uri, DOCS_URI);
        let val = serde_json::to_value(r).unwrap();
        assert_eq!(val["mimeType"], "text/plain");
    }

    #[test]
    fn test_tool_serde_roundtrip() {
        let json = serde_json::to_string(&sample_tool()).unwrap();
        let tool: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(tool, sample_tool());
    }
}
