//! Tool registry: definitions, argument decoding and dispatch.
//!
//! [`ToolRegistry::call`] returns typed errors for the REST surface.
//! [`ToolRegistry::call_boundary`] folds every failure into the
//! `{"error", "tool"}` text that MCP clients receive.

use bn_core::config::{FormatConfig, MAX_INDENT_SIZE};
use bn_core::mcp::{InputSchema, PropertyInfo, ToolDefinition};
use bn_core::{Action, BnError, Language, Result};
use bn_smart::{detect, ProcessRequest, SmartProcessor};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const BEAUTIFY_JS: &str = "beautify_js";
pub const MINIFY_JS: &str = "minify_js";
pub const BEAUTIFY_CSS: &str = "beautify_css";
pub const MINIFY_CSS: &str = "minify_css";
pub const IS_MINIFIED: &str = "is_minified";
pub const SMART_PROCESS: &str = "smart_process";

#[derive(Debug, Deserialize)]
struct BeautifyArgs {
    #[serde(default)]
    code: String,
    indent_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct MinifyArgs {
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct DetectArgs {
    #[serde(default)]
    code: String,
    #[serde(default = "default_file_type")]
    file_type: String,
}

#[derive(Debug, Deserialize)]
struct SmartArgs {
    #[serde(default)]
    code: String,
    #[serde(default = "default_file_type")]
    file_type: String,
    #[serde(default = "default_action")]
    action: String,
    /// A JSON string, or an inline list that is re-encoded.
    #[serde(default)]
    modifications: Value,
    indent_size: Option<usize>,
}

fn default_file_type() -> String {
    "js".into()
}

fn default_action() -> String {
    "read".into()
}

/// Every tool the server publishes.
pub fn tool_definitions(default_indent: usize) -> Vec<ToolDefinition> {
    let code = |what: &str| PropertyInfo::new("string", what);
    let indent = |what: &str| PropertyInfo::new("integer", what).with_default(json!(default_indent));
    let file_type = || {
        PropertyInfo::new("string", "Type of code (js or css)")
            .with_enum(&["js", "css"])
            .with_default(json!("js"))
    };

    vec![
        ToolDefinition {
            name: BEAUTIFY_JS.into(),
            description: "Beautify JavaScript code to make it readable".into(),
            input_schema: InputSchema::default()
                .required_property("code", code("JavaScript code to beautify"))
                .property("indent_size", indent("Number of spaces for indentation")),
        },
        ToolDefinition {
            name: MINIFY_JS.into(),
            description: "Minify JavaScript code for production".into(),
            input_schema: InputSchema::default()
                .required_property("code", code("JavaScript code to minify")),
        },
        ToolDefinition {
            name: BEAUTIFY_CSS.into(),
            description: "Beautify plain CSS code to make it readable. The stylesheet is reprinted: \
                          comments are dropped and some spellings are normalized"
                .into(),
            input_schema: InputSchema::default()
                .required_property("code", code("CSS code to beautify"))
                .property("indent_size", indent("Number of spaces for indentation")),
        },
        ToolDefinition {
            name: MINIFY_CSS.into(),
            description: "Minify CSS code for production".into(),
            input_schema: InputSchema::default()
                .required_property("code", code("CSS code to minify")),
        },
        ToolDefinition {
            name: IS_MINIFIED.into(),
            description: "Check if code appears to be minified based on line length and structure"
                .into(),
            input_schema: InputSchema::default()
                .required_property("code", code("Code to check"))
                .required_property("file_type", file_type()),
        },
        ToolDefinition {
            name: SMART_PROCESS.into(),
            description: "Smart workflow: auto-detect if minified, beautify if needed, process, \
                          and optionally re-minify. Perfect for editing minified files. \
                          CSS results are reprinted, so CSS comments do not survive 'read' or 'edit'."
                .into(),
            input_schema: InputSchema::default()
                .required_property("code", code("Code to process"))
                .required_property("file_type", file_type())
                .property(
                    "action",
                    PropertyInfo::new(
                        "string",
                        "Action to perform: 'read' returns beautified code, 'edit' applies \
                         modifications, 'write' returns minified result",
                    )
                    .with_enum(&["read", "edit", "write"])
                    .with_default(json!("read")),
                )
                .property(
                    "modifications",
                    PropertyInfo::new(
                        "string",
                        "JSON string describing modifications to apply. \
                         Format: [{\"find\": \"text\", \"replace\": \"new_text\"}]",
                    ),
                )
                .property(
                    "indent_size",
                    indent("Number of spaces for indentation when beautifying"),
                ),
        },
    ]
}

/// Stateless tool dispatcher shared by both transports.
#[derive(Debug)]
pub struct ToolRegistry {
    format: FormatConfig,
    processor: SmartProcessor,
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new(format: FormatConfig) -> Self {
        Self::with_processor(format, SmartProcessor::default())
    }

    pub fn with_processor(format: FormatConfig, processor: SmartProcessor) -> Self {
        let definitions = tool_definitions(format.indent_size);
        Self { format, processor, definitions }
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name)
    }

    /// Run a tool and return its text output.
    pub fn call(&self, name: &str, args: &Value) -> Result<String> {
        let formatters = self.processor.formatters();
        match name {
            BEAUTIFY_JS | BEAUTIFY_CSS => {
                let a: BeautifyArgs = decode(args)?;
                self.check_size(&a.code)?;
                let indent = self.indent(a.indent_size)?;
                formatters.beautify(tool_language(name), &a.code, indent)
            }
            MINIFY_JS | MINIFY_CSS => {
                let a: MinifyArgs = decode(args)?;
                self.check_size(&a.code)?;
                formatters.minify(tool_language(name), &a.code)
            }
            IS_MINIFIED => {
                let a: DetectArgs = decode(args)?;
                self.check_size(&a.code)?;
                let detection = detect(&a.code, a.file_type.parse()?);
                let body = json!({
                    "is_minified": detection.minified,
                    "message": detection.message(),
                });
                Ok(serde_json::to_string_pretty(&body)?)
            }
            SMART_PROCESS => {
                let a: SmartArgs = decode(args)?;
                self.check_size(&a.code)?;
                let action: Action = a.action.parse()?;
                let modifications = match &a.modifications {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
                let req = ProcessRequest::new(&a.code, a.file_type.parse()?)
                    .action(action)
                    .modifications(modifications.as_deref())
                    .indent_size(self.indent(a.indent_size)?);
                let result = self.processor.process(&req)?;
                Ok(serde_json::to_string_pretty(&result)?)
            }
            _ => Err(BnError::UnknownTool(name.to_string())),
        }
    }

    /// Run a tool; failures come back as `{"error": ..., "tool": ...}`.
    pub fn call_boundary(&self, name: &str, args: &Value) -> String {
        match self.call(name, args) {
            Ok(output) => output,
            Err(e) if e.is_client_error() => {
                tracing::warn!(tool = %name, error = %e, "tool call rejected");
                boundary_error(name, &e.to_string())
            }
            Err(e) => {
                tracing::error!(tool = %name, error = %e, "tool call failed");
                boundary_error(name, &e.to_string())
            }
        }
    }

    fn check_size(&self, code: &str) -> Result<()> {
        if code.len() > self.format.max_input_bytes {
            return Err(BnError::InputTooLarge {
                size: code.len(),
                limit: self.format.max_input_bytes,
            });
        }
        Ok(())
    }

    fn indent(&self, requested: Option<usize>) -> Result<usize> {
        let indent = requested.unwrap_or(self.format.indent_size);
        if indent > MAX_INDENT_SIZE {
            return Err(BnError::InvalidArgument(format!(
                "indent_size must be at most {MAX_INDENT_SIZE}, got {indent}"
            )));
        }
        Ok(indent)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

/// Run a tool on the blocking pool.
pub async fn call_blocking(registry: Arc<ToolRegistry>, name: String, args: Value) -> Result<String> {
    tokio::task::spawn_blocking(move || registry.call(&name, &args))
        .await
        .map_err(|e| BnError::Other(anyhow::anyhow!("tool task failed: {e}")))?
}

/// Boundary flavour of [`call_blocking`].
pub async fn call_boundary_blocking(registry: Arc<ToolRegistry>, name: String, args: Value) -> String {
    let tool = name.clone();
    match tokio::task::spawn_blocking(move || registry.call_boundary(&name, &args)).await {
        Ok(text) => text,
        Err(e) => boundary_error(&tool, &format!("tool task failed: {e}")),
    }
}

fn boundary_error(tool: &str, message: &str) -> String {
    let body = json!({ "error": message, "tool": tool });
    serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
}

fn decode<T: DeserializeOwned>(args: &Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => args.clone(),
        _ => return Err(BnError::InvalidArgument("arguments must be an object".into())),
    };
    serde_json::from_value(args).map_err(|e| BnError::InvalidArgument(e.to_string()))
}

fn tool_language(name: &str) -> Language {
    if name.ends_with("_css") {
        Language::Css
    } else {
        Language::Js
    }
}
