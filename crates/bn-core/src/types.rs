use crate::error::{BnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source language of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Js,
    Css,
}

const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];
const CSS_EXTENSIONS: &[&str] = &["css"];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
        }
    }

    /// Guess the language from a file name's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        if JS_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Js)
        } else if CSS_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Css)
        } else {
            None
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Js => f.write_str("JavaScript"),
            Self::Css => f.write_str("CSS"),
        }
    }
}

impl FromStr for Language {
    type Err = BnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "js" | "javascript" | "jsx" | "mjs" | "cjs" => Ok(Self::Js),
            "css" => Ok(Self::Css),
            _ => Err(BnError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// What the smart workflow should do with the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Read,
    Edit,
    Write,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Edit => "edit",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "edit" => Ok(Self::Edit),
            "write" => Ok(Self::Write),
            _ => Err(BnError::UnknownAction(s.to_string())),
        }
    }
}

/// A literal find/replace instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modification {
    #[serde(default)]
    pub find: String,
    #[serde(default)]
    pub replace: String,
}

impl Modification {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self { find: find.into(), replace: replace.into() }
    }

    /// Replace every occurrence of `find`. An empty `find` leaves the text alone.
    pub fn apply(&self, text: &str) -> String {
        if self.find.is_empty() {
            return text.to_string();
        }
        text.replace(&self.find, &self.replace)
    }
}

/// Length in characters, the unit every reported length uses.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Outcome of one smart-process call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub was_minified: bool,
    pub was_beautified: bool,
    pub action: Action,
    pub file_type: Language,
    pub original_length: usize,
    pub final_length: usize,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beautified_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications_applied: Option<usize>,
    #[serde(default)]
    pub was_re_minified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResult {
    pub fn new(action: Action, file_type: Language, original: &str) -> Self {
        Self {
            was_minified: false,
            was_beautified: false,
            action,
            file_type,
            original_length: char_len(original),
            final_length: 0,
            code: String::new(),
            message: String::new(),
            beautified_length: None,
            modifications_applied: None,
            was_re_minified: false,
            error: None,
        }
    }

    /// Store the final code, keeping `final_length` in step with it.
    pub fn with_code(mut self, code: String, message: impl Into<String>) -> Self {
        self.final_length = char_len(&code);
        self.code = code;
        self.message = message.into();
        self
    }
}
