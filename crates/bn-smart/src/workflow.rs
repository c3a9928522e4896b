//! The read/edit/write workflow.
//!
//! Detection runs once on the original code. Minified input is beautified
//! for reading; `edit` applies the changes and always returns readable code;
//! `write` applies them and re-minifies when the input came in minified.

use bn_codec::FormatterSet;
use bn_core::config::DEFAULT_INDENT_SIZE;
use bn_core::{char_len, Action, Language, Modification, ProcessResult, Result};

use crate::detector::detect;
use crate::modifications::{apply_all, parse_modifications, ModificationError};

pub const READ_MESSAGE: &str =
    "Code beautified for reading. Edit and use 'write' action to get minified result.";
pub const EDIT_MESSAGE: &str = "Modifications applied. Use 'write' action to get minified result.";
pub const WRITE_MESSAGE: &str = "Code processed and minified for production.";

/// Input of one workflow call.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRequest<'a> {
    pub code: &'a str,
    pub language: Language,
    pub action: Action,
    /// Raw JSON payload. `None` and `""` both mean no modifications.
    pub modifications: Option<&'a str>,
    pub indent_size: usize,
}

impl<'a> ProcessRequest<'a> {
    pub fn new(code: &'a str, language: Language) -> Self {
        Self {
            code,
            language,
            action: Action::default(),
            modifications: None,
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn modifications(mut self, payload: Option<&'a str>) -> Self {
        self.modifications = payload;
        self
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    fn parsed_modifications(&self) -> Option<std::result::Result<Vec<Modification>, ModificationError>> {
        self.modifications
            .filter(|raw| !raw.is_empty())
            .map(parse_modifications)
    }
}

/// Runs the workflow against a set of formatters.
#[derive(Debug, Default)]
pub struct SmartProcessor {
    formatters: FormatterSet,
}

impl SmartProcessor {
    pub fn new(formatters: FormatterSet) -> Self {
        Self { formatters }
    }

    pub fn formatters(&self) -> &FormatterSet {
        &self.formatters
    }

    /// Errors come only from the formatters. A bad modification payload is
    /// reported in the result for `edit` and ignored for `write`.
    pub fn process(&self, req: &ProcessRequest<'_>) -> Result<ProcessResult> {
        let formatter = self.formatters.get(req.language);
        let detection = detect(req.code, req.language);

        let mut result = ProcessResult::new(req.action, req.language, req.code);
        result.was_minified = detection.minified;

        let mut working = req.code.to_string();
        if detection.minified {
            working = formatter.beautify(req.code, req.indent_size)?;
            result.was_beautified = true;
            result.beautified_length = Some(char_len(&working));
        }

        tracing::debug!(
            action = %req.action,
            language = %req.language,
            minified = detection.minified,
            rule = %detection.rule,
            "smart process"
        );

        match req.action {
            Action::Read => Ok(result.with_code(working, READ_MESSAGE)),
            Action::Edit => {
                let mut code = req.code.to_string();
                match req.parsed_modifications() {
                    None => {}
                    Some(Ok(mods)) => {
                        code = apply_all(&code, &mods);
                        result.modifications_applied = Some(mods.len());
                    }
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "edit: rejected modifications");
                        result.error = Some(e.to_string());
                    }
                }
                let code = formatter.beautify(&code, req.indent_size)?;
                Ok(result.with_code(code, EDIT_MESSAGE))
            }
            Action::Write => {
                let mut code = req.code.to_string();
                if let Some(Ok(mods)) = req.parsed_modifications() {
                    code = apply_all(&code, &mods);
                }
                if detection.minified {
                    code = formatter.minify(&code)?;
                    result.was_re_minified = true;
                }
                Ok(result.with_code(code, WRITE_MESSAGE))
            }
        }
    }
}

/// One-shot workflow call with the default formatters.
pub fn smart_process(
    code: &str,
    language: Language,
    action: Action,
    modifications: Option<&str>,
    indent_size: usize,
) -> Result<ProcessResult> {
    let req = ProcessRequest::new(code, language)
        .action(action)
        .modifications(modifications)
        .indent_size(indent_size);
    SmartProcessor::default().process(&req)
}
