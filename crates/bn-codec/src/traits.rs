use bn_core::{Language, Result};

use crate::{css, js};

/// A beautify/minify pair for one language.
pub trait CodeFormatter: Send + Sync {
    /// Language handled by this formatter.
    fn language(&self) -> Language;

    /// Reformat `code` for reading with `indent_size` spaces per level.
    fn beautify(&self, code: &str, indent_size: usize) -> Result<String>;

    /// Strip everything a parser does not need.
    fn minify(&self, code: &str) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsFormatter;

impl CodeFormatter for JsFormatter {
    fn language(&self) -> Language {
        Language::Js
    }

    fn beautify(&self, code: &str, indent_size: usize) -> Result<String> {
        js::beautify(code, indent_size)
    }

    fn minify(&self, code: &str) -> Result<String> {
        js::minify(code)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CssFormatter;

impl CodeFormatter for CssFormatter {
    fn language(&self) -> Language {
        Language::Css
    }

    fn beautify(&self, code: &str, indent_size: usize) -> Result<String> {
        css::beautify(code, indent_size)
    }

    fn minify(&self, code: &str) -> Result<String> {
        css::minify(code)
    }
}

/// One formatter per supported language.
pub struct FormatterSet {
    js: Box<dyn CodeFormatter>,
    css: Box<dyn CodeFormatter>,
}

impl FormatterSet {
    pub fn get(&self, language: Language) -> &dyn CodeFormatter {
        match language {
            Language::Js => self.js.as_ref(),
            Language::Css => self.css.as_ref(),
        }
    }

    pub fn with_js(mut self, formatter: impl CodeFormatter + 'static) -> Self {
        self.js = Box::new(formatter);
        self
    }

    pub fn with_css(mut self, formatter: impl CodeFormatter + 'static) -> Self {
        self.css = Box::new(formatter);
        self
    }

    pub fn beautify(&self, language: Language, code: &str, indent_size: usize) -> Result<String> {
        tracing::debug!(%language, len = code.len(), indent_size, "beautify");
        self.get(language).beautify(code, indent_size)
    }

    pub fn minify(&self, language: Language, code: &str) -> Result<String> {
        tracing::debug!(%language, len = code.len(), "minify");
        self.get(language).minify(code)
    }
}

impl Default for FormatterSet {
    fn default() -> Self {
        Self {
            js: Box::new(JsFormatter),
            css: Box::new(CssFormatter),
        }
    }
}

impl std::fmt::Debug for FormatterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterSet")
            .field("js", &self.js.language())
            .field("css", &self.css.language())
            .finish()
    }
}
