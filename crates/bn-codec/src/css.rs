//! CSS formatting on top of [`lightningcss`].
//!
//! Both directions parse the stylesheet first, so malformed input is
//! reported instead of being passed through.

use bn_core::{BnError, Language, Result};
use lightningcss::error::{Error as CssError, ParserError};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

/// Indent width lightningcss prints with.
const PRINTER_INDENT: usize = 2;

pub fn beautify(code: &str, indent_size: usize) -> Result<String> {
    if code.trim().is_empty() {
        return Ok(String::new());
    }

    let sheet = StyleSheet::parse(code, ParserOptions::default()).map_err(syntax_error)?;
    let printed = sheet
        .to_css(PrinterOptions::default())
        .map_err(|e| BnError::format(Language::Css, e.to_string()))?;

    let mut out = reindent(&printed.code, indent_size);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

pub fn minify(code: &str) -> Result<String> {
    if code.trim().is_empty() {
        return Ok(String::new());
    }

    let mut sheet = StyleSheet::parse(code, ParserOptions::default()).map_err(syntax_error)?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| BnError::format(Language::Css, e.to_string()))?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| BnError::format(Language::Css, e.to_string()))?;

    Ok(printed.code)
}

fn syntax_error(err: CssError<ParserError<'_>>) -> BnError {
    match &err.loc {
        Some(loc) => BnError::Syntax {
            language: Language::Css,
            line: loc.line as usize + 1,
            column: loc.column as usize,
            message: err.kind.to_string(),
        },
        None => BnError::format(Language::Css, err.kind.to_string()),
    }
}

/// Rescales the printer's two-space indentation to `indent_size`.
fn reindent(printed: &str, indent_size: usize) -> String {
    if indent_size == PRINTER_INDENT {
        return printed.to_string();
    }

    let mut out = String::with_capacity(printed.len());
    for line in printed.split_inclusive('\n') {
        let body = line.trim_start_matches(' ');
        let depth = line.len() - body.len();
        let width = depth / PRINTER_INDENT * indent_size + depth % PRINTER_INDENT;
        out.extend(std::iter::repeat(' ').take(width));
        out.push_str(body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reindent() {
        let printed = "a {\n  b: c;\n}\n@media x {\n  a {\n    b: c;\n  }\n}\n";
        assert_eq!(reindent(printed, 2), printed);
        assert_eq!(
            reindent(printed, 4),
            "a {\n    b: c;\n}\n@media x {\n    a {\n        b: c;\n    }\n}\n"
        );
        assert_eq!(reindent("a {\n  b: c;\n}", 0), "a {\nb: c;\n}");
    }

    #[test]
    fn test_beautify_rule() {
        let out = beautify(".container{display:flex;margin:0 auto}", 2).unwrap();
        assert!(out.starts_with(".container {\n"));
        assert!(out.contains("  display: flex;\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_minify_rule() {
        let out = minify(".foo {\n  color: black;\n}\n").unwrap();
        assert!(out.starts_with(".foo{"));
        assert!(!out.contains('\n'));
        assert!(out.len() <= 18);
    }

    #[test]
    fn test_empty() {
        assert_eq!(beautify("", 2).unwrap(), "");
        assert_eq!(minify("  \n").unwrap(), "");
    }

    #[test]
    fn test_beautify_reprints_source() {
        let out = beautify("/* note */\na::before { color: red }", 2).unwrap();
        assert!(!out.contains("note"));
        assert!(out.contains("color: red"));
    }

    #[test]
    fn test_invalid_selector() {
        let err = beautify("..a { color: red }", 2).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().starts_with("CSS"));
    }
}
