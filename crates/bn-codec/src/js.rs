//! JavaScript formatting on top of [`oxc`].
//!
//! Both directions parse to an AST and print it back through the code
//! generator, so string, regex and template literals come out verbatim.

use bn_core::{BnError, Language, Result};
use oxc::allocator::Allocator;
use oxc::ast::ast::Program;
use oxc::codegen::{Codegen, CodegenOptions, IndentChar};
use oxc::parser::{Parser, ParserReturn};
use oxc::span::SourceType;

pub fn beautify(code: &str, indent_size: usize) -> Result<String> {
    if code.trim().is_empty() {
        return Ok(String::new());
    }

    let allocator = Allocator::default();
    let program = parse(&allocator, code)?;
    let options = CodegenOptions {
        indent_char: IndentChar::Space,
        indent_width: indent_size,
        ..CodegenOptions::default()
    };
    let mut out = Codegen::new().with_options(options).build(&program).code;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

pub fn minify(code: &str) -> Result<String> {
    if code.trim().is_empty() {
        return Ok(String::new());
    }

    let allocator = Allocator::default();
    let program = parse(&allocator, code)?;
    let printed = Codegen::new()
        .with_options(CodegenOptions::minify())
        .build(&program)
        .code;
    Ok(printed.trim_end_matches('\n').to_string())
}

/// Parse as an ES module first, then as a sloppy-mode script.
fn parse<'a>(allocator: &'a Allocator, code: &'a str) -> Result<Program<'a>> {
    let module = Parser::new(allocator, code, SourceType::mjs().with_jsx(true)).parse();
    if parsed_cleanly(&module) {
        return Ok(module.program);
    }

    // `with`, legacy octals and friends are rejected in module code
    let script = Parser::new(allocator, code, SourceType::cjs().with_jsx(true)).parse();
    if parsed_cleanly(&script) {
        tracing::debug!("parsed as a script after module parse failed");
        return Ok(script.program);
    }
    Err(syntax_error(code, &module))
}

fn parsed_cleanly(ret: &ParserReturn<'_>) -> bool {
    !ret.panicked && ret.errors.is_empty()
}

fn syntax_error(code: &str, ret: &ParserReturn<'_>) -> BnError {
    let Some(first) = ret.errors.first() else {
        return BnError::format(Language::Js, "parser panicked");
    };
    let offset = first
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map_or(0, |label| label.offset());
    let (line, column) = line_col(code, offset);
    BnError::Syntax {
        language: Language::Js,
        line,
        column,
        message: first.to_string(),
    }
}

/// 1-based line and column of a byte offset.
fn line_col(code: &str, offset: usize) -> (usize, usize) {
    let before = code.get(..offset).unwrap_or(code);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beautify_statements() {
        let out = beautify("function calculate(a,b){return a+b*2;}const result=calculate(5,3);", 2).unwrap();
        assert!(out.starts_with("function calculate(a, b) {\n  return a + b * 2;\n}\n"));
        assert!(out.contains("const result = calculate(5, 3);"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_indent_width() {
        let out = beautify("if(a){b()}", 4).unwrap();
        assert!(out.contains("\n    b();\n"));
        assert!(!out.contains('\t'));
    }

    #[test]
    fn test_regex_after_paren_kept() {
        let src = r#"if (x > 1) /ab  c/.test("ab  c") ? console.log("yes") : console.log("no")"#;
        assert!(minify(src).unwrap().contains("/ab  c/.test("));
        assert!(beautify(src, 2).unwrap().contains("/ab  c/.test("));
    }

    #[test]
    fn test_regex_after_block_kept() {
        let src = "function f() { return 1 }\n/ab  c/.test(\"ab  c\") && console.log(\"r\")";
        let min = minify(src).unwrap();
        assert!(min.contains("/ab  c/.test("));
        assert_eq!(minify(&min).unwrap(), min);
        assert!(beautify(src, 2).unwrap().contains("/ab  c/.test("));
    }

    #[test]
    fn test_minify_drops_comments_and_whitespace() {
        let out = minify("// lead\nlet a = 1; /* mid */\nlet b = a +  2;\n").unwrap();
        assert!(!out.contains("lead"));
        assert!(!out.contains("mid"));
        assert!(!out.contains('\n'));
        assert!(out.starts_with("let a=1;let b=a+2"));
    }

    #[test]
    fn test_beautify_keeps_comments() {
        let out = beautify("// lead\nlet a=1;\n", 2).unwrap();
        assert!(out.contains("// lead"));
    }

    #[test]
    fn test_sloppy_script_falls_back() {
        assert!(minify("with(o){x=1}").unwrap().starts_with("with(o)"));
        assert!(minify("import a from 'a';a()").unwrap().starts_with("import a from"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(beautify("", 2).unwrap(), "");
        assert_eq!(minify("  \n\t").unwrap(), "");
    }

    #[test]
    fn test_syntax_error_position() {
        let err = minify("let a = 1;\nlet b = \"open").unwrap_err();
        match err {
            BnError::Syntax { language, line, .. } => {
                assert_eq!(language, Language::Js);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_line_col() {
        assert_eq!(line_col("ab\ncd", 0), (1, 1));
        assert_eq!(line_col("ab\ncd", 4), (2, 2));
        assert_eq!(line_col("é\nx", 3), (2, 1));
    }
}
