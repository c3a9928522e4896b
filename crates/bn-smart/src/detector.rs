//! Minification detector.
//!
//! A cascade of independent predicates over line statistics and a few
//! language-specific spacing patterns. The first predicate that fires decides.

use bn_core::{char_len, Language};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Keyword/punctuation shapes that only appear when spaces were stripped.
static RE_JS_TIGHT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"function\w*\(",
        r"var\w",
        r"let\w",
        r"const\w",
        r"if\(",
        r"for\(",
        r"while\(",
        r"else\{",
        r"\}\w",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static RE_COMMA_TIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",[^\s]").unwrap());
static RE_COMMA_SPACED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s").unwrap());
static RE_COLON_TIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":[^\s]").unwrap());
static RE_SEMICOLON_TIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";[^\s]").unwrap());

const SINGLE_LINE_MIN_CHARS: usize = 10;
const LONG_LINE_AVG: f64 = 200.0;
const SPARSE_MIN_CHARS: usize = 500;
const SPARSE_NEWLINE_RATIO: f64 = 0.01;
const FLAT_MIN_LINES: usize = 10;
const FLAT_INDENTED_RATIO: f64 = 0.1;
const FLAT_LINE_AVG: f64 = 100.0;
const JS_SCORE_THRESHOLD: usize = 2;
const CSS_LINE_AVG: f64 = 30.0;

/// The cascade step that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    EmptyInput,
    SingleLine,
    LongLines,
    SparseNewlines,
    FlatIndentation,
    JsPatterns,
    CssPatterns,
    NoSignal,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::SingleLine => "single_line",
            Self::LongLines => "long_lines",
            Self::SparseNewlines => "sparse_newlines",
            Self::FlatIndentation => "flat_indentation",
            Self::JsPatterns => "js_patterns",
            Self::CssPatterns => "css_patterns",
            Self::NoSignal => "no_signal",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub minified: bool,
    pub rule: Rule,
}

impl Detection {
    /// Human-readable verdict used by the `is_minified` tool.
    pub fn message(&self) -> &'static str {
        if self.minified {
            "Code appears to be minified"
        } else {
            "Code appears to be beautified/normal"
        }
    }
}

/// Line statistics shared by every predicate.
struct Stats<'a> {
    code: &'a str,
    language: Language,
    lines: Vec<&'a str>,
    total_chars: usize,
    avg_line_length: f64,
}

impl<'a> Stats<'a> {
    fn new(code: &'a str, language: Language) -> Option<Self> {
        let lines: Vec<&str> = code.split('\n').collect();
        let non_empty: Vec<usize> = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| char_len(l))
            .collect();
        if non_empty.is_empty() {
            return None;
        }
        let avg_line_length = non_empty.iter().sum::<usize>() as f64 / non_empty.len() as f64;
        Some(Self {
            code,
            language,
            lines,
            total_chars: char_len(code),
            avg_line_length,
        })
    }
}

type Predicate = fn(&Stats<'_>) -> bool;

const CASCADE: &[(Rule, Predicate)] = &[
    (Rule::SingleLine, single_line),
    (Rule::LongLines, long_lines),
    (Rule::SparseNewlines, sparse_newlines),
    (Rule::FlatIndentation, flat_indentation),
    (Rule::JsPatterns, js_patterns),
    (Rule::CssPatterns, css_patterns),
];

fn single_line(s: &Stats<'_>) -> bool {
    s.lines.len() == 1 && char_len(s.code.trim()) > SINGLE_LINE_MIN_CHARS
}

fn long_lines(s: &Stats<'_>) -> bool {
    s.avg_line_length > LONG_LINE_AVG
}

fn sparse_newlines(s: &Stats<'_>) -> bool {
    let ratio = s.lines.len() as f64 / s.total_chars as f64;
    s.total_chars > SPARSE_MIN_CHARS && ratio < SPARSE_NEWLINE_RATIO
}

fn flat_indentation(s: &Stats<'_>) -> bool {
    let indented = s
        .lines
        .iter()
        .filter(|l| l.starts_with("  ") || l.starts_with('\t'))
        .count();
    s.lines.len() > FLAT_MIN_LINES
        && (indented as f64) < s.lines.len() as f64 * FLAT_INDENTED_RATIO
        && s.avg_line_length > FLAT_LINE_AVG
}

fn js_patterns(s: &Stats<'_>) -> bool {
    s.language == Language::Js && js_score(s.code) >= JS_SCORE_THRESHOLD
}

fn css_patterns(s: &Stats<'_>) -> bool {
    s.language == Language::Css
        && (RE_COLON_TIGHT.is_match(s.code) || RE_SEMICOLON_TIGHT.is_match(s.code))
        && s.avg_line_length > CSS_LINE_AVG
}

/// One point per tight keyword shape, plus two when unspaced commas dominate.
fn js_score(code: &str) -> usize {
    let mut score = RE_JS_TIGHT.iter().filter(|re| re.is_match(code)).count();
    let tight = RE_COMMA_TIGHT.find_iter(code).count();
    let spaced = RE_COMMA_SPACED.find_iter(code).count();
    if tight > spaced && tight > 1 {
        score += 2;
    }
    score
}

/// Run the cascade and report which rule decided.
pub fn detect(code: &str, language: Language) -> Detection {
    let Some(stats) = Stats::new(code, language) else {
        return Detection { minified: false, rule: Rule::EmptyInput };
    };

    let detection = CASCADE
        .iter()
        .find(|(_, predicate)| predicate(&stats))
        .map(|&(rule, _)| Detection { minified: true, rule })
        .unwrap_or(Detection { minified: false, rule: Rule::NoSignal });

    tracing::debug!(
        %language,
        chars = stats.total_chars,
        lines = stats.lines.len(),
        avg_line_length = stats.avg_line_length,
        rule = %detection.rule,
        minified = detection.minified,
        "detect"
    );
    detection
}

pub fn is_minified(code: &str, language: Language) -> bool {
    detect(code, language).minified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_score() {
        assert_eq!(js_score("function(a){}"), 1);
        assert_eq!(js_score("if(a){b()}else{c()}"), 3);
        assert_eq!(js_score("f(a,b,c)"), 2);
        assert_eq!(js_score("f(a, b, c)"), 0);
        assert_eq!(js_score("f(a,b)"), 0);
    }

    #[test]
    fn test_stats() {
        let s = Stats::new("ab\n\n  cdef\n", Language::Js).unwrap();
        assert_eq!(s.lines.len(), 4);
        assert_eq!(s.total_chars, 11);
        assert!((s.avg_line_length - 4.0).abs() < f64::EPSILON);
        assert!(Stats::new(" \n\t\n", Language::Css).is_none());
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::SingleLine.to_string(), "single_line");
        let json = serde_json::to_string(&Detection { minified: true, rule: Rule::JsPatterns }).unwrap();
        assert_eq!(json, r#"{"minified":true,"rule":"js_patterns"}"#);
    }
}
