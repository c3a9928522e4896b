use crate::*;
use bn_core::{BnError, Language, Result};

const CALCULATE_JS: &str = "function calculate(a,b){return a+b*2;}const result=calculate(5,3);";
const CONTAINER_CSS: &str = ".container{display:flex;flex-direction:column;gap:1rem;padding:20px}";

// ========== JavaScript ==========

#[test]
fn test_js_beautify_calculate() {
    let out = js::beautify(CALCULATE_JS, 2).unwrap();
    assert!(out.contains('\n'));
    assert!(out.lines().any(|l| l.starts_with("  ")));
    assert!(out.contains("return a + b * 2;"));
}

#[test]
fn test_js_reminify_has_no_newlines() {
    let pretty = js::beautify(CALCULATE_JS, 2).unwrap();
    let min = js::minify(&pretty).unwrap();
    assert!(!min.contains('\n'));
    assert!(min.len() <= CALCULATE_JS.len() + 1);
}

#[test]
fn test_js_round_trip() {
    let samples = [
        "var o={a:1,b:[1,2]};if(o.a>0){o.b.push(3)}else{o.b.pop()}",
        "const f=(a,b)=>a*b;let s=`x${f(1,2)}`;for(let i=0;i<3;i++){s+=i}",
        "try{run()}catch(e){log(e.message)}finally{done()}",
        "var re=/ab+c/gi,t=typeof x===\"string\"?x.trim():'';",
    ];
    for src in samples {
        let min = js::minify(src).unwrap();
        let again = js::minify(&js::beautify(&min, 2).unwrap()).unwrap();
        assert_eq!(again, min, "round trip changed {src}");
    }
}

#[test]
fn test_js_reaches_fixed_point() {
    let once = js::minify(&js::beautify(CALCULATE_JS, 2).unwrap()).unwrap();
    let twice = js::minify(&js::beautify(&once, 2).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_js_minify_preserves_literals() {
    let src = "const s = 'a  b', t = `x  ${s}  y`, r = /a  b/g;\nfoo(s, t, r)";
    let min = js::minify(src).unwrap();
    assert!(min.contains("a  b"));
    assert!(min.contains("`x  ${s}  y`"));
    assert!(min.contains("/a  b/g"));
}

#[test]
fn test_js_beautify_idempotent() {
    let once = js::beautify(CALCULATE_JS, 4).unwrap();
    assert_eq!(js::beautify(&once, 4).unwrap(), once);
}

#[test]
fn test_js_hashbang_kept() {
    let out = js::minify("#!/usr/bin/env node\nconsole.log(1)\n").unwrap();
    assert!(out.starts_with("#!/usr/bin/env node\n"));
}

#[test]
fn test_js_syntax_error_location() {
    let err = js::minify("let a = 1;\nlet b = \"open").unwrap_err();
    match err {
        BnError::Syntax { language, line, .. } => {
            assert_eq!(language, Language::Js);
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ========== CSS ==========

#[test]
fn test_css_beautify_container() {
    let out = css::beautify(CONTAINER_CSS, 2).unwrap();
    assert!(out.starts_with(".container {\n"));
    assert!(out.lines().skip(1).any(|l| l.starts_with("  ")));
}

#[test]
fn test_css_indent_four() {
    let out = css::beautify(CONTAINER_CSS, 4).unwrap();
    assert!(out.lines().skip(1).any(|l| l.starts_with("    ") && !l.starts_with("     ")));
}

#[test]
fn test_css_minify_has_no_newlines() {
    let pretty = css::beautify(CONTAINER_CSS, 2).unwrap();
    let min = css::minify(&pretty).unwrap();
    assert!(!min.contains('\n'));
    assert!(min.starts_with(".container{"));
}

#[test]
fn test_css_round_trip() {
    for src in [".foo{color:red}.bar{margin:0 auto}", "a{padding:4px}@media (width>=600px){a{padding:8px}}"] {
        let min = css::minify(src).unwrap();
        let again = css::minify(&css::beautify(&min, 2).unwrap()).unwrap();
        assert_eq!(again, min);
    }
}

// ========== FormatterSet ==========

struct Shout;

impl CodeFormatter for Shout {
    fn language(&self) -> Language {
        Language::Js
    }

    fn beautify(&self, code: &str, _indent_size: usize) -> Result<String> {
        Ok(code.to_uppercase())
    }

    fn minify(&self, code: &str) -> Result<String> {
        Ok(code.to_lowercase())
    }
}

#[test]
fn test_default_set_dispatches_by_language() {
    let set = FormatterSet::default();
    assert_eq!(set.get(Language::Js).language(), Language::Js);
    assert_eq!(set.get(Language::Css).language(), Language::Css);
    assert!(set.minify(Language::Js, "a + b").unwrap().starts_with("a+b"));
}

#[test]
fn test_injected_formatter() {
    let set = FormatterSet::default().with_js(Shout);
    assert_eq!(set.beautify(Language::Js, "abc", 2).unwrap(), "ABC");
    assert_eq!(set.minify(Language::Js, "ABC").unwrap(), "abc");
    assert!(set.minify(Language::Css, "a{color:red}").unwrap().starts_with("a{"));
}
