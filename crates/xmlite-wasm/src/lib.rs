//! WASM bindings for the xmlite parser.
//!
//! Exposes `parse()` and `check()` to JavaScript via wasm-bindgen.
//! `parse()` returns the element tree as a plain JS object
//! `{ name, attributes, children }` or throws on error. The `*WithMaxDepth`
//! variants reject documents nested deeper than the given limit instead of
//! risking a stack overflow on hostile input.

use wasm_bindgen::prelude::*;
use xmlite_parser::{Element, ParseError, Parser};

/// Parse xmlite markup into an element tree.
///
/// Returns `{ name: string, attributes: Map<string, string>, children: [...] }`.
/// Throws a JS error carrying the line and column if parsing fails.
/// Nesting is unbounded; see `parseWithMaxDepth` for untrusted input.
#[wasm_bindgen]
pub fn parse(source: &str) -> Result<JsValue, JsError> {
    to_js(parse_with(None, source))
}

/// Like `parse`, but nesting deeper than `max_depth` levels is an error.
#[wasm_bindgen(js_name = parseWithMaxDepth)]
pub fn parse_with_max_depth(source: &str, max_depth: u32) -> Result<JsValue, JsError> {
    to_js(parse_with(Some(max_depth), source))
}

/// Validate markup without building a JS value.
///
/// Returns `{ ok: true }` or `{ ok: false, message, line, column }`.
#[wasm_bindgen]
pub fn check(source: &str) -> Result<JsValue, JsError> {
    check_result(parse_with(None, source))
}

/// Like `check`, but nesting deeper than `max_depth` levels is an error.
#[wasm_bindgen(js_name = checkWithMaxDepth)]
pub fn check_with_max_depth(source: &str, max_depth: u32) -> Result<JsValue, JsError> {
    check_result(parse_with(Some(max_depth), source))
}

fn parse_with(max_depth: Option<u32>, source: &str) -> Result<Element, ParseError> {
    let parser = match max_depth {
        Some(limit) => Parser::with_max_depth(limit as usize),
        None => Parser::new(),
    };
    parser.parse_document(source)
}

fn to_js(result: Result<Element, ParseError>) -> Result<JsValue, JsError> {
    let root = result.map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&root).map_err(|e| JsError::new(&e.to_string()))
}

fn check_result(result: Result<Element, ParseError>) -> Result<JsValue, JsError> {
    let js_obj = js_sys::Object::new();

    let set = |key: &str, value: JsValue| {
        js_sys::Reflect::set(&js_obj, &key.into(), &value)
            .map(|_| ())
            .map_err(|_| JsError::new(&format!("Failed to set {key} property")))
    };

    match result {
        Ok(_) => set("ok", true.into())?,
        Err(e) => {
            set("ok", false.into())?;
            set("message", e.kind.to_string().into())?;
            set("line", (e.line as u32).into())?;
            set("column", (e.column as u32).into())?;
        }
    }

    Ok(js_obj.into())
}

/// Get the parser version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xmlite_parser::ErrorKind;

    // =========================================================================
    // Native tests (non-WASM): verify the parse pipeline the bindings wrap
    // =========================================================================

    fn native_parse(source: &str) -> Element {
        parse_with(None, source).unwrap()
    }

    #[test]
    fn test_simple_document() {
        let root = native_parse("<a x=\"1\"><b/></a>");
        assert_eq!(
            root,
            Element::new("a")
                .with_attribute("x", "1")
                .with_child(Element::new("b"))
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = xmlite_parser::Parser::parse("<a></b>").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::TagMismatch {
                expected: "a".into(),
                found: "b".into()
            }
        );
        assert!(err.to_string().contains("line 1, column 4"));
    }

    #[test]
    fn test_max_depth_rejects_deep_document() {
        let depth = 50_000;
        let source = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
        let err = parse_with(Some(32), &source).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 32 });
        assert!(parse_with(Some(32), "<a><b/></a>").is_ok());
    }

    #[test]
    fn test_nested_error_position() {
        let err = parse_with(None, "<a><b></c></a>").unwrap_err();
        assert_eq!((err.line, err.column), (1, 7));
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_parses() {
        // Verify no state leaks between parses
        let first = native_parse("<x k=\"1\"/>");
        let second = native_parse("<y/>");
        assert_eq!(first.attribute("k"), Some("1"));
        assert!(second.attributes().is_empty());
    }
}
