// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parser module tests
//!
//! Tests for parsing rc files into the generic tree:
//! - Comments, separators and trailing commas
//! - Unquoted concatenation, quoted and triple-quoted strings
//! - Dotted keys and duplicate-key merging
//! - Path accessors and their errors
//! - Syntax error positions

use crate::config::RC_TEMPLATE;
use crate::core::{
    parser::{Document, ParseError},
    value::Value,
};

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

#[test]
fn test_parse_default_template() {
    let doc = Document::parse(RC_TEMPLATE).unwrap();

    assert_eq!(doc.get_string("appearance.title").unwrap(), "Ataman");
    assert_eq!(doc.get_string("bindings.q.description").unwrap(), "Session...");
    assert_eq!(
        doc.get_string("bindings.q.bindings.f.actionId").unwrap(),
        "OpenAtamanConfigAction"
    );
    assert_eq!(
        doc.get_string("bindings.q.bindings.f.description").unwrap(),
        "Open ~/.atamanrc.config"
    );
}

#[test]
fn test_comments_are_ignored() {
    let content = r#"
# hash comment
// slash comment
a: 1 # trailing
b: two // trailing
"#;
    let doc = Document::parse(content).unwrap();

    assert_eq!(doc.get_value("a").unwrap(), &Value::Number("1".to_string()));
    assert_eq!(doc.get_value("b").unwrap(), &string("two"));
    assert_eq!(doc.root().len(), 2);
}

#[test]
fn test_separators() {
    let doc = Document::parse("a = 1, b: 2\nc { d: 3 }\ne {\n}\n").unwrap();

    assert_eq!(doc.get_string("a").unwrap(), "1");
    assert_eq!(doc.get_string("b").unwrap(), "2");
    assert_eq!(doc.get_string("c.d").unwrap(), "3");
    assert!(doc.get_object("e").unwrap().is_empty());
}

#[test]
fn test_braced_root() {
    let doc = Document::parse("{ appearance { title: Braced } }").unwrap();
    assert_eq!(doc.get_string("appearance.title").unwrap(), "Braced");
}

#[test]
fn test_empty_document() {
    let doc = Document::parse("  # only a comment\n\n").unwrap();
    assert!(doc.root().is_empty());
    assert!(!doc.has_path("bindings"));
}

#[test]
fn test_unquoted_concatenation_keeps_inner_whitespace() {
    let doc = Document::parse("d: Open   the  file   \n").unwrap();
    assert_eq!(doc.get_string("d").unwrap(), "Open   the  file");
}

#[test]
fn test_quoted_strings() {
    let content = r#"
a: "with: colon, and {braces}"
b: "escaped \"quote\" \t tab \u0041"
c: """raw "multi"
line"""
d: "quoted" and unquoted
"#;
    let doc = Document::parse(content).unwrap();

    assert_eq!(doc.get_string("a").unwrap(), "with: colon, and {braces}");
    assert_eq!(doc.get_string("b").unwrap(), "escaped \"quote\" \t tab A");
    assert_eq!(doc.get_string("c").unwrap(), "raw \"multi\"\nline");
    assert_eq!(doc.get_string("d").unwrap(), "quoted and unquoted");
}

#[test]
fn test_quoted_keys() {
    let doc = Document::parse("\"a.b\" { \"x y\": 1 }").unwrap();
    let object = doc.root().get("a.b").and_then(Value::as_object).unwrap();
    assert!(object.contains_key("x y"));
}

#[test]
fn test_scalar_types() {
    let doc = Document::parse("t: true\nf: false\nn: null\ni: -12\nx: 1.5\ns: 1.2.3").unwrap();

    assert_eq!(doc.get_value("t").unwrap(), &Value::Bool(true));
    assert_eq!(doc.get_value("f").unwrap(), &Value::Bool(false));
    assert_eq!(doc.get_value("i").unwrap().as_f64(), Some(-12.0));
    assert_eq!(doc.get_value("x").unwrap().as_f64(), Some(1.5));
    assert_eq!(doc.get_value("s").unwrap(), &string("1.2.3"));
    assert!(!doc.has_path("n"));
    assert!(matches!(doc.get_value("n"), Err(ParseError::Missing(_))));
}

#[test]
fn test_lists() {
    let doc = Document::parse("l: [a, \"b\", 3,\n  { k: v }\n]\nempty: []").unwrap();

    match doc.get_value("l").unwrap() {
        Value::Array(items) => {
            assert_eq!(items.len(), 4);
            assert_eq!(items[0], string("a"));
            assert_eq!(items[2], Value::Number("3".to_string()));
            assert!(items[3].as_object().is_some());
        }
        other => panic!("Expected list, got: {:?}", other),
    }
    assert_eq!(doc.get_value("empty").unwrap(), &Value::Array(vec![]));
}

#[test]
fn test_dotted_keys_create_objects() {
    let doc = Document::parse("appearance.title: Dotted\nbindings.q.description: Q").unwrap();

    assert_eq!(doc.get_string("appearance.title").unwrap(), "Dotted");
    assert_eq!(doc.get_string("bindings.q.description").unwrap(), "Q");
}

#[test]
fn test_duplicate_objects_merge() {
    let content = r#"
bindings { a { description: A, actionId: X } }
bindings { b { description: B, actionId: Y } }
bindings.a.actionId: Z
"#;
    let doc = Document::parse(content).unwrap();
    let bindings = doc.get_object("bindings").unwrap();

    let keys: Vec<&str> = bindings.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(doc.get_string("bindings.a.actionId").unwrap(), "Z");
    assert_eq!(doc.get_string("bindings.a.description").unwrap(), "A");
}

#[test]
fn test_later_scalar_overrides() {
    let doc = Document::parse("title: one\ntitle: two").unwrap();
    assert_eq!(doc.get_string("title").unwrap(), "two");
}

#[test]
fn test_get_string_coerces_scalars() {
    let doc = Document::parse("n: 42\nb: true\no { }").unwrap();

    assert_eq!(doc.get_string("n").unwrap(), "42");
    assert_eq!(doc.get_string("b").unwrap(), "true");
    assert_eq!(
        doc.get_string("o"),
        Err(ParseError::WrongType {
            path: "o".to_string(),
            expected: "STRING",
            found: "OBJECT",
        })
    );
}

#[test]
fn test_missing_path() {
    let doc = Document::parse("a { b: 1 }").unwrap();

    assert!(doc.has_path("a.b"));
    assert!(!doc.has_path("a.c"));
    assert!(!doc.has_path("a.b.c"));
    assert_eq!(doc.get_string("a.c"), Err(ParseError::Missing("a.c".to_string())));
    assert!(matches!(doc.get_object("a.b"), Err(ParseError::WrongType { .. })));
}

#[test]
fn test_unterminated_object_reports_position() {
    let result = Document::parse("bindings {\n  q { description: Q\n");

    match result {
        Err(ParseError::InvalidSyntax { line, message, .. }) => {
            assert_eq!(line, 3);
            assert!(message.contains("unterminated"), "message: {}", message);
        }
        other => panic!("Expected InvalidSyntax, got: {:?}", other),
    }
}

#[test]
fn test_missing_separator_reports_column() {
    let result = Document::parse("title: ok\nbad value } x");

    match result {
        Err(ParseError::InvalidSyntax { line, column, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(column, 5);
        }
        other => panic!("Expected InvalidSyntax, got: {:?}", other),
    }
}

#[test]
fn test_invalid_inputs() {
    let cases = [
        "a: \"unterminated",
        "a: ",
        "a { b: 1 } }",
        "{ a: 1 } b: 2",
        "a: [1, 2",
        "a: ${b}",
        "a += 1",
        "a: \"bad \\q escape\"",
        "a: x, , b: y",
    ];

    for case in cases {
        assert!(
            matches!(Document::parse(case), Err(ParseError::InvalidSyntax { .. })),
            "Should reject: {:?}",
            case
        );
    }
}

#[test]
fn test_error_message_format() {
    let err = Document::parse("a {").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Parse error on line 1"), "message: {}", message);
}
