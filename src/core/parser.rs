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

//! src/core/parser.rs
//!
//! HOCON config file parser
//!
//! This module parses the rc file into a generic `Value` tree. It handles
//! the subset of HOCON (Human-Optimized Config Object Notation) used by
//! leader-key configs:
//! - `#` and `//` line comments
//! - `{}` objects, with or without braces around the root
//! - `:` or `=` separators (optional before `{`)
//! - `,` or newline between fields, trailing commas allowed
//! - Dotted keys (`appearance.title: X`)
//! - Unquoted, quoted and triple-quoted strings, with unquoted value
//!   concatenation (`Open ~/.atamanrc.config` is one string)
//! - Lists, numbers, booleans and null
//! - Duplicate keys: objects merge, anything else is overridden
//!
//! Substitutions (`${...}`), `include` and `+=` are not supported and
//! are reported as syntax errors.
//!
//! # Architecture
//! Token-level parsers are nom combinators. The object/list structure is a
//! small recursive descent on top of them that commits (`nom::Err::Failure`)
//! as soon as the input can no longer be valid, so errors point at the
//! offending character rather than the start of the enclosing object.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::map,
    error::{ErrorKind, ParseError as NomParseError},
    multi::{many0, separated_list1},
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::value::{Object, Value};

/// Errors raised while parsing or reading the config tree
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}, column {column}: {message}")]
    InvalidSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("No configuration setting found for key '{0}'")]
    Missing(String),

    #[error("'{path}' has type {found} rather than {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A parsed config file
///
/// # Example
/// ```ignore
/// let doc = Document::parse("appearance { title: Ataman }")?;
/// assert!(doc.has_path("appearance.title"));
/// assert_eq!(doc.get_string("appearance.title")?, "Ataman");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Object,
}

impl Document {
    /// Parse a complete config file
    ///
    /// # Returns
    /// The document, or `ParseError::InvalidSyntax` with the line and column
    /// of the first character that could not be parsed.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        match document(content) {
            Ok((_, root)) => Ok(Self { root }),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(content, e)),
            Err(nom::Err::Incomplete(_)) => Err(syntax_error(
                content,
                SyntaxError {
                    input: "",
                    message: "unexpected end of input",
                },
            )),
        }
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    /// True if `path` exists and is not null.
    pub fn has_path(&self, path: &str) -> bool {
        self.lookup(path).is_some_and(|v| !v.is_null())
    }

    /// Value at a dotted path.
    pub fn get_value(&self, path: &str) -> Result<&Value, ParseError> {
        self.lookup(path)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ParseError::Missing(path.to_string()))
    }

    /// String at a dotted path; numbers and booleans are accepted as written.
    pub fn get_string(&self, path: &str) -> Result<String, ParseError> {
        require_string(self.lookup(path), path)
    }

    pub fn get_object(&self, path: &str) -> Result<&Object, ParseError> {
        require_object(self.lookup(path), path)
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let keys: Vec<&str> = path.split('.').collect();
        self.root.lookup(&keys)
    }
}

/// Read a required string, reporting `path` on failure.
pub(crate) fn require_string(value: Option<&Value>, path: &str) -> Result<String, ParseError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| ParseError::Missing(path.to_string()))?;

    value.to_config_string().ok_or_else(|| ParseError::WrongType {
        path: path.to_string(),
        expected: "STRING",
        found: value.type_name(),
    })
}

/// Read a required object, reporting `path` on failure.
pub(crate) fn require_object<'v>(value: Option<&'v Value>, path: &str) -> Result<&'v Object, ParseError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| ParseError::Missing(path.to_string()))?;

    value.as_object().ok_or_else(|| ParseError::WrongType {
        path: path.to_string(),
        expected: "OBJECT",
        found: value.type_name(),
    })
}

/// nom error carrying a human-readable message and the failing position
#[derive(Debug, PartialEq)]
struct SyntaxError<'a> {
    input: &'a str,
    message: &'static str,
}

impl<'a> NomParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Char => "unexpected character",
            ErrorKind::Tag => "unexpected token",
            _ => "invalid syntax",
        };
        Self { input, message }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, SyntaxError<'a>>;

fn failure<'a, O>(input: &'a str, message: &'static str) -> PResult<'a, O> {
    Err(nom::Err::Failure(SyntaxError { input, message }))
}

fn syntax_error(source: &str, err: SyntaxError<'_>) -> ParseError {
    let offset = source.len().saturating_sub(err.input.len());
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
    let column = consumed[line_start..].chars().count() + 1;

    ParseError::InvalidSyntax {
        line,
        column,
        message: err.message.to_string(),
    }
}

/// Characters that end an unquoted string
const FORBIDDEN: &[char] = &[
    '$', '"', '{', '}', '[', ']', ':', '=', ',', '+', '#', '`', '^', '?', '!', '@', '*', '&', '\\',
];

fn is_inline_ws(c: char) -> bool {
    c != '\n' && (c.is_whitespace() || c == '\u{feff}')
}

fn is_unquoted_char(c: char) -> bool {
    !c.is_whitespace() && c != '\u{feff}' && !FORBIDDEN.contains(&c)
}

fn is_key_char(c: char) -> bool {
    is_unquoted_char(c) && c != '.'
}

fn inline_ws(input: &str) -> PResult<'_, &str> {
    take_while(is_inline_ws).parse(input)
}

/// `# comment` or `// comment`, up to (not including) the newline
fn comment(input: &str) -> PResult<'_, &str> {
    preceded(alt((tag("#"), tag("//"))), take_while(|c: char| c != '\n')).parse(input)
}

/// Skips whitespace, comments and newlines
///
/// Returns true if at least one newline was crossed, which makes the
/// newline usable as a field separator.
fn trivia(input: &str) -> PResult<'_, bool> {
    let (input, parts) = many0(alt((
        map(take_while1(is_inline_ws), |_| false),
        map(comment, |_| false),
        map(char('\n'), |_| true),
    )))
    .parse(input)?;

    Ok((input, parts.into_iter().any(|newline| newline)))
}

/// `"..."` with JSON escapes
fn quoted_string(input: &str) -> PResult<'_, String> {
    let (mut rest, _) = char('"').parse(input)?;
    let mut out = String::new();

    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None | Some('\n') => return failure(rest, "unterminated quoted string"),
            Some('"') => return Ok((chars.as_str(), out)),
            Some('\\') => {
                let escape = chars.next();
                let after = chars.as_str();
                let decoded = match escape {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('/') => '/',
                    Some('b') => '\u{8}',
                    Some('f') => '\u{c}',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    Some('u') => {
                        let decoded = after
                            .get(..4)
                            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                            .and_then(char::from_u32);
                        match decoded {
                            Some(c) => {
                                out.push(c);
                                rest = &after[4..];
                                continue;
                            }
                            None => return failure(rest, "invalid unicode escape"),
                        }
                    }
                    _ => return failure(rest, "invalid escape sequence"),
                };
                out.push(decoded);
                rest = after;
            }
            Some(c) => {
                out.push(c);
                rest = chars.as_str();
            }
        }
    }
}

/// `"""..."""`, raw and possibly multi-line
fn triple_quoted(input: &str) -> PResult<'_, String> {
    let (rest, _) = tag("\"\"\"").parse(input)?;
    match rest.find("\"\"\"") {
        Some(end) => Ok((&rest[end + 3..], rest[..end].to_string())),
        None => failure(input, "unterminated triple-quoted string"),
    }
}

/// Run of unquoted characters, stopping before `//`
fn unquoted(input: &str) -> PResult<'_, &str> {
    let end = input
        .char_indices()
        .find(|&(i, c)| !is_unquoted_char(c) || input[i..].starts_with("//"))
        .map_or(input.len(), |(i, _)| i);

    if end == 0 {
        return Err(nom::Err::Error(SyntaxError {
            input,
            message: "expected a value",
        }));
    }

    Ok((&input[end..], &input[..end]))
}

enum Token {
    Quoted(String),
    Unquoted(String),
}

fn token(input: &str) -> PResult<'_, Token> {
    alt((
        map(triple_quoted, Token::Quoted),
        map(quoted_string, Token::Quoted),
        map(unquoted, |s: &str| Token::Unquoted(s.to_string())),
    ))
    .parse(input)
}

/// One or more tokens on a single line, joined with the whitespace between them
fn concatenation(input: &str) -> PResult<'_, Value> {
    let (mut rest, first) = token(input)?;
    let mut tokens = vec![(String::new(), first)];

    loop {
        let (after_ws, ws) = inline_ws(rest)?;
        match token(after_ws) {
            Ok((next, tok)) => {
                tokens.push((ws.to_string(), tok));
                rest = next;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok((rest, concatenated_value(tokens)))
}

fn concatenated_value(tokens: Vec<(String, Token)>) -> Value {
    if let [(_, Token::Unquoted(text))] = tokens.as_slice() {
        return keyword_value(text);
    }

    let mut out = String::new();
    for (ws, tok) in tokens {
        out.push_str(&ws);
        match tok {
            Token::Quoted(s) | Token::Unquoted(s) => out.push_str(&s),
        }
    }
    Value::String(out)
}

/// Interpret a lone unquoted token
fn keyword_value(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ if looks_numeric(text) => Value::Number(text.to_string()),
        _ => Value::String(text.to_string()),
    }
}

fn looks_numeric(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    digits.starts_with(|c: char| c.is_ascii_digit()) && text.parse::<f64>().is_ok()
}

fn value(input: &str) -> PResult<'_, Value> {
    if input.starts_with('{') {
        let (rest, object) = object(input)?;
        return Ok((rest, Value::Object(object)));
    }
    if input.starts_with('[') {
        return list(input);
    }

    match concatenation(input) {
        Err(nom::Err::Error(_)) => failure(input, "expected a value"),
        other => other,
    }
}

fn list(input: &str) -> PResult<'_, Value> {
    let (mut rest, _) = char('[').parse(input)?;
    let mut items = Vec::new();

    loop {
        let (after, _) = trivia(rest)?;
        if let Some(next) = after.strip_prefix(']') {
            return Ok((next, Value::Array(items)));
        }
        if after.is_empty() {
            return failure(after, "unterminated list, expected ']'");
        }

        let (after, item) = value(after)?;
        items.push(item);

        let (after, saw_newline) = trivia(after)?;
        if let Some(next) = after.strip_prefix(',') {
            rest = next;
        } else if after.starts_with(']') || saw_newline {
            rest = after;
        } else {
            return failure(after, "expected ',' or ']' in list");
        }
    }
}

fn key_segment(input: &str) -> PResult<'_, String> {
    alt((
        quoted_string,
        map(take_while1(is_key_char), |s: &str| s.to_string()),
    ))
    .parse(input)
}

/// `a`, `"a b"` or `a.b.c`
fn key_path(input: &str) -> PResult<'_, Vec<String>> {
    separated_list1(char('.'), key_segment).parse(input)
}

fn separator(input: &str) -> PResult<'_, char> {
    alt((char(':'), char('='))).parse(input)
}

fn field(input: &str) -> PResult<'_, (Vec<String>, Value)> {
    let (rest, path) = match key_path(input) {
        Err(nom::Err::Error(_)) => return failure(input, "expected a key"),
        other => other?,
    };
    let (rest, _) = inline_ws(rest)?;

    if rest.starts_with('{') {
        let (rest, object) = object(rest)?;
        return Ok((rest, (path, Value::Object(object))));
    }

    let (rest, _) = match separator(rest) {
        Err(nom::Err::Error(_)) => return failure(rest, "expected ':', '=' or '{' after key"),
        other => other?,
    };
    let (rest, _) = inline_ws(rest)?;
    let (rest, value) = value(rest)?;

    Ok((rest, (path, value)))
}

fn at_end(input: &str, close: Option<char>) -> bool {
    match close {
        Some(c) => input.starts_with(c),
        None => input.is_empty(),
    }
}

/// Fields up to `close` (or end of input for the braceless root)
///
/// The closing character is left in the input for the caller.
fn object_body(input: &str, close: Option<char>) -> PResult<'_, Object> {
    let mut object = Object::new();
    let mut rest = input;

    loop {
        let (after, _) = trivia(rest)?;
        if at_end(after, close) {
            return Ok((after, object));
        }
        if after.is_empty() {
            return failure(after, "unterminated object, expected '}'");
        }

        let (after, (path, value)) = field(after)?;
        object.insert_path(&path, value);

        let (after, saw_newline) = trivia(after)?;
        if let Some(next) = after.strip_prefix(',') {
            rest = next;
        } else if at_end(after, close) || saw_newline {
            rest = after;
        } else {
            return failure(after, "expected ',' or newline after field");
        }
    }
}

fn object(input: &str) -> PResult<'_, Object> {
    let (rest, _) = char('{').parse(input)?;
    let (rest, body) = object_body(rest, Some('}'))?;

    match rest.strip_prefix('}') {
        Some(rest) => Ok((rest, body)),
        None => failure(rest, "expected '}'"),
    }
}

fn document(input: &str) -> PResult<'_, Object> {
    let (rest, _) = trivia(input)?;

    if rest.starts_with('{') {
        let (rest, root) = object(rest)?;
        let (rest, _) = trivia(rest)?;
        if !rest.is_empty() {
            return failure(rest, "unexpected content after root object");
        }
        return Ok((rest, root));
    }

    object_body(rest, None)
}
