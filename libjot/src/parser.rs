//! Value parser.
//!
//! Recursive descent over the token stream:
//!
//! ```text
//! value    := object | array | string | number | "true" | "false" | "null"
//! object   := "{" ( member ( "," member )* )? "}"
//! member   := string ":" value
//! array    := "[" ( value ( "," value )* )? "]"
//! ```
//!
//! The first violation aborts the whole parse with a located error; there is
//! no recovery and no partial value.

use indexmap::IndexMap;

use crate::error::Result;
use crate::options::ParseOptions;
use crate::source::Source;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::Value;

/// Parse a JSON document under strict (RFC 8259) options.
///
/// # Example
///
/// ```
/// use libjot::{parse, Source};
///
/// let source = Source::from_string("config.json", r#"{"a": 1}"#.to_string());
/// let value = parse(&source).unwrap();
/// assert_eq!(value.as_object().unwrap()["a"].as_number(), Some(1.0));
/// ```
pub fn parse<'s>(source: &'s Source) -> Result<'s, Value> {
    parse_with_options(source, ParseOptions::default_options())
}

/// Parse a JSON document under explicit options.
///
/// # Example
///
/// ```
/// use libjot::{parse_with_options, ParseOptions, Source};
///
/// let source = Source::from_string("data.json", "[.5, Infinity]".to_string());
/// let value = parse_with_options(&source, ParseOptions::relaxed_options()).unwrap();
/// assert_eq!(value.as_array().unwrap()[0].as_number(), Some(0.5));
/// ```
pub fn parse_with_options<'s>(source: &'s Source, options: ParseOptions) -> Result<'s, Value> {
    let mut tokens = Tokenizer::new(source, options);
    let first = tokens.next_token()?;
    let value = parse_value(&mut tokens, first)?;
    if tokens.peek().is_some() {
        return Err(tokens.error_at(tokens.pos(), "unexpected content after value"));
    }
    Ok(value)
}

/// Parse one value starting from an already-fetched token.
fn parse_value<'s>(tokens: &mut Tokenizer<'s>, token: Token) -> Result<'s, Value> {
    match token.kind {
        TokenKind::LeftBrace => parse_object(tokens),
        TokenKind::LeftBracket => parse_array(tokens),
        TokenKind::String(s) => Ok(Value::String(s)),
        TokenKind::Number(n) => Ok(Value::Number(n)),
        TokenKind::True => Ok(Value::Bool(true)),
        TokenKind::False => Ok(Value::Bool(false)),
        TokenKind::Null => Ok(Value::Null),
        kind => Err(tokens.error_at(
            token.start,
            format!("expected a value, found '{}'", punctuation(&kind)),
        )),
    }
}

/// Parse the members of an object; the opening brace is already consumed.
fn parse_object<'s>(tokens: &mut Tokenizer<'s>) -> Result<'s, Value> {
    let mut members = IndexMap::new();
    if tokens.peek() == Some(b'}') {
        tokens.next_token()?;
        return Ok(Value::Object(members));
    }
    loop {
        let token = match tokens.peek() {
            Some(_) => tokens.next_token()?,
            None => return Err(tokens.error_at(tokens.pos(), "unterminated object")),
        };
        let key = match token.kind {
            TokenKind::String(s) => s,
            _ => return Err(tokens.error_at(token.start, "expected string key")),
        };
        match tokens.peek() {
            Some(b':') => {
                tokens.next_token()?;
            }
            Some(_) => {
                return Err(tokens.error_at(tokens.pos(), "expected ':' after object key"));
            }
            None => return Err(tokens.error_at(tokens.pos(), "unterminated object")),
        }
        let token = tokens.next_token()?;
        let value = parse_value(tokens, token)?;
        // Last occurrence wins; the member keeps its first-seen position.
        members.insert(key, value);
        match tokens.peek() {
            Some(b'}') => {
                tokens.next_token()?;
                return Ok(Value::Object(members));
            }
            Some(b',') => {
                tokens.next_token()?;
            }
            Some(_) => {
                return Err(tokens.error_at(tokens.pos(), "expected ',' or '}' in object"));
            }
            None => return Err(tokens.error_at(tokens.pos(), "unterminated object")),
        }
    }
}

/// Parse the elements of an array; the opening bracket is already consumed.
fn parse_array<'s>(tokens: &mut Tokenizer<'s>) -> Result<'s, Value> {
    let mut items = Vec::new();
    if tokens.peek() == Some(b']') {
        tokens.next_token()?;
        return Ok(Value::Array(items));
    }
    loop {
        let token = match tokens.peek() {
            Some(_) => tokens.next_token()?,
            None => return Err(tokens.error_at(tokens.pos(), "unterminated array")),
        };
        items.push(parse_value(tokens, token)?);
        match tokens.peek() {
            Some(b']') => {
                tokens.next_token()?;
                return Ok(Value::Array(items));
            }
            Some(b',') => {
                tokens.next_token()?;
            }
            Some(_) => {
                return Err(tokens.error_at(tokens.pos(), "expected ',' or ']' in array"));
            }
            None => return Err(tokens.error_at(tokens.pos(), "unterminated array")),
        }
    }
}

fn punctuation(kind: &TokenKind) -> char {
    match kind {
        TokenKind::LeftBrace => '{',
        TokenKind::RightBrace => '}',
        TokenKind::LeftBracket => '[',
        TokenKind::RightBracket => ']',
        TokenKind::Colon => ':',
        TokenKind::Comma => ',',
        _ => '?',
    }
}
