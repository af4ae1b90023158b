//! Fail-fast JSON parsing with precise `file:line:column` error locations.
//!
//! libjot parses strict RFC 8259 JSON by default and supports four opt-in
//! syntax relaxations: `Infinity`/`NaN` literals, an explicit leading `+` on
//! numbers, single-quoted strings, and numbers starting with `.`. The first
//! syntax violation aborts the parse with an error naming the exact position
//! in the input.
//!
//! # Parsing Pipeline
//!
//! 1. **Source**: owns the immutable input buffer (owned bytes or a shared
//!    memory map) plus a line-start index built in one scan, answering
//!    offset to line/column queries in O(log lines).
//!
//! 2. **Tokenizer**: scans the buffer into punctuation, string, number, and
//!    keyword tokens on demand, under the active [`ParseOptions`].
//!
//! 3. **Value Parser**: recursive descent over the token stream, building
//!    the [`Value`] tree and failing fast with a located [`ParseError`].

mod error;
mod options;
mod parser;
mod source;
mod tokenizer;
mod value;

pub use error::{LoadError, ParseError, Result};
pub use options::ParseOptions;
pub use parser::{parse, parse_with_options};
pub use source::{LineAndColumn, LineAndIndex, Location, Source, DEFAULT_TAB_SIZE};
pub use value::Value;
