//! An embeddable expression and templating language.
//!
//! Source text holding literals, calls, member chains and `${...}` spans is scanned,
//! parsed and evaluated against a host-supplied [`Context`]:
//!
//! ```
//! use rexpr::{evaluate, Context, Value};
//!
//! let context = Context::new("host").with("name", "World");
//! assert_eq!(evaluate("Hello ${name}!", Some(&context)).unwrap(), Value::from("Hello World!"));
//! ```

pub mod ast;
pub mod callable;
pub mod class;
pub mod context;
pub mod instance;
pub mod interpolation;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod stdlib;
pub mod token;
pub mod value;

pub use crate::context::Context;
pub use crate::interpolation::{has_interpolation_spans, is_single_span_expression};
pub use crate::value::Value;

use crate::ast::Node;
use crate::interpolation::single_span_source;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::parser::ParseError;
use crate::scanner::ScanError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] RuntimeError),
}

/// Evaluates `source` against `context`, with the builtins visible behind it.
pub fn evaluate(source: &str, context: Option<&Context>) -> Result<Value, Error> {
    let root = parse(source)?;
    Ok(Interpreter::new(context).eval(&root)?)
}

/// Parses `source` the way [`evaluate`] reads it.
///
/// Text that is exactly one `${...}` span yields the span's own value. Text mixing spans
/// with other characters yields a string. Anything else is parsed as a bare expression.
pub fn parse(source: &str) -> Result<Node, Error> {
    let trimmed = source.trim();
    if let Some(inner) = single_span_source(trimmed) {
        tracing::debug!(source = inner, "parsing single span");
        parser::create_ast(inner)
    } else if has_interpolation_spans(trimmed) {
        tracing::debug!(source = trimmed, "parsing interpolated text");
        parser::string_expression(strip_quotes(trimmed))
    } else {
        tracing::debug!(source = trimmed, "parsing bare expression");
        parser::create_ast(trimmed)
    }
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
