//! Arithmetic over `+ - * /`, parentheses and unary minus
//!
//! Input is tokenized, parsed by recursive descent and evaluated without
//! ever being executed as code. Each stage fails with its own error type,
//! all of which convert into [`ExpressionError`].

use log::trace;

pub use ast::{BinaryOp, Expr};
pub use error::ExpressionError;
pub use eval::{evaluate, EvalError};
pub use lexer::{tokenize, LexError};
pub use parser::{parse, ParseError, MAX_DEPTH, MAX_HEIGHT};
pub use token::{Token, TokenKind};
pub use value::{Value, DISPLAY_PRECISION};

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;
mod value;

/// Tokenizes, parses and evaluates `text`
pub fn evaluate_expression(text: &str) -> Result<Value, ExpressionError> {
    let tokens = tokenize(text)?;
    let expr = parse(&tokens)?;
    trace!("parsed {} tokens into {}", tokens.len(), expr);
    Ok(evaluate(&expr)?)
}
