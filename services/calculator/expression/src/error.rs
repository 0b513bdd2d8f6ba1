use derive_more::{Display, From};

use crate::eval::EvalError;
use crate::lexer::LexError;
use crate::parser::ParseError;

/// Failure from any stage of [`evaluate_expression`](crate::evaluate_expression)
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum ExpressionError {
    #[display(fmt = "{}", _0)]
    Lex(LexError),

    #[display(fmt = "{}", _0)]
    Parse(ParseError),

    #[display(fmt = "{}", _0)]
    Eval(EvalError),
}

impl ExpressionError {
    /// Stable snake_case name of the error, e.g. `division_by_zero`
    pub fn kind(&self) -> &str {
        match self {
            ExpressionError::Lex(e) => e.as_ref(),
            ExpressionError::Parse(e) => e.as_ref(),
            ExpressionError::Eval(e) => e.as_ref(),
        }
    }
}

impl std::error::Error for ExpressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExpressionError::Lex(e) => Some(e),
            ExpressionError::Parse(e) => Some(e),
            ExpressionError::Eval(e) => Some(e),
        }
    }
}
