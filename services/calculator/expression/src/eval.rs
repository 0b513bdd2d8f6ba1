use derive_more::Display;
use strum_macros::AsRefStr;

use crate::ast::{BinaryOp, Expr};
use crate::Value;

#[derive(Debug, Clone, PartialEq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EvalError {
    #[display(fmt = "division by zero")]
    DivisionByZero,
}

impl std::error::Error for EvalError {}

impl BinaryOp {
    pub fn apply(self, left: Value, right: Value) -> Result<Value, EvalError> {
        Ok(match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div if right.is_zero() => return Err(EvalError::DivisionByZero),
            BinaryOp::Div => left / right,
        })
    }
}

/// Evaluates `expr` bottom-up, failing on the first error
pub fn evaluate(expr: &Expr) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(v) => Ok(*v),
        Expr::Negate(operand) => Ok(-evaluate(operand)?),
        Expr::Binary(op, l, r) => {
            let left = evaluate(l)?;
            let right = evaluate(r)?;
            op.apply(left, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i64) -> Expr {
        Expr::Literal(Value::Int(i))
    }

    #[test]
    fn test_eval() -> Result<(), Box<dyn std::error::Error>> {
        let e = Expr::binary(
            BinaryOp::Add,
            lit(34),
            Expr::binary(BinaryOp::Div, lit(6), lit(2)),
        );
        assert_eq!(evaluate(&e)?, Value::Float(37.0));

        let e = Expr::binary(BinaryOp::Mul, Expr::negate(lit(3)), lit(4));
        assert_eq!(evaluate(&e)?, Value::Int(-12));
        Ok(())
    }

    #[test]
    fn test_division_by_zero() {
        let zero = Expr::binary(BinaryOp::Sub, lit(2), lit(2));
        let e = Expr::binary(BinaryOp::Div, lit(5), zero);
        assert_eq!(evaluate(&e), Err(EvalError::DivisionByZero));

        let e = Expr::binary(
            BinaryOp::Div,
            lit(1),
            Expr::negate(Expr::Literal(Value::Float(0.0))),
        );
        assert_eq!(evaluate(&e), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_error_stops_evaluation() {
        // (1/0) * 5 fails in the left operand before the product is formed
        let e = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Div, lit(1), lit(0)),
            lit(5),
        );
        assert_eq!(evaluate(&e), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_apply() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(BinaryOp::Sub.apply(Value::Int(1), Value::Int(3))?, Value::Int(-2));
        assert_eq!(
            BinaryOp::Div.apply(Value::Int(5), Value::Int(20))?,
            Value::Float(0.25)
        );
        assert_eq!(
            BinaryOp::Div.apply(Value::Int(10), Value::Float(0.5))?,
            Value::Float(20.0)
        );
        Ok(())
    }
}
