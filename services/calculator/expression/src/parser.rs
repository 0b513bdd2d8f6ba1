use derive_more::Display;
use strum_macros::AsRefStr;

use crate::ast::{BinaryOp, Expr};
use crate::token::{Token, TokenKind};
use crate::Value;

/// Deepest permitted nesting of parentheses and unary minus
pub const MAX_DEPTH: usize = 256;

/// Most levels a parsed tree may have, counting every operator on the
/// longest path from the root to a number
pub const MAX_HEIGHT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParseError {
    #[display(fmt = "unbalanced parentheses at position {}", position)]
    UnbalancedParens { position: usize },

    #[display(fmt = "unexpected {} at position {}", token, position)]
    UnexpectedToken { token: TokenKind, position: usize },

    #[display(fmt = "unexpected {} after the end of the expression", token)]
    TrailingInput { token: TokenKind, position: usize },

    #[display(fmt = "empty expression")]
    EmptyExpression,

    #[display(fmt = "expression is nested deeper than {} levels", limit)]
    NestingTooDeep { limit: usize },
}

impl std::error::Error for ParseError {}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
    // Positions of the '(' tokens not yet closed
    open: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens,
            index: 0,
            depth: 0,
            open: Vec::new(),
        }
    }

    fn peek(&self) -> Token {
        match self.tokens.get(self.index) {
            Some(token) => *token,
            None => {
                let position = self.tokens.last().map(|t| t.position).unwrap_or(0);
                Token::new(TokenKind::End, position)
            }
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.index += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.term()?;
            left = Node::binary(op, left, right)?;
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.factor()?;
            left = Node::binary(op, left, right)?;
        }
    }

    // factor := '-' factor | primary
    fn factor(&mut self) -> Result<Node, ParseError> {
        if self.peek().kind != TokenKind::Minus {
            return self.primary();
        }
        self.advance();
        self.descend()?;
        let operand = self.factor()?;
        self.depth -= 1;
        Node::negate(operand)
    }

    // primary := NUMBER | '(' expr ')'
    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(v) => Ok(Node::literal(v)),
            TokenKind::LParen => {
                self.descend()?;
                self.open.push(token.position);
                let inner = self.expr()?;

                let close = self.peek();
                match close.kind {
                    TokenKind::RParen => {
                        self.advance();
                        self.open.pop();
                        self.depth -= 1;
                        Ok(inner)
                    }
                    TokenKind::End => Err(ParseError::UnbalancedParens {
                        position: token.position,
                    }),
                    kind => Err(ParseError::UnexpectedToken {
                        token: kind,
                        position: close.position,
                    }),
                }
            }
            TokenKind::RParen if self.open.is_empty() => Err(ParseError::UnbalancedParens {
                position: token.position,
            }),
            TokenKind::End => match self.open.last() {
                Some(position) => Err(ParseError::UnbalancedParens {
                    position: *position,
                }),
                None => Err(ParseError::UnexpectedToken {
                    token: token.kind,
                    position: token.position,
                }),
            },
            kind => Err(ParseError::UnexpectedToken {
                token: kind,
                position: token.position,
            }),
        }
    }
}

// A parsed subtree and the number of levels it spans
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn literal(value: Value) -> Node {
        Node {
            expr: Expr::Literal(value),
            height: 1,
        }
    }

    fn binary(op: BinaryOp, left: Node, right: Node) -> Result<Node, ParseError> {
        let height = checked_height(left.height.max(right.height) + 1)?;
        Ok(Node {
            expr: Expr::binary(op, left.expr, right.expr),
            height,
        })
    }

    fn negate(operand: Node) -> Result<Node, ParseError> {
        let height = checked_height(operand.height + 1)?;
        Ok(Node {
            expr: Expr::negate(operand.expr),
            height,
        })
    }
}

// Evaluation and drop of the tree recurse once per level
fn checked_height(height: usize) -> Result<usize, ParseError> {
    if height > MAX_HEIGHT {
        return Err(ParseError::NestingTooDeep { limit: MAX_HEIGHT });
    }
    Ok(height)
}

/// Parses a token stream produced by [`tokenize`](crate::tokenize)
///
/// The whole stream must form a single expression
pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens);
    if parser.peek().kind == TokenKind::End {
        return Err(ParseError::EmptyExpression);
    }

    let node = parser.expr()?;

    let next = parser.peek();
    match next.kind {
        TokenKind::End => Ok(node.expr),
        TokenKind::RParen => Err(ParseError::UnbalancedParens {
            position: next.position,
        }),
        kind => Err(ParseError::TrailingInput {
            token: kind,
            position: next.position,
        }),
    }
}
