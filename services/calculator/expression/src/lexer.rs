use derive_more::Display;
use nom::IResult;
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit0, digit1},
    combinator::{opt, recognize, value},
    sequence::pair,
};
use strum_macros::AsRefStr;

use crate::token::{Token, TokenKind};
use crate::Value;

#[derive(Debug, Clone, PartialEq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LexError {
    #[display(fmt = "invalid character '{}' at position {}", character, position)]
    InvalidCharacter { character: char, position: usize },

    #[display(fmt = "malformed number at position {}", position)]
    MalformedNumber { position: usize },
}

impl std::error::Error for LexError {}

fn whitespace(i: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(i)
}

// Digits with an optional fraction ("5", "5.", "5.25") or a bare fraction (".5")
fn number(i: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(i)
}

fn symbol(i: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Plus, char('+')),
        value(TokenKind::Minus, char('-')),
        value(TokenKind::Star, char('*')),
        value(TokenKind::Slash, char('/')),
        value(TokenKind::LParen, char('(')),
        value(TokenKind::RParen, char(')')),
    ))(i)
}

/// Splits `input` into tokens, terminated by a single `TokenKind::End`
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        if let Ok((i, _)) = whitespace(rest) {
            rest = i;
        }
        let position = input.len() - rest.len();

        if rest.is_empty() {
            tokens.push(Token::new(TokenKind::End, position));
            return Ok(tokens);
        }

        if let Ok((i, literal)) = number(rest) {
            // A second decimal point directly after the run
            if i.starts_with('.') {
                return Err(LexError::MalformedNumber { position });
            }
            let value = Value::from_literal(literal)
                .map_err(|_| LexError::MalformedNumber { position })?;
            tokens.push(Token::new(TokenKind::Number(value), position));
            rest = i;
        } else if let Ok((i, kind)) = symbol(rest) {
            tokens.push(Token::new(kind, position));
            rest = i;
        } else {
            return Err(match rest.chars().next() {
                Some('.') | None => LexError::MalformedNumber { position },
                Some(character) => LexError::InvalidCharacter {
                    character,
                    position,
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Result<Vec<TokenKind>, LexError> {
        Ok(tokenize(input)?.into_iter().map(|t| t.kind).collect())
    }

    #[test]
    fn test_number() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(number("442")?, ("", "442"));
        assert_eq!(number("442.78+1")?, ("+1", "442.78"));
        assert_eq!(number("5.")?, ("", "5."));
        assert_eq!(number(".5")?, ("", ".5"));
        assert!(number(".").is_err());
        assert!(number("+1").is_err());
        Ok(())
    }

    #[test]
    fn test_tokenize() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            kinds(" 332+23.0 -\t(15 * 2) / 4 ")?,
            vec![
                TokenKind::Number(Value::Int(332)),
                TokenKind::Plus,
                TokenKind::Number(Value::Float(23.0)),
                TokenKind::Minus,
                TokenKind::LParen,
                TokenKind::Number(Value::Int(15)),
                TokenKind::Star,
                TokenKind::Number(Value::Int(2)),
                TokenKind::RParen,
                TokenKind::Slash,
                TokenKind::Number(Value::Int(4)),
                TokenKind::End,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_positions() -> Result<(), Box<dyn std::error::Error>> {
        let tokens = tokenize("12 + 3.5")?;
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 5, 8]);
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(kinds("")?, vec![TokenKind::End]);
        assert_eq!(kinds("   ")?, vec![TokenKind::End]);
        Ok(())
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            tokenize("2@3"),
            Err(LexError::InvalidCharacter {
                character: '@',
                position: 1
            })
        );
        assert_eq!(
            tokenize("2 ** x"),
            Err(LexError::InvalidCharacter {
                character: 'x',
                position: 5
            })
        );
        let e = tokenize("1 + é").unwrap_err();
        assert_eq!(AsRef::<str>::as_ref(&e), "invalid_character");
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(LexError::MalformedNumber { position: 0 })
        );
        assert_eq!(
            tokenize("4 + 1..2"),
            Err(LexError::MalformedNumber { position: 4 })
        );
        assert_eq!(
            tokenize("3 * ."),
            Err(LexError::MalformedNumber { position: 4 })
        );
        assert_eq!(
            tokenize("1.5").map(|t| t[0].kind),
            Ok(TokenKind::Number(Value::Float(1.5)))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LexError::InvalidCharacter {
                character: '@',
                position: 1
            }
            .to_string(),
            "invalid character '@' at position 1"
        );
    }
}
