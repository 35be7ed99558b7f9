use crate::error::SyntaxError;
use log::{debug, trace};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Identifier(String),
    LParen,
    RParen,
    Comma,
    Operator(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "'{}'", value),
            Token::Identifier(name) => write!(f, "'{}'", name),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Operator(op) => write!(f, "'{}'", op),
        }
    }
}

/// Splits an expression into tokens in a single left-to-right pass.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    debug!("Tokenizing expression: {}", input);
    let tokens = Lexer::new(input).run()?;
    debug!("Produced {} tokens", tokens.len());
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances over the longest run of characters matching `accept` and
    /// returns it.
    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !accept(c) {
                break;
            }
            self.next_char();
        }
        &input[start..self.pos]
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let literal = self.take_while(|c| c.is_ascii_digit() || c == '.');
        if literal.matches('.').count() > 1 {
            return Err(SyntaxError::InvalidNumber(literal.to_string()));
        }
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| SyntaxError::InvalidNumber(literal.to_string()))
    }

    fn read_identifier(&mut self) -> Token {
        let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        Token::Identifier(name.to_string())
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek_char() {
            let token = match c {
                c if c.is_whitespace() => {
                    self.next_char();
                    continue;
                }
                c if c.is_ascii_digit() || c == '.' => self.read_number()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
                '(' => {
                    self.next_char();
                    Token::LParen
                }
                ')' => {
                    self.next_char();
                    Token::RParen
                }
                ',' => {
                    self.next_char();
                    Token::Comma
                }
                '+' | '-' | '*' | '/' | '%' => {
                    self.next_char();
                    Token::Operator(c)
                }
                _ => {
                    return Err(SyntaxError::UnexpectedCharacter {
                        character: c,
                        position: self.pos,
                    })
                }
            };

            trace!("Token: {:?}", token);
            tokens.push(token);
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_arithmetic() {
        let tokens = tokenize("2 + 3*4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator('+'),
                Token::Number(3.0),
                Token::Operator('*'),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_function_call() {
        let tokens = tokenize("round(column_2 / 1.5, 2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("round".to_string()),
                Token::LParen,
                Token::Identifier("column_2".to_string()),
                Token::Operator('/'),
                Token::Number(1.5),
                Token::Comma,
                Token::Number(2.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_whitespace() {
        let tokens = tokenize(" \t price\n%\r\n volume ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("price".to_string()),
                Token::Operator('%'),
                Token::Identifier("volume".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_identifier_may_start_with_underscore() {
        let tokens = tokenize("_tmp1").unwrap();
        assert_eq!(tokens, vec![Token::Identifier("_tmp1".to_string())]);
    }

    #[test]
    fn test_number_directly_followed_by_identifier() {
        let tokens = tokenize("2x").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2.0), Token::Identifier("x".to_string())]
        );
    }

    #[test]
    fn test_partial_decimals() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("3.").unwrap(), vec![Token::Number(3.0)]);
    }

    #[test]
    fn test_multiple_decimal_points_rejected() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(SyntaxError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(
            tokenize("1 + 4..2"),
            Err(SyntaxError::InvalidNumber("4..2".to_string()))
        );
    }

    #[test]
    fn test_lone_dot_rejected() {
        assert_eq!(
            tokenize("1 + ."),
            Err(SyntaxError::InvalidNumber(".".to_string()))
        );
    }

    #[test]
    fn test_unexpected_characters() {
        for (input, character, position) in [
            ("price > 100", '>', 6),
            ("2 ^ 3", '^', 2),
            ("a $", '$', 2),
            ("é", 'é', 0),
        ] {
            assert_eq!(
                tokenize(input),
                Err(SyntaxError::UnexpectedCharacter {
                    character,
                    position
                }),
                "input: {}",
                input
            );
        }
    }
}
