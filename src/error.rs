use crate::ast::Token;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed input, raised by the lexer or the parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("missing closing parenthesis, found {}", found_or_end(.0))]
    MissingClosingParen(Option<Token>),
    #[error("trailing tokens starting at {0}")]
    TrailingTokens(Token),
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// A name in the expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferenceError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("SyntaxError: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("ReferenceError: {0}")]
    Reference(#[from] ReferenceError),
    #[error("{function}() takes {} but {found} were supplied", arity(.min, .max))]
    Arity {
        function: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },
    /// The parser produced something the evaluator does not understand.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Error::Reference(_))
    }
}

fn found_or_end(token: &Option<Token>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of expression".to_string(),
    }
}

fn arity(min: &usize, max: &usize) -> String {
    match (*min, *max) {
        (1, 1) => "1 argument".to_string(),
        (min, max) if min == max => format!("{} arguments", min),
        (min, max) => format!("{} to {} arguments", min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_converts() {
        let error: Error = SyntaxError::UnexpectedEnd.into();
        assert!(error.is_syntax());
        assert!(!error.is_reference());
        assert_eq!(
            error.to_string(),
            "SyntaxError: unexpected end of expression"
        );
    }

    #[test]
    fn test_reference_error_message() {
        let error: Error = ReferenceError::UndefinedVariable("price".to_string()).into();
        assert!(error.is_reference());
        assert_eq!(
            error.to_string(),
            "ReferenceError: undefined variable 'price'"
        );
    }

    #[test]
    fn test_missing_paren_message() {
        assert_eq!(
            SyntaxError::MissingClosingParen(None).to_string(),
            "missing closing parenthesis, found end of expression"
        );
        assert_eq!(
            SyntaxError::MissingClosingParen(Some(Token::Comma)).to_string(),
            "missing closing parenthesis, found ','"
        );
    }

    #[test]
    fn test_arity_message() {
        let error = Error::Arity {
            function: "round",
            min: 1,
            max: 2,
            found: 3,
        };
        assert_eq!(
            error.to_string(),
            "round() takes 1 to 2 arguments but 3 were supplied"
        );

        let error = Error::Arity {
            function: "ceil",
            min: 1,
            max: 1,
            found: 0,
        };
        assert_eq!(error.to_string(), "ceil() takes 1 argument but 0 were supplied");
    }
}
