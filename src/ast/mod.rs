use crate::error::Error;
use std::fmt;

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::Evaluator;
pub use lexer::{tokenize, Token};
pub use parser::{parse, Parser, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Literal(f64),
    Variable(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

/// Renders the tree fully parenthesized, so parsing the output of a parsed
/// expression yields the same tree.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Literal(value) => write!(f, "{}", value),
            ASTNode::Variable(name) => write!(f, "{}", name),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            ASTNode::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// IEEE-754 semantics throughout: dividing by zero gives an infinity or
    /// NaN, and `%` keeps the sign of the dividend.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Modulo => left % right,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '%' => Ok(Operator::Modulo),
            _ => Err(Error::Internal(format!("Unknown operator: {}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(Operator::Divide.apply(3.0, 2.0), 1.5);
        assert_eq!(Operator::Modulo.apply(100.0, 233.0), 100.0);
    }

    #[test]
    fn test_modulo_keeps_dividend_sign() {
        assert_eq!(Operator::Modulo.apply(-7.0, 3.0), -1.0);
        assert_eq!(Operator::Modulo.apply(7.0, -3.0), 1.0);
        assert_eq!(Operator::Modulo.apply(5.5, 2.0), 1.5);
    }

    #[test]
    fn test_division_by_zero_is_not_trapped() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(Operator::Divide.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
        assert!(Operator::Modulo.apply(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_operator_from_char() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::Modulo,
        ] {
            assert_eq!(Operator::try_from(op.symbol()), Ok(op));
        }
        assert!(matches!(Operator::try_from('^'), Err(Error::Internal(_))));
    }

    #[test]
    fn test_display_parenthesizes() {
        let ast = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Variable("column1".to_string())),
            operator: Operator::Add,
            right: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::Literal(2.5)),
                operator: Operator::Multiply,
                right: Box::new(ASTNode::FunctionCall {
                    name: "round".to_string(),
                    args: vec![
                        ASTNode::Variable("column2".to_string()),
                        ASTNode::Literal(1.0),
                    ],
                }),
            }),
        };
        assert_eq!(ast.to_string(), "(column1 + (2.5 * round(column2, 1)))");
    }
}
