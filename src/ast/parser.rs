use crate::ast::{tokenize, ASTNode, Operator, Token};
use crate::error::{Result, SyntaxError};
use log::debug;

/// How deep the parsed tree may grow before the parser gives up. Groups, call
/// argument lists and every operator folded into a chain each add a level.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive descent parser over a token slice.
///
/// ```text
/// expression     := addition
/// addition       := multiplication ( ('+' | '-') multiplication )*
/// multiplication := primary ( ('*' | '/' | '%') primary )*
/// primary        := Number
///                 | Identifier '(' [ expression (',' expression)* ] ')'
///                 | Identifier
///                 | '(' expression ')'
/// ```
pub struct Parser<'t> {
    tokens: &'t [Token],
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

/// Parses a complete token sequence into a single expression tree.
pub fn parse(tokens: &[Token]) -> Result<ASTNode> {
    Parser::new(tokens).parse()
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Tokenizes and parses an expression string.
    pub fn parse_expression(input: &str) -> Result<ASTNode> {
        let tokens = tokenize(input)?;
        parse(&tokens)
    }

    /// Parses the whole token sequence; leftover tokens are an error.
    pub fn parse(mut self) -> Result<ASTNode> {
        let ast = self.build_expression()?;

        if let Some(token) = self.peek() {
            return Err(SyntaxError::TrailingTokens(token.clone()).into());
        }

        debug!("Parse result: {}", ast);
        Ok(ast)
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    fn expect_closing_paren(&mut self) -> Result<()> {
        match self.advance() {
            Some(Token::RParen) => Ok(()),
            other => Err(SyntaxError::MissingClosingParen(other.cloned()).into()),
        }
    }

    /// Consumes the next token if it is one of `symbols`.
    fn next_operator(&mut self, symbols: &[char]) -> Result<Option<Operator>> {
        match self.peek() {
            Some(Token::Operator(c)) if symbols.contains(c) => {
                self.cursor += 1;
                Operator::try_from(*c).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SyntaxError::NestingTooDeep(self.max_depth).into());
        }
        Ok(())
    }

    fn build_expression(&mut self) -> Result<ASTNode> {
        self.descend()?;
        let node = self.build_addition()?;
        self.depth -= 1;
        Ok(node)
    }

    fn build_addition(&mut self) -> Result<ASTNode> {
        let depth = self.depth;
        let mut node = self.build_multiplication()?;

        // Chains fold to the left, so each operator deepens the tree.
        while let Some(operator) = self.next_operator(&['+', '-'])? {
            self.descend()?;
            let right = self.build_multiplication()?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        self.depth = depth;
        Ok(node)
    }

    fn build_multiplication(&mut self) -> Result<ASTNode> {
        let depth = self.depth;
        let mut node = self.build_primary()?;

        while let Some(operator) = self.next_operator(&['*', '/', '%'])? {
            self.descend()?;
            let right = self.build_primary()?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        self.depth = depth;
        Ok(node)
    }

    fn build_primary(&mut self) -> Result<ASTNode> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(ASTNode::Literal(*value)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.cursor += 1;
                    self.build_function_call(name)
                } else {
                    Ok(ASTNode::Variable(name.clone()))
                }
            }
            Some(Token::LParen) => {
                let inner = self.build_expression()?;
                self.expect_closing_paren()?;
                Ok(inner)
            }
            Some(token) => Err(SyntaxError::UnexpectedToken(token.clone()).into()),
            None => Err(SyntaxError::UnexpectedEnd.into()),
        }
    }

    /// Parses the argument list of a call; the opening parenthesis has
    /// already been consumed.
    fn build_function_call(&mut self, name: &str) -> Result<ASTNode> {
        let mut args = Vec::new();

        if let Some(Token::RParen) = self.peek() {
            self.cursor += 1;
        } else {
            loop {
                args.push(self.build_expression()?);
                match self.peek() {
                    Some(Token::Comma) => self.cursor += 1,
                    _ => {
                        self.expect_closing_paren()?;
                        break;
                    }
                }
            }
        }

        debug!("Function call: {} with {} arguments", name, args.len());
        Ok(ASTNode::FunctionCall {
            name: name.to_string(),
            args,
        })
    }
}
