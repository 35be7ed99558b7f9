use crate::ast::{tokenize, ASTNode, Parser, DEFAULT_MAX_DEPTH};
use crate::error::{Error, ReferenceError, Result};
use crate::functions::FunctionRegistry;
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;

/// Evaluates expressions against a fixed variable table and the builtin
/// functions. Holds no mutable state, so one instance can serve any number
/// of threads.
pub struct Evaluator {
    variables: HashMap<String, f64>,
    functions: &'static FunctionRegistry,
    max_depth: usize,
}

impl Evaluator {
    pub fn new(variables: HashMap<String, f64>) -> Self {
        Self {
            variables,
            functions: FunctionRegistry::builtin(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the parser's nesting limit for expressions evaluated from
    /// source text.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    pub fn functions(&self) -> &'static FunctionRegistry {
        self.functions
    }

    /// Parse an expression string into an AST.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode> {
        let tokens = tokenize(expression)?;
        Parser::new(&tokens).with_max_depth(self.max_depth).parse()
    }

    /// Tokenizes, parses and evaluates `expression`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the evaluation succeeds.
    /// * `Err(Error::Syntax)` if the expression is malformed.
    /// * `Err(Error::Reference)` if it names an unknown variable or function.
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64> {
        debug!("Evaluating expression: {}", expression);
        let ast = self.parse_expression(expression)?;
        let result = self.evaluate(&ast)?;
        debug!("Result of {}: {}", expression, result);
        Ok(result)
    }

    /// Evaluates every expression in parallel. Results keep the input order.
    pub fn evaluate_many<S>(&self, expressions: &[S]) -> Vec<Result<f64>>
    where
        S: AsRef<str> + Sync,
    {
        expressions
            .par_iter()
            .map(|expression| self.evaluate_expression(expression.as_ref()))
            .collect()
    }

    /// Evaluates an already parsed tree.
    pub fn evaluate(&self, ast: &ASTNode) -> Result<f64> {
        match ast {
            ASTNode::Literal(value) => Ok(*value),

            ASTNode::Variable(name) => self
                .variables
                .get(name)
                .copied()
                .ok_or_else(|| Error::Reference(ReferenceError::UndefinedVariable(name.clone()))),

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                Ok(operator.apply(left_value, right_value))
            }

            ASTNode::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.functions.call(name, &values)
            }
        }
    }
}
