pub mod ast;
pub mod error;
pub mod functions;

use ast::Evaluator;
use std::collections::HashMap;

pub use error::{Error, ReferenceError, Result, SyntaxError};

/// Binds `variables` and the builtin functions once and returns a reusable
/// `expression -> number` function.
pub fn create_evaluator(
    variables: HashMap<String, f64>,
) -> impl Fn(&str) -> Result<f64> + Send + Sync {
    let evaluator = Evaluator::new(variables);
    move |expression: &str| evaluator.evaluate_expression(expression)
}

/// One-shot evaluation of `expression` against `context`.
///
/// Copies `context` on every call; use [`create_evaluator`] to evaluate many
/// expressions against the same variables.
pub fn evaluate_expression(expression: &str, context: &HashMap<String, f64>) -> Result<f64> {
    Evaluator::new(context.clone()).evaluate_expression(expression)
}
