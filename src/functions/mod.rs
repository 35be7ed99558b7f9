pub mod rounding;

use crate::error::{ReferenceError, Result};
use log::debug;
use std::collections::HashMap;
use std::sync::OnceLock;

pub type Function = fn(&[f64]) -> Result<f64>;

/// Name to builtin lookup. The only instance is [`FunctionRegistry::builtin`],
/// which is filled once and never changes afterwards.
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Function>,
}

impl FunctionRegistry {
    pub fn builtin() -> &'static FunctionRegistry {
        static BUILTINS: OnceLock<FunctionRegistry> = OnceLock::new();
        BUILTINS.get_or_init(|| {
            let mut registry = FunctionRegistry {
                functions: HashMap::new(),
            };
            register_functions(&mut registry);
            debug!("Registered builtins: {:?}", registry.names());
            registry
        })
    }

    fn register(&mut self, name: &'static str, function: Function) {
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Looks up `name` and invokes it with already evaluated arguments.
    pub fn call(&self, name: &str, args: &[f64]) -> Result<f64> {
        let function = self
            .get(name)
            .ok_or_else(|| ReferenceError::UnknownFunction(name.to_string()))?;
        function(args)
    }
}

fn register_functions(registry: &mut FunctionRegistry) {
    rounding::register(registry);
}
