use crate::functions::FunctionRegistry;
use colexpr_macros::builtin;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register("round", round);
    registry.register("ceil", ceil);
    registry.register("floor", floor);
}

/// Rounds `x` to `precision` decimal places, ties away from zero.
/// `precision` defaults to 0 and may be negative.
#[builtin]
pub fn round(x: f64, precision: Option<f64>) -> f64 {
    let factor = 10f64.powf(precision.unwrap_or(0.0));
    (x * factor).round() / factor
}

#[builtin]
pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[builtin]
pub fn floor(x: f64) -> f64 {
    x.floor()
}
