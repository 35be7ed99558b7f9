use colexpr_rs::ast::Evaluator;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(HashMap::from([
        ("price".to_string(), 120.0),
        ("volume".to_string(), 3000.0),
    ]));

    let expressions: Vec<String> = (1..=8)
        .map(|i| format!("round(price * volume / {}, 2)", i * 7))
        .collect();

    let results = evaluator.evaluate_many(expressions.as_slice());
    for (expression, result) in expressions.iter().zip(results) {
        println!("{}: {:?}", expression, result);
    }
}
