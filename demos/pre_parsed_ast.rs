use colexpr_rs::ast::Evaluator;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
    ];

    let expression = "floor(price * volume / 1000) % 7";
    let ast = match Evaluator::new(HashMap::new()).parse_expression(expression) {
        Ok(ast) => ast,
        Err(err) => {
            eprintln!("Failed to parse {}: {}", expression, err);
            return;
        }
    };
    println!("Parsed: {}", ast);

    for (i, context) in contexts.into_iter().enumerate() {
        match Evaluator::new(context).evaluate(&ast) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Error {}: {}", i, err),
        }
    }
}
