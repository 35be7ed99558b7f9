use colexpr_rs::create_evaluator;
use log::error;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let evaluate = create_evaluator(HashMap::from([
        ("column1".to_string(), 100.0),
        ("column2".to_string(), 233.0),
        ("column3".to_string(), 35.0),
    ]));

    let expressions = [
        "column1 + column2 * 2",
        "column1 % column2 * column3",
        "round((column2 / column1) * column1, 2)",
        "ceil(column2 / column1 * 10)",
        "floor(42.9)",
        "round(2.5)",
        "unknownVar + 1",
        "sqrt(4)",
        "(1+2",
    ];

    for expression in expressions {
        match evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => error!("{}: {}", expression, err),
        }
    }
}
