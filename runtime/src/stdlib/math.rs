use super::number_arg;
use crate::prelude::*;

pub fn load() -> ValueMap {
    value_map! {
        "round" => Value::function(round),
        "floor" => Value::function(|args| Ok(Value::from(number_arg("floor", &args, 0)?.floor()))),
        "ceil" => Value::function(|args| Ok(Value::from(number_arg("ceil", &args, 0)?.ceil()))),
    }
}

/// Rounds a number, optionally to a given number of decimal places.
fn round(args: Vec<Value>) -> Result<Value, Exception> {
    let number = number_arg("round", &args, 0)?;

    if args.len() < 2 {
        return Ok(Value::from(number.round()));
    }

    let factor = 10f64.powi(number_arg("round", &args, 1)? as i32);

    Ok(Value::from((number * factor).round() / factor))
}
