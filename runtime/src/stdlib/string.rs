use super::{arg, number_arg};
use crate::prelude::*;

pub fn load() -> ValueMap {
    value_map! {
        "upper" => Value::function(|args| Ok(Value::from(arg(&args, 0).to_string().to_uppercase()))),
        "lower" => Value::function(|args| Ok(Value::from(arg(&args, 0).to_string().to_lowercase()))),
        "pad" => Value::function(pad),
    }
}

/// Widest padding that `pad` will produce.
const MAX_WIDTH: f64 = u16::MAX as f64;

/// Pads the rendered first argument with spaces until it is at least the given
/// width. A negative width pads on the left instead.
fn pad(args: Vec<Value>) -> Result<Value, Exception> {
    let string = arg(&args, 0).to_string();
    let width = number_arg("pad", &args, 1)?;

    if !width.is_finite() || width.abs() > MAX_WIDTH {
        throw!("pad() width out of range: {}", width);
    }

    let target = width.abs() as usize;
    let padding = " ".repeat(target.saturating_sub(string.chars().count()));

    Ok(Value::from(if width < 0.0 {
        padding + &string
    } else {
        string + &padding
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        assert_eq!(pad(vec![Value::from("ab"), Value::from(4)]).unwrap(), "ab  ");
        assert_eq!(pad(vec![Value::from("ab"), Value::from(-4)]).unwrap(), "  ab");
        assert_eq!(pad(vec![Value::from("abcdef"), Value::from(4)]).unwrap(), "abcdef");
        assert!(pad(vec![Value::from("ab")]).is_err());
        assert_eq!(pad(vec![Value::from(""), Value::from(65535)]).unwrap().to_string().len(), 65535);
        assert!(pad(vec![Value::from("a"), Value::from(65536)]).is_err());
        assert!(pad(vec![Value::from("a"), Value::from(-1e23)]).is_err());
        assert!(pad(vec![Value::from("a"), Value::from(f64::INFINITY)]).is_err());
        assert!(pad(vec![Value::from("a"), Value::from(f64::NAN)]).is_err());
    }
}
