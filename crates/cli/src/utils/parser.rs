use serde_json::Value;

/// Read a command-line recipe argument.
///
/// Numbers, booleans and `null` keep their JSON type; anything else,
/// including quoted JSON strings, is passed through as the raw string.
pub fn parse_argument(arg: &str) -> Value {
    match serde_json::from_str::<Value>(arg) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => value,
        _ => Value::String(arg.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_keep_their_type() {
        assert_eq!(parse_argument("5"), json!(5));
        assert_eq!(parse_argument("-2.5"), json!(-2.5));
        assert_eq!(parse_argument("false"), json!(false));
        assert_eq!(parse_argument("null"), Value::Null);
    }

    #[test]
    fn test_everything_else_is_a_string() {
        assert_eq!(parse_argument(".IfcWall"), json!(".IfcWall"));
        assert_eq!(parse_argument("#12, #13"), json!("#12, #13"));
        assert_eq!(parse_argument("[1,2]"), json!("[1,2]"));
        assert_eq!(parse_argument("\"quoted\""), json!("\"quoted\""));
    }
}
