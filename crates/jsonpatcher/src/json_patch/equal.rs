use serde_json::{Number, Value};

/// Performs a deep equality check between two JSON values.
///
/// Arrays compare element by element in order, objects key by key regardless
/// of insertion order. Scalars must share a JSON type: `true` never equals
/// `1`. Numbers compare by value, so `1` equals `1.0`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use jsonpatcher::json_patch::deep_equal;
///
/// assert!(deep_equal(&json!({"a": 1, "b": [1, 2]}), &json!({"b": [1, 2], "a": 1})));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// assert!(!deep_equal(&json!(true), &json!(1)));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            obj_a.len() == obj_b.len()
                && obj_a
                    .iter()
                    .all(|(key, val_a)| obj_b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
        }

        // Different types are never equal
        _ => false,
    }
}

fn number_equal(a: &Number, b: &Number) -> bool {
    match (integer_value(a), integer_value(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => float_equals_integer(b.as_f64(), x),
        (None, Some(y)) => float_equals_integer(a.as_f64(), y),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from))
}

// A float equals an integer only when it is integral and inside the i64/u64 range.
fn float_equals_integer(float: Option<f64>, int: i128) -> bool {
    const MIN: f64 = -9_223_372_036_854_775_808.0; // -2^63
    const MAX: f64 = 18_446_744_073_709_551_616.0; // 2^64
    match float {
        Some(f) if f.fract() == 0.0 && (MIN..MAX).contains(&f) => f as i128 == int,
        _ => false,
    }
}
