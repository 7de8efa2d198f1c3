use crate::diagnostics::Diagnostic;
use serde_json::Value;

/// A value a [`split()`](crate::split) test may return.
///
/// `bool` is used as-is. JSON values (and optional ones) are coerced by
/// truthiness (`null`, `false`, `0`, `NaN` and `""` are falsy) and, unless
/// they are booleans, reported as a
/// [`Diagnostic::NonBooleanSplitTest`].
pub trait SplitTestOutcome {
    fn passes(self) -> bool;
}
impl SplitTestOutcome for bool {
    fn passes(self) -> bool {
        self
    }
}
impl SplitTestOutcome for Option<bool> {
    fn passes(self) -> bool {
        match self {
            Some(passes) => passes,
            None => Value::Null.passes(),
        }
    }
}
impl SplitTestOutcome for Value {
    fn passes(self) -> bool {
        if let Value::Bool(passes) = self {
            return passes;
        }
        let truthy = is_truthy(&self);
        Diagnostic::NonBooleanSplitTest { returned: self }.emit();
        truthy
    }
}
impl SplitTestOutcome for Option<Value> {
    fn passes(self) -> bool {
        self.unwrap_or(Value::Null).passes()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) =>
            number.as_f64().is_some_and(|number| number != 0.0 && !number.is_nan()),
        Value::String(string) => !string.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
