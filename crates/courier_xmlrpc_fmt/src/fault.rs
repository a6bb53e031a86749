use crate::value::{Members, Value};
use std::fmt;

const FAULT_CODE: &str = "faultCode";
const FAULT_STRING: &str = "faultString";

/// A fault returned by a remote peer in place of a regular return value.
///
/// On the wire a fault is an ordinary `<struct>` with a `faultCode` and a `faultString` member.
/// `Fault` keeps that struct as-is and reads the two members on demand, so the original value can
/// always be recovered with [`Fault::into_value`].
#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    value: Value,
}

impl Fault {
    /// Constructs a new fault with the given code and message.
    pub fn new<S: Into<String>>(code: i32, message: S) -> Self {
        let mut members = Members::new();
        members.insert(FAULT_CODE.to_owned(), Value::Int(code));
        members.insert(FAULT_STRING.to_owned(), Value::String(message.into()));
        Fault {
            value: Value::Struct(members),
        }
    }

    /// Returns true if the value has the shape of a fault: a struct with a `faultCode` member.
    pub fn is_fault(value: &Value) -> bool {
        value
            .as_struct()
            .map_or(false, |members| members.contains_key(FAULT_CODE))
    }

    /// Interprets the value as a fault if it has the shape of one, otherwise hands the value back.
    pub fn from_value(value: Value) -> Result<Fault, Value> {
        if Fault::is_fault(&value) {
            Ok(Fault { value })
        } else {
            Err(value)
        }
    }

    /// The `faultCode` member, or `0` if it is missing or not an integer.
    pub fn code(&self) -> i32 {
        self.value
            .get(FAULT_CODE)
            .and_then(Value::as_i32)
            .unwrap_or_default()
    }

    /// The `faultString` member, or an empty string if it is missing or not a string.
    pub fn message(&self) -> &str {
        self.value
            .get(FAULT_STRING)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault #{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for Fault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fault_exposes_code_and_message() {
        let fault = Fault::new(4, "Too many parameters.");
        assert_eq!(fault.code(), 4);
        assert_eq!(fault.message(), "Too many parameters.");
        assert!(Fault::is_fault(fault.value()));
        assert_eq!(fault.to_string(), "fault #4: Too many parameters.");
    }

    #[test]
    fn detection_is_structural() {
        let fault: Value = vec![("faultCode", Value::Int(1))].into_iter().collect();
        let plain: Value = vec![("code", Value::Int(1))].into_iter().collect();
        assert!(Fault::is_fault(&fault));
        assert!(!Fault::is_fault(&plain));
        assert!(!Fault::is_fault(&Value::Int(1)));
        assert_eq!(Fault::from_value(plain.clone()), Err(plain));
    }

    #[test]
    fn missing_members_read_as_defaults() {
        let mistyped: Value = vec![
            ("faultCode", Value::String("4".to_owned())),
            ("faultString", Value::Int(4)),
        ]
        .into_iter()
        .collect();
        let fault = Fault::from_value(mistyped).unwrap();
        assert_eq!(fault.code(), 0);
        assert_eq!(fault.message(), "");
    }
}
