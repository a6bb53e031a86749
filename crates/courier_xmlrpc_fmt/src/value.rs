use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::convert::TryFrom;
use std::iter::FromIterator;

pub(crate) mod date_time;
mod to_xml;

pub use to_xml::{escape, Call, ToXml};

/// The members of an XML-RPC `<struct>`, in insertion order.
pub type Members = IndexMap<String, Value>;

/// Represents any value that can be sent or received over XML-RPC.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A 32-bit signed integer (`<int>` or `<i4>`).
    Int(i32),
    /// An integer outside the 32-bit range. Still written as `<int>`, so only peers that accept
    /// wide integers will understand it.
    WideInt(i128),
    /// A double precision float (`<double>`).
    Double(f64),
    Bool(bool),
    String(String),
    /// Binary data, transmitted as base64 (`<base64>`).
    Base64(Vec<u8>),
    /// A timestamp without timezone (`<dateTime.iso8601>`).
    DateTime(NaiveDateTime),
    Array(Vec<Value>),
    Struct(Members),
    /// The `<nil/>` extension. Not part of the XML-RPC specification, only send it to peers that
    /// are known to accept it.
    Nil,
}

impl Value {
    /// Constructs a value from an integer of any width. Integers that fit in 32 bits become an
    /// `Int`, wider ones a `WideInt`.
    pub fn from_wide_int<T: Into<i128>>(v: T) -> Value {
        let v = v.into();
        i32::try_from(v).map_or(Value::WideInt(v), Value::Int)
    }

    /// Constructs a string value from anything that can be displayed.
    pub fn display<T: std::fmt::Display>(v: T) -> Value {
        Value::String(v.to_string())
    }

    /// Returns a readable name of the XML-RPC type of this value.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Int(_) | Value::WideInt(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Base64(_) => "base64",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Nil => "nil",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns any integer value that fits in 64 bits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(i64::from(v)),
            Value::WideInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as a float, converting integers.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(f64::from(v)),
            Value::WideInt(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match *self {
            Value::Base64(ref v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match *self {
            Value::DateTime(ref v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match *self {
            Value::Array(ref v) => Some(v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Members> {
        match *self {
            Value::Struct(ref v) => Some(v),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        match *self {
            Value::Nil => true,
            _ => false,
        }
    }

    /// If the value is a `Struct`, returns the member with the given name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_struct().and_then(|members| members.get(key))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i32::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, u8, u16);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::from_wide_int(v)
                }
            }
        )*
    };
}

impl_from_wide_int!(i64, u32, u64, i128);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(v: &'a [u8]) -> Self {
        Value::Base64(v.to_vec())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Members> for Value {
    fn from(v: Members) -> Self {
        Value::Struct(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Struct(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
