//! Decoding of `methodResponse` documents.
//!
//! Decoding is deliberately lenient. Only a body that is not XML at all is an error; anything
//! parseable decodes to *some* value, with missing or unreadable parts replaced by defaults:
//!
//! * a missing `params/param/value` path decodes as an empty string,
//! * unparsable `<int>`/`<i4>`/`<double>` text decodes as zero,
//! * a payload is a fault when it is a struct with a `faultCode` member, wherever it appears,
//! * a struct `<member>` without a `<name>` gets the empty name, without a `<value>` an empty
//!   string,
//! * duplicate member names keep the last value (at the position of the first occurrence).

pub mod tree;

use crate::error::Result;
use crate::fault::Fault;
use crate::value::{date_time, Members, Value};
use crate::Response;
use std::io::Read;
use tree::Element;

/// Parses a `methodResponse` document into either the returned value or a fault.
pub fn response<R: Read>(body: R) -> Result<Response> {
    let root = Element::parse(body)?;
    Ok(response_from_root(&root))
}

/// Same as [`response`] for a body that is already in memory.
pub fn response_from_slice(body: &[u8]) -> Result<Response> {
    response(body)
}

/// The payload is taken from `<fault>` if present, otherwise from `params/param/value`. Whether it
/// is a fault is decided by its shape alone, see [`Fault::is_fault`].
fn response_from_root(root: &Element) -> Response {
    let payload = match root.child("fault") {
        Some(fault) => value_or_empty(fault.child("value")),
        None => value_or_empty(root.path(&["params", "param", "value"])),
    };

    match Fault::from_value(payload) {
        Ok(fault) => Err(fault),
        Err(value) => Ok(value),
    }
}

fn value_or_empty(element: Option<&Element>) -> Value {
    element.map_or_else(|| Value::String(String::new()), value)
}

/// Decodes a `<value>` element.
pub fn value(element: &Element) -> Value {
    let data = match element.first_child() {
        Some(data) => data,
        // An untyped value is a string.
        None => return Value::String(element.text()),
    };

    match data.name() {
        "struct" => Value::Struct(members(data)),
        "array" => Value::Array(array(data)),
        "i4" | "int" => data
            .text()
            .trim()
            .parse::<i128>()
            .map_or(Value::Int(0), Value::from_wide_int),
        "double" => Value::Double(data.text().trim().parse().unwrap_or_default()),
        "boolean" => Value::Bool(data.text() == "1"),
        "dateTime.iso8601" => {
            let text = data.text();
            date_time::parse(&text).map_or(Value::String(text), Value::DateTime)
        }
        "base64" => {
            let text = data.text();
            let compact: String = text.split_whitespace().collect();
            base64::decode(&compact).map_or(Value::String(text), Value::Base64)
        }
        "nil" => Value::Nil,
        _ => Value::String(data.text()),
    }
}

fn members(element: &Element) -> Members {
    let mut members = Members::new();
    for member in element.children().filter(|e| e.name() == "member") {
        let name = member.child("name").map(Element::text).unwrap_or_default();
        let value = value_or_empty(member.child("value"));
        members.insert(name, value);
    }
    members
}

fn array(element: &Element) -> Vec<Value> {
    element
        .child("data")
        .map(|data| {
            data.children()
                .filter(|e| e.name() == "value")
                .map(value)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn decode(body: &str) -> Response {
        response_from_slice(body.as_bytes()).unwrap()
    }

    fn success_or_fault(value: &str) -> Response {
        decode(&format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param><value>{}</value></param></params></methodResponse>",
            value
        ))
    }

    fn success(value: &str) -> Value {
        success_or_fault(value).unwrap()
    }

    #[test]
    fn decodes_fault() {
        let fault = decode(
            "<?xml version=\"1.0\"?>
            <methodResponse>
              <fault>
                <value>
                  <struct>
                    <member><name>faultCode</name><value><int>4</int></value></member>
                    <member><name>faultString</name><value><string>Too many parameters.</string></value></member>
                  </struct>
                </value>
              </fault>
            </methodResponse>",
        )
        .unwrap_err();
        assert_eq!(fault.code(), 4);
        assert_eq!(fault.message(), "Too many parameters.");
    }

    #[test]
    fn fault_without_message_defaults() {
        let fault = decode(
            "<methodResponse><fault><value><struct>\
             <member><name>faultCode</name><value><string>x</string></value></member>\
             </struct></value></fault></methodResponse>",
        )
        .unwrap_err();
        assert_eq!(fault.code(), 0);
        assert_eq!(fault.message(), "");
    }

    #[test]
    fn fault_shaped_params_are_a_fault() {
        let fault = success_or_fault(
            "<struct>\
             <member><name>faultCode</name><value><int>4</int></value></member>\
             <member><name>faultString</name><value><string>x</string></value></member>\
             </struct>",
        )
        .unwrap_err();
        assert_eq!(fault.code(), 4);
        assert_eq!(fault.message(), "x");
    }

    #[test]
    fn fault_element_without_fault_shape_is_a_success() {
        assert_eq!(
            decode("<methodResponse><fault><value><struct/></value></fault></methodResponse>"),
            Ok(Value::Struct(Members::new()))
        );
        assert_eq!(
            decode("<methodResponse><fault><value><int>4</int></value></fault></methodResponse>"),
            Ok(Value::Int(4))
        );
        assert_eq!(
            decode("<methodResponse><fault/></methodResponse>"),
            Ok(Value::String(String::new()))
        );
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(success("<i4>-12</i4>"), Value::Int(-12));
        assert_eq!(success("<int> 41 </int>"), Value::Int(41));
        assert_eq!(success("<double>-0.5</double>"), Value::Double(-0.5));
        assert_eq!(success("<boolean>1</boolean>"), Value::Bool(true));
        assert_eq!(success("<boolean>true</boolean>"), Value::Bool(false));
        assert_eq!(success("<string>South Dakota</string>"), Value::from("South Dakota"));
        assert_eq!(success("untyped"), Value::from("untyped"));
        assert_eq!(success("<string>   </string>"), Value::from("   "));
        assert_eq!(success("  "), Value::from("  "));
        assert_eq!(success("\n  <int>5</int>\n"), Value::Int(5));
        assert_eq!(success("<nil/>"), Value::Nil);
        assert_eq!(
            success("<base64>eW91IGNhbid0IHJl\nYWQgdGhpcyE=</base64>"),
            Value::Base64(b"you can't read this!".to_vec())
        );
    }

    #[test]
    fn garbage_in_default_out() {
        assert_eq!(success("<int>forty-one</int>"), Value::Int(0));
        assert_eq!(success("<i4>99999999999</i4>"), Value::WideInt(99_999_999_999));
        assert_eq!(success("<int>1e3</int>"), Value::Int(0));
        assert_eq!(success("<double>n/a</double>"), Value::Double(0.0));
        assert_eq!(success("<dateTime.iso8601>soon</dateTime.iso8601>"), Value::from("soon"));
        assert_eq!(success("<base64>!!!</base64>"), Value::from("!!!"));
        assert_eq!(success("<unknown>text</unknown>"), Value::from("text"));
        assert_eq!(success("<array/>"), Value::Array(Vec::new()));
    }

    #[test]
    fn missing_param_is_empty_string() {
        assert_eq!(
            decode("<methodResponse><params/></methodResponse>"),
            Ok(Value::String(String::new()))
        );
        assert_eq!(decode("<anything/>"), Ok(Value::String(String::new())));
    }

    #[test]
    fn struct_member_without_name_or_value() {
        let value = success(
            "<struct>\
             <member><value><int>1</int></value></member>\
             <member><name>lonely</name></member>\
             </struct>",
        );
        let members = value.as_struct().unwrap();
        assert_eq!(members.get(""), Some(&Value::Int(1)));
        assert_eq!(members.get("lonely"), Some(&Value::String(String::new())));
    }

    #[test]
    fn duplicate_member_last_write_wins() {
        let value = success(
            "<struct>\
             <member><name>a</name><value><int>1</int></value></member>\
             <member><name>b</name><value><int>2</int></value></member>\
             <member><name>a</name><value><int>3</int></value></member>\
             </struct>",
        );
        let members = value.as_struct().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.get("a"), Some(&Value::Int(3)));
        assert_ne!(members.get("a"), Some(&Value::Int(1)));
        let keys: Vec<&str> = members.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn array_keeps_document_order_and_skips_foreign_elements() {
        let value = success(
            "<array><data>\
             <value><int>1</int></value>\
             <comment>ignored</comment>\
             <value><string>two</string></value>\
             <value><array><data><value><boolean>0</boolean></value></data></array></value>\
             </data></array>",
        );
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Int(1),
                Value::from("two"),
                Value::Array(vec![Value::Bool(false)]),
            ])
        );
    }

    #[test]
    fn empty_body_is_malformed() {
        match response_from_slice(b"") {
            Err(e) => match e.kind() {
                ErrorKind::MalformedDocument(_) => {}
                other => panic!("unexpected error kind: {}", other),
            },
            Ok(response) => panic!("expected an error, got {:?}", response),
        }
    }

    #[test]
    fn decoding_is_idempotent() {
        let body = b"<methodResponse><params><param><value><struct>\
            <member><name>n</name><value><double>1.5</double></value></member>\
            </struct></value></param></params></methodResponse>";
        assert_eq!(
            response_from_slice(body).unwrap(),
            response_from_slice(body).unwrap()
        );
    }
}
