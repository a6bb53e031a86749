use super::{date_time, Value};
use std::borrow::Cow;
use std::fmt::Write;

/// Types that can be written as an XML-RPC fragment or document.
pub trait ToXml {
    fn to_xml(&self) -> String;
}

/// A method call: the name of the remote procedure and its ordered parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub name: String,
    pub params: Vec<Value>,
}

impl ToXml for Call {
    fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        out.push_str("<methodCall>\n");
        let _ = writeln!(out, "  <methodName>{}</methodName>", escape(&self.name));
        out.push_str("  <params>\n");
        for param in &self.params {
            out.push_str("    <param><value>");
            write_value(&mut out, param);
            out.push_str("</value></param>\n");
        }
        out.push_str("  </params>\n");
        out.push_str("</methodCall>\n");
        out
    }
}

/// Produces the typed element that goes inside a `<value>`, e.g. `<int>41</int>`.
impl ToXml for Value {
    fn to_xml(&self) -> String {
        let mut out = String::new();
        write_value(&mut out, self);
        out
    }
}

/// Escapes `&` and `<`. Nothing else is touched: existing peers expect exactly this escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| c == '&' || c == '<') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('&', "&amp;").replace('<', "&lt;"))
}

// Writing into a `String` cannot fail, so the `fmt::Result`s below are discarded.
fn write_value(out: &mut String, value: &Value) {
    match *value {
        Value::Array(ref items) => {
            out.push_str("<array><data>");
            for item in items {
                out.push_str("<value>");
                write_value(out, item);
                out.push_str("</value>");
            }
            out.push_str("</data></array>");
        }
        Value::Struct(ref members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                let _ = write!(out, "<member><name>{}</name><value>", escape(name));
                write_value(out, member);
                out.push_str("</value></member>");
            }
            out.push_str("</struct>");
        }
        Value::Int(v) => {
            let _ = write!(out, "<int>{}</int>", v);
        }
        Value::WideInt(v) => {
            let _ = write!(out, "<int>{}</int>", v);
        }
        Value::Double(v) => {
            let _ = write!(out, "<double>{}</double>", v);
        }
        Value::Bool(v) => {
            let _ = write!(out, "<boolean>{}</boolean>", if v { 1 } else { 0 });
        }
        Value::DateTime(ref v) => {
            let _ = write!(
                out,
                "<dateTime.iso8601>{}</dateTime.iso8601>",
                date_time::format(v)
            );
        }
        Value::Base64(ref v) => {
            let _ = write!(out, "<base64>{}</base64>", base64::encode(v));
        }
        Value::Nil => out.push_str("<nil></nil>"),
        Value::String(ref v) => {
            let _ = write!(out, "<string>{}</string>", escape(v));
        }
    }
}
