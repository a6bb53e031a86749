use chrono::NaiveDate;
use courier_xmlrpc_fmt::{parse, Call, Fault, Members, ToXml, Value};

/// Wraps an encoded value into a successful `methodResponse` document.
fn wrap_as_response(value: &Value) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<methodResponse><params><param><value>{}</value></param></params></methodResponse>",
        value.to_xml()
    )
}

fn round_trip(value: &Value) -> Value {
    parse::response_from_slice(wrap_as_response(value).as_bytes())
        .expect("document should parse")
        .expect("document should not be a fault")
}

fn sample_struct() -> Value {
    let mut members = Members::new();
    members.insert("name".to_owned(), Value::from("Ada & <Co>"));
    members.insert("age".to_owned(), Value::Int(36));
    members.insert("ratio".to_owned(), Value::Double(0.125));
    members.insert(
        "tags".to_owned(),
        Value::Array(vec![Value::from("x"), Value::Bool(false)]),
    );
    Value::Struct(members)
}

#[test]
fn every_kind_survives_a_round_trip() {
    let when = NaiveDate::from_ymd_opt(2004, 2, 29)
        .unwrap()
        .and_hms_opt(23, 59, 1)
        .unwrap();
    let values = vec![
        Value::Int(i32::min_value()),
        Value::Int(i32::max_value()),
        Value::Double(-1.0e-3),
        Value::Double(6.02e23),
        Value::Bool(true),
        Value::Bool(false),
        Value::from("plain"),
        Value::from("a & b < c > d \"quoted\""),
        Value::from(""),
        Value::from("   "),
        Value::from("\n\t leading and trailing \n"),
        Value::WideInt(3_000_000_000),
        Value::WideInt(-(1 << 40)),
        Value::Base64((0u8..=255).collect()),
        Value::Base64(Vec::new()),
        Value::DateTime(when),
        Value::Array(Vec::new()),
        Value::Struct(Members::new()),
        sample_struct(),
        Value::Array(vec![sample_struct(), Value::Array(vec![Value::Int(1)])]),
    ];

    for value in values {
        assert_eq!(round_trip(&value), value, "round trip of {:?}", value);
    }
}

#[test]
fn nil_is_understood_when_received() {
    assert_eq!(round_trip(&Value::Nil), Value::Nil);
}

#[test]
fn struct_order_survives_a_round_trip() {
    let decoded = round_trip(&sample_struct());
    let keys: Vec<&str> = decoded
        .as_struct()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["name", "age", "ratio", "tags"]);
}

#[test]
fn state_name_call() {
    let xml = Call {
        name: "examples.getStateName".to_owned(),
        params: vec![Value::Int(41)],
    }
    .to_xml();

    assert!(xml.starts_with("<?xml version=\"1.0\"?>"));
    assert!(xml.contains("<methodName>examples.getStateName</methodName>"));
    assert_eq!(xml.matches("<param>").count(), 1);
    assert!(xml.contains("<param><value><int>41</int></value></param>"));
}

#[test]
fn nested_list_encoding() {
    let mut inner = Members::new();
    inner.insert("x".to_owned(), Value::Bool(true));
    let list = Value::Array(vec![Value::Int(1), Value::Struct(inner)]);

    assert_eq!(
        list.to_xml(),
        "<array><data><value><int>1</int></value><value><struct><member><name>x</name>\
         <value><boolean>1</boolean></value></member></struct></value></data></array>"
    );
}

#[test]
fn server_fault_is_classified() {
    let body = "<?xml version=\"1.0\"?>\n<methodResponse><fault><value><struct>\
        <member><name>faultCode</name><value><int>4</int></value></member>\
        <member><name>faultString</name><value><string>Too many parameters.</string></value></member>\
        </struct></value></fault></methodResponse>";

    let fault = parse::response_from_slice(body.as_bytes())
        .unwrap()
        .unwrap_err();
    assert_eq!(fault.code(), 4);
    assert_eq!(fault.message(), "Too many parameters.");
    assert_eq!(fault, Fault::new(4, "Too many parameters."));
}

#[test]
fn fault_shaped_return_value_is_a_fault() {
    let fault = Fault::new(1, "returned, not raised");
    let decoded = parse::response_from_slice(wrap_as_response(fault.value()).as_bytes()).unwrap();
    assert_eq!(decoded, Err(fault));
}

#[test]
fn wide_integer_is_sent_as_int() {
    let xml = Call {
        name: "counter.add".to_owned(),
        params: vec![Value::from(3_000_000_000u32)],
    }
    .to_xml();
    assert!(xml.contains("<param><value><int>3000000000</int></value></param>"));
}

#[test]
fn reader_and_slice_agree() {
    let body = wrap_as_response(&sample_struct());
    let from_reader = parse::response(std::io::Cursor::new(body.clone().into_bytes())).unwrap();
    let from_slice = parse::response_from_slice(body.as_bytes()).unwrap();
    assert_eq!(from_reader, from_slice);
}
