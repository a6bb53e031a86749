use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// The format written to `<dateTime.iso8601>` elements. It carries no timezone, so times that
/// are not local to the receiving peer are ambiguous on the wire.
pub const WIRE_FORMAT: &str = "%Y%m%dT%H:%M:%S";

lazy_static! {
    /// Accepts both the compact XML-RPC form (`19980717T14:08:55`) and the extended ISO-8601 form
    /// (`1998-07-17T14:08:55`). Fractional seconds and a timezone suffix are ignored.
    static ref ISO8601: Regex = Regex::new(
        r"^(\d{4})-?(\d{2})-?(\d{2})T(\d{2}):?(\d{2}):?(\d{2})(?:[.,]\d+)?(?:Z|[+-]\d{2}:?\d{2})?$"
    )
    .expect("invalid dateTime.iso8601 pattern");
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Parses the text of a `<dateTime.iso8601>` element.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    let captures = ISO8601.captures(text.trim())?;
    let field = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = captures.get(1)?.as_str().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(field(4)?, field(5)?, field(6)?)
}
