//! Pure display helpers for the table view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Result, schema::SchemaDocument};

/// Delimiter between the segments of a schema element's qualified key.
pub const KEY_DELIMITER: char = '|';

/// Render a field's declared type for display.
///
/// - scalar: `string(10) not null`, `int not null`
/// - union of scalars: each member rendered with its own length annotation and
///   a trailing space, e.g. `string(5) null `; no `not null` suffix
/// - anything else: the JSON text of the type, unchanged
pub fn format_field_type(ty: &Value, maxlen: Option<&Value>) -> String {
  match ty {
    Value::String(scalar) => format!("{} not null", with_length(scalar, maxlen)),
    Value::Array(members) if members.iter().all(Value::is_string) => members
      .iter()
      .filter_map(Value::as_str)
      .map(|member| format!("{} ", with_length(member, maxlen)))
      .collect(),
    other => other.to_string(),
  }
}

fn with_length(scalar: &str, maxlen: Option<&Value>) -> String {
  match maxlen.filter(|_| scalar == "string") {
    Some(Value::String(len)) => format!("{scalar}({len})"),
    Some(Value::Null) | None => scalar.to_owned(),
    Some(len) => format!("{scalar}({len})"),
  }
}

/// Column name from a qualified key: the second `|`-separated segment.
/// Keys without a delimiter are returned whole.
pub fn display_name(key: &str) -> &str {
  key.split(KEY_DELIMITER).nth(1).unwrap_or(key)
}

/// Parse a raw schema document and compute the display type of every field,
/// keyed by field name.
pub fn field_types(raw_schema: &str) -> Result<HashMap<String, String>> {
  let doc = SchemaDocument::parse(raw_schema)?;
  Ok(
    doc
      .fields
      .into_iter()
      .map(|f| {
        let display = format_field_type(&f.ty, f.maxlen.as_ref());
        (f.name, display)
      })
      .collect(),
  )
}

/// The most recent of a set of optional timestamps.
pub fn latest_update<I>(stamps: I) -> Option<DateTime<Utc>>
where
  I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
  stamps.into_iter().flatten().max()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use serde_json::json;

  use super::*;

  #[test]
  fn string_scalar_with_maxlen() {
    assert_eq!(
      format_field_type(&json!("string"), Some(&json!(10))),
      "string(10) not null"
    );
  }

  #[test]
  fn non_string_scalar_ignores_maxlen() {
    assert_eq!(format_field_type(&json!("int"), None), "int not null");
    assert_eq!(format_field_type(&json!("int"), Some(&json!(4))), "int not null");
  }

  #[test]
  fn union_members_are_formatted_independently() {
    assert_eq!(
      format_field_type(&json!(["string", "null"]), Some(&json!(5))),
      "string(5) null "
    );
    assert_eq!(format_field_type(&json!(["null", "long"]), None), "null long ");
  }

  #[test]
  fn string_maxlen_is_rendered_verbatim() {
    assert_eq!(
      format_field_type(&json!("string"), Some(&json!("255"))),
      "string(255) not null"
    );
  }

  #[test]
  fn nested_shapes_pass_through() {
    let array = json!({"type": "array", "items": "int"});
    assert_eq!(format_field_type(&array, None), array.to_string());

    let mixed = json!(["null", {"type": "map", "values": "string"}]);
    assert_eq!(format_field_type(&mixed, None), mixed.to_string());
  }

  #[test]
  fn display_name_takes_second_segment() {
    assert_eq!(display_name("ns|columnName"), "columnName");
    assert_eq!(display_name("ns|column|array"), "column");
    assert_eq!(display_name("business"), "business");
  }

  #[test]
  fn field_types_keyed_by_name() {
    let types = field_types(
      r#"{"type": "record", "name": "t", "fields": [
        {"name": "id", "type": "int"},
        {"name": "title", "type": "string", "maxlen": 10}
      ]}"#,
    )
    .unwrap();
    assert_eq!(types["id"], "int not null");
    assert_eq!(types["title"], "string(10) not null");
  }

  #[test]
  fn latest_update_skips_missing() {
    let t0 = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2016, 2, 1, 0, 0, 0).unwrap();
    assert_eq!(latest_update([Some(t0), None, Some(t1)]), Some(t1));
    assert_eq!(latest_update([None, None]), None);
  }
}
