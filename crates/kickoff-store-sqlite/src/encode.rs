//! Conversions between [`kickoff_core::sink::Value`] and SQLite values.
//!
//! Dates are stored as `YYYY-MM-DD` text, booleans as 0/1 integers. Reads
//! return text and integers as stored; callers that need a date parse it.

use kickoff_core::sink::Value;
use rusqlite::types::{Value as SqlValue, ValueRef};

pub fn encode_value(v: &Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Integer(n) => SqlValue::Integer(*n),
    Value::Real(x) => SqlValue::Real(*x),
    Value::Text(s) => SqlValue::Text(s.clone()),
    Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
    Value::Date(d) => SqlValue::Text(d.format("%Y-%m-%d").to_string()),
  }
}

pub fn decode_value(v: ValueRef<'_>) -> Value {
  match v {
    ValueRef::Null => Value::Null,
    ValueRef::Integer(n) => Value::Integer(n),
    ValueRef::Real(x) => Value::Real(x),
    ValueRef::Text(t) | ValueRef::Blob(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn dates_have_no_time_component() {
    let d = NaiveDate::from_ymd_opt(1950, 7, 16).unwrap();
    assert_eq!(encode_value(&Value::Date(d)), SqlValue::Text("1950-07-16".into()));
  }

  #[test]
  fn nulls_stay_null() {
    assert_eq!(encode_value(&Value::Null), SqlValue::Null);
    assert_eq!(decode_value(ValueRef::Null), Value::Null);
  }
}
