//! Fixture-case execution: maps operation names onto the core crate.
//!
//! Inputs arrive as the fixture's serialized JSON; outputs are rendered to
//! stable strings so fixtures can compare them byte-for-byte. The status
//! cell is sampled immediately after each call, before anything else runs
//! on the thread.

use std::fmt::Display;
use std::io::Cursor;

use serde_json::Value;
use thiserror::Error;

use hardlibc_core::errno;
use hardlibc_core::search::{lfind, lsearch};
use hardlibc_core::stdio::getdelim::{LineBuffer, ReadError, read_delimited};
use hardlibc_core::stdlib::parse::{
    ConversionError, Parsed, parse_f32, parse_f64, parse_i8, parse_i16, parse_i32, parse_i64,
    parse_u8, parse_u16, parse_u32, parse_u64,
};
use hardlibc_core::stdlib::units::UnitCategory;

/// Observed behavior of one executed fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRun {
    /// Rendered output string.
    pub output: String,
    /// Status-cell value sampled right after the call.
    pub errno: i32,
}

/// Execution failures (the case itself, not the operation under test).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unsupported function: {0}")]
    UnknownFunction(String),
    #[error("bad inputs: {0}")]
    BadInputs(String),
}

/// Executes a named core operation from serialized inputs.
pub fn execute_fixture_case(function: &str, inputs: &Value) -> Result<CaseRun, DispatchError> {
    match function {
        "parse_u8" => run_parse(inputs, parse_u8),
        "parse_u16" => run_parse(inputs, parse_u16),
        "parse_u32" => run_parse(inputs, parse_u32),
        "parse_u64" => run_parse(inputs, parse_u64),
        "parse_i8" => run_parse(inputs, parse_i8),
        "parse_i16" => run_parse(inputs, parse_i16),
        "parse_i32" => run_parse(inputs, parse_i32),
        "parse_i64" => run_parse(inputs, parse_i64),
        "parse_f32" => run_parse(inputs, parse_f32),
        "parse_f64" => run_parse(inputs, parse_f64),
        "lfind" => run_lfind(inputs),
        "lsearch" => run_lsearch(inputs),
        "read_delimited" => run_read_delimited(inputs),
        other => Err(DispatchError::UnknownFunction(other.to_string())),
    }
}

/// Parses a category name as it appears in fixture JSON.
pub fn category_from_name(name: &str) -> Option<UnitCategory> {
    match name {
        "none" => Some(UnitCategory::None),
        "data-size" => Some(UnitCategory::DataSize),
        "sector-type" => Some(UnitCategory::SectorType),
        "time" => Some(UnitCategory::Time),
        "power" => Some(UnitCategory::Power),
        "volts" => Some(UnitCategory::Volts),
        "amps" => Some(UnitCategory::Amps),
        "temperature" => Some(UnitCategory::Temperature),
        _ => None,
    }
}

fn run_parse<T, F>(inputs: &Value, parse: F) -> Result<CaseRun, DispatchError>
where
    T: Display,
    F: Fn(&str, UnitCategory) -> Result<Parsed<T>, ConversionError<T>>,
{
    let text = require_str(inputs, "text")?;
    let category_name = optional_str(inputs, "category").unwrap_or("none");
    let category = category_from_name(category_name)
        .ok_or_else(|| DispatchError::BadInputs(format!("unknown category: {category_name}")))?;

    let output = match parse(text, category) {
        Ok(Parsed { value, unit: Some(unit) }) => format!("{value} {unit}"),
        Ok(Parsed { value, unit: None }) => format!("{value}"),
        Err(ConversionError::NotNumeric) => "error: not numeric".to_string(),
        Err(ConversionError::OutOfRange { clamped }) => {
            format!("error: out of range, clamped={clamped}")
        }
        Err(ConversionError::UnknownUnit) => "error: unknown unit".to_string(),
    };
    Ok(CaseRun { output, errno: errno::get_errno() })
}

fn run_lfind(inputs: &Value) -> Result<CaseRun, DispatchError> {
    let (flat, key, count, width) = table_inputs(inputs)?;

    let output = match lfind(&key, &flat, count, width, memcmp_cmp) {
        Ok(Some(elem)) => {
            let at = (elem.as_ptr() as usize - flat.as_ptr() as usize) / width;
            format!("found at={at}")
        }
        Ok(None) => "no match".to_string(),
        Err(err) => format!("error: {err}"),
    };
    Ok(CaseRun { output, errno: errno::get_errno() })
}

fn run_lsearch(inputs: &Value) -> Result<CaseRun, DispatchError> {
    let (mut flat, key, mut count, width) = table_inputs(inputs)?;
    // One reserved spare slot, as the insertion contract requires.
    flat.resize(flat.len() + width, 0);
    let before = count;

    let output = match lsearch(&key, &mut flat, &mut count, width, memcmp_cmp) {
        Ok(_) if count == before => format!("found count={count}"),
        Ok(_) => format!("appended count={count}"),
        Err(err) => format!("error: {err}"),
    };
    Ok(CaseRun { output, errno: errno::get_errno() })
}

fn run_read_delimited(inputs: &Value) -> Result<CaseRun, DispatchError> {
    let stream_text = require_str(inputs, "stream")?;
    let delimiter = optional_str(inputs, "delimiter").unwrap_or("\n");
    let delimiter = *delimiter
        .as_bytes()
        .first()
        .ok_or_else(|| DispatchError::BadInputs("empty delimiter".to_string()))?;
    let calls = inputs.get("calls").and_then(Value::as_u64).unwrap_or(1);

    let mut stream = Cursor::new(stream_text.as_bytes().to_vec());
    let mut line = LineBuffer::new();
    let mut rendered = Vec::with_capacity(calls as usize);
    for _ in 0..calls {
        rendered.push(match read_delimited(&mut line, delimiter, &mut stream) {
            Ok(n) => format!("ok({n}) {:?}", String::from_utf8_lossy(line.as_bytes())),
            Err(ReadError::EndOfStream) => "error: end of stream".to_string(),
            Err(ReadError::Overflow) => "error: overflow".to_string(),
            Err(ReadError::Allocation) => "error: allocation failure".to_string(),
            Err(ReadError::Stream(_)) => "error: stream fault".to_string(),
        });
    }
    Ok(CaseRun { output: rendered.join(" | "), errno: errno::get_errno() })
}

/// Bytewise three-way comparator used for all fixture tables.
fn memcmp_cmp(elem: &[u8], key: &[u8]) -> i32 {
    match elem.cmp(key) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Extracts `table` (array of equal-width element arrays) and `key`.
fn table_inputs(inputs: &Value) -> Result<(Vec<u8>, Vec<u8>, usize, usize), DispatchError> {
    let rows: Vec<Vec<u8>> = field(inputs, "table")?;
    let key: Vec<u8> = field(inputs, "key")?;
    let width = key.len();
    if rows.iter().any(|row| row.len() != width) {
        return Err(DispatchError::BadInputs(
            "table rows must match the key width".to_string(),
        ));
    }
    let count = rows.len();
    let flat: Vec<u8> = rows.into_iter().flatten().collect();
    Ok((flat, key, count, width))
}

fn field<T: serde::de::DeserializeOwned>(inputs: &Value, name: &str) -> Result<T, DispatchError> {
    let value = inputs
        .get(name)
        .ok_or_else(|| DispatchError::BadInputs(format!("missing field: {name}")))?;
    serde_json::from_value(value.clone())
        .map_err(|err| DispatchError::BadInputs(format!("field {name}: {err}")))
}

fn require_str<'v>(inputs: &'v Value, name: &str) -> Result<&'v str, DispatchError> {
    inputs
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| DispatchError::BadInputs(format!("missing string field: {name}")))
}

fn optional_str<'v>(inputs: &'v Value, name: &str) -> Option<&'v str> {
    inputs.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dispatch_renders_value_and_unit() {
        let run = execute_fixture_case(
            "parse_u16",
            &json!({"text": "64KB", "category": "data-size"}),
        )
        .unwrap();
        assert_eq!(run.output, "64 KB");
        assert_eq!(run.errno, 0);
    }

    #[test]
    fn test_parse_dispatch_renders_clamp() {
        let run = execute_fixture_case("parse_u8", &json!({"text": "256"})).unwrap();
        assert_eq!(run.output, "error: out of range, clamped=255");
        assert_eq!(run.errno, errno::ERANGE);
    }

    #[test]
    fn test_lfind_dispatch() {
        let run = execute_fixture_case(
            "lfind",
            &json!({"table": [[1, 0], [2, 0], [3, 0]], "key": [3, 0]}),
        )
        .unwrap();
        assert_eq!(run.output, "found at=2");

        let run = execute_fixture_case(
            "lfind",
            &json!({"table": [[1, 0]], "key": [9, 9]}),
        )
        .unwrap();
        assert_eq!(run.output, "no match");
    }

    #[test]
    fn test_lsearch_dispatch_appends() {
        let run = execute_fixture_case(
            "lsearch",
            &json!({"table": [[1], [2]], "key": [3]}),
        )
        .unwrap();
        assert_eq!(run.output, "appended count=3");
    }

    #[test]
    fn test_read_delimited_dispatch_sequence() {
        let run = execute_fixture_case(
            "read_delimited",
            &json!({"stream": "abc\ndef", "calls": 3}),
        )
        .unwrap();
        assert_eq!(
            run.output,
            "ok(4) \"abc\\n\" | ok(3) \"def\" | error: end of stream"
        );
        assert_eq!(run.errno, errno::EIO);
    }

    #[test]
    fn test_unknown_function_is_a_dispatch_error() {
        let err = execute_fixture_case("memcpy", &json!({})).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownFunction(_)));
    }
}
