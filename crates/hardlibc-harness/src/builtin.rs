//! Built-in conformance suite.
//!
//! The testable-property cases, embedded so the harness verifies a build
//! without any fixture files on disk.

use serde_json::json;

use crate::fixtures::{FixtureCase, FixtureSet};

fn case(
    name: &str,
    function: &str,
    spec_section: &str,
    inputs: serde_json::Value,
    expected_output: &str,
    expected_errno: i32,
) -> FixtureCase {
    FixtureCase {
        name: name.to_string(),
        function: function.to_string(),
        spec_section: spec_section.to_string(),
        inputs,
        expected_output: expected_output.to_string(),
        expected_errno,
    }
}

/// The embedded fixture sets, one per operation family.
pub fn builtin_suites() -> Vec<FixtureSet> {
    vec![parse_suite(), search_suite(), getdelim_suite()]
}

fn parse_suite() -> FixtureSet {
    FixtureSet {
        version: "v1".to_string(),
        family: "stdlib/parse".to_string(),
        cases: vec![
            case(
                "decimal_26",
                "parse_u32",
                "parser/base-selection",
                json!({"text": "26"}),
                "26",
                0,
            ),
            case(
                "hex_prefix_26",
                "parse_u32",
                "parser/base-selection",
                json!({"text": "0x1A"}),
                "26",
                0,
            ),
            case(
                "hex_marker_26",
                "parse_u32",
                "parser/base-selection",
                json!({"text": "1Ah"}),
                "26",
                0,
            ),
            case(
                "nothing_consumed",
                "parse_u32",
                "parser/failure",
                json!({"text": "x1A"}),
                "error: not numeric",
                22,
            ),
            case(
                "unsigned_rejects_minus",
                "parse_u32",
                "parser/sign-policy",
                json!({"text": "-1"}),
                "error: not numeric",
                22,
            ),
            case(
                "datasize_unit",
                "parse_u16",
                "parser/units",
                json!({"text": "64KB", "category": "data-size"}),
                "64 KB",
                0,
            ),
            case(
                "datasize_bad_unit",
                "parse_u16",
                "parser/units",
                json!({"text": "64XB", "category": "data-size"}),
                "error: unknown unit",
                22,
            ),
            case(
                "time_hours_not_hex",
                "parse_u32",
                "parser/unit-vs-hex",
                json!({"text": "3h", "category": "time"}),
                "3 h",
                0,
            ),
            case(
                "temperature_c_not_hex",
                "parse_u32",
                "parser/unit-vs-hex",
                json!({"text": "30c", "category": "temperature"}),
                "30 c",
                0,
            ),
            case(
                "u8_max_exact",
                "parse_u8",
                "parser/cascade",
                json!({"text": "255"}),
                "255",
                0,
            ),
            case(
                "u8_clamp_on_overflow",
                "parse_u8",
                "parser/cascade",
                json!({"text": "256"}),
                "error: out of range, clamped=255",
                34,
            ),
            case(
                "i8_min_exact",
                "parse_i8",
                "parser/cascade",
                json!({"text": "-128"}),
                "-128",
                0,
            ),
            case(
                "i8_clamp_on_underflow",
                "parse_i8",
                "parser/cascade",
                json!({"text": "-129"}),
                "error: out of range, clamped=-128",
                34,
            ),
            case(
                "u64_max_exact",
                "parse_u64",
                "parser/wide-engine",
                json!({"text": "18446744073709551615"}),
                "18446744073709551615",
                0,
            ),
            case(
                "u64_clamp_on_overflow",
                "parse_u64",
                "parser/wide-engine",
                json!({"text": "18446744073709551616"}),
                "error: out of range, clamped=18446744073709551615",
                34,
            ),
            case(
                "float_time_unit",
                "parse_f64",
                "parser/floats",
                json!({"text": "1.5s", "category": "time"}),
                "1.5 s",
                0,
            ),
            case(
                "float_overflow",
                "parse_f64",
                "parser/floats",
                json!({"text": "1e999"}),
                "error: out of range, clamped=inf",
                34,
            ),
        ],
    }
}

fn search_suite() -> FixtureSet {
    FixtureSet {
        version: "v1".to_string(),
        family: "search".to_string(),
        cases: vec![
            case(
                "lfind_first_match",
                "lfind",
                "search/scan-order",
                json!({"table": [[1], [2], [2]], "key": [2]}),
                "found at=1",
                0,
            ),
            case(
                "lfind_miss_is_not_an_error",
                "lfind",
                "search/no-match",
                json!({"table": [[1]], "key": [9]}),
                "no match",
                0,
            ),
            case(
                "lfind_empty_table_trivial",
                "lfind",
                "search/empty-table",
                json!({"table": [], "key": []}),
                "no match",
                0,
            ),
            case(
                "lsearch_appends_on_miss",
                "lsearch",
                "search/insert",
                json!({"table": [[1], [2]], "key": [3]}),
                "appended count=3",
                0,
            ),
            case(
                "lsearch_hit_keeps_count",
                "lsearch",
                "search/insert",
                json!({"table": [[1], [2]], "key": [2]}),
                "found count=2",
                0,
            ),
        ],
    }
}

fn getdelim_suite() -> FixtureSet {
    FixtureSet {
        version: "v1".to_string(),
        family: "stdio/getdelim".to_string(),
        cases: vec![
            case(
                "delimiter_then_fragment_then_eof",
                "read_delimited",
                "reader/call-sequence",
                json!({"stream": "abc\ndef", "calls": 3}),
                "ok(4) \"abc\\n\" | ok(3) \"def\" | error: end of stream",
                5,
            ),
            case(
                "delimiter_only_line",
                "read_delimited",
                "reader/edge-cases",
                json!({"stream": "\nrest"}),
                "ok(1) \"\\n\"",
                0,
            ),
        ],
    }
}
