//! Conformance testing harness for hardlibc.
//!
//! This crate provides:
//! - Fixture model: JSON reference cases for the core operations
//! - Dispatch: execute a named core operation from serialized inputs
//! - Runner: compare observed behavior against fixture expectations
//! - Built-in suite: the testable-property cases, embedded
//! - Structured logging: JSONL records for verification runs
//! - Report generation: human-readable conformance reports

#![forbid(unsafe_code)]

pub mod builtin;
pub mod dispatch;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;

pub use dispatch::{CaseRun, execute_fixture_case};
pub use fixtures::{FixtureCase, FixtureSet};
pub use runner::{TestRunner, VerificationResult};
