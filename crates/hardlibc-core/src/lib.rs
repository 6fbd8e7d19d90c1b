//! # hardlibc-core
//!
//! Defensive replacements for unsafe or platform-inconsistent C standard
//! library operations: bounds-checked linear search/insertion, cascading
//! overflow-safe textual-to-numeric conversion with unit-suffix recognition,
//! and overflow-safe growable delimited-line reading.
//!
//! Every operation validates its arguments, detects overflow, and reports
//! failure through a typed result instead of undefined behavior. No `unsafe`
//! code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod errno;
pub mod search;
pub mod stdio;
pub mod stdlib;
