//! Tests for the interpreter
//!
//! Organized by feature area

mod erase_tests;
mod helpers;
mod query_tests;
