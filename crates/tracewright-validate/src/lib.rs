//! # tracewright-validate
//!
//! Validator (spec.md §4.C5) and Refactor Loop (§4.C6).

pub mod refactor;
pub mod validator;

pub use validator::validate;
