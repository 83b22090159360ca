//! Unit tests for the draft module.
//!
//! Tests are organised by domain concept, covering happy paths, error cases,
//! and edge cases for the public APIs.

mod range_tests;
