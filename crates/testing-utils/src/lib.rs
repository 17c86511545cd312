//! Fixture helpers shared by the analyzer test suites.

pub mod assert;
pub mod marked;

pub use assert::{assert_no_references, assert_references};
pub use marked::{dedent, render, ExpectedRange, MarkedSource};
