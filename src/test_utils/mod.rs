//! Shared test utilities for autokit and the hosts embedding it.

pub mod fixtures;
pub mod harness;
pub mod logging;

use std::fmt::Debug;

use tracing::debug;

pub use harness::{KitHarness, Step};

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven tests, stopping at the first mismatch.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, mut test_fn: F) -> Result<(), String>
where
    I: Debug,
    E: Debug + PartialEq,
    F: FnMut(I) -> E,
{
    for case in cases {
        debug!(name = case.name, input = ?case.input, "running table case");
        let actual = test_fn(case.input);
        if actual != case.expected {
            return Err(format!(
                "Test '{}' failed: expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
    }
    Ok(())
}
