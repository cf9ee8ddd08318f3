//! Property test suite entry point.

#[path = "../common/mod.rs"]
mod common;
mod cooldown_invariants;
mod kit_invariants;
