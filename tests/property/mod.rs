//! Property-based tests for registry and wizard invariants

mod registry;
mod wizard;
