//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `basic` - Core year-loop mechanics and sign conventions
//! - `linkage` - Derived cash flows, chains and balance links
//! - `simulation_result` - Result structure, serialization and determinism
//! - `builder_dsl` - Builder DSL for fluent request setup
//! - `batch` - Independent requests run together

mod basic;
mod linkage;
