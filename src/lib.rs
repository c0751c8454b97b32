//! aplus: A+ Content Plan Wizard
//!
//! Core of a multi-step wizard that plans marketing "modules" for a book: a module
//! registry with undo, a bonus-aware step state machine with a setup gate, parallel
//! population of module outputs through a text-generation service, and assembly of
//! the final plan.

pub mod cli;
pub mod config;
pub mod error;
pub mod folder;
pub mod index;
pub mod logging;
pub mod module;
pub mod plan;
pub mod population;
pub mod provider;
pub mod schema;
pub mod session;
pub mod wizard;
