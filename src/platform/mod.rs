// LeadSift - platform/mod.rs
//
// Platform abstraction layer: configuration files and input file reads.
// Dependencies: standard library, directories, toml.
// Must NOT depend on: core logic, app.

pub mod config;
pub mod fs;
