// LeadSift - core/mod.rs
//
// Core business logic layer: record normalisation, dedup, filtering, export.
// Dependencies: serde_json, regex, url, csv, walkdir, glob.
// Must NOT depend on: platform, app.

pub mod coerce;
pub mod contact;
pub mod dedup;
pub mod discovery;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod links;
pub mod model;
pub mod normalize;
