// LeadSift - app/mod.rs
//
// Application layer: orchestrates one normalisation run.
// Dependencies: core layer, platform layer.

pub mod pipeline;
