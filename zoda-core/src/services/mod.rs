// ========================================================
// File: zoda-core/src/services/mod.rs
// ========================================================
// Orchestration layers over the provider and storage clients.

pub mod generation;

pub use generation::GenerationPipeline;
