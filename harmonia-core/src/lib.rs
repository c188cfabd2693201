// harmonia-core/src/lib.rs

// 1. Memory safety
#![deny(unsafe_code)]
// 2. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 3. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The table contract the harmonizer drives (rename, add, project, union).
pub mod ports;

// 2. Domain (business core)
// Mapping rules, matcher, per-table planning and the harmonizer.
// Depends only on the ports.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML configuration, source discovery, DataFusion table adapter.
pub mod infrastructure;

// 4. Application (Use Cases)
// The fold over source tables, dry-run planning, the async pipeline.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::HarmoniaError;
