// harmonia-core/src/application/mod.rs

pub mod harmonize;
pub mod pipeline;
pub mod plan;

// --- RE-EXPORTS (FACADE) ---
// The CLI only needs `use harmonia_core::application::{run_harmonization, plan_project};`

pub use harmonize::{Harmonized, harmonize};
pub use pipeline::{RunResult, run_harmonization};
pub use plan::plan_project;
