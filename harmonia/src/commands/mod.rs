// harmonia/src/commands/mod.rs

pub mod plan;
pub mod run;

use harmonia_core::domain::harmonization::{HarmonizationReport, Severity};

/// Findings summary shared by `run` and `plan`.
pub(crate) fn print_findings(report: &HarmonizationReport) {
    let mut any = false;
    for (table, finding) in report.findings() {
        any = true;
        match finding.severity() {
            Severity::Warning => println!("   ⚠️  [{}] {}", table, finding),
            Severity::Info => println!("   ℹ️  [{}] {}", table, finding),
        }
    }
    if !any {
        println!("   ✅ Every canonical field was matched in every table.");
    }
}
