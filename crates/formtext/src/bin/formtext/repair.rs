//! `formtext repair`.

use std::path::Path;

use formtext::ids::RandomIds;
use formtext::repair::{repair, RepairReport};
use formtext::template::strip_instructions;

use crate::files::{read_input, write_output};
use crate::style;

pub fn run_repair(name: &str, input: Option<&Path>, output: Option<&Path>) -> anyhow::Result<()> {
    let candidate = read_input(input)?;
    let repaired = repair(strip_instructions(&candidate), name, &mut RandomIds)?;
    write_output(output, &repaired.text)?;
    print_report(name, &repaired.report);
    Ok(())
}

/// Summarizes a repair on stderr.
pub fn print_report(name: &str, report: &RepairReport) {
    eprintln!(
        "{} {} ({} controls, {} identifiers replaced)",
        style::success("Repaired"),
        style::accent(name),
        report.control_names.len(),
        report.identifiers_replaced
    );
    if !report.namemap_written() {
        eprintln!(
            "{}",
            style::warning("Warning: no NameMap block and no `Begin Form` line; NameMap not written")
        );
    }
    if !report.diagnostics.is_empty() {
        eprintln!(
            "{}",
            style::warning(format!(
                "Warning: {} structural problem(s) in the input (run `formtext check` for details)",
                report.diagnostics.len()
            ))
        );
    }
}
