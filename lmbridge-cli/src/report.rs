//! Terminal output helpers shared by the commands

use chrono::Local;
use lmbridge_core::ProbeError;

const RULE_WIDTH: usize = 50;

pub fn banner(title: &str) {
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Started {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
}

pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(title.chars().count()));
}

/// Failure line plus the category's operator hint
pub fn probe_failure(subject: &str, error: &ProbeError) {
    println!("  ✗ {subject}: {error} ({})", error.kind());
    println!("    {}", error.kind().operator_hint());
}

pub fn open_label(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}
