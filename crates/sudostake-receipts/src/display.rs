//! Text rendering for the CLI

use colored::*;
use sudostake_receipts::{OutcomeDiff, OutcomeInspection, VerificationReport};
use sudostake_types::EventLog;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", key).bright_white(), value.bright_cyan());
}

fn status_badge(status: &str) -> ColoredString {
    match status {
        "success" => "✓ success".bright_green(),
        "failure" => "✗ failure".bright_red(),
        "pending" => "… pending".yellow(),
        other => other.bright_black(),
    }
}

pub fn verification(report: &VerificationReport) {
    section("Outcome Verification");
    println!();
    if report.valid {
        println!("  {} {}", "✓".bright_green(), "Outcome is WELL-FORMED".bright_green().bold());
    } else {
        println!("  {} {}", "✗".bright_red(), "Outcome is MALFORMED".bright_red().bold());
    }
    println!();

    kv("Hash", report.hash.as_deref().unwrap_or("unknown"));
    println!("  {:<18} {}", "Status:".bright_white(), status_badge(&report.status));

    if !report.errors.is_empty() {
        println!();
        println!("  {}", "Errors:".bright_red());
        for error in &report.errors {
            println!("    - {}", error);
        }
    }
    if !report.warnings.is_empty() {
        println!();
        println!("  {}", "Warnings:".yellow());
        for warning in &report.warnings {
            println!("    {} {}", "⚠".yellow(), warning);
        }
    }
}

pub fn inspection(inspection: &OutcomeInspection) {
    section("Transaction Outcome");
    println!();
    kv("Hash", &inspection.hash);
    println!("  {:<18} {}", "Status:".bright_white(), status_badge(&inspection.status));
    if let Some(failure) = &inspection.failure {
        kv("Failure", failure);
    }
    if let Some(signer) = &inspection.signer_id {
        kv("Signer", signer);
    }
    if let Some(receiver) = &inspection.receiver_id {
        kv("Receiver", receiver);
    }
    if !inspection.methods.is_empty() {
        kv("Methods", &inspection.methods.join(", "));
    }
    kv("Gas (tx)", &inspection.gas_burnt.to_string());
    kv("Gas (total)", &inspection.total_gas);
    kv("Tokens burnt", &inspection.total_tokens_burnt_near);
    kv("Receipts", &inspection.receipt_count.to_string());
    kv("Log lines", &inspection.log_count.to_string());
    if !inspection.events.is_empty() {
        kv("Events", &inspection.events.join(", "));
    }
    if let Some(url) = &inspection.explorer_url {
        kv("Explorer", url);
    }
}

pub fn logs(logs: &[&str]) {
    section("Logs");
    if logs.is_empty() {
        println!("  {}", "(no logs emitted)".bright_black());
        return;
    }
    for (i, line) in logs.iter().enumerate() {
        println!("  {} {}", format!("{:>3}.", i + 1).bright_black(), line);
    }
}

pub fn events(events: &[EventLog]) {
    section("Events");
    if events.is_empty() {
        println!("  {}", "(no events)".bright_black());
        return;
    }
    for event in events {
        let standard = match (&event.standard, &event.version) {
            (Some(s), Some(v)) => format!(" [{} {}]", s, v),
            (Some(s), None) => format!(" [{}]", s),
            _ => String::new(),
        };
        println!("  {}{}", event.event.bright_yellow().bold(), standard.bright_black());
        println!("      {}", event.data);
    }
}

pub fn diff(diff: &OutcomeDiff) {
    section("Outcome Diff");
    println!();
    kv("A", &diff.outcome_a_hash);
    kv("B", &diff.outcome_b_hash);
    kv("Logs equal", if diff.logs_equal { "yes" } else { "no" });
    println!();
    if diff.differences.is_empty() {
        println!("  {} {}", "✓".bright_green(), "No differences".bright_green());
        return;
    }
    for field in &diff.differences {
        println!("  {}", field.field.bright_white().bold());
        println!("    {} {}", "-".bright_red(), field.value_a.to_string().bright_red());
        println!("    {} {}", "+".bright_green(), field.value_b.to_string().bright_green());
    }
}
