//! Output formatting utilities

use console::{style, Style};
use serde::Serialize;
use shipwright_core::{StageReport, StepStatus};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Print any serializable result as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per step, e.g. `  ✓ npm install`
pub fn step_line(name: &str, status: StepStatus, detail: Option<&str>) -> String {
    let marker = match status {
        StepStatus::Succeeded => style("✓").green().bold(),
        StepStatus::Skipped => style("-").yellow().bold(),
        StepStatus::Failed => style("✗").red().bold(),
    };
    match detail {
        Some(detail) => format!("  {} {} {}", marker, name, style(format!("({})", detail)).dim()),
        None => format!("  {} {}", marker, name),
    }
}

/// Print a stage report in text form
pub fn print_report(report: &StageReport) {
    println!();
    println!("{}", header(&format!("{} {}", report.stage, report.subject)));
    for step in &report.steps {
        println!("{}", step_line(&step.name, step.status, step.detail.as_deref()));
    }
    println!();

    if let Some(ref message) = report.error {
        error(message);
    } else if report.success {
        success(&format!("{} completed in {}ms", report.stage, report.duration_ms));
    } else {
        error(&format!("{} failed", report.stage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_line() {
        console::set_colors_enabled(false);
        assert_eq!(
            step_line("npm install", StepStatus::Succeeded, None),
            "  ✓ npm install"
        );
        assert_eq!(
            step_line("database", StepStatus::Skipped, Some("no schema migrations defined")),
            "  - database (no schema migrations defined)"
        );
    }
}
