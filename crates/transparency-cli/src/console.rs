//! CLI console utilities

use colored::*;

/// Formatted terminal output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Print captured sandbox log lines, only in verbose mode
    pub fn print_logs(&self, label: &str, logs: &[String]) {
        for line in self.log_lines(label, logs) {
            println!("{}", line.dimmed());
        }
    }

    fn log_lines(&self, label: &str, logs: &[String]) -> Vec<String> {
        if !self.verbose || logs.is_empty() {
            return Vec::new();
        }
        std::iter::once(format!("  {} logs:", label))
            .chain(logs.iter().map(|line| format!("    {}", line)))
            .collect()
    }

    /// Print a rendered report verbatim
    pub fn print_report(&self, report: &str) {
        println!("{}", report);
    }
}
