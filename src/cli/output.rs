//! Output formatting for mgnctl.
//!
//! Provides colored human output, JSON mode for scripting, and the terminal
//! progress sink backed by indicatif.

use std::io::{self, Write};
use std::sync::Arc;

use is_terminal::IsTerminal;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use mgnctl::progress::{NullSink, ProgressRecord, ProgressSink, RecordKind};

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    /// Whether JSON mode is active
    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    /// Print an informational message (suppressed in JSON mode)
    pub fn info(&self, message: &str) {
        if self.json_mode {
            return;
        }
        if self.use_color {
            println!("{}", message.bright_white());
        } else {
            println!("{message}");
        }
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "Warning:".yellow().bold(), message);
        } else {
            eprintln!("Warning: {message}");
        }
    }

    /// Print an error to stderr
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "Error:".red().bold(), message);
        } else {
            eprintln!("Error: {message}");
        }
    }

    /// Print a debug message when verbose enough
    pub fn debug(&self, message: &str) {
        if self.json_mode || self.verbosity < 2 {
            return;
        }
        if self.use_color {
            eprintln!("{} {}", "Debug:".bright_black(), message.bright_black());
        } else {
            eprintln!("Debug: {message}");
        }
    }

    /// Render a projected operation result to stdout.
    pub fn result(&self, value: &Value) {
        if self.json_mode {
            match serde_json::to_string_pretty(value) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => self.error(&format!("failed to serialize result: {e}")),
            }
            return;
        }
        self.render_human(value, 0);
        let _ = io::stdout().flush();
    }

    /// Builds the progress sink for long calls. Records go to stderr so
    /// piped stdout stays clean; anything non-interactive gets the null
    /// sink instead.
    pub fn progress_sink(&self, enabled: bool) -> Arc<dyn ProgressSink> {
        if enabled && !self.json_mode && io::stderr().is_terminal() {
            Arc::new(TerminalSink::new())
        } else {
            Arc::new(NullSink)
        }
    }

    fn render_human(&self, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Null => println!("{pad}(none)"),
            Value::Array(items) if items.is_empty() => println!("{pad}(no results)"),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    self.render_human(item, indent);
                }
            }
            Value::Object(map) => {
                for (key, field) in map {
                    match field {
                        Value::Object(_) | Value::Array(_) => {
                            self.print_key(&pad, key, "");
                            self.render_human(field, indent + 1);
                        }
                        Value::Null => self.print_key(&pad, key, "-"),
                        Value::String(s) => self.print_key(&pad, key, s),
                        other => self.print_key(&pad, key, &other.to_string()),
                    }
                }
            }
            Value::String(s) => println!("{pad}{s}"),
            other => println!("{pad}{other}"),
        }
    }

    fn print_key(&self, pad: &str, key: &str, value: &str) {
        if self.use_color {
            println!("{pad}{}: {value}", key.cyan());
        } else {
            println!("{pad}{key}: {value}");
        }
    }
}

/// Progress sink that drives an indicatif spinner on stderr.
pub struct TerminalSink {
    bar: ProgressBar,
}

impl TerminalSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalSink {
    fn write_progress(&self, record: &ProgressRecord) {
        match record.kind {
            RecordKind::Processing => {
                self.bar
                    .set_message(format!("{} ({}%)", record.activity, record.percent));
                self.bar.tick();
            }
            RecordKind::Completed => {
                self.bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formatter_modes() {
        let human = OutputFormatter::new(false, false, 0);
        assert!(!human.is_json());

        let json = OutputFormatter::new(true, true, 0);
        assert!(json.is_json());
    }

    #[test]
    fn rendering_does_not_panic_on_nested_values() {
        let formatter = OutputFormatter::new(false, false, 0);
        formatter.result(&json!({
            "items": [
                {"source_server_id": "s-1", "tags": {"env": "prod"}, "arn": null},
                {"source_server_id": "s-2", "participating": []}
            ],
            "next_token": null
        }));
        formatter.result(&Value::Null);
    }
}
