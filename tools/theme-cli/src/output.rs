//! Output formatting for the CLI.
//!
//! Markup and JSON documents go to stdout untouched so they can be piped
//! into files. Status lines go to stdout (info, success) or stderr (warn,
//! error, debug) and are suppressed in JSON mode, except errors.

use console::{style, StyledObject};
use theme_detect::FallbackDecision;

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn status(&self, stream: Stream, symbol: StyledObject<&str>, msg: &str) {
        if self.json {
            return;
        }
        match stream {
            Stream::Stdout => println!("{} {}", symbol, msg),
            Stream::Stderr => eprintln!("{} {}", symbol, msg),
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(Stream::Stdout, style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(Stream::Stdout, style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status(Stream::Stderr, style("⚠").yellow(), msg);
    }

    /// Print an error. In JSON mode this is a `{"error": ...}` object on
    /// stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Verbose-only diagnostics.
    pub fn debug(&self, msg: &str) {
        if !self.verbose {
            return;
        }
        self.status(Stream::Stderr, style("→").dim(), &style(msg).dim().to_string());
    }

    /// Section title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// One `name: value` line of a section.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {:<20} {}", style(format!("{}:", key)).dim(), value);
    }

    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Pretty-printed JSON document on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    /// Rendered markup, printed as-is.
    pub fn raw(&self, content: &str) {
        println!("{}", content);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored label for a decision.
pub fn decision_badge(decision: &FallbackDecision) -> String {
    match decision {
        FallbackDecision::Primary => style("primary").green().bold().to_string(),
        FallbackDecision::Fallback(_) => style("fallback").yellow().bold().to_string(),
    }
}

/// Colored on/off label for a flag.
pub fn flag_badge(enabled: bool) -> String {
    if enabled {
        style("on").green().to_string()
    } else {
        style("off").dim().to_string()
    }
}
