//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sportgear_commerce::checkout::OrderStatus;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a checkout step, e.g. "[Step 1 of 2] Shipping Address".
    pub fn step(&self, label: &str, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}]", label)).dim(), msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Subscriber for the library's `tracing` diagnostics.
///
/// Debug events (search pipeline, checkout transitions) only show with
/// `--verbose`; otherwise warnings and above.
pub fn diagnostics<W>(verbose: bool, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .finish()
}

/// Colored badge for an order status.
pub fn status_badge(status: OrderStatus) -> String {
    let name = status.display_name();
    match status {
        OrderStatus::Delivered => style(name).green().to_string(),
        OrderStatus::Shipping => style(name).cyan().to_string(),
        OrderStatus::Processing => style(name).yellow().to_string(),
    }
}

/// Star bar for a rating, e.g. "★★★★☆ 4.6".
pub fn rating_stars(full: u8, rating: f64) -> String {
    let full = usize::from(full.min(5));
    format!("{}{} {:.1}", "★".repeat(full), "☆".repeat(5 - full), rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportgear_commerce::catalog::Catalog;
    use sportgear_commerce::search::FilterCriteria;
    use std::sync::{Arc, Mutex};

    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn filter_with_diagnostics(verbose: bool) -> String {
        let captured: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let subscriber = diagnostics(verbose, move || CaptureWriter(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            Catalog::seeded().query(&FilterCriteria::new());
        });
        let bytes = captured.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_verbose_diagnostics_show_debug_events() {
        let logs = filter_with_diagnostics(true);
        assert!(logs.contains("catalog filtered"));
        assert!(logs.contains("matched=12"));
    }

    #[test]
    fn test_quiet_diagnostics_hide_debug_events() {
        assert!(!filter_with_diagnostics(false).contains("catalog filtered"));
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(4, 4.6), "★★★★☆ 4.6");
        assert_eq!(rating_stars(9, 5.0), "★★★★★ 5.0");
        assert_eq!(rating_stars(0, 0.0), "☆☆☆☆☆ 0.0");
    }
}
