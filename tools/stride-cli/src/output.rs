//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use stride_cart::{Notification, NotificationLevel};
use stride_commerce::Cart;

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

    /// Print a shopper notification with its level's marker.
    pub fn notification(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Info => self.info(&notification.message),
            NotificationLevel::Warning => self.warn(&notification.message),
            NotificationLevel::Error => self.error(&notification.message),
        }
    }

    /// Print the cart as a table.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            return;
        }
        if cart.is_empty() {
            self.info("Cart is empty");
            return;
        }

        let widths = [6, 32, 6, 10];
        self.table_row(&["ID", "PRODUCT", "QTY", "SUBTOTAL"], &widths);
        for item in cart {
            let id = item.id.to_string();
            let amount = item.amount.to_string();
            let subtotal = item
                .price()
                .map(|price| format_price(price * item.amount as f64))
                .unwrap_or_else(|| "-".to_string());
            self.table_row(
                &[
                    id.as_str(),
                    item.title().unwrap_or("-"),
                    amount.as_str(),
                    subtotal.as_str(),
                ],
                &widths,
            );
        }

        let total: f64 = cart
            .iter()
            .filter_map(|item| item.price().map(|price| price * item.amount as f64))
            .sum();
        println!();
        self.kv("items", &cart.item_count().to_string());
        self.kv("total", &format_price(total));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format an amount of money with two decimals.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}
