//! Output formatting for the CLI.

use console::style;
use kart_commerce::cart::{Cart, CartItem};
use kart_commerce::ports::Notifier;

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
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

    /// Print the cart as a table, or as its stored JSON array in JSON mode.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(cart);
            return;
        }

        self.header("Cart");
        if cart.is_empty() {
            println!("  {}", style("(empty)").dim());
            return;
        }

        let widths = [6, 32, 6, 12];
        self.table_row(&["ID", "PRODUCT", "QTY", "PRICE"], &widths);
        for item in cart {
            let row = cart_row(item);
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &widths);
        }
        println!(
            "\n  {} {}",
            style("Products:").bold(),
            cart.len()
        );
    }
}

/// Routes store notifications to the terminal.
pub struct ConsoleNotifier {
    output: Output,
}

impl ConsoleNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        self.output.error(message);
    }
}

/// Table cells for one cart line. The price is shown as the catalog
/// published it.
fn cart_row(item: &CartItem) -> [String; 4] {
    [
        item.id().to_string(),
        item.product.title.clone(),
        item.amount.to_string(),
        item.product.price.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kart_commerce::catalog::Product;
    use kart_commerce::ProductId;

    #[test]
    fn test_cart_row_shows_price_as_published() {
        let item = CartItem::new(Product::new(ProductId::new(2), "Trail", 139.9, "b.jpg"), 3);
        assert_eq!(
            cart_row(&item),
            [
                "2".to_string(),
                "Trail".to_string(),
                "3".to_string(),
                "139.9".to_string()
            ]
        );
    }
}
