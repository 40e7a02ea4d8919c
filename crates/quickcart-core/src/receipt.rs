//! # Receipt
//!
//! The record of a successful checkout and the printers that render it.
//!
//! ## Receipt Layout (text)
//! ```text
//! ** Checkout receipt **
//! 2x Cheese	$200.00
//! 1x Biscuits	$150.00
//! ----------------------
//! Subtotal	$350.00
//! Shipping	$30.00
//! Amount	$380.00
//! Customer balance after payment: $120.00
//! END.
//! ```

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cart::CartItem;
use crate::money::Money;
use crate::shipping::ShipmentNotice;

/// One printed line of the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartItem> for ReceiptLine {
    fn from(item: &CartItem) -> Self {
        ReceiptLine {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

/// A paid checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub customer: String,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
    pub balance_after: Money,
    /// Present when at least one line was handed to shipping.
    pub shipment: Option<ShipmentNotice>,
}

impl Receipt {
    /// Writes the text layout shown in the module docs, plus a trailing blank line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(out, "{}x {}\t{}", line.quantity, line.name, line.line_total)?;
        }
        writeln!(out, "----------------------")?;
        writeln!(out, "Subtotal\t{}", self.subtotal)?;
        writeln!(out, "Shipping\t{}", self.shipping_fee)?;
        writeln!(out, "Amount\t{}", self.total)?;
        writeln!(out, "Customer balance after payment: {}", self.balance_after)?;
        writeln!(out, "END.")?;
        writeln!(out)
    }
}

/// Generates a receipt number of the form `YYMMDD-HHMMSS-NNNN`.
pub fn generate_receipt_number(at: DateTime<Utc>) -> String {
    let suffix = at.timestamp_subsec_nanos() % 10_000;
    format!("{}-{:04}", at.format("%y%m%d-%H%M%S"), suffix)
}

// =============================================================================
// Printers
// =============================================================================

/// Emits the receipt of a successful checkout.
///
/// Like [`ShippingNotifier`](crate::ShippingNotifier), printing happens after
/// payment and must not fail the checkout.
pub trait ReceiptPrinter {
    fn print(&mut self, receipt: &Receipt);
}

/// Prints the text layout.
#[derive(Debug)]
pub struct TextReceiptPrinter<W: Write> {
    out: W,
}

impl<W: Write> TextReceiptPrinter<W> {
    pub fn new(out: W) -> Self {
        TextReceiptPrinter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextReceiptPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReceiptPrinter for TextReceiptPrinter<W> {
    fn print(&mut self, receipt: &Receipt) {
        if let Err(e) = receipt.write_to(&mut self.out) {
            warn!(receipt = %receipt.receipt_number, error = %e, "Failed to print receipt");
        }
    }
}

/// Prints each receipt as one JSON document per line.
#[derive(Debug)]
pub struct JsonReceiptPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonReceiptPrinter<W> {
    pub fn new(out: W) -> Self {
        JsonReceiptPrinter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonReceiptPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReceiptPrinter for JsonReceiptPrinter<W> {
    fn print(&mut self, receipt: &Receipt) {
        let result = serde_json::to_writer(&mut self.out, receipt)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));

        if let Err(e) = result {
            warn!(receipt = %receipt.receipt_number, error = %e, "Failed to print receipt");
        }
    }
}

/// Lets a `&mut` printer be lent to a checkout without giving it away.
impl<P: ReceiptPrinter + ?Sized> ReceiptPrinter for &mut P {
    fn print(&mut self, receipt: &Receipt) {
        (**self).print(receipt)
    }
}

impl<P: ReceiptPrinter + ?Sized> ReceiptPrinter for Box<P> {
    fn print(&mut self, receipt: &Receipt) {
        (**self).print(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receipt() -> Receipt {
        Receipt {
            receipt_number: "250601-090000-0000".to_string(),
            customer: "John Doe".to_string(),
            issued_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            lines: vec![
                ReceiptLine {
                    name: "Cheese".to_string(),
                    quantity: 2,
                    unit_price: Money::from_major(100),
                    line_total: Money::from_major(200),
                },
                ReceiptLine {
                    name: "Biscuits".to_string(),
                    quantity: 1,
                    unit_price: Money::from_major(150),
                    line_total: Money::from_major(150),
                },
            ],
            subtotal: Money::from_major(350),
            shipping_fee: Money::from_major(30),
            total: Money::from_major(380),
            balance_after: Money::from_major(120),
            shipment: None,
        }
    }

    #[test]
    fn test_text_receipt_layout() {
        let mut printer = TextReceiptPrinter::new(Vec::new());
        printer.print(&receipt());

        let output = String::from_utf8(printer.into_inner()).unwrap();
        let expected = [
            "** Checkout receipt **",
            "2x Cheese\t$200.00",
            "1x Biscuits\t$150.00",
            "----------------------",
            "Subtotal\t$350.00",
            "Shipping\t$30.00",
            "Amount\t$380.00",
            "Customer balance after payment: $120.00",
            "END.",
            "",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_json_receipt() {
        let mut printer = JsonReceiptPrinter::new(Vec::new());
        printer.print(&receipt());

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["customer"], "John Doe");
        assert_eq!(value["total"], 38000);
        assert_eq!(value["balanceAfter"], 12000);
        assert_eq!(value["lines"][0]["lineTotal"], 20000);
        assert!(value["shipment"].is_null());

        let parsed: Receipt = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(parsed, receipt());
    }

    #[test]
    fn test_receipt_number_format() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 5).unwrap();
        assert_eq!(generate_receipt_number(at), "250601-093005-0000");
    }
}
