//! # Shipping
//!
//! The shipping collaborator checkout hands physically shipped lines to.
//!
//! ```text
//! ** Shipment notice **
//! 2x Cheese	800g
//! 1x Biscuits	700g
//! Total package weight 1.5kg
//! ```

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::ShippableItem;
use crate::weight::Weight;

/// Receives the lines that need shipping after a successful payment.
///
/// Implementations must not fail the checkout: payment has already been
/// taken by the time `notify` runs.
pub trait ShippingNotifier {
    fn notify(&mut self, items: &[ShippableItem]);
}

/// Summary of one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentNotice {
    pub items: Vec<ShippableItem>,
    pub total_weight: Weight,
}

impl ShipmentNotice {
    pub fn new(items: &[ShippableItem]) -> Self {
        ShipmentNotice {
            items: items.to_vec(),
            total_weight: items.iter().map(ShippableItem::weight).sum(),
        }
    }

    /// Writes the human-readable notice, followed by a blank line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "** Shipment notice **")?;
        for item in &self.items {
            writeln!(out, "{}x {}\t{}", item.quantity, item.name, item.weight())?;
        }
        writeln!(out, "Total package weight {}", self.total_weight)?;
        writeln!(out)
    }
}

/// Writes shipment notices as plain text.
#[derive(Debug)]
pub struct TextShippingNotifier<W: Write> {
    out: W,
}

impl<W: Write> TextShippingNotifier<W> {
    pub fn new(out: W) -> Self {
        TextShippingNotifier { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextShippingNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ShippingNotifier for TextShippingNotifier<W> {
    fn notify(&mut self, items: &[ShippableItem]) {
        if items.is_empty() {
            return;
        }

        let notice = ShipmentNotice::new(items);
        if let Err(e) = notice.write_to(&mut self.out) {
            warn!(error = %e, "Failed to write shipment notice");
        }
    }
}

/// Lets a `&mut` notifier be lent to a checkout without giving it away.
impl<N: ShippingNotifier + ?Sized> ShippingNotifier for &mut N {
    fn notify(&mut self, items: &[ShippableItem]) {
        (**self).notify(items)
    }
}

impl<N: ShippingNotifier + ?Sized> ShippingNotifier for Box<N> {
    fn notify(&mut self, items: &[ShippableItem]) {
        (**self).notify(items)
    }
}
