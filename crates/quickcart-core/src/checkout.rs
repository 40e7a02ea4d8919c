//! # Checkout
//!
//! Turns a cart into a paid, shipped, inventory-adjusted transaction.
//!
//! ## Checkout Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout State Machine                            │
//! │                                                                         │
//! │  Validating ──► Paying ──► Shipping ──► Reporting ──► Committing ──►    │
//! │      │            │                                       Cleared       │
//! │      │            │                                                     │
//! │      └────────────┴──► Failed (nothing mutated)                         │
//! │                                                                         │
//! │  Validating: cart not empty, lines well-formed, per-product totals      │
//! │              available in live inventory, totals fit in Money           │
//! │  Paying:     customer.deduct_balance(subtotal + shipping fee)           │
//! │  Shipping:   shippable lines → ShippingNotifier                         │
//! │  Reporting:  Receipt → ReceiptPrinter                                   │
//! │  Committing: stock -= cart quantity, per line                           │
//! │  Cleared:    cart emptied                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validating and Paying are the only stages that can fail, and neither
//! mutates anything before failing. Once the balance is deducted the
//! remaining stages always run to completion.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::cart::{amount_out_of_range, ShoppingCart};
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::receipt::{generate_receipt_number, Receipt, ReceiptLine, ReceiptPrinter};
use crate::shipping::{ShipmentNotice, ShippingNotifier};
use crate::types::ProductId;
use crate::validation::{validate_price, validate_quantity, validate_shipping_fee};

/// Flat shipping fee charged on every checkout unless overridden.
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_major(30);

/// The stage a checkout is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Validating,
    Paying,
    Shipping,
    Reporting,
    Committing,
    Cleared,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStage::Validating => "validating",
            CheckoutStage::Paying => "paying",
            CheckoutStage::Shipping => "shipping",
            CheckoutStage::Reporting => "reporting",
            CheckoutStage::Committing => "committing",
            CheckoutStage::Cleared => "cleared",
        };
        f.write_str(name)
    }
}

/// Runs checkouts against a shipping notifier and a receipt printer.
#[derive(Debug)]
pub struct CheckoutProcess<N, P> {
    notifier: N,
    printer: P,
    shipping_fee: Money,
}

impl<N: ShippingNotifier, P: ReceiptPrinter> CheckoutProcess<N, P> {
    /// Creates a checkout charging [`DEFAULT_SHIPPING_FEE`].
    pub fn new(notifier: N, printer: P) -> Self {
        CheckoutProcess {
            notifier,
            printer,
            shipping_fee: DEFAULT_SHIPPING_FEE,
        }
    }

    /// Overrides the flat shipping fee. Negative fees are rejected.
    pub fn with_shipping_fee(mut self, fee: Money) -> CoreResult<Self> {
        validate_shipping_fee(fee)?;
        self.shipping_fee = fee;
        Ok(self)
    }

    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn into_parts(self) -> (N, P) {
        (self.notifier, self.printer)
    }

    /// Checks out `cart` for `customer` at the current time.
    pub fn checkout(
        &mut self,
        inventory: &mut Inventory,
        customer: &mut Customer,
        cart: &mut ShoppingCart,
    ) -> CoreResult<Receipt> {
        self.checkout_at(inventory, customer, cart, Utc::now())
    }

    /// Checks out `cart` for `customer`, judging expiry at `now`.
    ///
    /// ## Errors
    /// - `EmptyCart` if there is nothing to buy
    /// - `Unavailable` / `ProductNotFound` for the first line that cannot be sold
    /// - `Validation` for a line with a bad quantity or price, or a total that overflows
    /// - `InsufficientBalance` if the customer cannot pay subtotal + shipping fee
    ///
    /// On error, cart, balance and stock are exactly as they were.
    pub fn checkout_at(
        &mut self,
        inventory: &mut Inventory,
        customer: &mut Customer,
        cart: &mut ShoppingCart,
        now: DateTime<Utc>,
    ) -> CoreResult<Receipt> {
        let mut stage = CheckoutStage::Validating;
        debug!(%stage, customer = customer.name(), lines = cart.len(), "Checkout started");

        let result = self.run(inventory, customer, cart, now, &mut stage);
        if let Err(e) = &result {
            warn!(%stage, customer = customer.name(), error = %e, "Checkout failed");
        }
        result
    }

    fn run(
        &mut self,
        inventory: &mut Inventory,
        customer: &mut Customer,
        cart: &mut ShoppingCart,
        now: DateTime<Utc>,
        stage: &mut CheckoutStage,
    ) -> CoreResult<Receipt> {
        // Validating
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // Quantities are summed per product so stock is judged against
        // everything the cart will take from it.
        let mut wanted: HashMap<ProductId, i64> = HashMap::new();
        for item in cart.items() {
            validate_quantity(item.quantity)?;
            validate_price(item.unit_price)?;
            let sum = wanted.entry(item.product_id).or_insert(0);
            *sum = sum
                .checked_add(item.quantity)
                .ok_or_else(|| amount_out_of_range("quantity"))?;
        }

        for item in cart.items() {
            let product = inventory.product(&item.product_id)?;
            let requested = wanted.get(&item.product_id).copied().unwrap_or(item.quantity);
            product
                .availability_at(requested, now)
                .map_err(|reason| CoreError::Unavailable {
                    product: product.name.clone(),
                    reason,
                })?;
        }

        let subtotal = cart.subtotal()?;
        let total = subtotal
            .checked_add(self.shipping_fee)
            .ok_or_else(|| amount_out_of_range("total"))?;

        advance(stage, CheckoutStage::Paying);
        customer.deduct_balance(total)?;

        advance(stage, CheckoutStage::Shipping);
        let shippable = cart.shippable_items(inventory);
        let shipment = if shippable.is_empty() {
            None
        } else {
            self.notifier.notify(&shippable);
            Some(ShipmentNotice::new(&shippable))
        };

        advance(stage, CheckoutStage::Reporting);
        let receipt = Receipt {
            receipt_number: generate_receipt_number(now),
            customer: customer.name().to_string(),
            issued_at: now,
            lines: cart.items().iter().map(ReceiptLine::from).collect(),
            subtotal,
            shipping_fee: self.shipping_fee,
            total,
            balance_after: customer.balance(),
            shipment,
        };
        self.printer.print(&receipt);

        advance(stage, CheckoutStage::Committing);
        // Validating checked every positive line quantity, summed per
        // product, against this same stock, so no commit can fail here.
        for item in cart.items() {
            if let Err(e) = inventory.commit_sale(&item.product_id, item.quantity) {
                error!(product_id = %item.product_id, error = %e, "Stock commit failed after payment");
            }
        }

        advance(stage, CheckoutStage::Cleared);
        cart.clear();

        info!(
            receipt = %receipt.receipt_number,
            customer = %receipt.customer,
            subtotal = %receipt.subtotal,
            total = %receipt.total,
            balance = %receipt.balance_after,
            "Checkout completed"
        );
        Ok(receipt)
    }
}

fn advance(stage: &mut CheckoutStage, next: CheckoutStage) {
    debug!(from = %stage, to = %next, "Checkout stage");
    *stage = next;
}
