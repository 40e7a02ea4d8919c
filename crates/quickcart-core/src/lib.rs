//! # quickcart-core: Checkout Domain for QuickCart
//!
//! Products, carts, customers and the checkout sequence that ties them
//! together. Output goes through two small collaborator traits, so the crate
//! itself never decides where receipts or shipment notices end up.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickCart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quickcart CLI (apps/quickcart-cli)           │   │
//! │  │    config ──► scenarios ──► CheckoutProcess ──► stdout/stderr  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quickcart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ inventory │  │   cart    │  │ customer  │  │   │
//! │  │   │  Product  │  │ id → stock│  │ CartItem  │  │  balance  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │ checkout  │─►│ shipping  │  │  receipt  │                  │   │
//! │  │   │  stages   │─►│ Notifier  │  │  Printer  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product variants, ids and shipping profiles
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`weight`] - Shipping weight in grams
//! - [`inventory`] - Live stock table keyed by product id
//! - [`cart`] - Shopping cart with snapshot line items
//! - [`customer`] - Customer account and balance
//! - [`shipping`] - Shipping collaborator and shipment notices
//! - [`receipt`] - Receipt record and printers
//! - [`checkout`] - The checkout sequence
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use quickcart_core::money::Money;
//! use quickcart_core::{
//!     CheckoutProcess, Customer, Inventory, Product, ShippingProfile, ShoppingCart,
//!     TextReceiptPrinter, TextShippingNotifier, Weight,
//! };
//!
//! let mut inventory = Inventory::new();
//! let tv = inventory
//!     .add(Product::non_perishable(
//!         "TV",
//!         Money::from_major(10000),
//!         3,
//!         ShippingProfile::shipped(Weight::from_kg(15.5)),
//!     ))
//!     .unwrap();
//!
//! let mut customer = Customer::new("John Doe", Money::from_major(20000)).unwrap();
//! let mut cart = ShoppingCart::new();
//! cart.add(&inventory, tv, 1).unwrap();
//!
//! let mut checkout = CheckoutProcess::new(
//!     TextShippingNotifier::new(Vec::new()),
//!     TextReceiptPrinter::new(Vec::new()),
//! );
//! let receipt = checkout.checkout(&mut inventory, &mut customer, &mut cart).unwrap();
//!
//! assert_eq!(receipt.total, Money::from_major(10030));
//! assert_eq!(inventory.quantity_of(&tv), Some(2));
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod money;
pub mod receipt;
pub mod shipping;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartItem, ShoppingCart};
pub use checkout::{CheckoutProcess, CheckoutStage, DEFAULT_SHIPPING_FEE};
pub use customer::Customer;
pub use error::{CoreError, CoreResult, Unavailability, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use receipt::{JsonReceiptPrinter, Receipt, ReceiptLine, ReceiptPrinter, TextReceiptPrinter};
pub use shipping::{ShipmentNotice, ShippingNotifier, TextShippingNotifier};
pub use types::*;
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in a cart.
///
/// Catches typos such as 1000 instead of 10 before they reach the stock check.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a product may carry ($10,000,000.00).
///
/// With at most 100 lines of 999 units each, a cart subtotal stays far below
/// `i64::MAX` cents.
pub const MAX_PRICE: Money = Money::from_major(10_000_000);
