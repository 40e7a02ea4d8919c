//! # Domain Types
//!
//! Catalog types used throughout QuickCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────┐       │
//! │  │    Product      │        │          ProductKind             │       │
//! │  │  ─────────────  │        │  ──────────────────────────────  │       │
//! │  │  id (UUID)      │ kind ─►│  NonPerishable { shipping }      │       │
//! │  │  name           │        │  Perishable { expires_at,        │       │
//! │  │  price (Money)  │        │               shipping }         │       │
//! │  │  quantity       │        └──────────────────────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────┐       │
//! │  │ ShippingProfile │        │         ShippableItem            │       │
//! │  │  requires_ship  │        │  name, quantity, unit_weight     │       │
//! │  │  weight         │        │  (view handed to the notifier)   │       │
//! │  └─────────────────┘        └──────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Variant-specific behavior (expiry) lives in `match` arms on
//! [`ProductKind`]; everything else is shared on [`Product`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreResult, Unavailability};
use crate::money::Money;
use crate::validation;
use crate::weight::Weight;

// =============================================================================
// Product Identity
// =============================================================================

/// Identifier of a product in an [`Inventory`](crate::Inventory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Whether a product ships physically, and how much one unit weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingProfile {
    pub requires_shipping: bool,
    pub weight: Weight,
}

impl ShippingProfile {
    /// A physically shipped product weighing `weight` per unit.
    pub const fn shipped(weight: Weight) -> Self {
        ShippingProfile {
            requires_shipping: true,
            weight,
        }
    }

    /// A product delivered without shipping (vouchers, scratch cards).
    pub const fn not_shipped() -> Self {
        ShippingProfile {
            requires_shipping: false,
            weight: Weight::zero(),
        }
    }
}

/// One cart line as seen by the shipping notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippableItem {
    pub name: String,
    pub quantity: i64,
    pub unit_weight: Weight,
}

impl ShippableItem {
    /// Weight of the whole line (unit weight × quantity).
    pub fn weight(&self) -> Weight {
        self.unit_weight * self.quantity.max(0) as u64
    }
}

// =============================================================================
// Product
// =============================================================================

/// The product variants the catalog knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    NonPerishable {
        shipping: ShippingProfile,
    },
    /// Sellable up to and including `expires_at`.
    Perishable {
        expires_at: DateTime<Utc>,
        shipping: ShippingProfile,
    },
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display name shown on the receipt and shipment notice.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Units in stock. Only checkout decrements it.
    pub quantity: i64,

    pub kind: ProductKind,
}

impl Product {
    /// Creates a product that never expires.
    pub fn non_perishable(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        shipping: ShippingProfile,
    ) -> Self {
        Product {
            id: ProductId::generate(),
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::NonPerishable { shipping },
        }
    }

    /// Creates a product that stops being sellable after `expires_at`.
    pub fn perishable(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        expires_at: DateTime<Utc>,
        shipping: ShippingProfile,
    ) -> Self {
        Product {
            id: ProductId::generate(),
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Perishable {
                expires_at,
                shipping,
            },
        }
    }

    /// Checks name, price and stock.
    pub fn validate(&self) -> CoreResult<()> {
        validation::validate_product_name(&self.name)?;
        validation::validate_price(self.price)?;
        validation::validate_stock(self.quantity)?;
        Ok(())
    }

    /// Returns the expiry date for perishable products.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ProductKind::NonPerishable { .. } => None,
            ProductKind::Perishable { expires_at, .. } => Some(expires_at),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| now > expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Availability check that reports the reason on failure.
    ///
    /// Stock is checked first, so a product that is both sold out and
    /// expired reports `OutOfStock`.
    pub fn availability_at(
        &self,
        requested: i64,
        now: DateTime<Utc>,
    ) -> Result<(), Unavailability> {
        if self.quantity < requested {
            return Err(Unavailability::OutOfStock {
                available: self.quantity,
                requested,
            });
        }

        match self.kind {
            ProductKind::Perishable { expires_at, .. } if now > expires_at => {
                Err(Unavailability::Expired { expired_at: expires_at })
            }
            _ => Ok(()),
        }
    }

    /// True iff `quantity >= requested` and the product has not expired.
    pub fn is_available_at(&self, requested: i64, now: DateTime<Utc>) -> bool {
        self.availability_at(requested, now).is_ok()
    }

    pub fn is_available(&self, requested: i64) -> bool {
        self.is_available_at(requested, Utc::now())
    }

    pub fn shipping(&self) -> &ShippingProfile {
        match &self.kind {
            ProductKind::NonPerishable { shipping } => shipping,
            ProductKind::Perishable { shipping, .. } => shipping,
        }
    }

    pub fn requires_shipping(&self) -> bool {
        self.shipping().requires_shipping
    }

    /// Weight of one unit.
    pub fn weight(&self) -> Weight {
        self.shipping().weight
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
