//! # Shopping Cart
//!
//! The ordered list of products a customer intends to buy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                    Cart method              Cart change         │
//! │  ──────                    ───────────              ───────────         │
//! │                                                                         │
//! │  Pick product ───────────► add() ─────────────────► push or qty += n   │
//! │                                                                         │
//! │  Checkout totals ────────► subtotal() ────────────► (read only)        │
//! │                                                                         │
//! │  Shipping ───────────────► shippable_items() ─────► (read only)        │
//! │                                                                         │
//! │  Checkout done ──────────► clear() ───────────────► items.clear()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{Product, ProductId, ShippableItem};
use crate::validation::validate_quantity;
use crate::MAX_CART_ITEMS;

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: looked up in the [`Inventory`] for stock, expiry and shipping
/// - `name` / `unit_price`: frozen copy taken when the line was created, so
///   the receipt shows what the customer saw when adding the item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price at time of adding (frozen)
    pub unit_price: Money,

    /// Quantity in cart, always > 0
    pub quantity: i64,

    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn from_product(product: &Product, quantity: i64, added_at: DateTime<Utc>) -> Self {
        CartItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            added_at,
        }
    }

    /// Unit price × quantity.
    ///
    /// Lines accepted by [`ShoppingCart::add`] carry a bounded price and
    /// quantity, so this cannot overflow for them.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// [`line_total`](Self::line_total) that fails instead of overflowing.
    pub fn checked_line_total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| amount_out_of_range("line total"))
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Insertion order is preserved; the receipt prints lines in this order
/// - Maximum lines: [`MAX_CART_ITEMS`]
///
/// Only [`add`](Self::add) puts lines in, so the cart is serializable but not
/// deserializable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCart {
    items: Vec<CartItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        ShoppingCart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    pub fn add(
        &mut self,
        inventory: &Inventory,
        product_id: ProductId,
        quantity: i64,
    ) -> CoreResult<()> {
        self.add_at(inventory, product_id, quantity, Utc::now())
    }

    /// [`add`](Self::add) with an explicit clock, for expiry checks.
    ///
    /// ## Behavior
    /// - The quantity must be positive and within `MAX_ITEM_QUANTITY`
    /// - Availability is checked for the cart's cumulative quantity of the
    ///   product, so two adds can never jointly reserve more than is in stock
    /// - On any error the cart is left unchanged
    pub fn add_at(
        &mut self,
        inventory: &Inventory,
        product_id: ProductId,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let product = inventory.product(&product_id)?;

        let position = self.items.iter().position(|i| i.product_id == product_id);
        let already_in_cart = position.map_or(0, |p| self.items[p].quantity);
        let wanted = already_in_cart + quantity;
        validate_quantity(wanted)?;

        if position.is_none() && self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        product
            .availability_at(wanted, now)
            .map_err(|reason| CoreError::Unavailable {
                product: product.name.clone(),
                reason,
            })?;

        match position {
            Some(p) => self.items[p].quantity = wanted,
            None => self
                .items
                .push(CartItem::from_product(product, quantity, now)),
        }

        debug!(product = %product.name, quantity = wanted, "Cart updated");
        Ok(())
    }

    /// Empties the cart. The cart stays usable.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of all line totals. Fails with `Validation(OutOfRange)` on overflow.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.checked_line_total()?)
                .ok_or_else(|| amount_out_of_range("subtotal"))
        })
    }

    /// Appends a line without any of the checks `add` makes.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Lines whose product requires shipping, in cart order.
    ///
    /// Lines whose product is no longer in the inventory are skipped.
    pub fn shippable_items(&self, inventory: &Inventory) -> Vec<ShippableItem> {
        self.items
            .iter()
            .filter_map(|item| {
                let product = inventory.get(&item.product_id)?;
                product.requires_shipping().then(|| ShippableItem {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_weight: product.weight(),
                })
            })
            .collect()
    }
}

pub(crate) fn amount_out_of_range(field: &str) -> CoreError {
    CoreError::Validation(ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    })
}

impl Default for ShoppingCart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unavailability;
    use crate::types::ShippingProfile;
    use crate::weight::Weight;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    struct Shop {
        inventory: Inventory,
        cheese: ProductId,
        biscuits: ProductId,
        scratch_card: ProductId,
    }

    fn shop() -> Shop {
        let mut inventory = Inventory::new();
        let cheese = inventory
            .add(Product::perishable(
                "Cheese",
                Money::from_major(100),
                10,
                now() + Duration::days(7),
                ShippingProfile::shipped(Weight::from_grams(400)),
            ))
            .unwrap();
        let biscuits = inventory
            .add(Product::perishable(
                "Biscuits",
                Money::from_major(150),
                5,
                now() + Duration::days(14),
                ShippingProfile::shipped(Weight::from_grams(700)),
            ))
            .unwrap();
        let scratch_card = inventory
            .add(Product::non_perishable(
                "Mobile Scratch Card",
                Money::from_major(50),
                100,
                ShippingProfile::not_shipped(),
            ))
            .unwrap();

        Shop {
            inventory,
            cheese,
            biscuits,
            scratch_card,
        }
    }

    #[test]
    fn test_cart_add_item() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.cheese, 2, now()).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(200));
        assert_eq!(cart.items()[0].line_total(), Money::from_major(200));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.cheese, 2, now()).unwrap();
        cart.add_at(&shop.inventory, shop.cheese, 3, now()).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(100) * 5);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.biscuits, 1, now()).unwrap();
        cart.add_at(&shop.inventory, shop.cheese, 1, now()).unwrap();
        cart.add_at(&shop.inventory, shop.biscuits, 1, now()).unwrap();

        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Biscuits", "Cheese"]);
    }

    #[test]
    fn test_cart_rejects_more_than_stock() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        let err = cart
            .add_at(&shop.inventory, shop.biscuits, 10, now())
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Unavailable {
                reason: Unavailability::OutOfStock {
                    available: 5,
                    requested: 10
                },
                ..
            }
        ));
        assert!(cart.is_empty());
        assert_eq!(shop.inventory.quantity_of(&shop.biscuits), Some(5));
    }

    #[test]
    fn test_cart_counts_existing_reservation() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.biscuits, 3, now()).unwrap();
        let err = cart
            .add_at(&shop.inventory, shop.biscuits, 3, now())
            .unwrap_err();

        assert!(matches!(err, CoreError::Unavailable { .. }));
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_cart_rejects_expired_product() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        let err = cart
            .add_at(&shop.inventory, shop.cheese, 1, now() + Duration::days(8))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Unavailable {
                reason: Unavailability::Expired { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_cart_rejects_bad_quantity_and_unknown_product() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        assert!(matches!(
            cart.add_at(&shop.inventory, shop.cheese, 0, now()),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.add_at(&shop.inventory, ProductId::generate(), 1, now()),
            Err(CoreError::ProductNotFound(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_line_limit() {
        let mut inventory = Inventory::new();
        let mut cart = ShoppingCart::new();

        for i in 0..MAX_CART_ITEMS {
            let id = inventory
                .add(Product::non_perishable(
                    format!("Item {}", i),
                    Money::from_cents(100),
                    1,
                    ShippingProfile::not_shipped(),
                ))
                .unwrap();
            cart.add_at(&inventory, id, 1, now()).unwrap();
        }

        let extra = inventory
            .add(Product::non_perishable(
                "One too many",
                Money::from_cents(100),
                1,
                ShippingProfile::not_shipped(),
            ))
            .unwrap();
        assert!(matches!(
            cart.add_at(&inventory, extra, 1, now()),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_shippable_items_filters_and_keeps_order() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.cheese, 2, now()).unwrap();
        cart.add_at(&shop.inventory, shop.scratch_card, 1, now()).unwrap();
        cart.add_at(&shop.inventory, shop.biscuits, 1, now()).unwrap();

        let shippable = cart.shippable_items(&shop.inventory);
        assert_eq!(shippable.len(), 2);
        assert_eq!(shippable[0].name, "Cheese");
        assert_eq!(shippable[0].weight(), Weight::from_grams(800));
        assert_eq!(shippable[1].name, "Biscuits");
    }

    #[test]
    fn test_cart_clear() {
        let shop = shop();
        let mut cart = ShoppingCart::new();

        cart.add_at(&shop.inventory, shop.cheese, 2, now()).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().unwrap().is_zero());

        cart.add_at(&shop.inventory, shop.cheese, 1, now()).unwrap();
        assert_eq!(cart.len(), 1);
    }
}
