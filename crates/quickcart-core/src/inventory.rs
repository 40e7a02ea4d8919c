//! # Inventory
//!
//! The product table that carts and checkout resolve [`ProductId`]s against.
//!
//! Cart lines never hold a reference to a live `Product`; they carry the id
//! and look the product up here whenever stock or expiry matters. Stock is
//! therefore always read from one place, and only [`Inventory::commit_sale`]
//! ever lowers it.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};

/// In-memory product table.
///
/// Iteration order is the order products were added.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a product, returning its id.
    ///
    /// Adding a product whose id is already present replaces the stored copy.
    pub fn add(&mut self, product: Product) -> CoreResult<ProductId> {
        product.validate()?;

        let id = product.id;
        match self.index.get(&id) {
            Some(&slot) => self.products[slot] = product,
            None => {
                self.index.insert(id, self.products.len());
                self.products.push(product);
            }
        }

        debug!(product_id = %id, "Product stocked");
        Ok(id)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&slot| &self.products[slot])
    }

    /// Like [`get`](Self::get) but fails with `ProductNotFound`.
    pub fn product(&self, id: &ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(*id))
    }

    /// Current stock for a product, if it exists.
    pub fn quantity_of(&self, id: &ProductId) -> Option<i64> {
        self.get(id).map(|p| p.quantity)
    }

    /// Removes sold units from stock.
    ///
    /// Refuses to take stock below zero; the stock is left untouched in that case.
    pub fn commit_sale(&mut self, id: &ProductId, quantity: i64) -> CoreResult<()> {
        let slot = *self.index.get(id).ok_or(CoreError::ProductNotFound(*id))?;
        let product = &mut self.products[slot];

        if product.quantity < quantity {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        product.quantity -= quantity;
        debug!(product_id = %id, sold = quantity, remaining = product.quantity, "Stock committed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}
