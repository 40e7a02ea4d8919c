//! # Customer
//!
//! A customer account and its balance.

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_balance, validate_charge, validate_customer_name};

/// A paying customer.
///
/// The balance is private: [`deduct_balance`](Customer::deduct_balance) is
/// the only way to change it, and it never takes the balance below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    balance: Money,
}

impl Customer {
    /// Opens an account with a non-negative starting balance.
    pub fn new(name: impl Into<String>, balance: Money) -> CoreResult<Self> {
        let name = name.into();
        validate_customer_name(&name)?;
        validate_balance(balance)?;
        Ok(Customer { name, balance })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Charges `amount` to the account.
    ///
    /// Fails with `InsufficientBalance` and leaves the balance untouched when
    /// `balance < amount`. Negative amounts are rejected: there is no way to
    /// credit an account.
    pub fn deduct_balance(&mut self, amount: Money) -> CoreResult<()> {
        validate_charge(amount)?;

        if self.balance < amount {
            return Err(CoreError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        debug!(customer = %self.name, charged = %amount, balance = %self.balance, "Balance deducted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduct_balance() {
        let mut customer = Customer::new("John Doe", Money::from_major(500)).unwrap();
        customer.deduct_balance(Money::from_major(380)).unwrap();
        assert_eq!(customer.balance(), Money::from_major(120));
    }

    #[test]
    fn test_deduct_exact_balance_reaches_zero() {
        let mut customer = Customer::new("John Doe", Money::from_major(120)).unwrap();
        customer.deduct_balance(Money::from_major(120)).unwrap();
        assert!(customer.balance().is_zero());
    }

    #[test]
    fn test_insufficient_balance_leaves_balance_unchanged() {
        let mut customer = Customer::new("John Doe", Money::from_major(120)).unwrap();

        let err = customer
            .deduct_balance(Money::from_major(10030))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientBalance { required, available }
                if required == Money::from_major(10030) && available == Money::from_major(120)
        ));
        assert_eq!(customer.balance(), Money::from_major(120));
    }

    #[test]
    fn test_negative_charge_is_rejected() {
        let mut customer = Customer::new("John Doe", Money::from_major(100)).unwrap();

        let err = customer
            .deduct_balance(Money::from_major(-500))
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(customer.balance(), Money::from_major(100));
    }

    #[test]
    fn test_new_validates() {
        assert!(Customer::new("", Money::zero()).is_err());
        assert!(Customer::new("Jane", Money::from_cents(-1)).is_err());
        assert_eq!(
            Customer::new("Jane", Money::zero()).unwrap().name(),
            "Jane"
        );
    }
}
