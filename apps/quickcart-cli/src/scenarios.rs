//! # Demo Scenarios
//!
//! A fixed script of checkouts against a small store, covering the happy path
//! and each way a checkout can be refused.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Scenario                     Cart                        Expected   │
//! │  1  Standard order               2x Cheese, 1x Biscuits      completed  │
//! │  2  Insufficient balance         1x TV                       refused    │
//! │  3  Expired product              1x Expired Cheese           refused    │
//! │  4  Out of stock                 10x Biscuits (5 in stock)   refused    │
//! │  5  Empty cart                   (nothing)                   refused    │
//! │  6  Mixed products with shipping 1x Cheese, 1x TV, 2x Card   completed  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenarios share one store and one customer, so earlier checkouts affect
//! later ones (scenario 2 fails because scenario 1 spent most of the balance).

use std::io::Write;

use chrono::{DateTime, Duration, Utc};
use quickcart_core::{
    CheckoutProcess, CoreResult, Customer, Inventory, Money, Product, ProductId, Receipt,
    ReceiptPrinter, ShippingNotifier, ShippingProfile, ShoppingCart, Weight,
};
use serde::Serialize;
use tracing::info;

use crate::config::OutputFormat;
use crate::error::CliResult;

/// One scripted demo case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    StandardOrder,
    InsufficientBalance,
    ExpiredProduct,
    OutOfStock,
    EmptyCart,
    MixedShipping,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::StandardOrder,
        Scenario::InsufficientBalance,
        Scenario::ExpiredProduct,
        Scenario::OutOfStock,
        Scenario::EmptyCart,
        Scenario::MixedShipping,
    ];

    pub fn number(self) -> u8 {
        match self {
            Scenario::StandardOrder => 1,
            Scenario::InsufficientBalance => 2,
            Scenario::ExpiredProduct => 3,
            Scenario::OutOfStock => 4,
            Scenario::EmptyCart => 5,
            Scenario::MixedShipping => 6,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::StandardOrder => "Standard order",
            Scenario::InsufficientBalance => "Insufficient balance",
            Scenario::ExpiredProduct => "Expired product",
            Scenario::OutOfStock => "Out of stock",
            Scenario::EmptyCart => "Empty cart",
            Scenario::MixedShipping => "Mixed products with shipping",
        }
    }
}

/// The shared state the scenarios run against.
#[derive(Debug)]
pub struct DemoStore {
    pub inventory: Inventory,
    pub customer: Customer,
    pub cheese: ProductId,
    pub biscuits: ProductId,
    pub tv: ProductId,
    pub scratch_card: ProductId,
}

impl DemoStore {
    /// Stocks the store, with perishables expiring relative to `now`.
    pub fn open(now: DateTime<Utc>) -> CoreResult<Self> {
        let mut inventory = Inventory::new();

        let cheese = inventory.add(Product::perishable(
            "Cheese",
            Money::from_major(100),
            10,
            now + Duration::days(7),
            ShippingProfile::shipped(Weight::from_kg(0.4)),
        ))?;
        let biscuits = inventory.add(Product::perishable(
            "Biscuits",
            Money::from_major(150),
            5,
            now + Duration::days(14),
            ShippingProfile::shipped(Weight::from_kg(0.7)),
        ))?;
        let tv = inventory.add(Product::non_perishable(
            "TV",
            Money::from_major(10000),
            3,
            ShippingProfile::shipped(Weight::from_kg(15.5)),
        ))?;
        let scratch_card = inventory.add(Product::non_perishable(
            "Mobile Scratch Card",
            Money::from_major(50),
            100,
            ShippingProfile::not_shipped(),
        ))?;

        Ok(DemoStore {
            inventory,
            customer: Customer::new("John Doe", Money::from_major(500))?,
            cheese,
            biscuits,
            tv,
            scratch_card,
        })
    }
}

/// The result of one scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub outcome: CoreResult<Receipt>,
}

impl ScenarioReport {
    pub fn is_completed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// JSON shape of a [`ScenarioReport`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportLine<'a> {
    case: u8,
    title: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a ScenarioReport> for ReportLine<'a> {
    fn from(report: &'a ScenarioReport) -> Self {
        let (status, receipt_number, total, error) = match &report.outcome {
            Ok(receipt) => (
                "completed",
                Some(receipt.receipt_number.as_str()),
                Some(receipt.total),
                None,
            ),
            Err(e) => ("failed", None, None, Some(e.to_string())),
        };

        ReportLine {
            case: report.scenario.number(),
            title: report.scenario.title(),
            status,
            receipt_number,
            total,
            error,
        }
    }
}

/// Runs every scenario in order.
///
/// Receipts and shipment notices go through `checkout`'s sinks; case headers
/// and outcomes go to `out` in the requested `format`.
pub fn run_all<N, P, W>(
    checkout: &mut CheckoutProcess<N, P>,
    store: &mut DemoStore,
    out: &mut W,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> CliResult<Vec<ScenarioReport>>
where
    N: ShippingNotifier,
    P: ReceiptPrinter,
    W: Write,
{
    let mut reports = Vec::with_capacity(Scenario::ALL.len());

    for scenario in Scenario::ALL {
        if format == OutputFormat::Text {
            writeln!(out, "Test Case {}: {}", scenario.number(), scenario.title())?;
            out.flush()?;
        }

        let outcome = run_one(scenario, checkout, store, now);
        info!(
            case = scenario.number(),
            completed = outcome.is_ok(),
            "Scenario finished"
        );

        let report = ScenarioReport { scenario, outcome };
        match format {
            OutputFormat::Text => {
                if let Err(e) = &report.outcome {
                    writeln!(out, "Error: {}", e)?;
                    writeln!(out)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &ReportLine::from(&report))?;
                writeln!(out)?;
            }
        }
        reports.push(report);
    }

    Ok(reports)
}

fn run_one<N, P>(
    scenario: Scenario,
    checkout: &mut CheckoutProcess<N, P>,
    store: &mut DemoStore,
    now: DateTime<Utc>,
) -> CoreResult<Receipt>
where
    N: ShippingNotifier,
    P: ReceiptPrinter,
{
    let mut cart = ShoppingCart::new();

    match scenario {
        Scenario::StandardOrder => {
            cart.add_at(&store.inventory, store.cheese, 2, now)?;
            cart.add_at(&store.inventory, store.biscuits, 1, now)?;
        }
        Scenario::InsufficientBalance => {
            cart.add_at(&store.inventory, store.tv, 1, now)?;
        }
        Scenario::ExpiredProduct => {
            let expired = store.inventory.add(Product::perishable(
                "Expired Cheese",
                Money::from_major(100),
                5,
                now - Duration::days(1),
                ShippingProfile::shipped(Weight::from_kg(0.4)),
            ))?;
            cart.add_at(&store.inventory, expired, 1, now)?;
        }
        Scenario::OutOfStock => {
            cart.add_at(&store.inventory, store.biscuits, 10, now)?;
        }
        Scenario::EmptyCart => {}
        Scenario::MixedShipping => {
            // Balances only go down, so the customer opens a better-funded account.
            store.customer = Customer::new(store.customer.name(), Money::from_major(20000))?;
            cart.add_at(&store.inventory, store.cheese, 1, now)?;
            cart.add_at(&store.inventory, store.tv, 1, now)?;
            cart.add_at(&store.inventory, store.scratch_card, 2, now)?;
        }
    }

    checkout.checkout_at(&mut store.inventory, &mut store.customer, &mut cart, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quickcart_core::{CoreError, TextReceiptPrinter, TextShippingNotifier, Unavailability};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    type TextCheckout = CheckoutProcess<TextShippingNotifier<Vec<u8>>, TextReceiptPrinter<Vec<u8>>>;

    fn text_checkout() -> TextCheckout {
        CheckoutProcess::new(
            TextShippingNotifier::new(Vec::new()),
            TextReceiptPrinter::new(Vec::new()),
        )
    }

    #[test]
    fn test_scenario_outcomes() {
        let mut store = DemoStore::open(now()).unwrap();
        let mut checkout = text_checkout();
        let mut out = Vec::new();

        let reports = run_all(&mut checkout, &mut store, &mut out, OutputFormat::Text, now()).unwrap();
        assert_eq!(reports.len(), 6);

        let first = reports[0].outcome.as_ref().unwrap();
        assert_eq!(first.total, Money::from_major(380));
        assert_eq!(first.balance_after, Money::from_major(120));

        assert!(matches!(
            reports[1].outcome,
            Err(CoreError::InsufficientBalance { available, .. }) if available == Money::from_major(120)
        ));
        assert!(matches!(
            reports[2].outcome,
            Err(CoreError::Unavailable { reason: Unavailability::Expired { .. }, .. })
        ));
        assert!(matches!(
            reports[3].outcome,
            Err(CoreError::Unavailable {
                reason: Unavailability::OutOfStock { available: 4, requested: 10 },
                ..
            })
        ));
        assert!(matches!(reports[4].outcome, Err(CoreError::EmptyCart)));

        let last = reports[5].outcome.as_ref().unwrap();
        assert_eq!(last.subtotal, Money::from_major(10200));
        assert_eq!(last.balance_after, Money::from_major(9770));

        assert_eq!(store.inventory.quantity_of(&store.cheese), Some(7));
        assert_eq!(store.inventory.quantity_of(&store.biscuits), Some(4));
        assert_eq!(store.inventory.quantity_of(&store.tv), Some(2));
        assert_eq!(store.inventory.quantity_of(&store.scratch_card), Some(98));
    }

    #[test]
    fn test_text_output() {
        let mut store = DemoStore::open(now()).unwrap();
        let mut checkout = text_checkout();
        let mut out = Vec::new();

        run_all(&mut checkout, &mut store, &mut out, OutputFormat::Text, now()).unwrap();

        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("Test Case 1: Standard order\n"));
        assert!(report.contains("Test Case 5: Empty cart\nError: Cannot checkout with an empty cart\n"));

        let (notifier, printer) = checkout.into_parts();
        let receipts = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(receipts.matches("** Checkout receipt **").count(), 2);
        assert!(receipts.contains("2x Mobile Scratch Card\t$100.00"));

        let notices = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(notices.contains("Total package weight 1.5kg"));
        assert!(notices.contains("1x TV\t15.5kg"));
        assert!(!notices.contains("Scratch Card"));
    }

    #[test]
    fn test_json_output() {
        let mut store = DemoStore::open(now()).unwrap();
        let mut checkout = text_checkout();
        let mut out = Vec::new();

        run_all(&mut checkout, &mut store, &mut out, OutputFormat::Json, now()).unwrap();

        let report = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = report
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["case"], 1);
        assert_eq!(lines[0]["status"], "completed");
        assert_eq!(lines[0]["total"], 38000);
        assert_eq!(lines[1]["status"], "failed");
        assert!(lines[1]["error"].as_str().unwrap().starts_with("Insufficient balance"));
        assert!(lines[1].get("total").is_none());
    }
}
