//! The accumulating order sheet.
//!
//! One sheet per run: an ordered sequence of finalized, uniquely-identified
//! order lines. A new run is seeded with the previous sheet's contents so
//! order-number generation never collides with pre-existing lines.

use std::fmt;

use hearth_core::{ExportColumn, HouseholdId, Sku};
use hearth_resolve::ResolvedAddress;
use serde::{Deserialize, Serialize};

/// A unique, collision-resistant order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finalized line of the order sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Household the line ships to.
    pub household: HouseholdId,

    /// Kit type.
    pub sku: Sku,

    /// Kits in this shipment, never above the SKU's cap.
    pub quantity: u32,

    /// Unique within the sheet, including seeded lines.
    pub order_id: OrderId,

    /// The resolved destination bundle.
    pub address: ResolvedAddress,
}

/// The run-scoped, ordered collection of order lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSheet {
    lines: Vec<OrderLine>,
}

impl OrderSheet {
    /// An empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet seeded with pre-existing lines.
    pub fn with_lines(lines: Vec<OrderLine>) -> Self {
        Self { lines }
    }

    /// Append a finalized line.
    pub fn push(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    /// Lines in append order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if any line already carries this order id.
    pub fn contains_order_id(&self, candidate: &str) -> bool {
        self.lines.iter().any(|line| line.order_id.as_str() == candidate)
    }

    /// Export rows for handoff to the fulfillment process: household, SKU,
    /// quantity, and order id on every row, plus the allow-listed address
    /// columns.
    pub fn export_rows(&self, columns: &[ExportColumn]) -> Vec<serde_json::Value> {
        self.lines
            .iter()
            .map(|line| {
                let mut row = serde_json::Map::new();
                row.insert("household".into(), serde_json::json!(line.household));
                row.insert("sku".into(), serde_json::json!(line.sku));
                row.insert("quantity".into(), serde_json::json!(line.quantity));
                row.insert("order_id".into(), serde_json::json!(line.order_id));
                for &column in columns {
                    row.insert(column.header().into(), line.address.export_value(column));
                }
                serde_json::Value::Object(row)
            })
            .collect()
    }
}
