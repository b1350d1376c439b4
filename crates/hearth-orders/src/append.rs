//! Order appending and shipment-size splitting.

use chrono::NaiveDate;
use hearth_core::{HouseholdId, Sku};
use hearth_resolve::ResolvedAddress;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::order_number::generate_order_number;
use crate::sheet::{OrderLine, OrderSheet};

/// Per-shipment quantity caps by SKU.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipmentCaps {
    /// Maximum resupply kits in one shipment.
    pub resupply: u32,

    /// Maximum welcome kits in one shipment.
    pub welcome: u32,
}

impl Default for ShipmentCaps {
    fn default() -> Self {
        Self {
            resupply: 20,
            welcome: 4,
        }
    }
}

impl ShipmentCaps {
    /// The cap for one SKU.
    pub fn cap_for(&self, sku: Sku) -> u32 {
        match sku {
            Sku::Resupply => self.resupply,
            Sku::Welcome => self.welcome,
        }
    }
}

/// Append a household's order to the sheet, splitting oversized requests.
///
/// A request above the SKU's cap first appends the overflow portion
/// (quantity minus cap) recursively, then the capped remainder, so a
/// household ends up with multiple lines each at or below the cap,
/// overflow before capped. Every line gets its own freshly generated order
/// id. An order with no deliverable address is skipped with a warning and
/// the sheet is left unmodified.
pub fn append_order(
    sheet: &mut OrderSheet,
    today: NaiveDate,
    household: &HouseholdId,
    sku: Sku,
    mut quantity: u32,
    address: &ResolvedAddress,
    caps: &ShipmentCaps,
) {
    if !address.is_deliverable() {
        warn!(%household, "no valid address, skipping order");
        return;
    }

    let cap = caps.cap_for(sku);
    if quantity > cap {
        debug!(
            %household,
            %sku,
            quantity,
            cap,
            "splitting order over the max shipment size"
        );
        append_order(sheet, today, household, sku, quantity - cap, address, caps);
        quantity = cap;
    }

    let order_id = generate_order_number(today, household, sheet);
    info!(%household, %sku, quantity, %order_id, "appending order");
    sheet.push(OrderLine {
        household: household.clone(),
        sku,
        quantity,
        order_id,
        address: address.clone(),
    });
}
