//! # Hearth Orders
//!
//! The order side of the fulfillment engine: the accumulating order sheet,
//! pending-order selection, shipment-size splitting, and collision-resistant
//! order-number generation.

pub mod append;
pub mod filter;
pub mod order_number;
pub mod sheet;

pub use append::{append_order, ShipmentCaps};
pub use filter::{filter_pending_orders, FilterReport, PendingOrder};
pub use order_number::generate_order_number;
pub use sheet::{OrderId, OrderLine, OrderSheet};
