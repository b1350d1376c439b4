//! The export column allow-list.
//!
//! Downstream fulfillment exports only ever see a fixed set of address and
//! contact columns; everything else a resolved bundle may know stays
//! internal to the run.

use serde::{Deserialize, Serialize};

/// Address-bundle columns retained in exported order rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportColumn {
    StreetAddress,
    AptNumber,
    City,
    State,
    Zipcode,
    FirstName,
    LastName,
    Email,
    Phone,
    DeliveryInstructions,
    Site,
}

impl ExportColumn {
    /// Column header used in exported rows.
    pub fn header(&self) -> &'static str {
        match self {
            ExportColumn::StreetAddress => "street_address",
            ExportColumn::AptNumber => "apt_number",
            ExportColumn::City => "city",
            ExportColumn::State => "state",
            ExportColumn::Zipcode => "zipcode",
            ExportColumn::FirstName => "first_name",
            ExportColumn::LastName => "last_name",
            ExportColumn::Email => "email",
            ExportColumn::Phone => "phone",
            ExportColumn::DeliveryInstructions => "delivery_instructions",
            ExportColumn::Site => "site",
        }
    }
}

/// The fixed allow-list handed to the export process.
pub const DEFAULT_EXPORT_COLUMNS: &[ExportColumn] = &[
    ExportColumn::StreetAddress,
    ExportColumn::AptNumber,
    ExportColumn::City,
    ExportColumn::State,
    ExportColumn::Zipcode,
    ExportColumn::FirstName,
    ExportColumn::LastName,
    ExportColumn::Email,
    ExportColumn::Phone,
    ExportColumn::DeliveryInstructions,
    ExportColumn::Site,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_unique() {
        let mut headers: Vec<_> = DEFAULT_EXPORT_COLUMNS.iter().map(|c| c.header()).collect();
        headers.sort();
        headers.dedup();
        assert_eq!(headers.len(), DEFAULT_EXPORT_COLUMNS.len());
    }
}
