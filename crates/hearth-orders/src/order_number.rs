//! Order-number generation.
//!
//! Order ids concatenate the run date (`%y%m%d`) with the household key, so
//! repeat orders for one household on one day collide on purpose and are
//! disambiguated by a deterministic, monotonically-extending letter suffix:
//! base, `a`, `b`, ... A terminal `z` extends with a fresh `a` (`...z`,
//! `...za`, `...zb`), so the scheme never exhausts.

use chrono::NaiveDate;
use hearth_core::HouseholdId;
use tracing::debug;

use crate::sheet::{OrderId, OrderSheet};

/// Generate an order id guaranteed absent from the sheet.
pub fn generate_order_number(
    today: NaiveDate,
    household: &HouseholdId,
    sheet: &OrderSheet,
) -> OrderId {
    let mut candidate = format!("{}{}", today.format("%y%m%d"), household);

    while sheet.contains_order_id(&candidate) {
        match candidate.chars().last() {
            Some(last) if last.is_ascii_alphabetic() => {
                if last == 'z' || last == 'Z' {
                    candidate.push('a');
                } else {
                    candidate.pop();
                    candidate.push((last as u8 + 1) as char);
                }
            }
            _ => candidate.push('a'),
        }
    }

    debug!(order_id = %candidate, "generated unique order id");
    OrderId::new(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{Sku, StudySite};
    use hearth_resolve::ResolvedAddress;

    use crate::sheet::OrderLine;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn address() -> ResolvedAddress {
        ResolvedAddress {
            street_address: Some("12 Alder St".into()),
            apt_number: None,
            city: Some("Portsea".into()),
            state: Some("WA".into()),
            zipcode: None,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            delivery_instructions: None,
            site: StudySite::South,
        }
    }

    fn line(order_id: &OrderId) -> OrderLine {
        OrderLine {
            household: HouseholdId::new("H001"),
            sku: Sku::Resupply,
            quantity: 1,
            order_id: order_id.clone(),
            address: address(),
        }
    }

    #[test]
    fn test_fresh_id_is_date_plus_household() {
        let sheet = OrderSheet::new();
        let id = generate_order_number(date(), &HouseholdId::new("H001"), &sheet);
        assert_eq!(id.as_str(), "240305H001");
    }

    #[test]
    fn test_collisions_suffix_in_strict_order() {
        let mut sheet = OrderSheet::new();
        let household = HouseholdId::new("H001");

        let mut issued = Vec::new();
        for _ in 0..4 {
            let id = generate_order_number(date(), &household, &sheet);
            sheet.push(line(&id));
            issued.push(id.as_str().to_string());
        }

        assert_eq!(
            issued,
            vec!["240305H001", "240305H001a", "240305H001b", "240305H001c"]
        );
    }

    #[test]
    fn test_never_returns_existing_id() {
        let mut sheet = OrderSheet::new();
        let household = HouseholdId::new("H001");

        let mut seen = std::collections::HashSet::new();
        for _ in 0..30 {
            let id = generate_order_number(date(), &household, &sheet);
            assert!(seen.insert(id.as_str().to_string()));
            sheet.push(line(&id));
        }
    }

    #[test]
    fn test_terminal_z_extends_with_fresh_letter() {
        let mut sheet = OrderSheet::new();
        let household = HouseholdId::new("H001");

        // Seed the whole single-letter suffix range plus the bare base.
        sheet.push(line(&OrderId::new("240305H001")));
        for letter in b'a'..=b'z' {
            sheet.push(line(&OrderId::new(format!("240305H001{}", letter as char))));
        }

        let id = generate_order_number(date(), &household, &sheet);
        assert_eq!(id.as_str(), "240305H001za");
    }

    #[test]
    fn test_seeded_sheet_blocks_cross_run_collisions() {
        let sheet = OrderSheet::with_lines(vec![line(&OrderId::new("240305H001"))]);
        let id = generate_order_number(date(), &HouseholdId::new("H001"), &sheet);
        assert_eq!(id.as_str(), "240305H001a");
    }
}
