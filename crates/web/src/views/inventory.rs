//! Inventory list and the low-stock banner.

use purplepaw_api::models::{InventoryItem, low_stock_alerts};
use purplepaw_table::{Cell, Column, PageRequest, RowAction, SortConfig, Tone};

pub const DETAILS: &str = "details";
pub const EDIT: &str = "edit";

pub fn default_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending("name"))
}

pub fn columns() -> Vec<Column<InventoryItem>> {
    vec![
        Column::plain("name", "Product").sortable(),
        Column::plain("quantity", "Quantity").sortable(),
        Column::derived("status", "Status", |item: &InventoryItem| {
            let status = item.stock_status();
            Cell::badge(status.label(), status.tone())
        }),
        Column::actions("actions", "Actions", |_: &InventoryItem| {
            vec![
                RowAction::new(DETAILS, "Details", Tone::Info),
                RowAction::new(EDIT, "Edit", Tone::Accent),
            ]
        }),
    ]
}

/// One line per item that is running low, for the banner above the table.
pub fn alert_lines(items: &[InventoryItem]) -> Vec<String> {
    low_stock_alerts(items)
        .into_iter()
        .map(|item| {
            format!(
                "{} - {} units left (minimum: {})",
                item.name, item.quantity, item.min_threshold
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64, min_threshold: i64) -> InventoryItem {
        InventoryItem {
            id: name.to_string(),
            name: name.to_string(),
            quantity,
            min_threshold,
            last_updated: None,
        }
    }

    #[test]
    fn status_badge_reflects_thresholds() {
        let cols = columns();
        let status = &cols[2];
        assert_eq!(status.cell(&item("gauze", 0, 5)), Cell::badge("Out of stock", Tone::Danger));
        assert_eq!(status.cell(&item("gauze", 3, 5)), Cell::badge("Low stock", Tone::Warning));
        assert_eq!(status.cell(&item("gauze", 30, 5)), Cell::badge("In stock", Tone::Success));
    }

    #[test]
    fn banner_lists_only_low_items() {
        let lines = alert_lines(&[item("gauze", 0, 5), item("syringes", 2, 10), item("gloves", 50, 10)]);
        assert_eq!(lines, vec!["syringes - 2 units left (minimum: 10)".to_string()]);
    }
}
