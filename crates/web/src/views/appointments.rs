//! Today's appointments for the signed-in veterinarian.

use purplepaw_api::models::Appointment;
use purplepaw_table::{Cell, Column, PageRequest, RowAction, SortConfig, Tone};

pub const DETAILS: &str = "details";
pub const RESCHEDULE: &str = "reschedule";
pub const CANCEL: &str = "cancel";

pub fn default_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending("appointmentDate"))
}

pub fn columns() -> Vec<Column<Appointment>> {
    vec![
        Column::derived("appointmentDate", "Time", |a: &Appointment| Cell::text(a.time_label()))
            .sortable(),
        Column::derived("client", "Client", |a: &Appointment| Cell::text(a.client_name()))
            .filterable(),
        Column::derived("pet", "Pet", |a: &Appointment| Cell::text(a.pet_name())).filterable(),
        Column::plain("reason", "Reason").filterable(),
        Column::derived("status", "Status", |a: &Appointment| {
            Cell::badge(a.status.as_str(), a.status.tone())
        })
        .filterable(),
        Column::actions("actions", "Actions", |_: &Appointment| {
            vec![
                RowAction::new(DETAILS, "Details", Tone::Info),
                RowAction::new(RESCHEDULE, "Reschedule", Tone::Accent),
                RowAction::new(CANCEL, "Cancel", Tone::Danger),
            ]
        }),
    ]
}
