//! A client's pets and a pet's clinical history.

use purplepaw_api::models::{MedicalRecord, Pet};
use purplepaw_table::{Cell, Column, PageRequest, RowAction, SortConfig, Tone};

pub const HISTORY: &str = "history";
pub const DETAILS: &str = "details";

/// Longer visit reasons are cut in the history table.
pub const REASON_PREVIEW: usize = 50;

pub fn history_path(pet_id: &str) -> String {
    format!("/pets/{pet_id}/history")
}

pub fn default_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending("name"))
}

/// Most recent visit first.
pub fn history_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending("visitDate").toggled("visitDate"))
}

pub fn columns() -> Vec<Column<Pet>> {
    vec![
        Column::plain("name", "Name").sortable().filterable(),
        Column::plain("species", "Species").sortable().filterable(),
        Column::plain("breed", "Breed"),
        Column::plain("age", "Age").sortable(),
        Column::actions("actions", "Actions", |_: &Pet| {
            vec![RowAction::new(HISTORY, "Medical History", Tone::Info)]
        }),
    ]
}

pub fn history_columns() -> Vec<Column<MedicalRecord>> {
    vec![
        Column::derived("visitDate", "Date", |r: &MedicalRecord| Cell::text(r.visit_day()))
            .sortable(),
        Column::plain("veterinarianName", "Veterinarian").filterable(),
        Column::derived("reason", "Reason", |r: &MedicalRecord| {
            Cell::text(reason_preview(&r.reason))
        })
        .filterable(),
        Column::derived("status", "Status", |r: &MedicalRecord| {
            Cell::badge(r.status.as_str(), r.status_tone())
        }),
        Column::actions("actions", "Actions", |_: &MedicalRecord| {
            vec![RowAction::new(DETAILS, "Details", Tone::Accent)]
        }),
    ]
}

pub fn reason_preview(reason: &str) -> String {
    if reason.chars().count() <= REASON_PREVIEW {
        return reason.to_string();
    }
    let cut: String = reason.chars().take(REASON_PREVIEW).collect();
    format!("{cut}...")
}

/// Label/value pairs of the visit detail panel; notes only when present.
pub fn record_details(record: &MedicalRecord) -> Vec<(&'static str, String)> {
    let mut details = vec![
        ("Visit date", record.visit_day()),
        ("Veterinarian", record.veterinarian_name.clone()),
        ("Reason", record.reason.clone()),
        ("Diagnosis", record.diagnosis.clone()),
        ("Treatment", record.treatment.clone()),
    ];
    if let Some(notes) = record.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        details.push(("Notes", notes.to_string()));
    }
    details
}

/// Heading for a history page; the pet name comes from the records.
pub fn history_title(records: &[MedicalRecord]) -> String {
    match records.first().map(|r| r.pet_name.trim()).filter(|n| !n.is_empty()) {
        Some(name) => format!("Medical History - {name}"),
        None => "Medical History".to_string(),
    }
}
