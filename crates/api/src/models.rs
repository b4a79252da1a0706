//! Wire records for the clinic endpoints.
//!
//! The backend mixes Spanish and English field names; records accept the
//! Spanish ones as aliases. Each list record implements [`TableRow`] so a
//! plain column can look its fields up by key.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use purplepaw_auth::{Identity, Role};
use purplepaw_core::UserId;
use purplepaw_table::{Cell, TableRow, Tone};

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

// ---- auth ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Self-registration always asks for the client role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub password: String,
    pub roles: Vec<Role>,
}

/// `data` of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: Identity,
}

// ---- users ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "uid")]
    pub id: UserId,
    pub email: String,
    #[serde(default, alias = "nombre")]
    pub first_name: String,
    #[serde(default, alias = "apellido")]
    pub last_name: String,
    #[serde(default, alias = "telefono")]
    pub phone: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, alias = "isActive")]
    pub active: bool,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn primary_role(&self) -> Option<&Role> {
        self.roles.first()
    }
}

impl TableRow for UserRecord {
    fn field(&self, key: &str) -> Cell {
        match key {
            "id" | "uid" => Cell::text(self.id.as_str()),
            "name" | "nombre" => Cell::text(self.full_name()),
            "email" => Cell::text(&self.email),
            "phone" | "telefono" => Cell::text(&self.phone),
            "role" => self
                .primary_role()
                .map(|r| Cell::text(r.as_str()))
                .unwrap_or(Cell::Empty),
            "active" => Cell::text(self.active.to_string()),
            _ => Cell::Empty,
        }
    }
}

/// Body of `POST /users` and `PUT /users/{id}`. An update without a new
/// password leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub email: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStatus {
    pub is_active: bool,
}

// ---- inventory ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    pub fn classify(quantity: i64, min_threshold: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= min_threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of stock",
            StockStatus::Low => "Low stock",
            StockStatus::InStock => "In stock",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StockStatus::OutOfStock => Tone::Danger,
            StockStatus::Low => Tone::Warning,
            StockStatus::InStock => Tone::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub min_threshold: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.min_threshold)
    }

    /// In stock but at or below its threshold. Empty items are not alerts.
    pub fn is_low_stock(&self) -> bool {
        self.stock_status() == StockStatus::Low
    }
}

impl TableRow for InventoryItem {
    fn field(&self, key: &str) -> Cell {
        match key {
            "id" => Cell::text(&self.id),
            "name" => Cell::text(&self.name),
            "quantity" => Cell::text(self.quantity.to_string()),
            "minThreshold" => Cell::text(self.min_threshold.to_string()),
            "lastUpdated" => self.last_updated.as_deref().map(Cell::text).unwrap_or(Cell::Empty),
            _ => Cell::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub name: String,
    pub quantity: i64,
    pub min_threshold: i64,
}

/// Items for the low-stock banner, in page order.
pub fn low_stock_alerts(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).collect()
}

// ---- appointments ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
    InProgress,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            AppointmentStatus::Scheduled => Tone::Warning,
            AppointmentStatus::Confirmed => Tone::Success,
            AppointmentStatus::Cancelled => Tone::Danger,
            AppointmentStatus::Completed => Tone::Info,
            AppointmentStatus::InProgress => Tone::Accent,
            AppointmentStatus::Unknown => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default, alias = "firstName")]
    pub nombre: String,
    #[serde(default, alias = "lastName")]
    pub apellido: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub appointment_date: String,
    #[serde(default)]
    pub client: Option<PersonRef>,
    #[serde(default)]
    pub pet: Option<PetRef>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

/// Wall-clock time as sent, with or without an offset.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Ok(at.naive_local()),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"),
    }
}

impl Appointment {
    /// `HH:MM` of the appointment, as sent (no timezone conversion).
    pub fn time_label(&self) -> String {
        let raw = self.appointment_date.trim();
        match parse_timestamp(raw) {
            Ok(at) => at.format("%H:%M").to_string(),
            Err(err) => {
                tracing::debug!(id = %self.id, value = raw, error = %err, "unparseable appointment date");
                "Invalid date".to_string()
            }
        }
    }

    pub fn client_name(&self) -> String {
        self.client
            .as_ref()
            .map(|c| format!("{} {}", c.nombre, c.apellido).trim().to_string())
            .unwrap_or_default()
    }

    pub fn pet_name(&self) -> String {
        self.pet.as_ref().map(|p| p.name.clone()).unwrap_or_default()
    }
}

impl TableRow for Appointment {
    fn field(&self, key: &str) -> Cell {
        match key {
            "id" => Cell::text(&self.id),
            "appointmentDate" => Cell::text(&self.appointment_date),
            "client" => Cell::text(self.client_name()),
            "pet" => Cell::text(self.pet_name()),
            "reason" => self.reason.as_deref().map(Cell::text).unwrap_or(Cell::Empty),
            "status" => Cell::text(self.status.as_str()),
            _ => Cell::Empty,
        }
    }
}

// ---- pets ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "especie")]
    pub species: String,
    #[serde(default, alias = "raza")]
    pub breed: String,
    #[serde(default, alias = "edad")]
    pub age: Option<u32>,
}

impl Pet {
    /// `Dog (Beagle), 3 years`; parts the backend left out are skipped.
    pub fn summary(&self) -> String {
        let mut out = self.species.trim().to_string();
        let breed = self.breed.trim();
        if !breed.is_empty() {
            if out.is_empty() {
                out = breed.to_string();
            } else {
                out = format!("{out} ({breed})");
            }
        }
        if let Some(age) = self.age {
            let years = if age == 1 { "year" } else { "years" };
            if out.is_empty() {
                out = format!("{age} {years}");
            } else {
                out = format!("{out}, {age} {years}");
            }
        }
        out
    }
}

impl TableRow for Pet {
    fn field(&self, key: &str) -> Cell {
        match key {
            "id" => Cell::text(&self.id),
            "name" => Cell::text(&self.name),
            "species" => Cell::text(&self.species),
            "breed" => Cell::text(&self.breed),
            "age" => self.age.map(|a| Cell::text(a.to_string())).unwrap_or(Cell::Empty),
            _ => Cell::Empty,
        }
    }
}

/// `data` of the client pets endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PetList {
    #[serde(default, alias = "pets")]
    pub mascotas: Vec<Pet>,
}

/// One visit in a pet's clinical history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(alias = "fechaVisita")]
    pub visit_date: String,
    #[serde(default)]
    pub veterinarian_name: String,
    #[serde(default)]
    pub pet_name: String,
    #[serde(default, alias = "motivoConsulta")]
    pub reason: String,
    #[serde(default, alias = "diagnostico")]
    pub diagnosis: String,
    #[serde(default, alias = "tratamiento")]
    pub treatment: String,
    #[serde(default, alias = "observaciones")]
    pub notes: Option<String>,
    #[serde(default, alias = "estado")]
    pub status: String,
}

pub const ACTIVE_RECORD: &str = "ACTIVO";

impl MedicalRecord {
    /// `dd/mm/yyyy` of the visit.
    pub fn visit_day(&self) -> String {
        match parse_timestamp(&self.visit_date) {
            Ok(at) => at.format("%d/%m/%Y").to_string(),
            Err(err) => {
                tracing::debug!(id = %self.id, value = %self.visit_date, error = %err, "unparseable visit date");
                "Invalid date".to_string()
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(ACTIVE_RECORD)
    }

    pub fn status_tone(&self) -> Tone {
        if self.is_active() { Tone::Success } else { Tone::Neutral }
    }
}

impl TableRow for MedicalRecord {
    fn field(&self, key: &str) -> Cell {
        match key {
            "id" => Cell::text(&self.id),
            "visitDate" => Cell::text(&self.visit_date),
            "veterinarianName" => Cell::text(&self.veterinarian_name),
            "reason" => Cell::text(&self.reason),
            "diagnosis" => Cell::text(&self.diagnosis),
            "treatment" => Cell::text(&self.treatment),
            "notes" => self.notes.as_deref().map(Cell::text).unwrap_or(Cell::Empty),
            "status" => Cell::text(&self.status),
            _ => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_record_accepts_backend_names() {
        let user: UserRecord = serde_json::from_value(json!({
            "uid": 12,
            "email": "ana@purplepaw.test",
            "nombre": "Ana",
            "apellido": "Ruiz",
            "telefono": "5512345678",
            "roles": ["RECEPCIONISTA"],
            "active": true
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "12");
        assert_eq!(user.full_name(), "Ana Ruiz");
        assert_eq!(user.field("role"), Cell::text("RECEPCIONISTA"));
        assert_eq!(user.field("active"), Cell::text("true"));
        assert_eq!(user.field("unknown"), Cell::Empty);

        let inactive = UserRecord {
            active: false,
            ..user
        };
        assert_eq!(inactive.field("active"), Cell::text("false"));
    }

    #[test]
    fn stock_status_thresholds() {
        assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(-1, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(5, 5), StockStatus::Low);
        assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
    }

    #[test]
    fn low_stock_alerts_skip_empty_items() {
        let item = |id: &str, quantity, min_threshold| InventoryItem {
            id: id.to_string(),
            name: id.to_string(),
            quantity,
            min_threshold,
            last_updated: None,
        };
        let items = vec![item("a", 0, 3), item("b", 2, 3), item("c", 9, 3)];
        let alerts: Vec<_> = low_stock_alerts(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(alerts, vec!["b"]);
    }

    #[test]
    fn appointment_time_label() {
        let mut appt: Appointment = serde_json::from_value(json!({
            "id": 3,
            "appointmentDate": "2024-05-02T09:30:00",
            "client": {"nombre": "Luis", "apellido": "Mora"},
            "pet": {"name": "Toby"},
            "reason": "Vaccination",
            "status": "CONFIRMED"
        }))
        .unwrap();

        assert_eq!(appt.time_label(), "09:30");
        assert_eq!(appt.client_name(), "Luis Mora");
        assert_eq!(appt.status.tone(), Tone::Success);

        appt.appointment_date = "2024-05-02T16:05:00+02:00".to_string();
        assert_eq!(appt.time_label(), "16:05");

        appt.appointment_date = "tomorrow".to_string();
        assert_eq!(appt.time_label(), "Invalid date");
    }

    #[test]
    fn unknown_appointment_status_is_tolerated() {
        let appt: Appointment = serde_json::from_value(json!({
            "id": "a-1",
            "appointmentDate": "2024-05-02T09:30:00",
            "status": "NO_SHOW"
        }))
        .unwrap();
        assert_eq!(appt.status, AppointmentStatus::Unknown);
        assert_eq!(appt.pet_name(), "");
    }

    #[test]
    fn pet_list_reads_mascotas_with_spanish_fields() {
        let list: PetList = serde_json::from_value(json!({
            "mascotas": [
                {"id": 4, "nombre": "Luna", "especie": "Dog", "raza": "Beagle", "edad": 3},
                {"id": "p-5", "name": "Tom", "species": "Cat"}
            ]
        }))
        .unwrap();

        assert_eq!(list.mascotas.len(), 2);
        assert_eq!(list.mascotas[0].id, "4");
        assert_eq!(list.mascotas[0].summary(), "Dog (Beagle), 3 years");
        assert_eq!(list.mascotas[1].summary(), "Cat");
        assert_eq!(list.mascotas[1].field("age"), Cell::Empty);
    }

    #[test]
    fn medical_record_formats_visit_and_status() {
        let record: MedicalRecord = serde_json::from_value(json!({
            "id": 1,
            "fechaVisita": "2024-03-09T10:30:00",
            "veterinarianName": "Dr. Vera",
            "petName": "Luna",
            "motivoConsulta": "Vaccination",
            "diagnostico": "Healthy",
            "tratamiento": "Rabies booster",
            "estado": "ACTIVO"
        }))
        .unwrap();

        assert_eq!(record.visit_day(), "09/03/2024");
        assert!(record.is_active());
        assert_eq!(record.status_tone(), Tone::Success);
        assert_eq!(record.field("notes"), Cell::Empty);

        let closed = MedicalRecord {
            status: "CERRADO".to_string(),
            visit_date: "yesterday".to_string(),
            ..record
        };
        assert_eq!(closed.status_tone(), Tone::Neutral);
        assert_eq!(closed.visit_day(), "Invalid date");
    }
}
