use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted booking: one customer holding one or more seats for a
/// (date, outlet) pair. Records are append-only, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub name: String,
    pub hp: String,
    pub date: String,
    pub time: String,
    pub outlet: String,
    pub seats: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Validated input for a reservation about to be created. Seat order is the
/// caller's submission order and is preserved through conflict reporting.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub name: String,
    pub hp: String,
    pub date: String,
    pub time: String,
    pub outlet: String,
    pub seats: Vec<String>,
}

impl Reservation {
    pub fn new(input: NewReservation) -> Self {
        Self {
            id: format!("resv-{}", Uuid::new_v4()),
            name: input.name,
            hp: input.hp,
            date: input.date,
            time: input.time,
            outlet: input.outlet,
            seats: input.seats,
            created_at: Utc::now(),
        }
    }
}
