//! Booking client: the seat-grid view-model plus the HTTP flows the browser
//! app performs against the two reservation endpoints.

pub mod api;
pub mod grid;

use thiserror::Error;
use tracing::warn;

pub use api::{ReservationApi, ReservationRequest};
pub use grid::{SeatCell, SeatGrid, SeatStatus, Selection};

use crate::models::Reservation;

/// Client-side failures. Display strings are the user-facing messages,
/// including the fixed `Gagal: ` prefix wrapping server rejection text.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Pilih tanggal dan outlet terlebih dahulu.")]
    MissingDateOutlet,
    #[error("Pilih minimal 1 kursi.")]
    NoSeatsSelected,
    #[error("Gagal: {0}")]
    Rejected(String),
    #[error("Error memuat kursi.")]
    LoadFailed(#[source] reqwest::Error),
    #[error("Error saat mengirim reservasi.")]
    SubmitFailed(#[source] reqwest::Error),
}

/// Booking form fields as entered by the user. A blank time falls back to the
/// `00:00` sentinel at submission.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub name: String,
    pub hp: String,
    pub date: String,
    pub time: String,
    pub outlet: String,
}

/// One user's booking view: grid topology, last-known reserved seats, and the
/// current selection. All state lives here, not in globals.
#[derive(Debug)]
pub struct BookingSession {
    grid: SeatGrid,
    api: ReservationApi,
    reserved: Vec<String>,
    selection: Selection,
}

impl BookingSession {
    pub fn new(api: ReservationApi) -> Self {
        Self::with_grid(api, SeatGrid::default())
    }

    pub fn with_grid(api: ReservationApi, grid: SeatGrid) -> Self {
        Self {
            grid,
            api,
            reserved: Vec::new(),
            selection: Selection::default(),
        }
    }

    pub fn render(&self) -> Vec<SeatCell> {
        self.grid.render(&self.reserved, &self.selection)
    }

    /// Current selection summary for display (`-` when empty).
    pub fn picked(&self) -> String {
        self.selection.summary()
    }

    pub fn selected_seats(&self) -> &[String] {
        self.selection.as_slice()
    }

    pub fn reserved_seats(&self) -> &[String] {
        &self.reserved
    }

    /// Toggle a seat. Reserved seats are non-interactive and unknown ids are
    /// ignored; returns whether the seat is selected after the call.
    pub fn toggle_seat(&mut self, seat_id: &str) -> bool {
        if !self.grid.contains(seat_id) || self.reserved.iter().any(|r| r == seat_id) {
            return false;
        }
        self.selection.toggle(seat_id)
    }

    /// Refresh the reserved set for (date, outlet). Requires both values; on
    /// failure the previous reserved set and selection are left untouched. On
    /// success, selected seats that were booked elsewhere are dropped.
    pub async fn load_reserved(&mut self, date: &str, outlet: &str) -> Result<(), ClientError> {
        if date.is_empty() || outlet.is_empty() {
            return Err(ClientError::MissingDateOutlet);
        }

        let reserved = self.api.reserved_seats(date, outlet).await?;
        self.selection.prune_reserved(&reserved);
        self.reserved = reserved;
        Ok(())
    }

    /// Submit the current selection. On success the selection is cleared and
    /// the reserved set re-fetched so the new booking shows up as reserved; on
    /// rejection the selection is kept so the user can adjust and retry.
    pub async fn submit(&mut self, form: &BookingForm) -> Result<Reservation, ClientError> {
        if self.selection.is_empty() {
            return Err(ClientError::NoSeatsSelected);
        }

        let time = if form.time.is_empty() {
            "00:00".to_string()
        } else {
            form.time.clone()
        };
        let request = ReservationRequest {
            name: form.name.trim().to_string(),
            hp: form.hp.trim().to_string(),
            date: form.date.clone(),
            time,
            outlet: form.outlet.clone(),
            seats: self.selection.as_slice().to_vec(),
        };

        let reservation = self.api.reserve(&request).await?;

        // Explicit re-synchronization, not an optimistic local update: the
        // refreshed list includes the seats this very call just booked.
        self.selection.clear();
        if let Err(err) = self.load_reserved(&form.date, &form.outlet).await {
            warn!("reserved list refresh after booking failed: {}", err);
        }
        Ok(reservation)
    }
}
