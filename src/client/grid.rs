//! Seat grid view-model: fixed row×column topology, reservation overlay, and
//! the user's in-flight selection.
//!
//! Selection state is owned here rather than living as ambient globals; the
//! session passes it into render and submit explicitly.

/// Fixed rectangular seat topology. Seat ids are the row label concatenated
/// with the column number (`A1`, `B5`).
#[derive(Debug, Clone)]
pub struct SeatGrid {
    rows: Vec<char>,
    cols: Vec<u32>,
}

impl Default for SeatGrid {
    // Two rows A and B, 5 columns (A1..A5, B1..B5)
    fn default() -> Self {
        Self::new(vec!['A', 'B'], (1..=5).collect())
    }
}

impl SeatGrid {
    pub fn new(rows: Vec<char>, cols: Vec<u32>) -> Self {
        Self { rows, cols }
    }

    /// All seat ids in row-major order.
    pub fn seat_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| self.cols.iter().map(move |col| format!("{row}{col}")))
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.seat_ids().any(|id| id == seat_id)
    }

    /// One cell per seat, marking reserved seats non-interactive and the rest
    /// available or selected.
    pub fn render(&self, reserved: &[String], selection: &Selection) -> Vec<SeatCell> {
        self.seat_ids()
            .map(|id| {
                let status = if reserved.iter().any(|r| *r == id) {
                    SeatStatus::Reserved
                } else if selection.contains(&id) {
                    SeatStatus::Selected
                } else {
                    SeatStatus::Available
                };
                SeatCell { id, status }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Available,
    Selected,
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub id: String,
    pub status: SeatStatus,
}

/// The user's current seat picks, in toggle order. Submission sends seats in
/// this order, which is also the order conflicts are reported in.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    seats: Vec<String>,
}

impl Selection {
    /// Toggle a seat in or out of the selection. Returns true when the seat is
    /// selected after the call.
    pub fn toggle(&mut self, seat_id: &str) -> bool {
        if let Some(pos) = self.seats.iter().position(|s| s == seat_id) {
            self.seats.remove(pos);
            false
        } else {
            self.seats.push(seat_id.to_string());
            true
        }
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s == seat_id)
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.seats
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Drop any selected seat that has become reserved (booked by another
    /// actor between refreshes).
    pub fn prune_reserved(&mut self, reserved: &[String]) {
        self.seats.retain(|s| !reserved.contains(s));
    }

    /// Display summary: comma-joined ids, or `-` when nothing is picked.
    pub fn summary(&self) -> String {
        if self.seats.is_empty() {
            "-".to_string()
        } else {
            self.seats.join(", ")
        }
    }
}
