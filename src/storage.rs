use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{NewReservation, Reservation};

/// Flat-file reservation store: one JSON array of [`Reservation`] records,
/// fully rewritten on every successful create.
///
/// Reads load the current file snapshot without locking. The whole
/// read-check-append sequence of [`create`](Self::create) runs behind a single
/// write lock, so two concurrent creates cannot both pass the conflict check
/// against the same stale snapshot.
pub struct ReservationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReservationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot of all reservations. An absent, empty, or unparsable
    /// file degrades to an empty store rather than failing the request.
    pub async fn load(&self) -> Vec<Reservation> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        if raw.is_empty() {
            return Vec::new();
        }
        match serde_json::from_slice(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(
                    "reservation file {} is unparsable, treating as empty: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Seats already booked for the given (date, outlet), flattened across all
    /// matching reservations in store order. Duplicates are preserved.
    pub async fn reserved_seats(&self, date: &str, outlet: &str) -> Vec<String> {
        reserved_for(&self.load().await, date, outlet)
    }

    /// Conflict-checked create. Rejects with the first seat of the submitted
    /// order that is already taken for the same (date, outlet); a rejected
    /// request never touches the file.
    pub async fn create(&self, input: NewReservation) -> Result<Reservation, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut data = self.load().await;
        let taken = reserved_for(&data, &input.date, &input.outlet);
        if let Some(seat) = input.seats.iter().find(|s| taken.contains(s)) {
            return Err(StoreError::SeatTaken(seat.clone()));
        }

        let reservation = Reservation::new(input);
        data.push(reservation.clone());
        self.persist(&data).await?;
        debug!(
            "stored reservation {} ({} seats, {} total records)",
            reservation.id,
            reservation.seats.len(),
            data.len()
        );
        Ok(reservation)
    }

    // Full rewrite through a sibling tmp file + rename: a crash mid-write
    // leaves the previous snapshot intact instead of a torn file.
    async fn persist(&self, data: &[Reservation]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Flatten the seats of every reservation matching (date, outlet) exactly.
/// Comparison is case-sensitive string equality, no normalization.
pub fn reserved_for(all: &[Reservation], date: &str, outlet: &str) -> Vec<String> {
    all.iter()
        .filter(|r| r.date == date && r.outlet == outlet)
        .flat_map(|r| r.seats.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resv(date: &str, outlet: &str, seats: &[&str]) -> Reservation {
        Reservation::new(NewReservation {
            name: "Tester".to_string(),
            hp: "0800".to_string(),
            date: date.to_string(),
            time: "19:00".to_string(),
            outlet: outlet.to_string(),
            seats: seats.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn reserved_for_filters_on_exact_pair() {
        let all = vec![
            resv("2025-10-06", "Main", &["A1", "A2"]),
            resv("2025-10-06", "Branch", &["A1"]),
            resv("2025-10-07", "Main", &["B5"]),
        ];
        assert_eq!(reserved_for(&all, "2025-10-06", "Main"), vec!["A1", "A2"]);
        assert_eq!(reserved_for(&all, "2025-10-06", "Branch"), vec!["A1"]);
        assert_eq!(reserved_for(&all, "2025-10-08", "Main"), Vec::<String>::new());
    }

    #[test]
    fn reserved_for_is_case_sensitive() {
        let all = vec![resv("2025-10-06", "Main", &["A1"])];
        assert!(reserved_for(&all, "2025-10-06", "main").is_empty());
    }

    #[test]
    fn reserved_for_keeps_duplicates_and_store_order() {
        let all = vec![
            resv("2025-10-06", "Main", &["B2", "A1", "A1"]),
            resv("2025-10-06", "Main", &["C3"]),
        ];
        assert_eq!(
            reserved_for(&all, "2025-10-06", "Main"),
            vec!["B2", "A1", "A1", "C3"]
        );
    }

    proptest! {
        // Flattening must pull seats from exactly the matching reservations,
        // in store order, and from nowhere else.
        #[test]
        fn reserved_for_matches_manual_flatten(
            records in prop::collection::vec(
                (
                    prop::sample::select(vec!["2025-10-06", "2025-10-07"]),
                    prop::sample::select(vec!["Main", "Branch"]),
                    prop::collection::vec("[A-B][1-5]", 1..4),
                ),
                0..8,
            ),
            date in prop::sample::select(vec!["2025-10-06", "2025-10-07"]),
            outlet in prop::sample::select(vec!["Main", "Branch"]),
        ) {
            let all: Vec<Reservation> = records
                .iter()
                .map(|(d, o, seats)| {
                    let refs: Vec<&str> = seats.iter().map(String::as_str).collect();
                    resv(d, o, &refs)
                })
                .collect();

            let mut expected = Vec::new();
            for r in &all {
                if r.date == date && r.outlet == outlet {
                    expected.extend(r.seats.clone());
                }
            }
            prop_assert_eq!(reserved_for(&all, date, outlet), expected);
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReservationStore::new(dir.path().join("reservations.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reservations.json");
        tokio::fs::write(&path, b"{ not json").await.expect("write");
        let store = ReservationStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn create_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReservationStore::new(dir.path().join("reservations.json"));

        let created = store
            .create(NewReservation {
                name: "Ann".to_string(),
                hp: "0811".to_string(),
                date: "2025-10-06".to_string(),
                time: "19:00".to_string(),
                outlet: "Main".to_string(),
                seats: vec!["A1".to_string(), "A2".to_string()],
            })
            .await
            .expect("create");
        assert!(created.id.starts_with("resv-"));

        let all = store.load().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(store.reserved_seats("2025-10-06", "Main").await, vec!["A1", "A2"]);
    }

    #[tokio::test]
    async fn create_rejects_first_conflicting_seat_in_submission_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReservationStore::new(dir.path().join("reservations.json"));

        store
            .create(NewReservation {
                name: "Ann".to_string(),
                hp: "0811".to_string(),
                date: "2025-10-06".to_string(),
                time: "19:00".to_string(),
                outlet: "Main".to_string(),
                seats: vec!["A2".to_string(), "B1".to_string()],
            })
            .await
            .expect("first create");

        // B1 comes before A2 in the submitted order, so B1 must be reported
        // even though A2 sorts first.
        let err = store
            .create(NewReservation {
                name: "Ben".to_string(),
                hp: "0812".to_string(),
                date: "2025-10-06".to_string(),
                time: "20:00".to_string(),
                outlet: "Main".to_string(),
                seats: vec!["B1".to_string(), "A2".to_string()],
            })
            .await
            .expect_err("conflict");
        match err {
            StoreError::SeatTaken(seat) => assert_eq!(seat, "B1"),
            other => panic!("unexpected error: {other:?}"),
        }

        // Rejected request must not have touched the file.
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_creates_for_same_seat_yield_one_winner() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = std::sync::Arc::new(ReservationStore::new(dir.path().join("reservations.json")));

        let input = |name: &str| NewReservation {
            name: name.to_string(),
            hp: "0811".to_string(),
            date: "2025-10-06".to_string(),
            time: "19:00".to_string(),
            outlet: "Main".to_string(),
            seats: vec!["A1".to_string()],
        };

        let a = tokio::spawn({
            let store = store.clone();
            let input = input("Ann");
            async move { store.create(input).await }
        });
        let b = tokio::spawn({
            let store = store.clone();
            let input = input("Ben");
            async move { store.create(input).await }
        });

        let (ra, rb) = (a.await.expect("join"), b.await.expect("join"));
        let successes = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one of two racing creates may win");
        assert_eq!(store.load().await.len(), 1);
    }
}
