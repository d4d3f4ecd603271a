pub mod reservation;

pub use reservation::{NewReservation, Reservation};
