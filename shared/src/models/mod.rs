//! 数据模型

pub mod reservation;

pub use reservation::{
    Acceptance, Reservation, ReservationForm, ReservationStatus,
};
