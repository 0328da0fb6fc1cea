//! Shared types for the Koenji reservation system
//!
//! Wire-level types used by the booking server and its clients: the
//! reservation document model, time/category primitives, availability
//! DTOs, validation results and the unified API response envelope.

pub mod availability;
pub mod models;
pub mod response;
pub mod types;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use availability::{AvailabilityQuery, AvailabilityResult};
pub use response::ApiResponse;
pub use types::{MealCategory, TimeOfDay};
pub use validation::{FieldError, ReservationField, ValidationResult};
