//! Form validation result types
//!
//! Reason codes match the ones the web form renders
//! (`requiredField`, `invalidEmail`, ...). Fields are ordered by their
//! declaration order on the form so callers can focus the first
//! offending one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Form fields, in declaration order (the `Ord` impl follows it).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ReservationField {
    Name,
    Email,
    Phone,
    NumberOfPersons,
    Date,
    StartTime,
    Category,
}

impl ReservationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationField::Name => "name",
            ReservationField::Email => "email",
            ReservationField::Phone => "phone",
            ReservationField::NumberOfPersons => "numberOfPersons",
            ReservationField::Date => "date",
            ReservationField::StartTime => "startTime",
            ReservationField::Category => "category",
        }
    }
}

impl fmt::Display for ReservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error reason codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldError {
    RequiredField,
    InvalidEmail,
    InvalidPhone,
    InvalidNumberOfPersons,
    InvalidDate,
    PastDate,
    Monday,
}

/// Validation outcome: `valid` iff no field was flagged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<ReservationField, FieldError>,
}

impl ValidationResult {
    /// Flag a field. The first reason recorded for a field wins.
    pub fn flag(&mut self, field: ReservationField, reason: FieldError) {
        self.errors.entry(field).or_insert(reason);
    }

    /// Recompute `valid` after all rules ran.
    pub fn finish(mut self) -> Self {
        self.valid = self.errors.is_empty();
        self
    }

    /// First flagged field in form declaration order, for focus handling.
    pub fn first_invalid_field(&self) -> Option<ReservationField> {
        self.errors.keys().next().copied()
    }
}
