//! Reservation form validation
//!
//! Field rules mirror the web form: every rule runs independently and
//! all failures are collected, so the caller can render one message per
//! field and focus the first offending one (declaration order).

use chrono::NaiveDate;

use shared::models::ReservationForm;
use shared::validation::{FieldError, ReservationField, ValidationResult};

use crate::utils::time;

// ── Field limits ────────────────────────────────────────────────────

/// Smallest bookable party
pub const MIN_PARTY_SIZE: u32 = 2;

/// Phone digit count bounds after stripping formatting
pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

// ── Single-field rules ──────────────────────────────────────────────

/// `local@domain.tld` shape: no whitespace, one `@`, a dot inside the
/// domain with something on both sides.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |part: &str| {
        !part.is_empty() && !part.contains(char::is_whitespace) && !part.contains('@')
    };
    if !clean(local) || !clean(domain) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Digits only after stripping spaces/hyphens/parens/dots, 7–15 digits,
/// optional leading `+`.
pub fn validate_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// Date must parse, must not lie before `today`, and must not fall on
/// the weekly closing day (Monday).
pub fn validate_date(date: &str, today: NaiveDate) -> Result<(), FieldError> {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return Err(FieldError::InvalidDate);
    };
    if parsed < today {
        return Err(FieldError::PastDate);
    }
    if time::is_closed_on(parsed) {
        return Err(FieldError::Monday);
    }
    Ok(())
}

// ── Whole-form validation ───────────────────────────────────────────

/// Validate a reservation form. All errors are collected; no rule
/// short-circuits another field.
pub fn validate_reservation_form(form: &ReservationForm, today: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::default();

    if form.name.trim().is_empty() {
        result.flag(ReservationField::Name, FieldError::RequiredField);
    }

    if form.email.trim().is_empty() {
        result.flag(ReservationField::Email, FieldError::RequiredField);
    } else if !validate_email(&form.email) {
        result.flag(ReservationField::Email, FieldError::InvalidEmail);
    }

    if form.phone.trim().is_empty() {
        result.flag(ReservationField::Phone, FieldError::RequiredField);
    } else if !validate_phone(&form.phone) {
        result.flag(ReservationField::Phone, FieldError::InvalidPhone);
    }

    if form.number_of_persons < MIN_PARTY_SIZE {
        result.flag(
            ReservationField::NumberOfPersons,
            FieldError::InvalidNumberOfPersons,
        );
    }

    if let Err(reason) = validate_date(&form.date, today) {
        result.flag(ReservationField::Date, reason);
    }

    if form.start_time.is_none() {
        result.flag(ReservationField::StartTime, FieldError::RequiredField);
    }

    if form.category.is_none() {
        result.flag(ReservationField::Category, FieldError::RequiredField);
    }

    result.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::MealCategory;

    fn base_form() -> ReservationForm {
        ReservationForm {
            name: "Aiko Tanaka".to_string(),
            email: "aiko@example.com".to_string(),
            phone: "+39 06 1234567".to_string(),
            number_of_persons: 2,
            date: "2026-09-04".to_string(), // Friday
            category: Some(MealCategory::Dinner),
            start_time: Some("19:00".parse().unwrap()),
            notes: String::new(),
            preferred_language: "en".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    #[test]
    fn accepts_a_complete_form() {
        let result = validate_reservation_form(&base_form(), today());
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn party_of_one_flags_only_number_of_persons() {
        let form = ReservationForm {
            number_of_persons: 1,
            ..base_form()
        };
        let result = validate_reservation_form(&form, today());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors.get(&ReservationField::NumberOfPersons),
            Some(&FieldError::InvalidNumberOfPersons)
        );
    }

    #[test]
    fn monday_is_flagged_even_when_everything_else_is_valid() {
        let form = ReservationForm {
            date: "2026-09-07".to_string(), // Monday
            ..base_form()
        };
        let result = validate_reservation_form(&form, today());
        assert_eq!(
            result.errors.get(&ReservationField::Date),
            Some(&FieldError::Monday)
        );
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn past_and_unparseable_dates() {
        let past = ReservationForm {
            date: "2026-08-28".to_string(),
            ..base_form()
        };
        assert_eq!(
            validate_reservation_form(&past, today())
                .errors
                .get(&ReservationField::Date),
            Some(&FieldError::PastDate)
        );

        let garbled = ReservationForm {
            date: "next friday".to_string(),
            ..base_form()
        };
        assert_eq!(
            validate_reservation_form(&garbled, today())
                .errors
                .get(&ReservationField::Date),
            Some(&FieldError::InvalidDate)
        );
    }

    #[test]
    fn today_itself_is_bookable() {
        let form = ReservationForm {
            date: "2026-09-01".to_string(), // Tuesday, == today
            ..base_form()
        };
        assert!(validate_reservation_form(&form, today()).valid);
    }

    #[test]
    fn all_errors_are_collected_at_once() {
        let form = ReservationForm {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            phone: "12".to_string(),
            number_of_persons: 0,
            date: String::new(),
            category: None,
            start_time: None,
            notes: String::new(),
            preferred_language: "en".to_string(),
        };
        let result = validate_reservation_form(&form, today());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 7);
        assert_eq!(result.first_invalid_field(), Some(ReservationField::Name));
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.it"));
        assert!(validate_email("  padded@domain.co.jp  "));
        assert!(!validate_email("missing-at.example.com"));
        assert!(!validate_email("a@nodot"));
        assert!(!validate_email("a@.it"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email("two words@b.it"));
        assert!(!validate_email("a@@b.it"));
    }

    #[test]
    fn phone_shapes() {
        assert!(validate_phone("0612345678"));
        assert!(validate_phone("+39 (06) 123-45.67"));
        assert!(validate_phone("1234567")); // 7 digits, lower bound
        assert!(!validate_phone("123456")); // too short
        assert!(!validate_phone("1234567890123456")); // 16 digits
        assert!(!validate_phone("06-CALL-KOENJI"));
        assert!(!validate_phone("06+1234567")); // plus must lead
    }
}
