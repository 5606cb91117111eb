//! # Validation Module
//!
//! Input validation for booking requests and listing parameters.
//!
//! ## Booking Request Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_booking_request  (first failing check wins)                   │
//! │                                                                         │
//! │  1. item.owner_id == renter        → OwnItem                            │
//! │  2. !item.available                → ItemUnavailable                    │
//! │  3. start missing                  → Required { "start" }               │
//! │  4. end missing                    → Required { "end" }                 │
//! │  5. start == end                   → EmptyPeriod                        │
//! │  6. start.date() < today           → StartInPast                        │
//! │  7. end < start || end.date() < today → InvalidPeriod                   │
//! │                                                                         │
//! │  Checks 6 and 7 compare calendar dates against today, so a booking     │
//! │  may start earlier today. Check 7 orders full timestamps.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::query::PageRequest;
use crate::types::{BookingPeriod, ItemSnapshot, NewBooking};
use crate::DEFAULT_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Booking Request
// =============================================================================

/// Validates a booking request against the item snapshot and today's date.
///
/// ## Returns
/// The validated period, for which `start < end` holds.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use shareit_core::types::{ItemSnapshot, NewBooking};
/// use shareit_core::validation::validate_booking_request;
///
/// let item = ItemSnapshot { id: 1, owner_id: 1, available: true };
/// let req = NewBooking {
///     item_id: 1,
///     start: Some("2030-01-16T10:00:00".parse().unwrap()),
///     end: Some("2030-01-16T12:00:00".parse().unwrap()),
/// };
/// let today = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();
///
/// assert!(validate_booking_request(2, &item, &req, today).is_ok());
/// assert!(validate_booking_request(1, &item, &req, today).is_err()); // own item
/// ```
pub fn validate_booking_request(
    renter_id: i64,
    item: &ItemSnapshot,
    request: &NewBooking,
    today: NaiveDate,
) -> CoreResult<BookingPeriod> {
    if item.owner_id == renter_id {
        return Err(CoreError::OwnItem { item_id: item.id });
    }

    if !item.available {
        return Err(CoreError::ItemUnavailable { item_id: item.id });
    }

    let start = request.start.ok_or_else(|| ValidationError::Required {
        field: "start".to_string(),
    })?;

    let end = request.end.ok_or_else(|| ValidationError::Required {
        field: "end".to_string(),
    })?;

    if start == end {
        return Err(ValidationError::EmptyPeriod.into());
    }

    if start.date() < today {
        return Err(ValidationError::StartInPast.into());
    }

    if end < start || end.date() < today {
        return Err(ValidationError::InvalidPeriod.into());
    }

    Ok(BookingPeriod::new(start, end))
}

// =============================================================================
// Pagination
// =============================================================================

/// Validates optional `from`/`size` listing parameters.
///
/// ## Rules
/// - Neither supplied: no paging (`Ok(None)`)
/// - `size` must be positive, `from` must not be negative
/// - One supplied alone: the other takes its default (`from = 0`,
///   `size = DEFAULT_PAGE_SIZE`)
///
/// ## Example
/// ```rust
/// use shareit_core::validation::validate_page_params;
///
/// assert!(validate_page_params(None, None).unwrap().is_none());
/// assert!(validate_page_params(Some(0), Some(10)).unwrap().is_some());
/// assert!(validate_page_params(Some(-1), Some(10)).is_err());
/// assert!(validate_page_params(Some(0), Some(0)).is_err());
/// ```
pub fn validate_page_params(
    from: Option<i64>,
    size: Option<i64>,
) -> ValidationResult<Option<PageRequest>> {
    if from.is_none() && size.is_none() {
        return Ok(None);
    }

    let from = from.unwrap_or(0);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

    if from < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "from".to_string(),
        });
    }

    if size <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "size".to_string(),
        });
    }

    Ok(Some(PageRequest::new(from, size)))
}

// =============================================================================
// Identifiers
// =============================================================================

/// Parses the acting user id as sent in a request header.
pub fn parse_user_id(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "user id".to_string(),
        });
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "user id".to_string(),
            reason: "must be an integer".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()
    }

    fn item() -> ItemSnapshot {
        ItemSnapshot {
            id: 10,
            owner_id: 1,
            available: true,
        }
    }

    fn request(start: Option<&str>, end: Option<&str>) -> NewBooking {
        NewBooking {
            item_id: 10,
            start: start.map(at),
            end: end.map(at),
        }
    }

    #[test]
    fn test_valid_request_tomorrow() {
        let req = request(Some("2030-01-16T10:00:00"), Some("2030-01-16T12:00:00"));
        let period = validate_booking_request(2, &item(), &req, today()).unwrap();

        assert_eq!(period.start(), at("2030-01-16T10:00:00"));
        assert_eq!(period.end(), at("2030-01-16T12:00:00"));
    }

    #[test]
    fn test_start_earlier_today_is_allowed() {
        // Only the date is compared, so 00:01 today passes even at noon.
        let req = request(Some("2030-01-15T00:01:00"), Some("2030-01-15T18:00:00"));
        assert!(validate_booking_request(2, &item(), &req, today()).is_ok());
    }

    #[test]
    fn test_own_item_fails_regardless_of_dates() {
        let req = request(None, None);
        let err = validate_booking_request(1, &item(), &req, today()).unwrap_err();
        assert!(matches!(err, CoreError::OwnItem { item_id: 10 }));
    }

    #[test]
    fn test_unavailable_item() {
        let unavailable = ItemSnapshot {
            available: false,
            ..item()
        };
        let req = request(Some("2030-01-16T10:00:00"), Some("2030-01-16T12:00:00"));
        let err = validate_booking_request(2, &unavailable, &req, today()).unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { item_id: 10 }));
    }

    #[test]
    fn test_missing_start_then_missing_end() {
        let err = validate_booking_request(2, &item(), &request(None, None), today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "start"
        ));

        let req = request(Some("2030-01-16T10:00:00"), None);
        let err = validate_booking_request(2, &item(), &req, today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "end"
        ));
    }

    #[test]
    fn test_zero_length_period() {
        let req = request(Some("2030-01-16T10:00:00"), Some("2030-01-16T10:00:00"));
        let err = validate_booking_request(2, &item(), &req, today()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyPeriod)));
    }

    #[test]
    fn test_start_yesterday_fails() {
        let req = request(Some("2030-01-14T23:59:00"), Some("2030-01-16T12:00:00"));
        let err = validate_booking_request(2, &item(), &req, today()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::StartInPast)));
    }

    #[test]
    fn test_end_before_start_fails() {
        let req = request(Some("2030-01-16T12:00:00"), Some("2030-01-16T10:00:00"));
        let err = validate_booking_request(2, &item(), &req, today()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidPeriod)));
    }

    #[test]
    fn test_page_params() {
        assert_eq!(validate_page_params(None, None), Ok(None));
        assert_eq!(
            validate_page_params(Some(20), Some(10)),
            Ok(Some(PageRequest::new(20, 10)))
        );
        assert_eq!(
            validate_page_params(None, Some(5)),
            Ok(Some(PageRequest::new(0, 5)))
        );
        assert_eq!(
            validate_page_params(Some(3), None),
            Ok(Some(PageRequest::new(3, DEFAULT_PAGE_SIZE)))
        );
        assert!(validate_page_params(Some(-1), Some(10)).is_err());
        assert!(validate_page_params(Some(0), Some(0)).is_err());
        assert!(validate_page_params(Some(0), Some(-3)).is_err());
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42"), Ok(42));
        assert_eq!(parse_user_id(" 7 "), Ok(7));
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("abc").is_err());
    }
}
