//! # Error Types
//!
//! Domain-specific error types for shareit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shareit-core errors (this file)                                       │
//! │  ├── CoreError        - Booking rule violations, missing records       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shareit-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What the client sees (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! Every variant is either a "not found" or a "bad request" from the
//! client's point of view. [`CoreError::is_not_found`] is the single place
//! that decides which.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Booking rule violations and missing records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No user with this id in the user directory.
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// No item with this id in the item catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// No booking with this id.
    #[error("Booking not found: {0}")]
    BookingNotFound(i64),

    /// An owner tried to book their own item.
    ///
    /// ## When This Occurs
    /// ```text
    /// POST /bookings  (X-Sharer-User-Id: 1)
    ///      │
    ///      ▼
    /// item.owner_id == 1
    ///      │
    ///      ▼
    /// OwnItem { item_id }   → 404, the item is not bookable for this user
    /// ```
    #[error("Item {item_id} cannot be booked by its owner")]
    OwnItem { item_id: i64 },

    /// Item is flagged unavailable by its owner.
    #[error("Item {item_id} is not available for booking")]
    ItemUnavailable { item_id: i64 },

    /// An APPROVED booking already covers part of the requested period.
    ///
    /// Advisory only: checked at creation time, not re-verified on approval.
    #[error("Item {item_id} is already booked for the requested period")]
    AlreadyBooked { item_id: i64 },

    /// The booker tried to approve or reject their own request.
    #[error("User {user_id} cannot approve booking {booking_id}")]
    SelfApproval { booking_id: i64, user_id: i64 },

    /// Wrong user for the transition, or the booking is no longer WAITING.
    #[error("Booking {booking_id} cannot be updated")]
    NotUpdatable { booking_id: i64 },

    /// The user is neither the booker nor the item owner.
    #[error("User {user_id} has no access to booking {booking_id}")]
    NoStanding { booking_id: i64, user_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true when the error should surface as "not found".
    ///
    /// Self-booking, self-approval and missing standing are reported as
    /// not found: the acting user has no business with the record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::UserNotFound(_)
                | CoreError::ItemNotFound(_)
                | CoreError::BookingNotFound(_)
                | CoreError::OwnItem { .. }
                | CoreError::SelfApproval { .. }
                | CoreError::NoStanding { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// They are raised before any booking record is read or written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Start and end of a booking are the same instant.
    #[error("Booking start and end must differ")]
    EmptyPeriod,

    /// Start of a booking falls on a date before today.
    #[error("Booking start date is in the past")]
    StartInPast,

    /// End is before start, or end falls on a date before today.
    #[error("Booking period is invalid")]
    InvalidPeriod,

    /// State facet did not match any known name.
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-numeric user id header).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
