//! # Listing Queries
//!
//! The parameters of a faceted booking listing: whose bookings
//! ([`BookingParty`]), which slice of them ([`StateFacet`]) and which page
//! ([`PageRequest`]).
//!
//! ## Facet Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Facet      Predicate (now = clock instant at call time)               │
//! │  ────────   ─────────────────────────────────────────────              │
//! │  ALL        (none)                                                     │
//! │  CURRENT    start < now AND end > now                                  │
//! │  PAST       end < now                                                  │
//! │  FUTURE     start > now                                                │
//! │  WAITING…   status = <that status>                                     │
//! │                                                                         │
//! │  Every listing is ordered by start DESC.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::ValidationError;
use crate::types::{BookingStatus, BookingView};

// =============================================================================
// State Facet
// =============================================================================

/// Named filter over a user's bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFacet {
    All,
    Current,
    Past,
    Future,
    Status(BookingStatus),
}

impl StateFacet {
    /// Resolves an optional facet name; absent means [`StateFacet::All`].
    pub fn parse(state: Option<&str>) -> Result<Self, ValidationError> {
        match state {
            None => Ok(StateFacet::All),
            Some(name) => name.parse(),
        }
    }

    /// Evaluates the facet predicate in memory.
    ///
    /// The store applies the same predicate in SQL; this is the reference
    /// used by tests and by callers that already hold the bookings.
    pub fn matches(&self, booking: &BookingView, now: NaiveDateTime) -> bool {
        match self {
            StateFacet::All => true,
            StateFacet::Current => booking.start < now && booking.end > now,
            StateFacet::Past => booking.end < now,
            StateFacet::Future => booking.start > now,
            StateFacet::Status(status) => booking.status == *status,
        }
    }
}

impl Default for StateFacet {
    fn default() -> Self {
        StateFacet::All
    }
}

/// Exact, case-sensitive match against the facet and status names.
impl FromStr for StateFacet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(StateFacet::All),
            "CURRENT" => Ok(StateFacet::Current),
            "PAST" => Ok(StateFacet::Past),
            "FUTURE" => Ok(StateFacet::Future),
            other => other
                .parse::<BookingStatus>()
                .map(StateFacet::Status)
                .map_err(|_| ValidationError::UnknownState(other.to_string())),
        }
    }
}

impl fmt::Display for StateFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateFacet::All => f.write_str("ALL"),
            StateFacet::Current => f.write_str("CURRENT"),
            StateFacet::Past => f.write_str("PAST"),
            StateFacet::Future => f.write_str("FUTURE"),
            StateFacet::Status(status) => fmt::Display::fmt(status, f),
        }
    }
}

// =============================================================================
// Booking Party
// =============================================================================

/// Whose perspective a listing is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty {
    /// Bookings the user requested.
    Booker(i64),
    /// Bookings on items the user owns.
    Owner(i64),
}

impl BookingParty {
    pub fn user_id(&self) -> i64 {
        match self {
            BookingParty::Booker(id) | BookingParty::Owner(id) => *id,
        }
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A validated page of a listing.
///
/// `from` is rounded down to a page boundary: the page index is
/// `from / size`, so `from = 5, size = 10` returns rows 0..10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    from: i64,
    size: i64,
}

impl PageRequest {
    /// Built through [`crate::validation::validate_page_params`].
    pub(crate) fn new(from: i64, size: i64) -> Self {
        PageRequest { from, size }
    }

    /// Zero-based page index.
    #[inline]
    pub fn page(&self) -> i64 {
        self.from / self.size
    }

    /// Rows per page (SQL `LIMIT`).
    #[inline]
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Rows skipped (SQL `OFFSET`).
    #[inline]
    pub fn offset(&self) -> i64 {
        self.page() * self.size
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
