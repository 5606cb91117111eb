//! # Domain Types
//!
//! Core domain types used throughout ShareIt.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Item       │   │    Booking      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  owner_id       │   │  start / end    │       │
//! │  │  email          │   │  available      │   │  item, booker   │       │
//! │  └─────────────────┘   └─────────────────┘   │  status         │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ItemSnapshot   │   │  BookingStatus  │   │  BookingView    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, owner_id,  │   │  WAITING        │   │  wire shape,    │       │
//! │  │  available      │   │  APPROVED       │   │  never stored   │       │
//! │  └─────────────────┘   │  REJECTED       │   └─────────────────┘       │
//! │                        │  CANCELED       │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//! Booking periods are naive local date-times (`2026-10-20T10:00:00` on the
//! wire). "Now" comes from [`crate::clock::Clock`], never from the system.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Booking Status
// =============================================================================

/// Lifecycle state of a booking.
///
/// ```text
///            approve(true)
///   WAITING ───────────────► APPROVED
///      │  │   approve(false)
///      │  └────────────────► REJECTED
///      │      cancel (booker)
///      └───────────────────► CANCELED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision. The only creation state.
    Waiting,
    /// Accepted by the owner.
    Approved,
    /// Declined by the owner.
    Rejected,
    /// Withdrawn by the booker before a decision.
    Canceled,
}

impl BookingStatus {
    /// All statuses, in declaration order.
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Waiting,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Canceled,
    ];

    /// The canonical upper-case name (`"WAITING"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }

    /// True once the owner (or booker) has made a final decision.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Waiting)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Waiting
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: only the exact upper-case names parse.
impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

// =============================================================================
// User
// =============================================================================

/// A user record as held by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Short user projection used inside booking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserShort {
    pub id: i64,
    pub name: String,
}

impl From<&User> for UserShort {
    fn from(user: &User) -> Self {
        UserShort {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// An item record as held by the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
}

impl Item {
    /// The minimal fact set needed to validate a booking request.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            owner_id: self.owner_id,
            available: self.available,
        }
    }
}

/// What the booking engine needs to know about an item, and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub id: i64,
    pub owner_id: i64,
    pub available: bool,
}

/// Short item projection used inside booking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemShort {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation of one item by one user for a period.
///
/// Only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub item: ItemShort,
    /// Owner of `item` at read time; drives approval rights.
    pub item_owner_id: i64,
    pub booker: UserShort,
    pub status: BookingStatus,
}

/// Booking request as received from a client.
///
/// `start`/`end` are optional so that a missing field is reported by the
/// validation chain with its own error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewBooking {
    pub item_id: i64,
    #[ts(as = "Option<String>")]
    pub start: Option<NaiveDateTime>,
    #[ts(as = "Option<String>")]
    pub end: Option<NaiveDateTime>,
}

/// A validated booking period: `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl BookingPeriod {
    /// Only constructed by [`crate::validation::validate_booking_request`].
    pub(crate) fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end);
        BookingPeriod { start, end }
    }

    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

// =============================================================================
// Views
// =============================================================================

/// The externally observable shape of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingView {
    pub id: i64,
    #[ts(as = "String")]
    pub start: NaiveDateTime,
    #[ts(as = "String")]
    pub end: NaiveDateTime,
    pub item: ItemShort,
    pub booker: UserShort,
    pub status: BookingStatus,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        BookingView {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            item: booking.item,
            booker: booking.booker,
            status: booking.status,
        }
    }
}

/// Booking summary embedded in item views as last/next booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    #[ts(as = "String")]
    pub start: NaiveDateTime,
    #[ts(as = "String")]
    pub end: NaiveDateTime,
}

impl From<&BookingView> for BookingShort {
    fn from(view: &BookingView) -> Self {
        BookingShort {
            id: view.id,
            booker_id: view.booker.id,
            start: view.start,
            end: view.end,
        }
    }
}

/// Item detail with derived booking summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
}

// =============================================================================
// Unit Tests
// =============================================================================
