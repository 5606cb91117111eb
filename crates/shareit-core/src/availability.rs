//! # Item Availability
//!
//! Reduces one item's bookings to the "last" and "next" booking shown on
//! item pages. Computed on every read, never stored.
//!
//! ```text
//!            now
//!             │
//!   ──[T-2]──[T-1]──┼──────────[T+3]────►  end instants
//!    start<=now     │     start>now, not REJECTED
//!   last = max end  │     next = min end
//! ```

use chrono::NaiveDateTime;

use crate::types::{BookingShort, BookingStatus, BookingView, Item, ItemView};

/// Last/next booking summaries for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAvailability {
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
}

/// Projects `bookings` of a single item onto last/next at `now`.
///
/// - last: the latest `end` among bookings that started at or before `now`
/// - next: the earliest `end` among bookings starting after `now` that were
///   not rejected
pub fn project(bookings: &[BookingView], now: NaiveDateTime) -> ItemAvailability {
    let last_booking = bookings
        .iter()
        .filter(|b| b.start <= now)
        .max_by_key(|b| b.end)
        .map(BookingShort::from);

    let next_booking = bookings
        .iter()
        .filter(|b| b.start > now && b.status != BookingStatus::Rejected)
        .min_by_key(|b| b.end)
        .map(BookingShort::from);

    ItemAvailability {
        last_booking,
        next_booking,
    }
}

impl ItemView {
    /// Item detail with its projected last/next booking.
    pub fn from_parts(item: Item, availability: ItemAvailability) -> Self {
        ItemView {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            last_booking: availability.last_booking,
            next_booking: availability.next_booking,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
