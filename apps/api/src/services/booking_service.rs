//! Booking engine.
//!
//! ## Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(renter, request)                                                │
//! │                                                                         │
//! │  item catalog ──► ItemNotFound                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_booking_request (own item, availability, dates vs today)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  user directory ──► UserNotFound                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  APPROVED overlap? ──► AlreadyBooked   (advisory, not re-checked later) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert WAITING booking                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Listing
//! Page parameters are validated first, then the user is resolved, then the
//! facet name is parsed. Only then is the store queried.

use std::sync::Arc;

use shareit_core::validation::{validate_booking_request, validate_page_params};
use shareit_core::{
    BookingParty, BookingView, Clock, CoreError, NewBooking, StateFacet, User,
};
use shareit_db::{Database, DbResult};
use tracing::info;

/// Booking lifecycle and listing operations.
#[derive(Debug, Clone)]
pub struct BookingService {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        BookingService { db, clock }
    }

    /// Validates and persists a WAITING booking for `renter_id`.
    pub async fn create(&self, renter_id: i64, request: NewBooking) -> DbResult<BookingView> {
        let item = self
            .db
            .items()
            .get_by_id(request.item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(request.item_id))?;

        let period =
            validate_booking_request(renter_id, &item.snapshot(), &request, self.clock.today())?;

        let renter = self.require_user(renter_id).await?;

        let bookings = self.db.bookings();

        if bookings
            .has_approved_overlap(item.id, period.start(), period.end())
            .await?
        {
            return Err(CoreError::AlreadyBooked { item_id: item.id }.into());
        }

        let booking = bookings.insert(item.id, renter.id, &period).await?;

        info!(
            booking_id = %booking.id,
            item_id = %item.id,
            booker_id = %renter.id,
            "Booking created"
        );

        Ok(booking.into())
    }

    /// Owner decision: WAITING → APPROVED (`approved`) or REJECTED.
    pub async fn approve(
        &self,
        booking_id: i64,
        approved: bool,
        actor_id: i64,
    ) -> DbResult<BookingView> {
        let booking = self
            .db
            .bookings()
            .transition(booking_id, |b| b.decide(actor_id, approved))
            .await?;

        Ok(booking.into())
    }

    /// Booker withdrawal: WAITING → CANCELED.
    pub async fn cancel(&self, booking_id: i64, actor_id: i64) -> DbResult<BookingView> {
        let booking = self
            .db
            .bookings()
            .transition(booking_id, |b| b.cancel_by(actor_id))
            .await?;

        Ok(booking.into())
    }

    /// A single booking, visible to its booker and the item owner only.
    pub async fn get(&self, booking_id: i64, actor_id: i64) -> DbResult<BookingView> {
        let booking = self
            .db
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))?;

        booking.ensure_visible_to(actor_id)?;

        Ok(booking.into())
    }

    /// Bookings requested by `user_id`.
    pub async fn list_for_booker(
        &self,
        user_id: i64,
        state: Option<&str>,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DbResult<Vec<BookingView>> {
        self.list(BookingParty::Booker(user_id), state, from, size)
            .await
    }

    /// Bookings on items owned by `user_id`.
    pub async fn list_for_owner(
        &self,
        user_id: i64,
        state: Option<&str>,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DbResult<Vec<BookingView>> {
        self.list(BookingParty::Owner(user_id), state, from, size)
            .await
    }

    /// Bookings on `item_id` as seen by `viewer_id`, oldest start first.
    ///
    /// Only the owner of the item sees its bookings.
    pub async fn list_by_item(&self, item_id: i64, viewer_id: i64) -> DbResult<Vec<BookingView>> {
        let bookings = self
            .db
            .bookings()
            .find_by_item_for_owner(item_id, viewer_id)
            .await?;

        Ok(bookings.into_iter().map(BookingView::from).collect())
    }

    async fn list(
        &self,
        party: BookingParty,
        state: Option<&str>,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DbResult<Vec<BookingView>> {
        let page = validate_page_params(from, size)?;

        self.require_user(party.user_id()).await?;

        let facet = StateFacet::parse(state)?;

        let bookings = self
            .db
            .bookings()
            .find(party, facet, self.clock.now(), page)
            .await?;

        Ok(bookings.into_iter().map(BookingView::from).collect())
    }

    async fn require_user(&self, user_id: i64) -> DbResult<User> {
        let user = self
            .db
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or(CoreError::UserNotFound(user_id))?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
