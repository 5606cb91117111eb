//! # Booking Lifecycle
//!
//! Who may move a booking out of WAITING, and what it becomes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  decide(actor, approved)                                                │
//! │    actor == booker               → SelfApproval   (checked first)       │
//! │    actor != owner                → NotUpdatable                         │
//! │    status != WAITING             → NotUpdatable                         │
//! │    otherwise                     → APPROVED | REJECTED                  │
//! │                                                                         │
//! │  cancel_by(actor)                                                       │
//! │    actor != booker               → NoStanding                           │
//! │    status != WAITING             → NotUpdatable                         │
//! │    otherwise                     → CANCELED                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These checks only compute the target status. Persisting it is guarded
//! again at write time (`... WHERE status = 'WAITING'`), so a decision made
//! on a stale read still fails with [`CoreError::NotUpdatable`].

use crate::error::{CoreError, CoreResult};
use crate::types::{Booking, BookingStatus};

impl Booking {
    /// True when `user_id` is the booker or the item owner.
    pub fn is_party(&self, user_id: i64) -> bool {
        self.booker.id == user_id || self.item_owner_id == user_id
    }

    /// Fails unless `user_id` is the booker or the item owner.
    pub fn ensure_visible_to(&self, user_id: i64) -> CoreResult<()> {
        if self.is_party(user_id) {
            Ok(())
        } else {
            Err(CoreError::NoStanding {
                booking_id: self.id,
                user_id,
            })
        }
    }

    /// Owner decision on a pending booking.
    pub fn decide(&self, actor_id: i64, approved: bool) -> CoreResult<BookingStatus> {
        if self.booker.id == actor_id {
            return Err(CoreError::SelfApproval {
                booking_id: self.id,
                user_id: actor_id,
            });
        }

        if self.item_owner_id != actor_id || self.status != BookingStatus::Waiting {
            return Err(CoreError::NotUpdatable {
                booking_id: self.id,
            });
        }

        Ok(if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        })
    }

    /// Booker withdrawal of a pending booking.
    pub fn cancel_by(&self, actor_id: i64) -> CoreResult<BookingStatus> {
        if self.booker.id != actor_id {
            return Err(CoreError::NoStanding {
                booking_id: self.id,
                user_id: actor_id,
            });
        }

        if self.status != BookingStatus::Waiting {
            return Err(CoreError::NotUpdatable {
                booking_id: self.id,
            });
        }

        Ok(BookingStatus::Canceled)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemShort, UserShort};

    const OWNER: i64 = 1;
    const BOOKER: i64 = 2;
    const STRANGER: i64 = 3;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: 5,
            start: "2030-01-16T10:00:00".parse().unwrap(),
            end: "2030-01-16T12:00:00".parse().unwrap(),
            item: ItemShort {
                id: 1,
                name: "Ladder".to_string(),
            },
            item_owner_id: OWNER,
            booker: UserShort {
                id: BOOKER,
                name: "Ivan".to_string(),
            },
            status,
        }
    }

    #[test]
    fn test_owner_approves_and_rejects() {
        let b = booking(BookingStatus::Waiting);
        assert_eq!(b.decide(OWNER, true).unwrap(), BookingStatus::Approved);
        assert_eq!(b.decide(OWNER, false).unwrap(), BookingStatus::Rejected);
    }

    #[test]
    fn test_booker_cannot_decide_even_when_waiting() {
        let b = booking(BookingStatus::Waiting);
        assert!(matches!(
            b.decide(BOOKER, true),
            Err(CoreError::SelfApproval { booking_id: 5, user_id: BOOKER })
        ));
    }

    #[test]
    fn test_self_approval_is_checked_before_state() {
        let b = booking(BookingStatus::Approved);
        assert!(matches!(
            b.decide(BOOKER, false),
            Err(CoreError::SelfApproval { .. })
        ));
    }

    #[test]
    fn test_stranger_or_settled_booking_is_not_updatable() {
        let b = booking(BookingStatus::Waiting);
        assert!(matches!(
            b.decide(STRANGER, true),
            Err(CoreError::NotUpdatable { booking_id: 5 })
        ));

        for status in [
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Canceled,
        ] {
            assert!(matches!(
                booking(status).decide(OWNER, true),
                Err(CoreError::NotUpdatable { .. })
            ));
        }
    }

    #[test]
    fn test_cancel_by_booker_only() {
        let b = booking(BookingStatus::Waiting);
        assert_eq!(b.cancel_by(BOOKER).unwrap(), BookingStatus::Canceled);
        assert!(matches!(b.cancel_by(OWNER), Err(CoreError::NoStanding { .. })));
        assert!(matches!(
            booking(BookingStatus::Rejected).cancel_by(BOOKER),
            Err(CoreError::NotUpdatable { .. })
        ));
    }

    #[test]
    fn test_visibility() {
        let b = booking(BookingStatus::Waiting);
        assert!(b.ensure_visible_to(OWNER).is_ok());
        assert!(b.ensure_visible_to(BOOKER).is_ok());

        let err = b.ensure_visible_to(STRANGER).unwrap_err();
        assert!(err.is_not_found());
    }
}
