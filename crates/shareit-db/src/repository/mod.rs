//! # Repository Module
//!
//! Database repository implementations for ShareIt.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Booking service                                                       │
//! │       │                                                                 │
//! │       │  db.bookings().find(BookingParty::Owner(1), facet, now, page)   │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, item_id, booker_id, period)                         │
//! │  ├── transition(&self, id, decide)   ← one transaction, status guard   │
//! │  ├── find(&self, party, facet, now, page)                              │
//! │  ├── find_by_item_for_owner(&self, item_id, viewer_id)                 │
//! │  └── has_approved_overlap(&self, item_id, start, end)                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - User directory lookups
//! - [`ItemRepository`](item::ItemRepository) - Item catalog lookups
//! - [`BookingRepository`](booking::BookingRepository) - Booking store

pub mod booking;
pub mod item;
pub mod user;
