//! Courtbook Client Core Library
//!
//! The non-presentational core of the court-booking client: session lifecycle
//! management (credential exchange, token rotation, role-derived routing),
//! the gated booking wizard, and the route guard composing the two. All
//! rendering and layout concerns live in the UI layer that calls into this
//! crate.

pub mod auth_api;
pub mod booking;
pub mod config;
pub mod guard;
pub mod session;
pub mod user;

// Re-export commonly used types for convenience
pub use auth_api::{
    AuthApi, AuthError, AuthGrant, Credentials, HttpAuthApi, ProfilePatch, Registration, TokenPair,
};
pub use booking::{Booking, BookingError, BookingStep, BookingWorkflow, CourtRef, TimeSlot, VenueRef};
pub use config::CoreConfig;
pub use guard::{GuardDecision, RouteGuard};
pub use session::{
    FileTokenStore, LoginOutcome, MemoryTokenStore, SessionManager, SessionStatus, TokenStore,
};
pub use user::{Permission, User, UserRole};
