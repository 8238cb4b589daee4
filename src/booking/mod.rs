pub mod models;
pub mod workflow;

pub use models::{Booking, BookingStep, BookingSummary, CourtRef, TimeSlot, VenueRef};
pub use workflow::{BookingDraft, BookingError, BookingWorkflow};
