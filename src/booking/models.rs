//! Data models for the booking wizard.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reference to a venue as shown in the selection step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRef {
    pub id: String,
    pub name: String,
}

/// Reference to a court inside a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtRef {
    pub id: String,
    pub venue_id: String,
    pub name: String,
    pub price_per_hour: f64,
}

/// Half-open reservation window within a day; `end` is strictly after
/// `start`, enforced by the workflow setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Span in hours, fractional hours permitted (90 minutes is 1.5).
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}

/// Position in the wizard. The numeric values are the step indicators the UI
/// renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BookingStep {
    #[default]
    SelectVenue = 1,
    SelectCourt = 2,
    SelectSchedule = 3,
    Payment = 4,
    Completed = 5, // terminal
}

impl BookingStep {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(BookingStep::SelectVenue),
            2 => Some(BookingStep::SelectCourt),
            3 => Some(BookingStep::SelectSchedule),
            4 => Some(BookingStep::Payment),
            5 => Some(BookingStep::Completed),
            _ => None,
        }
    }
}

/// A finalized reservation, as confirmed by the backend after payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub court_id: String,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub total_amount: f64,
}

/// Everything the payment step displays, derived from the draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub venue: VenueRef,
    pub court: CourtRef,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub total_amount: f64,
}
