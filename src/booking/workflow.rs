//! The gated booking wizard.
//!
//! Every setter is a guarded transition: invalid input leaves the draft
//! unchanged and is reported to the caller as an error, never silently
//! dropped. Changing an earlier selection always clears everything derived
//! from it (downstream invalidation).

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use super::models::{Booking, BookingStep, BookingSummary, CourtRef, TimeSlot, VenueRef};

/// Rejections reported by the wizard setters. The draft is left untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("venue is missing an identifier")]
    MissingVenue,
    #[error("court is missing an identifier")]
    MissingCourt,
    #[error("no venue selected yet")]
    VenueNotSelected,
    #[error("court {court_id} does not belong to venue {venue_id}")]
    CourtOutsideVenue { court_id: String, venue_id: String },
    #[error("date {0} is before today")]
    DateInPast(NaiveDate),
    #[error("no date selected yet")]
    DateNotSelected,
    #[error("time slot end must be strictly after its start")]
    InvalidTimeSlot,
    #[error("draft has not reached the payment step")]
    PaymentNotReached,
    #[error("draft is completed, start a new booking")]
    DraftCompleted,
}

/// The in-progress reservation being assembled.
///
/// Invariants: a court implies a venue, a time slot implies a date, and the
/// date is never before the current calendar day.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub venue: Option<VenueRef>,
    pub court: Option<CourtRef>,
    pub date: Option<NaiveDate>,
    pub slot: Option<TimeSlot>,
    pub step: BookingStep,
    pub finalized: Option<Booking>,
}

/// Owner of the booking draft. One instance per active wizard; all mutation
/// goes through the setters below. The draft is deliberately not persisted,
/// it lives only as long as the session that created it.
#[derive(Debug, Default)]
pub struct BookingWorkflow {
    draft: BookingDraft,
}

impl BookingWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn step(&self) -> BookingStep {
        self.draft.step
    }

    pub fn finalized(&self) -> Option<&Booking> {
        self.draft.finalized.as_ref()
    }

    /// Select a venue; clears court, date, and time slot.
    pub fn set_venue(&mut self, venue: VenueRef) -> Result<(), BookingError> {
        self.reject_if_completed()?;
        if venue.id.trim().is_empty() {
            return Err(BookingError::MissingVenue);
        }

        debug!(venue_id = %venue.id, "venue selected");
        self.draft.venue = Some(venue);
        self.draft.court = None;
        self.draft.date = None;
        self.draft.slot = None;
        self.draft.step = BookingStep::SelectCourt;
        Ok(())
    }

    /// Select a court within the chosen venue; clears date and time slot.
    pub fn set_court(&mut self, court: CourtRef) -> Result<(), BookingError> {
        self.reject_if_completed()?;
        if court.id.trim().is_empty() {
            return Err(BookingError::MissingCourt);
        }
        let venue = self
            .draft
            .venue
            .as_ref()
            .ok_or(BookingError::VenueNotSelected)?;
        if court.venue_id != venue.id {
            return Err(BookingError::CourtOutsideVenue {
                court_id: court.id,
                venue_id: venue.id.clone(),
            });
        }

        debug!(court_id = %court.id, "court selected");
        self.draft.court = Some(court);
        self.draft.date = None;
        self.draft.slot = None;
        self.draft.step = BookingStep::SelectSchedule;
        Ok(())
    }

    /// Pick the reservation day; clears the time slot only. Today is the
    /// earliest acceptable day, time of day is ignored for the comparison.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.reject_if_completed()?;
        if date < Self::today() {
            return Err(BookingError::DateInPast(date));
        }

        self.draft.date = Some(date);
        self.draft.slot = None;
        Ok(())
    }

    /// Pick the reservation window; advances the wizard to payment.
    pub fn set_time_slot(&mut self, slot: TimeSlot) -> Result<(), BookingError> {
        self.reject_if_completed()?;
        if slot.end <= slot.start {
            return Err(BookingError::InvalidTimeSlot);
        }
        if self.draft.date.is_none() {
            return Err(BookingError::DateNotSelected);
        }

        self.draft.slot = Some(slot);
        self.draft.step = BookingStep::Payment;
        Ok(())
    }

    /// Step gate for the UI's "next" control. Payment success is confirmed
    /// externally, so the payment step itself never blocks.
    pub fn can_proceed_to_next_step(&self) -> bool {
        match self.draft.step {
            BookingStep::SelectVenue => self.draft.venue.is_some(),
            BookingStep::SelectCourt => self.draft.court.is_some(),
            BookingStep::SelectSchedule => self.draft.date.is_some() && self.draft.slot.is_some(),
            BookingStep::Payment => true,
            BookingStep::Completed => false,
        }
    }

    /// Everything the payment step displays. None until venue, court, and
    /// time slot are all selected.
    pub fn summary(&self) -> Option<BookingSummary> {
        let venue = self.draft.venue.clone()?;
        let court = self.draft.court.clone()?;
        let date = self.draft.date?;
        let slot = self.draft.slot?;

        let total_amount = court.price_per_hour * slot.duration_hours();
        Some(BookingSummary {
            venue,
            court,
            date,
            slot,
            total_amount,
        })
    }

    /// Record the externally-confirmed booking. Terminal: a new reservation
    /// requires a fresh draft via [`reset`](Self::reset).
    pub fn complete_booking(&mut self, booking: Booking) -> Result<(), BookingError> {
        self.reject_if_completed()?;
        if self.draft.step != BookingStep::Payment {
            return Err(BookingError::PaymentNotReached);
        }

        debug!(booking_id = %booking.id, "booking completed");
        self.draft.finalized = Some(booking);
        self.draft.step = BookingStep::Completed;
        Ok(())
    }

    /// Return the draft to its empty initial state, from any step.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
    }

    fn reject_if_completed(&self) -> Result<(), BookingError> {
        if self.draft.step == BookingStep::Completed {
            return Err(BookingError::DraftCompleted);
        }
        Ok(())
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
