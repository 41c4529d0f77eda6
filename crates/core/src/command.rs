// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use tour_match_domain::{
    ApplicationPatch, BookingDecision, GuideProfile, RequestPatch, TouristProfile,
};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Request-scoped
/// commands are handled by [`crate::apply`] (or [`crate::apply_create`]
/// for creation); booking-scoped commands by [`crate::apply_booking`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Post a new tour request.
    CreateRequest {
        /// The posting tourist.
        tourist: TouristProfile,
        /// Trip title.
        title: String,
        /// Trip destination.
        destination: String,
        /// First day of the trip.
        start_date: Date,
        /// Last day of the trip (inclusive).
        end_date: Date,
        /// The tourist's budget.
        budget: f64,
        /// Number of travellers.
        party_size: u32,
        /// Free-form tour type label.
        tour_type: String,
        /// Languages the guide should speak.
        languages: Vec<String>,
        /// Free-text trip description.
        description: String,
        /// Optional special requirements.
        requirements: Option<String>,
    },
    /// Edit an open tour request.
    UpdateRequest {
        /// The fields to change.
        patch: RequestPatch,
    },
    /// Soft-cancel a tour request. Permitted from any status; the request
    /// document is marked, never removed, and nothing cascades to an
    /// existing booking.
    CancelRequest,
    /// Submit or resubmit a guide application against an open request.
    SubmitApplication {
        /// The bidding guide.
        guide: GuideProfile,
        /// The guide's proposed price.
        proposed_price: f64,
        /// The guide's pitch.
        cover_letter: String,
    },
    /// Edit a pending application. Only the owning guide may do this.
    EditApplication {
        /// The application to edit.
        application_id: i64,
        /// The caller's guide identifier.
        guide_id: String,
        /// The fields to change.
        patch: ApplicationPatch,
    },
    /// Accept one application: resolve every sibling and stamp the
    /// request, producing the booking draft.
    AcceptApplication {
        /// The application to accept.
        application_id: i64,
    },
    /// The guide's response to a pending booking.
    GuideRespondBooking {
        /// Confirm or decline.
        decision: BookingDecision,
    },
    /// Tourist cancellation of a booking, subject to the notice window.
    TouristCancelBooking {
        /// The caller's tourist identifier.
        tourist_id: String,
    },
}

impl Command {
    /// The action name recorded on the audit event for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateRequest { .. } => "CreateRequest",
            Self::UpdateRequest { .. } => "UpdateRequest",
            Self::CancelRequest => "CancelRequest",
            Self::SubmitApplication { .. } => "SubmitApplication",
            Self::EditApplication { .. } => "EditApplication",
            Self::AcceptApplication { .. } => "AcceptApplication",
            Self::GuideRespondBooking { .. } => "GuideRespondBooking",
            Self::TouristCancelBooking { .. } => "TouristCancelBooking",
        }
    }
}
