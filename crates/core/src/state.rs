// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_match_audit::{AuditEvent, StateSnapshot};
use tour_match_domain::{
    Application, ApplicationStatus, Booking, BookingDraft, BookingStatus, TourRequest,
    TourRequestDraft,
};

/// A tour request together with every application it owns.
///
/// Applications exist only inside the scope of their parent request;
/// loading, transitioning, and persisting always happen on the pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    /// The parent request.
    pub request: TourRequest,
    /// All child applications, ordered by creation.
    pub applications: Vec<Application>,
}

impl RequestState {
    /// Creates a request state from a loaded request and its children.
    #[must_use]
    pub const fn new(request: TourRequest, applications: Vec<Application>) -> Self {
        Self {
            request,
            applications,
        }
    }

    /// Finds a child application by identifier.
    #[must_use]
    pub fn find_application(&self, application_id: i64) -> Option<&Application> {
        self.applications
            .iter()
            .find(|a| a.application_id == Some(application_id))
    }

    /// Finds a child application by its guide's identifier.
    #[must_use]
    pub fn find_application_by_guide(&self, guide_id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.guide_id == guide_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let selected: usize = self
            .applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Selected)
            .count();
        StateSnapshot::new(format!(
            "request_id={},status={},applications={},selected={}",
            self.request.request_id,
            self.request.status,
            self.applications.len(),
            selected
        ))
    }
}

/// Converts a booking to a snapshot for audit purposes.
#[must_use]
pub fn booking_snapshot(booking: &Booking) -> StateSnapshot {
    StateSnapshot::new(format!(
        "booking_id={},request_id={},status={}",
        booking.booking_id, booking.request_id, booking.status
    ))
}

/// Identifies the write set a request-scoped transition commits.
///
/// The store uses this to pick the matching guarded mutation; it never
/// re-derives the write set from the transitioned state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionKind {
    /// Rewrite the request row. Guarded on the request still being open.
    UpdateRequest,
    /// Rewrite the request row unconditionally (soft cancel).
    CancelRequest,
    /// Upsert one application row by `(request_id, guide_id)` and rewrite
    /// the request row. Guarded on the request still being open.
    SubmitApplication {
        /// The submitting guide.
        guide_id: String,
    },
    /// Rewrite one application row. Guarded on it still being pending.
    EditApplication {
        /// The edited application.
        application_id: i64,
    },
    /// The acceptance batch: guarded request and target-application
    /// updates, sibling rejections, and the booking insert, all in one
    /// atomic commit.
    AcceptApplication {
        /// The accepted application.
        application_id: i64,
    },
}

/// The result of a successful request-scoped transition.
///
/// Transitions are atomic: they either commit completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The write set the store must commit.
    pub kind: TransitionKind,
    /// The new state after the transition.
    pub new_state: RequestState,
    /// The booking materialized by an acceptance, absent otherwise.
    pub booking_draft: Option<BookingDraft>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful request creation.
///
/// Creation produces a draft; the store assigns the identifier on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResult {
    /// The validated draft to insert.
    pub draft: TourRequestDraft,
    /// The audit event recording the creation.
    pub audit_event: AuditEvent,
}

/// The result of a successful booking-scoped transition.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingTransitionResult {
    /// The booking after the transition.
    pub new_booking: Booking,
    /// The status the booking held before the transition. The store
    /// guards its update on the row still holding this status.
    pub previous_status: BookingStatus,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
