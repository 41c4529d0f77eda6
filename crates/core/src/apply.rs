// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use tour_match_audit::{Action, Actor, AuditEvent, Cause, EntityKind, StateSnapshot};
use tour_match_domain::{
    Application, ApplicationStatus, Booking, BookingDraft, BookingStatus, DomainError,
    RequestStatus, TourRequest, TourRequestDraft, validate_budget, validate_cancellation_notice,
    validate_cover_letter, validate_destination, validate_edited_price, validate_party_size,
    validate_proposed_price, validate_request_patch, validate_title, validate_trip_dates,
};

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    BookingTransitionResult, CreateResult, RequestState, TransitionKind, TransitionResult,
    booking_snapshot,
};

/// Applies a creation command, producing a validated draft and audit event.
///
/// Creation has no prior state and no concurrency concern; the store
/// assigns the canonical identifier on insert.
///
/// # Arguments
///
/// * `command` - The `CreateRequest` command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp stamped onto the new request
///
/// # Returns
///
/// * `Ok(CreateResult)` containing the draft and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if any trip field violates domain rules.
pub fn apply_create(
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CreateResult, CoreError> {
    match command {
        Command::CreateRequest {
            tourist,
            title,
            destination,
            start_date,
            end_date,
            budget,
            party_size,
            tour_type,
            languages,
            description,
            requirements,
        } => {
            validate_title(&title)?;
            validate_destination(&destination)?;
            validate_trip_dates(start_date, end_date)?;
            validate_budget(budget)?;
            validate_party_size(party_size)?;

            let draft: TourRequestDraft = TourRequestDraft {
                title: title.clone(),
                destination: destination.clone(),
                start_date,
                end_date,
                budget,
                party_size,
                tour_type,
                languages,
                description,
                requirements,
                tourist,
                status: RequestStatus::Open,
                application_count: 0,
                created_at: now,
                updated_at: now,
            };

            let before: StateSnapshot = StateSnapshot::new(String::from("absent"));
            let after: StateSnapshot =
                StateSnapshot::new(format!("status=open,applications=0,budget={budget}"));

            let action: Action = Action::new(
                String::from("CreateRequest"),
                Some(format!("Created request '{title}' for {destination}")),
            );

            // Entity id 0 is a placeholder; the store stamps the real id
            // once the insert has assigned one.
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, EntityKind::Request, 0);

            Ok(CreateResult { draft, audit_event })
        }
        _ => {
            // Stateful commands should use apply() or apply_booking() instead
            unreachable!("apply_create called with non-create command")
        }
    }
}

/// Applies a request-scoped command to the loaded state, producing the new
/// state and audit event.
///
/// The returned result carries the write set the store must commit; for an
/// acceptance this includes the booking draft. Status preconditions
/// validated here are re-asserted by the store's guarded commit, so a
/// concurrent writer that invalidates them after this function returns
/// causes the commit to fail rather than corrupting state.
///
/// # Arguments
///
/// * `state` - The current request state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp stamped onto updated entities
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The request or application is not in the required lifecycle state
/// - The caller does not own the targeted application
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &RequestState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::UpdateRequest { patch } => {
            if !state.request.is_open() {
                return Err(CoreError::DomainViolation(DomainError::RequestNotOpen {
                    request_id: state.request.request_id,
                    status: state.request.status,
                }));
            }

            validate_request_patch(&patch, &state.request)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_request: TourRequest = state.request.clone();
            if let Some(title) = patch.title {
                new_request.title = title;
            }
            if let Some(destination) = patch.destination {
                new_request.destination = destination;
            }
            if let Some(start_date) = patch.start_date {
                new_request.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                new_request.end_date = end_date;
            }
            if let Some(budget) = patch.budget {
                new_request.budget = budget;
            }
            if let Some(party_size) = patch.party_size {
                new_request.party_size = party_size;
            }
            if let Some(tour_type) = patch.tour_type {
                new_request.tour_type = tour_type;
            }
            if let Some(languages) = patch.languages {
                new_request.languages = languages;
            }
            if let Some(description) = patch.description {
                new_request.description = description;
            }
            if let Some(requirements) = patch.requirements {
                new_request.requirements = Some(requirements);
            }
            new_request.updated_at = now;

            let new_state: RequestState =
                RequestState::new(new_request, state.applications.clone());
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("UpdateRequest"),
                Some(format!(
                    "Updated request {}",
                    state.request.request_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Request,
                state.request.request_id,
            );

            Ok(TransitionResult {
                kind: TransitionKind::UpdateRequest,
                new_state,
                booking_draft: None,
                audit_event,
            })
        }
        Command::CancelRequest => {
            // Soft cancel from any status. The document survives and an
            // existing booking is left untouched.
            let before: StateSnapshot = state.to_snapshot();

            let mut new_request: TourRequest = state.request.clone();
            new_request.status = RequestStatus::Cancelled;
            new_request.updated_at = now;

            let new_state: RequestState =
                RequestState::new(new_request, state.applications.clone());
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CancelRequest"),
                Some(format!(
                    "Cancelled request {}",
                    state.request.request_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Request,
                state.request.request_id,
            );

            Ok(TransitionResult {
                kind: TransitionKind::CancelRequest,
                new_state,
                booking_draft: None,
                audit_event,
            })
        }
        Command::SubmitApplication {
            guide,
            proposed_price,
            cover_letter,
        } => {
            if !state.request.is_open() {
                return Err(CoreError::DomainViolation(DomainError::RequestNotOpen {
                    request_id: state.request.request_id,
                    status: state.request.status,
                }));
            }

            validate_proposed_price(proposed_price)?;
            validate_cover_letter(&cover_letter)?;

            let before: StateSnapshot = state.to_snapshot();
            let guide_id: String = guide.guide_id.clone();

            let mut new_applications: Vec<Application> = state.applications.clone();
            if let Some(existing) = new_applications
                .iter_mut()
                .find(|a| a.guide_id == guide_id)
            {
                // Resubmission by the same guide: overwrite the bid,
                // keep the original creation timestamp and the counter.
                existing.proposed_price = proposed_price;
                existing.cover_letter = cover_letter;
                existing.updated_at = now;
            } else {
                new_applications.push(Application::new_pending(
                    &state.request,
                    guide,
                    proposed_price,
                    cover_letter,
                    now,
                ));
            }

            let mut new_request: TourRequest = state.request.clone();
            // The advisory counter mirrors the authoritative child list.
            new_request.application_count =
                u32::try_from(new_applications.len()).unwrap_or(u32::MAX);
            new_request.updated_at = now;

            let new_state: RequestState = RequestState::new(new_request, new_applications);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("SubmitApplication"),
                Some(format!(
                    "Guide '{guide_id}' applied to request {} at price {proposed_price}",
                    state.request.request_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Request,
                state.request.request_id,
            );

            Ok(TransitionResult {
                kind: TransitionKind::SubmitApplication { guide_id },
                new_state,
                booking_draft: None,
                audit_event,
            })
        }
        Command::EditApplication {
            application_id,
            guide_id,
            patch,
        } => {
            let Some(stored) = state.find_application(application_id) else {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotFound {
                        request_id: state.request.request_id,
                        application_id,
                    },
                ));
            };

            // Ownership is checked before lifecycle state: a foreign guide
            // is rejected the same way regardless of application status.
            if stored.guide_id != guide_id {
                return Err(CoreError::DomainViolation(
                    DomainError::NotApplicationOwner {
                        application_id,
                        guide_id,
                    },
                ));
            }

            if !stored.is_pending() {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotPending {
                        application_id,
                        status: stored.status,
                    },
                ));
            }

            if let Some(price) = patch.proposed_price {
                validate_edited_price(price)?;
            }
            if let Some(letter) = &patch.cover_letter {
                validate_cover_letter(letter)?;
            }

            let before: StateSnapshot = state.to_snapshot();

            let mut new_applications: Vec<Application> = state.applications.clone();
            for application in &mut new_applications {
                if application.application_id == Some(application_id) {
                    if let Some(price) = patch.proposed_price {
                        application.proposed_price = price;
                    }
                    if let Some(letter) = patch.cover_letter.clone() {
                        application.cover_letter = letter;
                    }
                    application.updated_at = now;
                }
            }

            let new_state: RequestState =
                RequestState::new(state.request.clone(), new_applications);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("EditApplication"),
                Some(format!(
                    "Guide '{guide_id}' edited application {application_id} on request {}",
                    state.request.request_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Request,
                state.request.request_id,
            );

            Ok(TransitionResult {
                kind: TransitionKind::EditApplication { application_id },
                new_state,
                booking_draft: None,
                audit_event,
            })
        }
        Command::AcceptApplication { application_id } => {
            // The request must still be open. This guards both
            // double-acceptance and accepting into a cancelled request.
            if !state.request.is_open() {
                return Err(CoreError::DomainViolation(DomainError::RequestNotOpen {
                    request_id: state.request.request_id,
                    status: state.request.status,
                }));
            }

            let Some(target) = state.find_application(application_id) else {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotFound {
                        request_id: state.request.request_id,
                        application_id,
                    },
                ));
            };

            if !target.is_pending() {
                return Err(CoreError::DomainViolation(
                    DomainError::ApplicationNotPending {
                        application_id,
                        status: target.status,
                    },
                ));
            }

            let before: StateSnapshot = state.to_snapshot();
            let target: Application = target.clone();

            // All-or-nothing resolution: the target is selected, every
            // sibling is rejected. No application stays pending.
            let mut rejected_count: usize = 0;
            let mut new_applications: Vec<Application> = state.applications.clone();
            for application in &mut new_applications {
                if application.application_id == Some(application_id) {
                    application.status = ApplicationStatus::Selected;
                    application.agreed_price = Some(application.proposed_price);
                } else {
                    application.status = ApplicationStatus::Rejected;
                    rejected_count += 1;
                }
                application.updated_at = now;
            }

            let mut new_request: TourRequest = state.request.clone();
            new_request.status = RequestStatus::Accepted;
            new_request.selected_application_id = Some(application_id);
            new_request.selected_guide_id = Some(target.guide_id.clone());
            new_request.selected_guide_name = Some(target.guide_name.clone());
            new_request.selected_guide_email = Some(target.guide_email.clone());
            new_request.agreed_price = Some(target.proposed_price);
            new_request.updated_at = now;

            let booking_draft: BookingDraft =
                BookingDraft::from_acceptance(&state.request, &target, now);

            let new_state: RequestState = RequestState::new(new_request, new_applications);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("AcceptApplication"),
                Some(format!(
                    "Accepted application {application_id} on request {}: selected guide '{}' at price {}, rejected {rejected_count} sibling(s)",
                    state.request.request_id, target.guide_id, target.proposed_price
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Request,
                state.request.request_id,
            );

            Ok(TransitionResult {
                kind: TransitionKind::AcceptApplication { application_id },
                new_state,
                booking_draft: Some(booking_draft),
                audit_event,
            })
        }
        Command::CreateRequest { .. } => {
            // Creation commands should use apply_create() instead
            unreachable!("apply called with create command")
        }
        Command::GuideRespondBooking { .. } | Command::TouristCancelBooking { .. } => {
            // Booking commands should use apply_booking() instead
            unreachable!("apply called with booking command")
        }
    }
}

/// Applies a booking-scoped command, producing the updated booking and
/// audit event.
///
/// # Arguments
///
/// * `booking` - The current booking (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp stamped onto the updated booking
///
/// # Returns
///
/// * `Ok(BookingTransitionResult)` containing the updated booking
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The booking is not in the required lifecycle state
/// - The caller does not own the booking
/// - The cancellation notice window has closed
pub fn apply_booking(
    booking: &Booking,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<BookingTransitionResult, CoreError> {
    match command {
        Command::GuideRespondBooking { decision } => {
            if booking.status != BookingStatus::Pending {
                return Err(CoreError::DomainViolation(DomainError::BookingNotPending {
                    booking_id: booking.booking_id,
                    status: booking.status,
                }));
            }

            let target_status: BookingStatus = decision.target_status();
            booking.status.validate_transition(target_status)?;

            let before: StateSnapshot = booking_snapshot(booking);

            let mut new_booking: Booking = booking.clone();
            new_booking.status = target_status;
            new_booking.updated_at = now;

            let after: StateSnapshot = booking_snapshot(&new_booking);

            let action: Action = Action::new(
                String::from("GuideRespondBooking"),
                Some(format!(
                    "Guide '{}' resolved booking {} to {target_status}",
                    booking.guide_id, booking.booking_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Booking,
                booking.booking_id,
            );

            Ok(BookingTransitionResult {
                new_booking,
                previous_status: BookingStatus::Pending,
                audit_event,
            })
        }
        Command::TouristCancelBooking { tourist_id } => {
            if booking.tourist_id != tourist_id {
                return Err(CoreError::DomainViolation(DomainError::NotBookingTourist {
                    booking_id: booking.booking_id,
                    tourist_id,
                }));
            }

            if booking.status.is_terminal() {
                return Err(CoreError::DomainViolation(
                    DomainError::BookingAlreadyClosed {
                        booking_id: booking.booking_id,
                        status: booking.status,
                    },
                ));
            }

            validate_cancellation_notice(booking.start_date, now)?;
            booking.status.validate_transition(BookingStatus::Cancelled)?;

            let before: StateSnapshot = booking_snapshot(booking);

            let previous_status: BookingStatus = booking.status;
            let mut new_booking: Booking = booking.clone();
            new_booking.status = BookingStatus::Cancelled;
            new_booking.updated_at = now;

            let after: StateSnapshot = booking_snapshot(&new_booking);

            let action: Action = Action::new(
                String::from("TouristCancelBooking"),
                Some(format!(
                    "Tourist '{tourist_id}' cancelled booking {}",
                    booking.booking_id
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                EntityKind::Booking,
                booking.booking_id,
            );

            Ok(BookingTransitionResult {
                new_booking,
                previous_status,
                audit_event,
            })
        }
        _ => {
            // Request commands should use apply() or apply_create() instead
            unreachable!("apply_booking called with non-booking command")
        }
    }
}
