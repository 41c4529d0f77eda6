// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// In this system that is a tourist, a guide, or an automated process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "tourist", "guide", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, event ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitApplication`", "`AcceptApplication`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of entity state at a point in time.
///
/// Snapshots are compact string renderings, sufficient to reconstruct the
/// shape of a transition when reading the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// The kind of entity an audit event is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A tour request, including its child applications.
    Request,
    /// A booking.
    Booking,
}

impl EntityKind {
    /// Returns the string representation of the entity kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Booking => "booking",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - The entity the transition is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The event ID assigned by the store. `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The kind of entity this event is scoped to.
    pub entity_kind: EntityKind,
    /// The identifier of the entity this event is scoped to.
    ///
    /// Zero when the entity has not yet been assigned an identifier; the
    /// store fills in the real identifier when it persists the event.
    pub entity_id: i64,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `entity_kind` - The kind of entity the change is scoped to
    /// * `entity_id` - The identifier of that entity
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        entity_kind: EntityKind,
        entity_id: i64,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            entity_kind,
            entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("tourist-123"), String::from("tourist"));

        assert_eq!(actor.id, "tourist-123");
        assert_eq!(actor.actor_type, "tourist");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("API request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "API request");
    }

    #[test]
    fn test_action_creation_with_and_without_details() {
        let bare: Action = Action::new(String::from("SubmitApplication"), None);
        assert_eq!(bare.name, "SubmitApplication");
        assert_eq!(bare.details, None);

        let detailed: Action = Action::new(
            String::from("AcceptApplication"),
            Some(String::from("Accepted application 12 for request 7")),
        );
        assert_eq!(detailed.name, "AcceptApplication");
        assert!(detailed.details.is_some());
    }

    #[test]
    fn test_entity_kind_strings() {
        assert_eq!(EntityKind::Request.as_str(), "request");
        assert_eq!(EntityKind::Booking.as_str(), "booking");
    }

    #[test]
    fn test_audit_event_starts_unpersisted() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("guide-1"), String::from("guide")),
            Cause::new(String::from("req-1"), String::from("API request")),
            Action::new(String::from("SubmitApplication"), None),
            StateSnapshot::new(String::from("before")),
            StateSnapshot::new(String::from("after")),
            EntityKind::Request,
            7,
        );

        assert_eq!(event.event_id, None);
        assert_eq!(event.entity_kind, EntityKind::Request);
        assert_eq!(event.entity_id, 7);
    }
}
