//! State-machine rules for events and participation requests.
//!
//! Everything here is pure: stores call these functions while holding the
//! per-event lock, services call them before persisting.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::error::{EventError, EventResult};
use crate::models::{
    AdminStateAction, Event, EventState, ParticipationRequest, RequestStatus, StatusUpdateResult,
    UserStateAction,
};

/// Minimum lead time for dates set by initiators
pub const USER_LEAD_HOURS: i64 = 2;
/// Minimum lead time for dates set by admins
pub const ADMIN_LEAD_HOURS: i64 = 1;

pub fn check_event_date(
    event_date: DateTime<Utc>,
    now: DateTime<Utc>,
    lead_hours: i64,
) -> EventResult<()> {
    if event_date < now + Duration::hours(lead_hours) {
        return Err(EventError::Conflict(format!(
            "Field: eventDate. Error: must be at least {} hour(s) from now. Value: {}",
            lead_hours,
            axum_helpers::datetime::to_string(&event_date)
        )));
    }
    Ok(())
}

/// State after an initiator edit. Published events are frozen.
pub fn user_transition(
    current: EventState,
    action: Option<UserStateAction>,
) -> EventResult<EventState> {
    if current == EventState::Published {
        return Err(EventError::conflict(
            "Only pending or canceled events can be changed",
        ));
    }

    Ok(match action {
        Some(UserStateAction::CancelReview) => EventState::Canceled,
        Some(UserStateAction::SendToReview) => EventState::Pending,
        None => current,
    })
}

/// State after a moderator edit.
pub fn admin_transition(
    current: EventState,
    action: Option<AdminStateAction>,
) -> EventResult<EventState> {
    match action {
        Some(AdminStateAction::PublishEvent) if current != EventState::Pending => {
            Err(EventError::Conflict(format!(
                "Cannot publish the event because it's not in the right state: {}",
                current
            )))
        }
        Some(AdminStateAction::PublishEvent) => Ok(EventState::Published),
        Some(AdminStateAction::RejectEvent) if current == EventState::Published => {
            Err(EventError::conflict("Cannot reject published event"))
        }
        Some(AdminStateAction::RejectEvent) => Ok(EventState::Canceled),
        None => Ok(current),
    }
}

/// Status of a new request, or the rule it breaks.
pub fn admit_request(
    event: &Event,
    requester_id: i64,
    has_live_request: bool,
    confirmed: i64,
) -> EventResult<RequestStatus> {
    if event.is_owned_by(requester_id) {
        return Err(EventError::conflict(
            "Initiator cannot request participation in own event",
        ));
    }
    if event.state != EventState::Published {
        return Err(EventError::conflict("Event must be published"));
    }
    if has_live_request {
        return Err(EventError::conflict("Request already exists"));
    }
    if event.is_full(confirmed) {
        return Err(EventError::conflict("The participant limit has been reached"));
    }

    if !event.request_moderation || event.participant_limit == 0 {
        Ok(RequestStatus::Confirmed)
    } else {
        Ok(RequestStatus::Pending)
    }
}

pub fn check_target(target: RequestStatus) -> EventResult<()> {
    match target {
        RequestStatus::Confirmed | RequestStatus::Rejected => Ok(()),
        other => Err(EventError::BadRequest(format!(
            "Status must be CONFIRMED or REJECTED, got {}",
            other
        ))),
    }
}

/// Decide a batch status change.
///
/// `named` must be in caller order; `pending` holds the event's other pending
/// requests. The returned result lists every request whose status changes.
pub fn plan_status_change(
    event: &Event,
    confirmed: i64,
    named: Vec<ParticipationRequest>,
    pending: Vec<ParticipationRequest>,
    target: RequestStatus,
) -> EventResult<StatusUpdateResult> {
    check_target(target)?;

    let mut result = StatusUpdateResult::default();
    if event.participant_limit == 0 {
        return Ok(result);
    }

    if named.iter().any(|r| r.status != RequestStatus::Pending) {
        return Err(EventError::conflict("Request must have status PENDING"));
    }

    let named_ids: HashSet<i64> = named.iter().map(|r| r.id).collect();
    let mut running = confirmed;

    for request in named {
        if target == RequestStatus::Confirmed {
            if event.is_full(running) {
                return Err(EventError::conflict(
                    "The participant limit has been reached",
                ));
            }
            running += 1;
            result
                .confirmed_requests
                .push(request.with_status(RequestStatus::Confirmed));
        } else {
            result
                .rejected_requests
                .push(request.with_status(RequestStatus::Rejected));
        }
    }

    if event.is_full(running) {
        result.rejected_requests.extend(
            pending
                .into_iter()
                .filter(|r| r.status == RequestStatus::Pending && !named_ids.contains(&r.id))
                .map(|r| r.with_status(RequestStatus::Rejected)),
        );
    }

    Ok(result)
}
