//! Composable event filters shared by the admin and public listings.

use chrono::{DateTime, Utc};

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventSort, EventState};

/// Row order of a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    #[default]
    Id,
    EventDate,
}

/// Conjunction of optional filters; empty lists and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCriteria {
    pub initiators: Vec<i64>,
    pub states: Vec<EventState>,
    pub categories: Vec<i64>,
    /// Lowercased substring of annotation or description
    pub text: Option<String>,
    pub paid: Option<bool>,
    /// `event_date >= range_start`
    pub range_start: Option<DateTime<Utc>>,
    /// `event_date <= range_end`
    pub range_end: Option<DateTime<Utc>>,
    pub order: EventOrder,
}

impl EventCriteria {
    pub fn initiated_by(user_id: i64) -> Self {
        Self {
            initiators: vec![user_id],
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: Option<&str>) -> Self {
        self.text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// In-memory evaluation; the Postgres store translates the same fields to SQL.
    pub fn matches(&self, event: &Event) -> bool {
        (self.initiators.is_empty() || self.initiators.contains(&event.initiator_id))
            && (self.states.is_empty() || self.states.contains(&event.state))
            && (self.categories.is_empty() || self.categories.contains(&event.category_id))
            && self.paid.is_none_or(|paid| event.paid == paid)
            && self.range_start.is_none_or(|start| event.event_date >= start)
            && self.range_end.is_none_or(|end| event.event_date <= end)
            && self.text.as_deref().is_none_or(|text| {
                event.annotation.to_lowercase().contains(text)
                    || event.description.to_lowercase().contains(text)
            })
    }

    /// Sort key consistent with [`EventOrder`], ties broken by id.
    pub fn sort(&self, events: &mut [Event]) {
        match self.order {
            EventOrder::Id => events.sort_by_key(|e| e.id),
            EventOrder::EventDate => events.sort_by_key(|e| (e.event_date, e.id)),
        }
    }
}

pub fn parse_states(raw: &[String]) -> EventResult<Vec<EventState>> {
    raw.iter()
        .map(|s| {
            s.parse::<EventState>()
                .map_err(|_| EventError::BadRequest(format!("Unknown event state: {}", s)))
        })
        .collect()
}

pub fn parse_date(raw: Option<&str>, field: &str) -> EventResult<Option<DateTime<Utc>>> {
    raw.map(|value| {
        axum_helpers::datetime::parse(value).map_err(|_| {
            EventError::BadRequest(format!(
                "Field: {}. Error: expected yyyy-MM-dd HH:mm:ss. Value: {}",
                field, value
            ))
        })
    })
    .transpose()
}

pub fn parse_sort(raw: Option<&str>) -> EventResult<Option<EventSort>> {
    raw.map(|value| {
        value
            .parse::<EventSort>()
            .map_err(|_| EventError::BadRequest(format!("Unknown sort: {}", value)))
    })
    .transpose()
}

/// Rejects windows whose start lies after their end.
pub fn check_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> EventResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(EventError::BadRequest(
            "rangeStart must not be after rangeEnd".to_string(),
        )),
        _ => Ok(()),
    }
}
