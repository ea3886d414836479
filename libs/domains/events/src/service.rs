use axum_helpers::PageParams;
use chrono::Utc;
use domain_categories::{Category, CategoryRepository};
use domain_users::{User, UserRepository, UserShort};
use std::sync::Arc;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::listing::EventAssembler;
use crate::models::{
    AdminEventQuery, AdminStateAction, Event, EventFull, EventShort, EventSort, EventState,
    NewEvent, ParticipationRequest, PublicEventQuery, StatusUpdateRequest, StatusUpdateResult,
    UpdateEventAdminRequest, UpdateEventUserRequest,
};
use crate::moderation::{self, ADMIN_LEAD_HOURS, USER_LEAD_HOURS};
use crate::repository::{EventRepository, RequestRepository};
use crate::search::{self, EventCriteria, EventOrder};
use crate::views::{EVENTS_URI, ViewCounter, ViewWindow, event_uri};

/// Event lifecycle: creation, moderation, listings and the owner's view of
/// participation requests.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    requests: Arc<dyn RequestRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    assembler: EventAssembler,
    views: ViewCounter,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        requests: Arc<dyn RequestRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        views: ViewCounter,
    ) -> Self {
        let assembler = EventAssembler::new(
            Arc::clone(&requests),
            Arc::clone(&users),
            Arc::clone(&categories),
            views.clone(),
        );
        Self {
            events,
            requests,
            users,
            categories,
            assembler,
            views,
        }
    }

    async fn find_user(&self, user_id: i64) -> EventResult<User> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(EventError::user_not_found(user_id))
    }

    async fn find_category(&self, category_id: i64) -> EventResult<Category> {
        self.categories
            .get_by_id(category_id)
            .await?
            .ok_or(EventError::category_not_found(category_id))
    }

    async fn find_event(&self, event_id: i64) -> EventResult<Event> {
        self.events
            .get_by_id(event_id)
            .await?
            .ok_or(EventError::event_not_found(event_id))
    }

    /// Someone else's event looks exactly like a missing one.
    async fn owned_event(&self, user_id: i64, event_id: i64) -> EventResult<Event> {
        self.events
            .get_by_id(event_id)
            .await?
            .filter(|e| e.is_owned_by(user_id))
            .ok_or(EventError::event_not_found(event_id))
    }

    pub async fn add_event(&self, user_id: i64, draft: NewEvent) -> EventResult<EventFull> {
        draft.validate()?;

        let initiator = self.find_user(user_id).await?;
        let category = self.find_category(draft.category).await?;
        let now = Utc::now();
        moderation::check_event_date(draft.event_date, now, USER_LEAD_HOURS)?;

        let event = self
            .events
            .create(Event {
                id: 0,
                annotation: draft.annotation,
                description: draft.description,
                category_id: category.id,
                initiator_id: initiator.id,
                event_date: draft.event_date,
                location: draft.location,
                paid: draft.paid.unwrap_or(false),
                participant_limit: draft.participant_limit.unwrap_or(0),
                request_moderation: draft.request_moderation.unwrap_or(true),
                title: draft.title,
                state: EventState::Pending,
                created_on: now,
                published_on: None,
            })
            .await?;

        Ok(EventFull::new(event, category, UserShort::from(&initiator), 0, 0))
    }

    pub async fn list_user_events(&self, user_id: i64, page: PageParams) -> EventResult<Vec<EventShort>> {
        self.find_user(user_id).await?;

        let events = self
            .events
            .search(&EventCriteria::initiated_by(user_id), page.offset(), page.limit())
            .await?;
        self.assembler.shorts(events, ViewWindow::SinceCreated).await
    }

    pub async fn get_user_event(&self, user_id: i64, event_id: i64) -> EventResult<EventFull> {
        let event = self.owned_event(user_id, event_id).await?;
        self.assembler.full(event).await
    }

    pub async fn update_event_by_user(
        &self,
        user_id: i64,
        event_id: i64,
        patch: UpdateEventUserRequest,
    ) -> EventResult<EventFull> {
        patch.validate()?;

        let mut event = self.owned_event(user_id, event_id).await?;
        let state = moderation::user_transition(event.state, patch.state_action)?;
        if let Some(date) = patch.changes.event_date {
            moderation::check_event_date(date, Utc::now(), USER_LEAD_HOURS)?;
        }
        if let Some(category_id) = patch.changes.category {
            self.find_category(category_id).await?;
        }

        let read_state = event.state;
        patch.changes.apply_to(&mut event);
        event.state = state;

        let saved = self.events.save(event, read_state).await?;
        tracing::info!(event_id, user_id, state = %saved.state, "Event updated by initiator");
        self.assembler.full(saved).await
    }

    pub async fn update_event_by_admin(
        &self,
        event_id: i64,
        patch: UpdateEventAdminRequest,
    ) -> EventResult<EventFull> {
        patch.validate()?;

        let mut event = self.find_event(event_id).await?;
        let now = Utc::now();
        if let Some(date) = patch.changes.event_date {
            moderation::check_event_date(date, now, ADMIN_LEAD_HOURS)?;
        }
        if let Some(category_id) = patch.changes.category {
            self.find_category(category_id).await?;
        }
        let state = moderation::admin_transition(event.state, patch.state_action)?;

        let read_state = event.state;
        patch.changes.apply_to(&mut event);
        event.state = state;
        if patch.state_action == Some(AdminStateAction::PublishEvent) {
            event.published_on = Some(now);
        }

        let saved = self.events.save(event, read_state).await?;
        tracing::info!(event_id, state = %saved.state, "Event updated by admin");
        self.assembler.full(saved).await
    }

    pub async fn search_admin_events(
        &self,
        query: AdminEventQuery,
        page: PageParams,
    ) -> EventResult<Vec<EventFull>> {
        let range_start = search::parse_date(query.range_start.as_deref(), "rangeStart")?;
        let range_end = search::parse_date(query.range_end.as_deref(), "rangeEnd")?;
        search::check_range(range_start, range_end)?;

        let criteria = EventCriteria {
            initiators: query.users,
            states: search::parse_states(&query.states)?,
            categories: query.categories,
            range_start,
            range_end,
            ..EventCriteria::default()
        };

        let events = self
            .events
            .search(&criteria, page.offset(), page.limit())
            .await?;
        self.assembler.fulls(events).await
    }

    pub async fn get_public_events(
        &self,
        query: PublicEventQuery,
        page: PageParams,
        client_ip: &str,
    ) -> EventResult<Vec<EventShort>> {
        self.views.record(EVENTS_URI, client_ip);

        let mut range_start = search::parse_date(query.range_start.as_deref(), "rangeStart")?;
        let range_end = search::parse_date(query.range_end.as_deref(), "rangeEnd")?;
        let sort = search::parse_sort(query.sort.as_deref())?;
        if range_start.is_none() && range_end.is_none() {
            range_start = Some(Utc::now());
        }
        search::check_range(range_start, range_end)?;

        let criteria = EventCriteria {
            states: vec![EventState::Published],
            categories: query.categories,
            paid: query.paid,
            range_start,
            range_end,
            order: match sort {
                Some(EventSort::EventDate) => EventOrder::EventDate,
                _ => EventOrder::Id,
            },
            ..EventCriteria::default()
        }
        .with_text(query.text.as_deref());

        let events = self
            .events
            .search(&criteria, page.offset(), page.limit())
            .await?;
        let listing = self.assembler.load(&events, ViewWindow::SinceCreated).await?;

        let mut shorts = events
            .into_iter()
            .filter(|e| !(query.only_available && e.is_full(listing.confirmed(e.id))))
            .map(|e| listing.short(e))
            .collect::<EventResult<Vec<_>>>()?;

        if sort == Some(EventSort::Views) {
            shorts.sort_by(|a, b| b.views.cmp(&a.views));
        }
        Ok(shorts)
    }

    pub async fn get_public_event(&self, event_id: i64, client_ip: &str) -> EventResult<EventFull> {
        self.views.record(event_uri(event_id), client_ip);

        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .filter(|e| e.state == EventState::Published)
            .ok_or(EventError::event_not_found(event_id))?;
        self.assembler.full(event).await
    }

    pub async fn list_event_requests(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> EventResult<Vec<ParticipationRequest>> {
        self.owned_event(user_id, event_id).await?;
        self.requests.find_by_event(event_id).await
    }

    pub async fn change_request_status(
        &self,
        user_id: i64,
        event_id: i64,
        update: StatusUpdateRequest,
    ) -> EventResult<StatusUpdateResult> {
        update.validate()?;

        self.owned_event(user_id, event_id).await?;
        moderation::check_target(update.status)?;
        self.requests
            .change_statuses(event_id, &update.request_ids, update.status)
            .await
    }
}
