use chrono::Utc;
use domain_users::UserRepository;
use std::sync::Arc;

use crate::error::{EventError, EventResult};
use crate::models::ParticipationRequest;
use crate::repository::RequestRepository;

/// A user's side of participation: asking to join, backing out, listing.
#[derive(Clone)]
pub struct RequestService {
    requests: Arc<dyn RequestRepository>,
    users: Arc<dyn UserRepository>,
}

impl RequestService {
    pub fn new(requests: Arc<dyn RequestRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { requests, users }
    }

    async fn ensure_user(&self, user_id: i64) -> EventResult<()> {
        self.users
            .get_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(EventError::user_not_found(user_id))
    }

    pub async fn add_request(&self, user_id: i64, event_id: i64) -> EventResult<ParticipationRequest> {
        self.ensure_user(user_id).await?;
        self.requests.submit(user_id, event_id, Utc::now()).await
    }

    /// Idempotent; a canceled request never frees a confirmed seat for someone else.
    pub async fn cancel_request(&self, user_id: i64, request_id: i64) -> EventResult<ParticipationRequest> {
        self.requests
            .get_by_id(request_id)
            .await?
            .filter(|r| r.requester_id == user_id)
            .ok_or(EventError::request_not_found(request_id))?;

        self.requests
            .cancel(request_id)
            .await?
            .ok_or(EventError::request_not_found(request_id))
    }

    pub async fn list_user_requests(&self, user_id: i64) -> EventResult<Vec<ParticipationRequest>> {
        self.ensure_user(user_id).await?;
        self.requests.find_by_requester(user_id).await
    }
}
