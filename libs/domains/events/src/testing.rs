//! Fixtures shared by the unit tests of this crate.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain_categories::{CategoryRepository, InMemoryCategoryRepository, NewCategory};
use domain_stats::{StatsResult, ViewStatsClient};
use domain_users::{InMemoryUserRepository, NewUser, UserRepository};
use std::collections::HashMap;

use crate::models::{Event, EventState, Location};

mockall::mock! {
    pub StatsClient {}

    #[async_trait]
    impl ViewStatsClient for StatsClient {
        async fn record_view(&self, uri: &str, ip: &str, timestamp: DateTime<Utc>) -> StatsResult<()>;

        async fn aggregate_views(
            &self,
            uris: &[String],
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            unique: bool,
        ) -> StatsResult<HashMap<String, i64>>;
    }
}

/// Stats client that records nothing and reports no views.
pub fn quiet_stats() -> MockStatsClient {
    let mut client = MockStatsClient::new();
    client.expect_record_view().returning(|_, _, _| Ok(()));
    client
        .expect_aggregate_views()
        .returning(|_, _, _, _| Ok(HashMap::new()));
    client
}

/// Pending event in category 1, three days ahead.
pub fn event(id: i64, initiator_id: i64) -> Event {
    Event {
        id,
        annotation: "An annotation that is long enough".into(),
        description: "A description that is long enough".into(),
        category_id: 1,
        initiator_id,
        event_date: Utc::now() + Duration::days(3),
        location: Location { lat: 55.75, lon: 37.62 },
        paid: false,
        participant_limit: 0,
        request_moderation: true,
        title: "Meetup".into(),
        state: EventState::Pending,
        created_on: Utc::now(),
        published_on: None,
    }
}

/// Published event with the given limit and moderation flag.
pub fn published(initiator_id: i64, limit: i32, moderation: bool) -> Event {
    Event {
        participant_limit: limit,
        request_moderation: moderation,
        state: EventState::Published,
        published_on: Some(Utc::now()),
        ..event(0, initiator_id)
    }
}

/// Users 1..=count named user1, user2, ..
pub async fn users(count: usize) -> InMemoryUserRepository {
    let repo = InMemoryUserRepository::new();
    for i in 1..=count {
        repo.create(NewUser {
            name: format!("user{}", i),
            email: format!("user{}@example.com", i),
        })
        .await
        .unwrap();
    }
    repo
}

/// Categories 1..=count named cat1, cat2, ..
pub async fn categories(count: usize) -> InMemoryCategoryRepository {
    let repo = InMemoryCategoryRepository::new();
    for i in 1..=count {
        repo.create(NewCategory {
            name: format!("cat{}", i),
        })
        .await
        .unwrap();
    }
    repo
}
