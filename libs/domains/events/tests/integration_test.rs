//! PostgreSQL integration tests for the Events domain.

use chrono::{Duration, Utc};
use domain_categories::{CategoryRepository, NewCategory, PgCategoryRepository};
use domain_events::*;
use domain_users::{NewUser, PgUserRepository, UserRepository};
use test_utils::{TestDataBuilder, TestDatabase};

struct Seeded {
    store: PgEventStore,
    initiator: i64,
    others: Vec<i64>,
    category: i64,
}

async fn seed(db: &TestDatabase, test: &str, others: usize) -> Seeded {
    let data = TestDataBuilder::from_test_name(test);
    let users = PgUserRepository::new(db.connection());
    let categories = PgCategoryRepository::new(db.connection());

    let mut ids = Vec::new();
    for i in 0..=others {
        let user = users
            .create(NewUser {
                name: data.name("user", &i.to_string()),
                email: data.email(&format!("user{}", i)),
            })
            .await
            .unwrap();
        ids.push(user.id);
    }
    let category = categories
        .create(NewCategory {
            name: data.name("category", "main"),
        })
        .await
        .unwrap();

    Seeded {
        store: PgEventStore::new(db.connection()),
        initiator: ids[0],
        others: ids[1..].to_vec(),
        category: category.id,
    }
}

fn event(seeded: &Seeded, limit: i32, moderation: bool, state: EventState) -> Event {
    Event {
        id: 0,
        annotation: "Open air concert in the park".into(),
        description: "Bring a blanket and good mood".into(),
        category_id: seeded.category,
        initiator_id: seeded.initiator,
        event_date: Utc::now() + Duration::days(5),
        location: Location { lat: 55.75, lon: 37.62 },
        paid: false,
        participant_limit: limit,
        request_moderation: moderation,
        title: "Concert".into(),
        state,
        created_on: Utc::now(),
        published_on: None,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_event_round_trip_and_search() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_events_search", 0).await;

    let created = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();
    let fetched = EventRepository::get_by_id(&seeded.store, created.id).await.unwrap().unwrap();
    assert_eq!(fetched.state, EventState::Published);
    assert_eq!(fetched.location, Location { lat: 55.75, lon: 37.62 });

    let criteria = EventCriteria {
        states: vec![EventState::Published],
        categories: vec![seeded.category],
        range_start: Some(Utc::now()),
        ..EventCriteria::default()
    }
    .with_text(Some("BLANKET"));
    let found = seeded.store.search(&criteria, 0, 10).await.unwrap();
    assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![created.id]);

    let past = EventCriteria {
        range_end: Some(Utc::now()),
        ..EventCriteria::default()
    };
    assert!(seeded.store.search(&past, 0, 10).await.unwrap().is_empty());
    assert!(seeded.store.exists_by_category(seeded.category).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_save_keeps_initiator() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_events_save", 1).await;
    let created = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Pending))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.initiator_id = seeded.others[0];
    changed.title = "Renamed".into();
    changed.state = EventState::Canceled;

    let saved = seeded.store.save(changed, EventState::Pending).await.unwrap();
    assert_eq!(saved.initiator_id, seeded.initiator);
    assert_eq!(saved.title, "Renamed");
    assert_eq!(saved.state, EventState::Canceled);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_confirm_reaching_limit_rejects_rest() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_requests_limit", 3).await;
    let event = seeded
        .store
        .create(event(&seeded, 2, true, EventState::Published))
        .await
        .unwrap();

    let mut requests = Vec::new();
    for &user in &seeded.others {
        requests.push(seeded.store.submit(user, event.id, Utc::now()).await.unwrap());
    }
    assert!(requests.iter().all(|r| r.status == RequestStatus::Pending));

    let result = seeded
        .store
        .change_statuses(
            event.id,
            &[requests[0].id, requests[1].id],
            RequestStatus::Confirmed,
        )
        .await
        .unwrap();
    assert_eq!(result.confirmed_requests.len(), 2);
    assert_eq!(result.rejected_requests.len(), 1);
    assert_eq!(result.rejected_requests[0].id, requests[2].id);

    let confirmed = seeded.store.count_confirmed(&[event.id]).await.unwrap();
    assert_eq!(confirmed.get(&event.id), Some(&2));

    let err = seeded
        .store
        .change_statuses(event.id, &[requests[2].id], RequestStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, EventError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_concurrent_submits_respect_limit() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_requests_race", 6).await;
    let event = seeded
        .store
        .create(event(&seeded, 2, false, EventState::Published))
        .await
        .unwrap();

    let handles: Vec<_> = seeded
        .others
        .iter()
        .map(|&user| {
            let store = seeded.store.clone();
            let event_id = event.id;
            tokio::spawn(async move { store.submit(user, event_id, Utc::now()).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 2);

    let confirmed = seeded.store.count_confirmed(&[event.id]).await.unwrap();
    assert_eq!(confirmed.get(&event.id), Some(&2));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_cancel_then_resubmit() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_requests_cancel", 1).await;
    let event = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();
    let requester = seeded.others[0];

    let first = seeded.store.submit(requester, event.id, Utc::now()).await.unwrap();
    let canceled = seeded.store.cancel(first.id).await.unwrap().unwrap();
    assert_eq!(canceled.status, RequestStatus::Canceled);

    let second = seeded.store.submit(requester, event.id, Utc::now()).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(seeded.store.find_by_requester(requester).await.unwrap().len(), 2);
    assert!(seeded.store.cancel(i64::MAX).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_compilation_links() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_compilations", 0).await;
    let repo = PgCompilationRepository::new(db.connection());
    let a = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();
    let b = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();

    let created = repo
        .create(Compilation {
            id: 0,
            title: "Weekend".into(),
            pinned: true,
            event_ids: vec![a.id, b.id],
        })
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.event_ids = vec![b.id];
    changed.pinned = false;
    repo.save(changed).await.unwrap();

    let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.event_ids, vec![b.id]);
    assert!(repo.list(Some(true), 0, 10).await.unwrap().is_empty());
    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_comments_newest_first() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_comments", 1).await;
    let repo = PgCommentRepository::new(db.connection());
    let event = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();

    let base = Utc::now();
    for minutes in [1, 3, 2] {
        repo.create(Comment {
            id: 0,
            text: format!("after {} minutes", minutes),
            author_id: seeded.others[0],
            event_id: event.id,
            status: CommentStatus::Published,
            created_on: base + Duration::minutes(minutes),
            updated_on: None,
        })
        .await
        .unwrap();
    }

    let feed = repo
        .find_by_event(event.id, CommentStatus::Published, 0, 10)
        .await
        .unwrap();
    let texts: Vec<&str> = feed.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["after 3 minutes", "after 2 minutes", "after 1 minutes"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_save_refuses_stale_state() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_events_stale", 0).await;
    let created = seeded
        .store
        .create(event(&seeded, 0, true, EventState::Pending))
        .await
        .unwrap();

    let mut published = created.clone();
    published.state = EventState::Published;
    published.published_on = Some(Utc::now());
    let published = seeded.store.save(published, EventState::Pending).await.unwrap();

    let mut stale = created.clone();
    stale.state = EventState::Canceled;
    let err = seeded.store.save(stale, EventState::Pending).await.unwrap_err();
    assert!(matches!(err, EventError::Conflict(_)));

    let stored = EventRepository::get_by_id(&seeded.store, created.id).await.unwrap().unwrap();
    assert_eq!(stored.state, EventState::Published);
    assert_eq!(stored.published_on, published.published_on);

    let mut missing = created;
    missing.id = i64::MAX;
    assert!(matches!(
        seeded.store.save(missing, EventState::Pending).await,
        Err(EventError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_cancel_racing_confirmation_stays_canceled() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_requests_cancel_race", 5).await;
    let event = seeded
        .store
        .create(event(&seeded, 10, true, EventState::Published))
        .await
        .unwrap();

    for &requester in &seeded.others {
        let request = seeded.store.submit(requester, event.id, Utc::now()).await.unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        let (event_id, request_id) = (event.id, request.id);

        let store = seeded.store.clone();
        let confirm = tokio::spawn(async move {
            store
                .change_statuses(event_id, &[request_id], RequestStatus::Confirmed)
                .await
        });
        let store = seeded.store.clone();
        let cancel = tokio::spawn(async move { store.cancel(request_id).await });

        let canceled = cancel.await.unwrap().unwrap().unwrap();
        assert_eq!(canceled.status, RequestStatus::Canceled);
        match confirm.await.unwrap() {
            Ok(_) | Err(EventError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }

        let stored = RequestRepository::get_by_id(&seeded.store, request_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Canceled);
    }

    let confirmed = seeded.store.count_confirmed(&[event.id]).await.unwrap();
    assert_eq!(confirmed.get(&event.id), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_text_search_treats_wildcards_literally() {
    let db = TestDatabase::new().await;
    let seeded = seed(&db, "pg_events_wildcards", 0).await;

    let mut discounted = event(&seeded, 0, true, EventState::Published);
    discounted.annotation = "Tickets 100% refundable until the day before".into();
    let discounted = seeded.store.create(discounted).await.unwrap();
    seeded
        .store
        .create(event(&seeded, 0, true, EventState::Published))
        .await
        .unwrap();

    let search = |text: &'static str| {
        let store = seeded.store.clone();
        async move {
            let criteria = EventCriteria::default().with_text(Some(text));
            store
                .search(&criteria, 0, 10)
                .await
                .unwrap()
                .into_iter()
                .map(|e| e.id)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(search("100%").await, vec![discounted.id]);
    assert_eq!(search("%").await, vec![discounted.id]);
    assert!(search("_").await.is_empty());
}
