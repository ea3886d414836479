//! PostgreSQL integration tests for hit storage.

use chrono::{Duration, Utc};
use domain_stats::*;
use test_utils::TestDatabase;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_save_and_aggregate() {
    let db = TestDatabase::stats().await;
    let repo = PgHitRepository::new(db.connection());
    let now = Utc::now();

    for (uri, ip) in [
        ("/events/1", "10.0.0.1"),
        ("/events/1", "10.0.0.1"),
        ("/events/1", "10.0.0.2"),
        ("/events/2", "10.0.0.3"),
    ] {
        let saved = repo
            .save(EndpointHit::new("ewm-main-service", uri, ip, now))
            .await
            .unwrap();
        assert!(saved.id.is_some());
    }

    let start = now - Duration::minutes(1);
    let end = now + Duration::minutes(1);

    let all = repo.aggregate(start, end, &[], false).await.unwrap();
    assert_eq!(all[0].uri, "/events/1");
    assert_eq!(all[0].hits, 3);

    let uris = vec!["/events/1".to_string()];
    let unique = repo.aggregate(start, end, &uris, true).await.unwrap();
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].hits, 2);

    let outside = repo
        .aggregate(end, end + Duration::hours(1), &[], false)
        .await
        .unwrap();
    assert!(outside.is_empty());
}
