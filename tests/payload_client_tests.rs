// Tests for the Payload CMS record store client against a mock server

use mockito::Matcher;
use tindog_algo::services::{PayloadClient, PayloadCollections, RecordStore, RecordStoreError};

fn client_for(server: &mockito::ServerGuard) -> PayloadClient {
    PayloadClient::new(
        server.url(),
        "test_key".to_string(),
        PayloadCollections {
            veterinarians: "veterinarians".to_string(),
            bookings: "bookings".to_string(),
            dogs: "dogs".to_string(),
        },
        200,
        50.0,
    )
    .unwrap()
}

fn dog_doc(id: &str, owner: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Dog {}", id),
        "owner": owner,
        "size": "medium",
        "birthDate": "2021-04-10",
        "activityLevel": "high",
        "temperament": ["friendly", "playful"],
        "gender": "maschio",
        "ownerLocation": {"latitude": 45.4642, "longitude": 9.1900},
        "isActive": true
    })
}

#[tokio::test]
async fn test_get_schedule_parses_working_hours() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/veterinarians")
        .match_query(Matcher::UrlEncoded(
            "where[id][equals]".into(),
            "vet_1".into(),
        ))
        .match_header("authorization", "users API-Key test_key")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "docs": [{
                    "id": "vet_1",
                    "workingHours": [
                        {"dayOfWeek": 1, "startTime": "09:00", "endTime": "12:00"},
                        {"dayOfWeek": 3, "startTime": "14:00", "endTime": "18:00", "isAvailable": false}
                    ]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let schedule = client.get_schedule("vet_1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(schedule.rules.len(), 2);
    assert_eq!(schedule.rules[0].day_of_week, 1);
    assert!(schedule.rules[0].is_available);
    assert!(!schedule.rules[1].is_available);
}

#[tokio::test]
async fn test_get_schedule_unknown_vet_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/veterinarians")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"docs": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_schedule("missing").await.unwrap_err();

    assert!(matches!(err, RecordStoreError::NotFound(_)));
}

#[tokio::test]
async fn test_get_booked_intervals_filters_by_day() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/bookings")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("where[veterinarian][equals]".into(), "vet_1".into()),
            Matcher::UrlEncoded("where[status][not_equals]".into(), "cancelled".into()),
            Matcher::UrlEncoded(
                "where[startTime][greater_than_equal]".into(),
                "2024-03-04T00:00:00.000Z".into(),
            ),
            Matcher::UrlEncoded(
                "where[startTime][less_than]".into(),
                "2024-03-05T00:00:00.000Z".into(),
            ),
        ]))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "docs": [
                    {"startTime": "2024-03-04T09:00:00.000Z", "durationMinutes": 30},
                    {"startTime": "2024-03-04T10:30:00.000Z", "durationMinutes": 60}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let intervals = client.get_booked_intervals("vet_1", date).await.unwrap();

    mock.assert_async().await;
    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].duration_minutes, 30);
    assert_eq!(
        intervals[1].end(),
        "2024-03-04T11:30:00Z"
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap()
    );
}

#[tokio::test]
async fn test_get_dog_parses_profile() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/dogs")
        .match_query(Matcher::UrlEncoded(
            "where[id][equals]".into(),
            "dog_1".into(),
        ))
        .with_status(200)
        .with_body(serde_json::json!({"docs": [dog_doc("dog_1", "owner_1")]}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let dog = client.get_dog("dog_1").await.unwrap();

    assert_eq!(dog.dog_id, "dog_1");
    assert_eq!(dog.owner_id, "owner_1");
    assert_eq!(dog.temperament, vec!["friendly", "playful"]);
    assert!(dog.owner_location.is_some());
}

#[tokio::test]
async fn test_query_candidates_excludes_requested_ids() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/dogs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("where[isActive][equals]".into(), "true".into()),
            Matcher::UrlEncoded("where[owner][not_equals]".into(), "owner_1".into()),
        ]))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "docs": [
                    dog_doc("dog_2", "owner_2"),
                    dog_doc("dog_3", "owner_3"),
                    dog_doc("dog_4", "owner_4")
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let subject: tindog_algo::DogProfile =
        serde_json::from_value(dog_doc("dog_1", "owner_1")).unwrap();

    let candidates = client
        .query_match_candidates(&subject, &["dog_3".to_string()])
        .await
        .unwrap();

    let ids: Vec<_> = candidates.iter().map(|d| d.dog_id.as_str()).collect();
    assert_eq!(ids, vec!["dog_2", "dog_4"]);
}

#[tokio::test]
async fn test_server_error_surfaces_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/dogs")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_dog("dog_1").await.unwrap_err();

    assert!(matches!(err, RecordStoreError::ApiError(_)));
}
